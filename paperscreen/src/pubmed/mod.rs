//! PubMed E-utilities client for searching and fetching article metadata

pub mod client;
pub mod models;
pub mod parser;

pub use client::PubMedClient;
pub use models::{Author, PubMedArticle};
pub use parser::PubMedXmlParser;
