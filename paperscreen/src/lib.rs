//! # paperscreen
//!
//! Screen PubMed search results for authors with non-academic (commercial)
//! affiliations and report them as CSV rows.
//!
//! The pipeline is sequential: search for PMIDs, bulk-fetch article
//! metadata, classify each author's affiliation, extract an article-scoped
//! contact email, and write one row per qualifying author.
//!
//! ## Quick start
//!
//! ```no_run
//! use paperscreen::{assemble_rows, write_csv, PubMedClient};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let ids = client.search_ids("diabetes treatment").await;
//!     if ids.is_empty() {
//!         return Ok(());
//!     }
//!
//!     let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
//!     let articles = client.fetch_articles(&id_refs).await?;
//!
//!     let rows = assemble_rows(&articles);
//!     write_csv(&rows, Path::new("output.csv"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error postures
//!
//! The two network stages deliberately differ: [`PubMedClient::search_ids`]
//! absorbs every failure into an empty result, while
//! [`PubMedClient::fetch_articles`] returns an error on transport failure.
//! The screening heuristics in [`screen`] never fail.

pub mod config;
pub mod error;
pub mod pubmed;
pub mod rate_limit;
pub mod report;
pub mod screen;

pub use config::ClientConfig;
pub use error::{Result, ScreenError};
pub use pubmed::{Author, PubMedArticle, PubMedClient};
pub use report::{assemble_rows, write_csv, PaperRow};
pub use screen::{extract_email, is_non_academic, EMAIL_NOT_FOUND};
