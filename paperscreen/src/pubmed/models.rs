use serde::{Deserialize, Serialize};

/// Article metadata extracted from an EFetch response
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PubMedArticle {
    /// PubMed ID
    pub pmid: String,
    /// Article title ("No title" when the record carries none)
    pub title: String,
    /// Publication date rendered as year, year-month or year-month-day;
    /// "Unknown" when the record has no PubDate element
    pub pub_date: String,
    /// Authors in document order
    pub authors: Vec<Author>,
    /// Every affiliation string in the article, in document order
    ///
    /// This includes author affiliations and is the search space for the
    /// article-scoped corresponding email.
    pub affiliations: Vec<String>,
}

/// One entry of an article's author list
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Author {
    /// Given name (ForeName)
    pub fore_name: Option<String>,
    /// Family name (LastName)
    pub last_name: Option<String>,
    /// Group authorship name (CollectiveName)
    pub collective_name: Option<String>,
    /// The author's own affiliation from AffiliationInfo
    pub affiliation: Option<String>,
}

impl Author {
    /// Display name for output rows
    ///
    /// Given and family name concatenated when both are present, family
    /// name alone, the collective name, or "Unknown".
    pub fn display_name(&self) -> String {
        match (&self.fore_name, &self.last_name) {
            (Some(fore), Some(last)) => format!("{}{}", fore, last),
            (None, Some(last)) => last.clone(),
            _ => self
                .collective_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}
