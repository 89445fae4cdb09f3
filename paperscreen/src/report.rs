//! Output row assembly and CSV report writing

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pubmed::models::PubMedArticle;
use crate::screen::{extract_email, is_non_academic, EMAIL_NOT_FOUND};

/// One output row: a single non-academic author of one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub pub_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub author_name: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliation: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

/// Build output rows for every non-academic author in the fetched articles
///
/// The corresponding email is article-scoped: the first affiliation in
/// document order yielding a match supplies the email for every row the
/// article emits, with [`EMAIL_NOT_FOUND`] as the fallback. Authors without
/// an affiliation of their own emit nothing. Pure function; calling it twice
/// on the same input yields identical rows.
pub fn assemble_rows(articles: &[PubMedArticle]) -> Vec<PaperRow> {
    let mut rows = Vec::new();

    for article in articles {
        let email = article_email(article);

        for author in &article.authors {
            let affiliation = match author.affiliation.as_deref() {
                Some(affiliation) => affiliation,
                None => continue,
            };
            debug!(affiliation = %affiliation, "checking author affiliation");
            if !is_non_academic(affiliation) {
                continue;
            }
            rows.push(PaperRow {
                pmid: article.pmid.clone(),
                title: article.title.clone(),
                pub_date: article.pub_date.clone(),
                author_name: author.display_name(),
                company_affiliation: affiliation.to_string(),
                corresponding_email: email.clone(),
            });
        }
    }

    rows
}

/// First email found in the article's affiliations, in document order
fn article_email(article: &PubMedArticle) -> String {
    for affiliation in &article.affiliations {
        debug!(affiliation = %affiliation, "scanning affiliation for email");
        if let Some(email) = extract_email(affiliation) {
            return email;
        }
    }
    EMAIL_NOT_FOUND.to_string()
}

/// Write rows to a CSV file with the fixed six-column header
///
/// An empty row set is a warned no-op: the destination is not created or
/// modified.
pub fn write_csv(rows: &[PaperRow], path: &Path) -> Result<()> {
    if rows.is_empty() {
        warn!(path = %path.display(), "no rows to write, leaving destination untouched");
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(rows = rows.len(), path = %path.display(), "saved results");
    Ok(())
}
