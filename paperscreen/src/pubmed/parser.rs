use crate::error::{Result, ScreenError};
use crate::pubmed::models::{Author, PubMedArticle};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufReader;
use tracing::{debug, warn};

/// Parser for E-utilities XML responses
pub struct PubMedXmlParser;

impl PubMedXmlParser {
    /// Parse the PMID list from an ESearch XML response
    ///
    /// Collects the text of every `<Id>` element in document order.
    pub fn parse_id_list(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
        reader.config_mut().trim_text(true);

        let mut ids = Vec::new();
        let mut in_id = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"Id" => in_id = true,
                Ok(Event::End(ref e)) if e.name().as_ref() == b"Id" => in_id = false,
                Ok(Event::Text(e)) if in_id => {
                    let text = unescape_text(&e)?;
                    if !text.trim().is_empty() {
                        ids.push(text.trim().to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ScreenError::XmlError {
                        message: format!("XML parsing error: {}", e),
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(ids)
    }

    /// Parse every article from an EFetch XML response
    ///
    /// An article record without a PMID is logged and skipped without
    /// aborting the batch. A malformed document is a hard error.
    pub fn parse_article_set(xml: &str) -> Result<Vec<PubMedArticle>> {
        let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
        reader.config_mut().trim_text(true);

        let mut articles: Vec<PubMedArticle> = Vec::new();

        // Per-article state
        let mut in_article = false;
        let mut pmid = String::new();
        let mut pmid_done = false;
        let mut in_pmid = false;
        let mut title = String::new();
        let mut title_done = false;
        let mut in_title = false;
        let mut year = String::new();
        let mut month = String::new();
        let mut day = String::new();
        let mut pub_date_seen = false;
        let mut pub_date_done = false;
        let mut in_pub_date = false;
        let mut in_year = false;
        let mut in_month = false;
        let mut in_day = false;
        let mut authors: Vec<Author> = Vec::new();
        let mut affiliations: Vec<String> = Vec::new();

        // Per-author state
        let mut in_author_list = false;
        let mut in_author = false;
        let mut in_fore_name = false;
        let mut in_last_name = false;
        let mut in_collective_name = false;
        let mut in_affiliation_info = false;
        let mut in_affiliation = false;
        let mut current_fore = String::new();
        let mut current_last = String::new();
        let mut current_collective = String::new();
        let mut current_author_affiliation: Option<String> = None;
        let mut current_affiliation_text = String::new();

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"PubmedArticle" => {
                        in_article = true;
                        pmid.clear();
                        pmid_done = false;
                        title.clear();
                        title_done = false;
                        year.clear();
                        month.clear();
                        day.clear();
                        pub_date_seen = false;
                        pub_date_done = false;
                        authors.clear();
                        affiliations.clear();
                    }
                    // First PMID only; later ones belong to references and
                    // comment links
                    b"PMID" if in_article && !pmid_done => in_pmid = true,
                    b"ArticleTitle" if in_article && !title_done => in_title = true,
                    b"PubDate" if in_article && !pub_date_done => {
                        in_pub_date = true;
                        pub_date_seen = true;
                    }
                    b"Year" if in_pub_date => in_year = true,
                    b"Month" if in_pub_date => in_month = true,
                    b"Day" if in_pub_date => in_day = true,
                    b"AuthorList" if in_article => in_author_list = true,
                    b"Author" if in_author_list => {
                        in_author = true;
                        current_fore.clear();
                        current_last.clear();
                        current_collective.clear();
                        current_author_affiliation = None;
                    }
                    b"ForeName" if in_author => in_fore_name = true,
                    b"LastName" if in_author => in_last_name = true,
                    b"CollectiveName" if in_author => in_collective_name = true,
                    b"AffiliationInfo" if in_author => in_affiliation_info = true,
                    b"Affiliation" if in_article => {
                        in_affiliation = true;
                        current_affiliation_text.clear();
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"PMID" => {
                        if in_pmid {
                            in_pmid = false;
                            pmid_done = true;
                        }
                    }
                    b"ArticleTitle" => {
                        if in_title {
                            in_title = false;
                            title_done = true;
                        }
                    }
                    b"PubDate" => {
                        if in_pub_date {
                            in_pub_date = false;
                            pub_date_done = true;
                        }
                    }
                    b"Year" => in_year = false,
                    b"Month" => in_month = false,
                    b"Day" => in_day = false,
                    b"ForeName" => in_fore_name = false,
                    b"LastName" => in_last_name = false,
                    b"CollectiveName" => in_collective_name = false,
                    b"Affiliation" => {
                        if in_affiliation {
                            in_affiliation = false;
                            let text = current_affiliation_text.trim().to_string();
                            if !text.is_empty() {
                                if in_affiliation_info
                                    && in_author
                                    && current_author_affiliation.is_none()
                                {
                                    current_author_affiliation = Some(text.clone());
                                }
                                affiliations.push(text);
                            }
                        }
                    }
                    b"AffiliationInfo" => in_affiliation_info = false,
                    b"Author" => {
                        if in_author {
                            in_author = false;
                            authors.push(Author {
                                fore_name: non_empty(&current_fore),
                                last_name: non_empty(&current_last),
                                collective_name: non_empty(&current_collective),
                                affiliation: current_author_affiliation.take(),
                            });
                        }
                    }
                    b"AuthorList" => in_author_list = false,
                    b"PubmedArticle" => {
                        in_article = false;
                        let pmid_text = pmid.trim();
                        if pmid_text.is_empty() {
                            warn!("article record has no PMID, skipping");
                        } else {
                            articles.push(PubMedArticle {
                                pmid: pmid_text.to_string(),
                                title: render_title(&title),
                                pub_date: render_pub_date(pub_date_seen, &year, &month, &day),
                                authors: std::mem::take(&mut authors),
                                affiliations: std::mem::take(&mut affiliations),
                            });
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    let text = unescape_text(&e)?;
                    if in_pmid {
                        pmid.push_str(&text);
                    } else if in_title {
                        title.push_str(&text);
                    } else if in_year {
                        year.push_str(&text);
                    } else if in_month {
                        month.push_str(&text);
                    } else if in_day {
                        day.push_str(&text);
                    } else if in_fore_name {
                        current_fore.push_str(&text);
                    } else if in_last_name {
                        current_last.push_str(&text);
                    } else if in_collective_name {
                        current_collective.push_str(&text);
                    } else if in_affiliation {
                        current_affiliation_text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ScreenError::XmlError {
                        message: format!("XML parsing error: {}", e),
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        debug!(articles = articles.len(), "parsed EFetch response");
        Ok(articles)
    }
}

fn unescape_text(e: &quick_xml::events::BytesText) -> Result<String> {
    e.unescape()
        .map(|t| t.into_owned())
        .map_err(|_| ScreenError::XmlError {
            message: "Failed to decode XML text".to_string(),
        })
}

fn non_empty(buf: &str) -> Option<String> {
    let trimmed = buf.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn render_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        "No title".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render the publication date incrementally: year, then -month, then -day.
/// "Unknown" only when the record has no PubDate element at all.
fn render_pub_date(pub_date_seen: bool, year: &str, month: &str, day: &str) -> String {
    if !pub_date_seen {
        return "Unknown".to_string();
    }
    let mut date = String::new();
    if !year.is_empty() {
        date.push_str(year.trim());
    }
    if !month.is_empty() {
        date.push('-');
        date.push_str(month.trim());
    }
    if !day.is_empty() {
        date.push('-');
        date.push_str(day.trim());
    }
    date
}
