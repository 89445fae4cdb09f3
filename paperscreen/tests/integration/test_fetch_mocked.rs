//! Mocked EFetch tests
//!
//! Unlike search, the fetch stage propagates transport failures. These
//! tests verify the bulk request, per-article skip behavior and the full
//! fetch-then-assemble path against wiremock responses.

use paperscreen::{assemble_rows, ClientConfig, PubMedClient, ScreenError, EMAIL_NOT_FOUND};
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Two articles: one with an industry author and an email-bearing
/// affiliation, one fully academic
const EFETCH_RESPONSE_TWO_ARTICLES: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">31978945</PMID>
            <Article>
                <Journal>
                    <JournalIssue>
                        <PubDate>
                            <Year>2023</Year>
                            <Month>Jun</Month>
                            <Day>05</Day>
                        </PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Trial of a novel kinase inhibitor</ArticleTitle>
                <AuthorList>
                    <Author>
                        <LastName>Jones</LastName>
                        <ForeName>Bob</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Institute of Molecular Biology, Springfield. bob.jones@imb.edu.</Affiliation>
                        </AffiliationInfo>
                    </Author>
                    <Author>
                        <LastName>Smith</LastName>
                        <ForeName>Alice</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Acme Pharma, Cambridge, MA</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation>
            <PMID Version="1">33515491</PMID>
            <Article>
                <Journal>
                    <JournalIssue>
                        <PubDate><Year>2021</Year></PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Population study of kinase expression</ArticleTitle>
                <AuthorList>
                    <Author>
                        <LastName>Chen</LastName>
                        <ForeName>Wei</ForeName>
                        <AffiliationInfo>
                            <Affiliation>Example University School of Medicine</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

const EFETCH_RESPONSE_MISSING_PMID: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation>
            <Article>
                <ArticleTitle>Record without an identifier</ArticleTitle>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation>
            <PMID>25760099</PMID>
            <Article>
                <ArticleTitle>Valid record</ArticleTitle>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

/// Helper to create a mock server with an EFetch response
async fn setup_efetch_mock(body: &str, status: u16) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/efetch\.fcgi.*"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body.to_string())
                .insert_header("content-type", "application/xml"),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

/// Helper to create a client pointing at a mock server
fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0); // High rate limit for tests

    PubMedClient::with_config(config)
}

#[tokio::test]
async fn test_fetch_parses_batch() {
    let mock_server = setup_efetch_mock(EFETCH_RESPONSE_TWO_ARTICLES, 200).await;
    let client = create_mock_client(&mock_server);

    let articles = client
        .fetch_articles(&["31978945", "33515491"])
        .await
        .expect("bulk fetch should succeed");

    assert_eq!(articles.len(), 2);

    let trial = articles.iter().find(|a| a.pmid == "31978945").unwrap();
    assert_eq!(trial.title, "Trial of a novel kinase inhibitor");
    assert_eq!(trial.pub_date, "2023-Jun-05");
    assert_eq!(trial.authors.len(), 2);

    let study = articles.iter().find(|a| a.pmid == "33515491").unwrap();
    assert_eq!(study.pub_date, "2021");
}

#[tokio::test]
async fn test_fetch_sends_one_bulk_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"/efetch\.fcgi.*"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "31978945,33515491"))
        .and(query_param("retmode", "xml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(EFETCH_RESPONSE_TWO_ARTICLES.to_string()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let articles = client
        .fetch_articles(&["31978945", "33515491"])
        .await
        .expect("bulk fetch should succeed");
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn test_fetch_server_error_propagates() {
    let mock_server = setup_efetch_mock("Internal Server Error", 500).await;
    let client = create_mock_client(&mock_server);

    let err = client.fetch_articles(&["31978945"]).await.unwrap_err();

    match err {
        ScreenError::ApiError { message } => assert!(message.contains("500")),
        other => panic!("expected ApiError, got {}", other),
    }
}

#[tokio::test]
async fn test_fetch_skips_article_missing_pmid() {
    let mock_server = setup_efetch_mock(EFETCH_RESPONSE_MISSING_PMID, 200).await;
    let client = create_mock_client(&mock_server);

    let articles = client
        .fetch_articles(&["25760099"])
        .await
        .expect("batch should survive one bad record");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].pmid, "25760099");
}

#[tokio::test]
async fn test_fetch_then_assemble_rows() {
    let mock_server = setup_efetch_mock(EFETCH_RESPONSE_TWO_ARTICLES, 200).await;
    let client = create_mock_client(&mock_server);

    let articles = client
        .fetch_articles(&["31978945", "33515491"])
        .await
        .expect("bulk fetch should succeed");
    let rows = assemble_rows(&articles);

    // Only the Acme Pharma author qualifies; the institute and university
    // authors are filtered out
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.pmid, "31978945");
    assert_eq!(row.title, "Trial of a novel kinase inhibitor");
    assert_eq!(row.pub_date, "2023-Jun-05");
    assert_eq!(row.author_name, "AliceSmith");
    assert_eq!(row.company_affiliation, "Acme Pharma, Cambridge, MA");
    // Email is article-scoped: it comes from the first affiliation with a
    // match, even though that author is academic
    assert_eq!(row.corresponding_email, "bob.jones@imb.edu");

    // Running assembly again over the same articles yields identical rows
    assert_eq!(assemble_rows(&articles), rows);
}

#[tokio::test]
async fn test_fetch_rows_email_sentinel_when_absent() {
    let body = EFETCH_RESPONSE_TWO_ARTICLES.replace("bob.jones@imb.edu.", "");
    let mock_server = setup_efetch_mock(&body, 200).await;
    let client = create_mock_client(&mock_server);

    let articles = client
        .fetch_articles(&["31978945", "33515491"])
        .await
        .expect("bulk fetch should succeed");
    let rows = assemble_rows(&articles);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].corresponding_email, EMAIL_NOT_FOUND);
}
