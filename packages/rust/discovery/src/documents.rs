//! PDF document enumeration on a season-index page.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use paddockdocs_shared::{DocumentRef, PaddockError, Result};

/// Discover PDF documents linked from a season-index page.
///
/// One HTTP GET; non-2xx or transport failures surface as
/// [`PaddockError::Fetch`]. Every anchor whose href ends in the literal
/// `.pdf` suffix is kept, in source-markup order. Relative hrefs are
/// resolved against the index page's URL. When `gp_filter` is given, only
/// documents whose filename contains one of the filter's spacing variants
/// (case-insensitively) are returned. No matching links is an empty result,
/// not an error.
#[instrument(skip_all, fields(url = %index_url, gp = gp_filter.unwrap_or("-")))]
pub async fn discover(
    client: &Client,
    index_url: &str,
    gp_filter: Option<&str>,
) -> Result<Vec<DocumentRef>> {
    let base = Url::parse(index_url)
        .map_err(|e| PaddockError::Fetch(format!("invalid index URL '{index_url}': {e}")))?;

    let body = crate::fetch_page(client, index_url).await?;
    let docs = extract_documents(&body, &base, gp_filter);

    info!(count = docs.len(), "documents discovered");
    Ok(docs)
}

/// Extract matching PDF links from an index page body.
fn extract_documents(body: &str, base: &Url, gp_filter: Option<&str>) -> Vec<DocumentRef> {
    let doc = Html::parse_document(body);
    let link_sel = Selector::parse("a[href]").expect("static selector");

    let variants = gp_filter.map(gp_name_variants);
    let mut docs = Vec::new();

    for el in doc.select(&link_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if !href.ends_with(".pdf") {
            continue;
        }

        let resolved = match base.join(href) {
            Ok(u) => u.to_string(),
            Err(e) => {
                debug!(href, error = %e, "unresolvable document href, skipping");
                continue;
            }
        };

        let doc_ref = DocumentRef::from_url(resolved);

        if let Some(variants) = &variants {
            let filename = doc_ref.filename.to_lowercase();
            if !variants.iter().any(|v| filename.contains(v.as_str())) {
                debug!(filename = %doc_ref.filename, "filename does not match GP filter");
                continue;
            }
        }

        docs.push(doc_ref);
    }

    docs
}

/// Lower-cased spacing variants of a Grand Prix name.
///
/// "Australian Grand Prix" yields the space, hyphen, and underscore forms;
/// a filename matches the filter if it contains any of them.
pub fn gp_name_variants(gp: &str) -> Vec<String> {
    let lower = gp.to_lowercase();
    [" ", "-", "_"]
        .iter()
        .map(|sep| lower.replace(' ', sep))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body>
        <a href="/sites/default/files/decision-document/australian-grand-prix-event-notes.pdf">Event notes</a>
        <a href="https://cdn.example/docs/bahrain_grand_prix_infringement-decision-1.pdf">Decision</a>
        <a href="/documents/season-2024">Season index</a>
        <a href="/sites/default/files/timing.PDF">Timing</a>
    </body></html>"#;

    fn base() -> Url {
        Url::parse("https://portal.example/documents/season-2024").unwrap()
    }

    #[test]
    fn keeps_only_lowercase_pdf_suffix_links() {
        let docs = extract_documents(INDEX, &base(), None);

        // ".PDF" is excluded: the suffix match is case-sensitive
        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[0].url,
            "https://portal.example/sites/default/files/decision-document/australian-grand-prix-event-notes.pdf"
        );
        assert_eq!(
            docs[1].url,
            "https://cdn.example/docs/bahrain_grand_prix_infringement-decision-1.pdf"
        );
    }

    #[test]
    fn preserves_source_order() {
        let docs = extract_documents(INDEX, &base(), None);
        assert_eq!(docs[0].filename, "australian-grand-prix-event-notes.pdf");
        assert_eq!(
            docs[1].filename,
            "bahrain_grand_prix_infringement-decision-1.pdf"
        );
    }

    #[test]
    fn gp_filter_matches_spacing_variants() {
        let docs = extract_documents(INDEX, &base(), Some("Australian Grand Prix"));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "australian-grand-prix-event-notes.pdf");

        let docs = extract_documents(INDEX, &base(), Some("Bahrain Grand Prix"));
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs[0].filename,
            "bahrain_grand_prix_infringement-decision-1.pdf"
        );

        let docs = extract_documents(INDEX, &base(), Some("Monaco Grand Prix"));
        assert!(docs.is_empty());
    }

    #[test]
    fn no_links_is_empty_not_error() {
        let docs = extract_documents("<html><body></body></html>", &base(), None);
        assert!(docs.is_empty());
    }

    #[test]
    fn variants_cover_space_hyphen_underscore() {
        let variants = gp_name_variants("Australian Grand Prix");
        assert!(variants.contains(&"australian grand prix".to_string()));
        assert!(variants.contains(&"australian-grand-prix".to_string()));
        assert!(variants.contains(&"australian_grand_prix".to_string()));
    }

    #[tokio::test]
    async fn discover_with_mock_server() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/documents/season-2024"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(&server)
            .await;

        let client = crate::build_client().unwrap();
        let url = format!("{}/documents/season-2024", server.uri());
        let docs = discover(&client, &url, Some("Bahrain Grand Prix"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs[0].filename,
            "bahrain_grand_prix_infringement-decision-1.pdf"
        );
    }

    #[tokio::test]
    async fn discover_http_error_propagates() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/documents/season-2024"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::build_client().unwrap();
        let url = format!("{}/documents/season-2024", server.uri());
        let err = discover(&client, &url, None).await.unwrap_err();
        assert!(matches!(err, PaddockError::Fetch(_)));
    }
}
