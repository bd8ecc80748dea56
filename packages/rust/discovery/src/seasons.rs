//! Season listing resolution.
//!
//! The portal's listing page carries one well-known `<select>` element whose
//! options map season labels to season-index URLs. The option with value "0"
//! is a placeholder, not a season.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use paddockdocs_shared::{PaddockError, Result, Season};

/// CSS selector for the portal's season `<select>` element.
const SEASON_SELECT: &str = "select#facetapi_select_facet_form_3";

/// Sentinel option value marking the non-season placeholder entry.
const PLACEHOLDER_VALUE: &str = "0";

/// Resolve the portal's season listing into an ordered season list.
///
/// One HTTP GET. Fails with [`PaddockError::Fetch`] on non-2xx/transport
/// errors and [`PaddockError::PageStructure`] when the season `<select>`
/// is missing. Option values are absolutized against the listing URL.
/// First-seen order is preserved; a duplicate label keeps its first URL.
#[instrument(skip_all, fields(url = %listing_url))]
pub async fn resolve_seasons(client: &Client, listing_url: &str) -> Result<Vec<Season>> {
    let base = Url::parse(listing_url)
        .map_err(|e| PaddockError::Fetch(format!("invalid listing URL '{listing_url}': {e}")))?;

    let body = crate::fetch_page(client, listing_url).await?;
    let seasons = parse_seasons(&body, &base)?;

    info!(count = seasons.len(), "seasons resolved");
    Ok(seasons)
}

/// Extract seasons from a listing page body.
fn parse_seasons(body: &str, base: &Url) -> Result<Vec<Season>> {
    let doc = Html::parse_document(body);
    let select_sel = Selector::parse(SEASON_SELECT).expect("static selector");
    let option_sel = Selector::parse("option").expect("static selector");

    let select = doc.select(&select_sel).next().ok_or_else(|| {
        PaddockError::page_structure(format!(
            "season select element '{SEASON_SELECT}' not found on the listing page"
        ))
    })?;

    let mut seasons: Vec<Season> = Vec::new();

    for option in select.select(&option_sel) {
        let Some(value) = option.value().attr("value") else {
            continue;
        };
        if value == PLACEHOLDER_VALUE {
            continue;
        }

        let label = option.text().collect::<String>().trim().to_string();
        if label.is_empty() {
            continue;
        }
        if seasons.iter().any(|s| s.label == label) {
            debug!(%label, "duplicate season label, keeping first");
            continue;
        }

        let index_url = match base.join(value) {
            Ok(u) => u.to_string(),
            Err(e) => {
                debug!(%label, value, error = %e, "unresolvable season URL, skipping");
                continue;
            }
        };

        seasons.push(Season::new(label, index_url));
    }

    Ok(seasons)
}

/// Find a season by year or full label (e.g. "2024" or "SEASON 2024").
pub fn find_season<'a>(seasons: &'a [Season], wanted: &str) -> Option<&'a Season> {
    seasons
        .iter()
        .find(|s| s.year == wanted || s.label == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<html><body>
        <select id="facetapi_select_facet_form_3">
            <option value="0">Choose a season</option>
            <option value="/documents/season-2024">SEASON 2024</option>
            <option value="/documents/season-2023">SEASON 2023</option>
            <option value="https://other.example/season-2022">SEASON 2022</option>
        </select>
    </body></html>"#;

    #[test]
    fn parses_all_non_placeholder_options() {
        let base = Url::parse("https://portal.example/documents/").unwrap();
        let seasons = parse_seasons(LISTING, &base).unwrap();

        assert_eq!(seasons.len(), 3);
        assert_eq!(seasons[0].label, "SEASON 2024");
        assert_eq!(
            seasons[0].index_url,
            "https://portal.example/documents/season-2024"
        );
        assert_eq!(seasons[1].year, "2023");
        // Absolute values are kept as-is
        assert_eq!(seasons[2].index_url, "https://other.example/season-2022");
    }

    #[test]
    fn missing_select_is_page_structure_error() {
        let base = Url::parse("https://portal.example/").unwrap();
        let err = parse_seasons("<html><body><p>moved</p></body></html>", &base).unwrap_err();
        assert!(matches!(err, PaddockError::PageStructure { .. }));
    }

    #[test]
    fn duplicate_label_keeps_first_url() {
        let html = r#"<select id="facetapi_select_facet_form_3">
            <option value="/a">SEASON 2024</option>
            <option value="/b">SEASON 2024</option>
        </select>"#;
        let base = Url::parse("https://portal.example/").unwrap();
        let seasons = parse_seasons(html, &base).unwrap();
        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].index_url, "https://portal.example/a");
    }

    #[test]
    fn find_season_by_year_or_label() {
        let base = Url::parse("https://portal.example/").unwrap();
        let seasons = parse_seasons(LISTING, &base).unwrap();

        assert_eq!(find_season(&seasons, "2023").unwrap().label, "SEASON 2023");
        assert_eq!(find_season(&seasons, "SEASON 2024").unwrap().year, "2024");
        assert!(find_season(&seasons, "1998").is_none());
    }

    #[tokio::test]
    async fn resolve_seasons_with_mock_server() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/documents/"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(LISTING))
            .mount(&server)
            .await;

        let client = crate::build_client().unwrap();
        let url = format!("{}/documents/", server.uri());
        let seasons = resolve_seasons(&client, &url).await.unwrap();

        assert_eq!(seasons.len(), 3);
        assert_eq!(
            seasons[0].index_url,
            format!("{}/documents/season-2024", server.uri())
        );
    }

    #[tokio::test]
    async fn resolve_seasons_http_error_propagates() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/documents/"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = crate::build_client().unwrap();
        let url = format!("{}/documents/", server.uri());
        let err = resolve_seasons(&client, &url).await.unwrap_err();
        assert!(matches!(err, PaddockError::Fetch(_)));
    }
}
