//! Season and document discovery against the portal's HTML pages.
//!
//! The portal publishes one season listing page (a `<select>` of seasons)
//! and one document index page per season (anchors pointing at PDF assets).
//! This crate turns those two pages into [`Season`] and [`DocumentRef`]
//! values; it performs exactly one HTTP GET per call and never retries.

mod documents;
mod seasons;

use std::time::Duration;

use reqwest::Client;

use paddockdocs_shared::{PaddockError, Result};

pub use documents::{discover, gp_name_variants};
pub use seasons::{find_season, resolve_seasons};

/// Maximum number of redirects to follow when fetching portal pages.
const MAX_REDIRECTS: usize = 5;

/// Default timeout in seconds for portal page fetches.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent string for discovery requests.
const USER_AGENT: &str = concat!("paddockdocs/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with appropriate settings for portal fetches.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| PaddockError::Fetch(format!("failed to build HTTP client: {e}")))
}

/// Fetch a portal page body, failing on non-2xx or transport errors.
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PaddockError::Fetch(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PaddockError::Fetch(format!("{url}: HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| PaddockError::Fetch(format!("{url}: failed to read body: {e}")))
}
