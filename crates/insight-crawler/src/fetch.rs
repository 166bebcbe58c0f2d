use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use crate::config::FetchConfig;
use crate::error::FetchError;

lazy_static! {
    static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .unwrap();
}

// Interstitial markers served instead of the listing when the source's
// anti-bot protection is not satisfied with the request profile.
const CHALLENGE_MARKERS: &[&str] = &[
    "Just a moment",
    "Checking your browser",
    "cf-browser-verification",
    "cf_chl_opt",
    "Attention Required!",
];

/// Downloads the ranking page. One attempt, bounded by the configured
/// timeout; retries are the scheduler's business.
pub async fn fetch_listing(config: &FetchConfig) -> Result<String, FetchError> {
    let resp = HTTP_CLI
        .get(&config.source_url)
        .timeout(Duration::from_secs(config.timeout_secs))
        .header(USER_AGENT, &config.user_agent)
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.5")
        .send()
        .await
        .map_err(|e| wrap_timeout(e, config.timeout_secs))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let page = resp
        .text()
        .await
        .map_err(|e| wrap_timeout(e, config.timeout_secs))?;

    if is_challenge_page(&page) {
        return Err(FetchError::Challenge);
    }

    Ok(page)
}

fn wrap_timeout(e: reqwest::Error, timeout_secs: u64) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(timeout_secs)
    } else {
        FetchError::Http(e)
    }
}

fn is_challenge_page(page: &str) -> bool {
    CHALLENGE_MARKERS.iter().any(|marker| page.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_challenge_interstitials() {
        let page = "<html><head><title>Just a moment...</title></head></html>";
        assert!(is_challenge_page(page));

        let page = r#"<div id="cf-browser-verification" class="cf-im-under-attack">"#;
        assert!(is_challenge_page(page));
    }

    #[test]
    fn regular_listing_is_not_a_challenge() {
        let page = "<html><body><table class=\"rankTable\"></table></body></html>";
        assert!(!is_challenge_page(page));
    }
}
