use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("anti-bot challenge page served instead of the listing")]
    Challenge,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("ranking table not found in page")]
    TableNotFound,
}
