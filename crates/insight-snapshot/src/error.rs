use thiserror::Error;

/// Failure while publishing the snapshot artifacts.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("couldn't encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a dashboard read fell back to the demo payload.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("couldn't fetch dashboard data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dashboard endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("couldn't read dashboard data: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't decode dashboard data: {0}")]
    Json(#[from] serde_json::Error),
}
