use thiserror::Error;

/// Failures raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection pool: {0}")]
    Pool(#[from] r2d2_postgres::r2d2::Error),
    #[error("{0}")]
    Sql(#[from] postgres::Error),
}

/// Service-level taxonomy surfaced at the HTTP boundary.
///
/// Per-row refresh failures are deliberately absent: they are recovered
/// inside the refresh loop and only show up in the failure tally.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::StoreUnavailable(err.to_string())
    }
}
