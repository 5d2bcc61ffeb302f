use thiserror::Error;

#[derive(Debug, Error)]
pub enum Form3Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status: {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid or unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("pagination link missing: {0}")]
    Navigation(&'static str),

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("resource does not exist (404)")]
    NotFound,

    #[error("resource version is stale (409)")]
    VersionConflict,

    #[error("conflict (409): {0}")]
    Conflict(String),

    #[error("bad request (400): {0}")]
    BadRequest(String),
}

impl Form3Error {
    /// Service-side outcome, if this error carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Form3Error::Api(e) => Some(e),
            _ => None,
        }
    }
}
