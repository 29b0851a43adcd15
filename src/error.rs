use thiserror::Error;

/// Client-caused failures. Always surfaced as a 400, never logged as a
/// server fault.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("name must be a non-empty string")]
    MissingName,
    #[error("pid is not formatted correctly")]
    MalformedPlayerId,
    #[error("unexpected path parameter `{0}`")]
    UnexpectedPathParameter(String),
    #[error("too many path parameters provided")]
    TooManyPathParameters,
}

/// Failures from the store call itself or from decoding a stored item.
/// Surfaced as a 500 and logged with the originating pid.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(String),
    #[error("stored item has a missing or malformed `{0}` attribute")]
    MalformedItem(&'static str),
}
