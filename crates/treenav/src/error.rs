use thiserror::Error;
use treenav_json_pointer::JsonPointerError;

#[derive(Debug, Error)]
pub enum SelectionError {
    /// The two ends of a range do not share a container with addressable
    /// children, or a key is missing from the container's key order.
    #[error("cannot form selection: {0}")]
    Range(String),
    #[error("invalid selection request: {0}")]
    InvalidRequest(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl From<JsonPointerError> for SelectionError {
    fn from(e: JsonPointerError) -> Self {
        match e {
            JsonPointerError::NotFound(pointer) => SelectionError::NotFound(pointer),
            other => SelectionError::InvalidRequest(other.to_string()),
        }
    }
}
