// Catalog errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    /// Tag that is not `language[-REGION]`
    #[error("invalid locale tag {0:?}")]
    InvalidLocale(String),

    /// Message file whose shape is not a string table
    #[error("malformed message bundle: {0}")]
    MalformedBundle(String),

    #[error("cannot read messages: {0}")]
    Io(#[from] std::io::Error),

    #[error("message file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
