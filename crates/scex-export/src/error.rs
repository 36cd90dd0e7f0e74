use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no products found; site may be inaccessible, empty, or unsupported")]
    EmptyResult,

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error finalizing export: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialized CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
