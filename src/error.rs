use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Machine Configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Corpus Error (line {line}): {reason}")]
    Corpus { line: u64, reason: String },

    #[error("Text too short for index of coincidence: {len} letter(s), need at least 2")]
    InsufficientText { len: usize },
}

pub type CrResult<T> = Result<T, CrackError>;
