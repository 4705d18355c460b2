use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdulearnError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Extracted only {0} characters of text. The document may be scanned, image-only or password protected")]
    InsufficientText(usize),

    #[error("Failed to read page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("EdulearnError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for EdulearnError {
    fn from(error: std::io::Error) -> Self {
        EdulearnError::Io(Box::new(error))
    }
}

impl EdulearnError {
    /// Extraction failures are the only errors surfaced to the user;
    /// everything downstream of extraction degrades silently instead.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, EdulearnError::InsufficientText(_))
    }
}
