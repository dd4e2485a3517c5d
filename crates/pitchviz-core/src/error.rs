/// Failure of the one-time accent dictionary retrieval
#[derive(Debug, thiserror::Error)]
pub enum DictionaryLoadError {
    #[error("Error fetching pitch dictionary: {status} {body}")]
    Fetch { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
