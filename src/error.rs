#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Request error")]
    RequestError(#[from] reqwest::Error),

    #[error("Readability error: {0}")]
    ReadabilityError(String),

    #[error("Empty article extracted")]
    EmptyArticle,

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("Render task failed: {0}")]
    RenderError(#[from] tokio::task::JoinError),

    #[error("IO error")]
    IoError(#[from] std::io::Error),
}
