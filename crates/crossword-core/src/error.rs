use thiserror::Error;

/// Errors raised while loading or validating a word pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read word pool: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid word pool JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word pool has no entries")]
    EmptyPool,

    #[error("word pool has no solution words")]
    NoSolutionWords,

    #[error("invalid word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },

    #[error("no entries in category {0:?}")]
    UnknownCategory(String),
}
