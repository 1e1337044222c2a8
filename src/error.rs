use thiserror::Error;

#[derive(Error, Debug)]
pub enum BriscolaError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Hand slot {slot} was never sampled as the first play")]
    NumericEdgeCase { slot: usize },

    #[error("Invalid playout: {0}")]
    InvalidPlayout(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BriscolaResult<T> = Result<T, BriscolaError>;
