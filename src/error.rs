use thiserror::Error;

/// Errors surfaced by engine construction and configuration
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("slide deck is empty; at least one slide is required")]
    EmptyDeck,

    #[error("failed to read slide deck {path}: {source}")]
    DeckRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse slide deck {path}: {source}")]
    DeckParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(u32),

    #[error("gpu initialization failed: {0}")]
    Gpu(String),

    #[error("surface configuration failed: {0}")]
    Surface(String),
}
