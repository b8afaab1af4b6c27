use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// A required host resource or setting is missing; construction fails.
    #[error("invalid game construction: {0}")]
    InvalidConstruction(String),
    /// Recovered locally: the renderer falls back to the default look.
    #[error("failed to load asset `{id}`: {reason}")]
    AssetLoadFailure { id: String, reason: String },
    /// Caught per frame; the client is asked to reload.
    #[error("frame presentation failed: {0}")]
    TransientRenderFailure(String),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not enough gems: need {needed}, have {available}")]
    InsufficientGems { needed: u32, available: u32 },
    #[error("item is already active")]
    AlreadyActive,
    #[error("gem amount must be positive")]
    InvalidAmount,
}
