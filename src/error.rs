use thiserror::Error;

/// Rejected construction parameters. Raised before any parameter tensor is
/// allocated, so a failed construction has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("input channel count must be positive, got {0}")]
    InputChannels(i64),
    #[error("tower depth must be non-negative, got {0}")]
    TowerDepth(i64),
    #[error("filter count must be positive, got {0}")]
    NumFilters(i64),
    #[error("policy channel count must be positive, got {0}")]
    PolicyChannels(i64),
    #[error("value hidden width must be positive, got {0}")]
    ValueHidden(i64),
    #[error("board size must be positive, got {0}")]
    BoardSize(i64),
}

/// Input tensor does not match the shape a stage expects. Never recovered
/// internally; the call that triggered it fails, the network stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected a rank-4 input [batch, channels, height, width], got shape {0:?}")]
    Rank(Vec<i64>),
    #[error("expected {expected} input channels, got shape {actual:?}")]
    Channels { expected: i64, actual: Vec<i64> },
    #[error("expected {expected}x{expected} spatial dimensions, got shape {actual:?}")]
    Spatial { expected: i64, actual: Vec<i64> },
}
