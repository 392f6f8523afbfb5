//! Configuration errors.

/// Errors for contracts a caller can violate when configuring the engine.
///
/// These are defects in the calling code (an impossible range, weights
/// that cannot be drawn from), so they surface as `Err` immediately
/// instead of being silently repaired.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Integer range with min above max
    #[error("empty integer range: {min}..={max}")]
    EmptyIntRange {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },

    /// Float range with min above max
    #[error("empty float range: {min}..={max}")]
    EmptyFloatRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Weighted choice with no positive weight
    #[error("weighted choice requires at least one positive weight")]
    NoPositiveWeight,

    /// Query rejected by strict validation
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
