//! Error types for voltaic-core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The token has no recognizable numeric part.
    #[error("cannot parse value: '{0}'")]
    InvalidValue(String),

    /// The token's suffix contains no known SI prefix.
    #[error("unknown suffix '{suffix}' in value '{token}'")]
    UnknownSuffix { token: String, suffix: String },

    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// The node cannot reach ground through resistors or voltage sources.
    #[error("node '{0}' has no DC path to ground")]
    NoDcPath(String),

    /// The named voltage source closes a loop made only of voltage sources.
    #[error("voltage source '{0}' closes a loop of voltage sources")]
    VoltageSourceLoop(String),
}

pub type Result<T> = std::result::Result<T, Error>;
