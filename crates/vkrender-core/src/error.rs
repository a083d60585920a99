//! Error types shared across the workspace.

use thiserror::Error;

use crate::capability::CapabilityKind;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more required capabilities are absent from the available set.
    #[error("required {kind}(s) not available: {}", .missing.join(", "))]
    MissingCapability {
        kind: CapabilityKind,
        missing: Vec<String>,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
