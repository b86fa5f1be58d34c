//! Definition error types.

use crate::machine::BuildError;
use thiserror::Error;

/// Errors that can occur while storing or loading a machine definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Definition version is not supported by this version
    #[error("Unsupported definition version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Definition does not describe a valid machine
    #[error("Invalid machine definition: {0}")]
    Invalid(#[from] BuildError),
}
