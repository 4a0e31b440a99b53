// src/error.rs

//! Error types for module identity and version resolution

use thiserror::Error;

/// Result type for all crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving module identities and versions
#[derive(Error, Debug)]
pub enum Error {
    /// Version string does not match the Debian version grammar
    #[error("invalid Debian version string: {input:?}")]
    MalformedVersion { input: String },

    /// Constraint clause has no version part or an unknown operator
    #[error("invalid version specifier clause: {clause:?}")]
    MalformedSpec { clause: String },

    /// Module directory exists in the registry but holds no versions
    #[error("package: {module}, exists in registry modules, but has no versions")]
    EmptyRegistryEntry { module: String },

    /// Required attribute missing from package info text
    #[error("{attribute} could not be extracted from package info")]
    AttributeNotFound { attribute: String },

    /// Live package index lookup failed
    #[error("package index lookup failed: {reason}")]
    ExternalLookup { reason: String },

    /// I/O error reading the registry
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
