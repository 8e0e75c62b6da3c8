//! Error types for the SKOS mapping engine

use thiserror::Error;

/// Errors surfaced by loads and dumps
///
/// Only conditions that must abort an operation live here. Recoverable
/// conditions (bad language tags, unresolvable references at dump time)
/// are recorded as [`crate::Warning`] values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkosError {
    /// Multiple concept schemes were found and no disambiguator selected
    /// exactly one. The message enumerates every candidate so the caller
    /// can retry with an explicit scheme URI.
    #[error("multiple concept schemes found, pass an explicit scheme URI to disambiguate: {}", candidates.join(", "))]
    AmbiguousScheme {
        /// URIs of every scheme node found in the graph, sorted
        candidates: Vec<String>,
    },

    /// A label or note was constructed with a type outside the fixed
    /// enumeration. Raised immediately at the construction site.
    #[error("invalid {kind} type: {value:?}")]
    InvalidEnumValue {
        /// Which enumeration was violated ("label" or "note")
        kind: &'static str,
        /// The offending value
        value: String,
    },

    /// A markup fragment could not be decoded as well-formed XML
    #[error("malformed markup fragment: {message}")]
    Decode {
        /// Parser diagnostic
        message: String,
    },
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, SkosError>;
