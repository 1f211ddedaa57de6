//! Error types for style values and stylesheets.

use thiserror::Error;

/// Configuration errors raised while building or decoding styles.
///
/// These indicate an integration mistake (a bad enum code, an unparsable
/// stylesheet document), never a transient condition.
#[derive(Debug, Error)]
pub enum StyleError {
    /// An enum code stored in a snapshot does not name any variant.
    #[error("unknown {kind} variant code {code}")]
    UnknownVariant {
        /// The enum being decoded (e.g. "gradient type").
        kind: &'static str,
        /// The offending code.
        code: u32,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// A selector is not of the form `name(:state)*`.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// A stylesheet document could not be deserialized.
    #[error("invalid stylesheet document: {0}")]
    Json(#[from] serde_json::Error),
}
