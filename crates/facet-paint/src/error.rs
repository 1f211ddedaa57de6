//! Paint errors.

use facet_style::StyleError;
use thiserror::Error;

/// Configuration errors found while generating paint output.
#[derive(Debug, Error)]
pub enum PaintError {
    /// A gradient carried a type code that names no gradient type.
    #[error("unknown gradient type code {0}")]
    UnknownGradient(u32),
    /// A committed style held an unknown enum code.
    #[error(transparent)]
    Style(#[from] StyleError),
}
