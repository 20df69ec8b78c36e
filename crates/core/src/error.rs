//! Error types for hueforge.
//!
//! The string parser and the converters are total and never return these;
//! errors only surface at the typed edges (strict hex parsing, gradient
//! construction and stop editing).

use thiserror::Error;

/// Errors produced by the typed hueforge APIs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A color string could not be parsed by a strict parser.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A gradient type name was not `linear`, `radial` or `conic`.
    #[error("unknown gradient type: {0}")]
    UnknownGradientKind(String),

    /// A gradient could not be constructed or edited into the requested shape.
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// A stop index did not address an existing stop.
    #[error("stop index {index} out of range for gradient with {len} stops")]
    StopOutOfRange { index: usize, len: usize },
}
