#![deny(unsafe_code)]
//! Color engine for hueforge design tokens and gradients.
//!
//! Provides the OKLCh <-> sRGB converter and color types (`OkLch`, `OkLab`,
//! `Srgb`, `Rgb8`, `Hex`), a lenient CSS color parser that always yields a
//! hex color, canonical token formatting, and the CSS gradient compositor.
//! Everything here is stateless and pure.

pub mod color;
pub mod error;
pub mod format;
pub mod gradient;
pub mod params;
pub mod parse;

pub use color::{
    hex_to_oklch, oklch_to_srgb_hex, srgb_to_oklch, Hex, LinearRgb, OkLab, OkLch, Rgb8, Srgb,
    FALLBACK_HEX,
};
pub use error::EngineError;
pub use format::{format_hex, format_oklch, hex_to_oklch_token};
pub use gradient::{build_gradient_css, Gradient, GradientKind, GradientStop};
pub use parse::{parse_all, parse_to_hex, ColorSyntax};
