//! Canonical string forms for OKLCh tokens and hex colors.
//!
//! The fixed precision of [`format_oklch`] is a storage contract: persisted
//! tokens are compared as strings, so the same color must always print the
//! same way.

use crate::color::{hex_to_oklch, Hex, OkLch, Rgb8};

/// Renders `oklch(L C H)` with 3 decimals for `L` and `C` and 1 for `H`.
pub fn format_oklch(color: OkLch) -> String {
    format!(
        "oklch({} {} {})",
        fixed(color.l, 3),
        fixed(color.c, 3),
        fixed(color.h, 1)
    )
}

/// Renders an 8-bit channel triple as canonical hex.
pub fn format_hex(r: u8, g: u8, b: u8) -> Hex {
    Hex::from_rgb8(Rgb8 { r, g, b })
}

/// Converts a picked hex color into a canonical `oklch(...)` token string.
pub fn hex_to_oklch_token(hex: Hex) -> String {
    format_oklch(hex_to_oklch(hex))
}

/// Fixed-point formatting with JavaScript `toFixed` rounding.
///
/// `format!` rounds exact decimal ties to even; `toFixed` takes the larger
/// magnitude, so a tie is nudged one ulp outward before formatting. A value
/// that rounds to zero never prints as `-0.000`.
fn fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value:.digits$}");
    }
    let mut magnitude = value.abs();
    if is_decimal_tie(magnitude, digits) {
        magnitude = f64::from_bits(magnitude.to_bits() + 1);
    }
    let s = format!("{magnitude:.digits$}");
    if value < 0.0 && s.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        format!("-{s}")
    } else {
        s
    }
}

/// True when the exact decimal expansion of `magnitude` ends in a `5` one
/// place past `digits`. 1100 places cover every finite `f64` exactly.
fn is_decimal_tie(magnitude: f64, digits: usize) -> bool {
    let exact = format!("{magnitude:.1100}");
    let exact = exact.trim_end_matches('0');
    match exact.split_once('.') {
        Some((_, frac)) => frac.len() == digits + 1 && frac.ends_with('5'),
        None => false,
    }
}
