//! Lenient CSS color string parsing.
//!
//! The accepted grammar is deliberately closed: `#rrggbb`, `oklch()`,
//! `rgb()`/`rgba()` and classic comma-separated `hsl()`/`hsla()`. Anything else
//! (including space-separated `hsl()`, `lab()` and `color()`) resolves to
//! [`FALLBACK_HEX`]. [`parse_to_hex`] never fails, so it can sit directly in a
//! render path.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::{oklch_to_srgb_hex, Hex, OkLch, Rgb8, Srgb, FALLBACK_HEX};

/// Unsigned or signed decimal without exponent: `1`, `1.`, `.5`, `-0.25`.
const NUM: &str = r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)";

/// Channel separator for `rgb()`: a comma with optional whitespace, or whitespace alone.
const SEP: &str = r"(?:\s*,\s*|\s+)";

static OKLCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^oklch\(\s*({NUM})(%?)\s+({NUM})\s+({NUM})\s*(?:/\s*{NUM}%?\s*)?\)$"
    ))
    .expect("oklch pattern is valid")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^rgba?\(\s*(\d+){SEP}(\d+){SEP}(\d+)\s*(?:[,/]\s*{NUM}%?\s*)?\)$"
    ))
    .expect("rgb pattern is valid")
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^hsla?\(\s*({NUM})(?:deg)?\s*,\s*({NUM})%\s*,\s*({NUM})%\s*(?:,\s*{NUM}%?\s*)?\)$"
    ))
    .expect("hsl pattern is valid")
});

/// A recognized color syntax together with the values it captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSyntax {
    /// `#rrggbb`.
    Hex(Hex),
    /// `oklch(L[%] C H[ / A])`, lightness already divided by 100 if given as a percentage.
    Oklch(OkLch),
    /// `rgb(R, G, B[, A])` or `rgba(...)`, channels clamped to 255.
    Rgb(Rgb8),
    /// `hsl(H, S%, L%)` with `s` and `l` as raw percentages.
    Hsl { h: f64, s: f64, l: f64 },
}

impl ColorSyntax {
    /// Matches `value` against each rule in order.
    ///
    /// Surrounding whitespace is ignored and function names are case-insensitive.
    pub fn classify(value: &str) -> Option<Self> {
        let value = value.trim();

        if value.starts_with('#') {
            return value.parse().ok().map(ColorSyntax::Hex);
        }

        if let Some(caps) = OKLCH_RE.captures(value) {
            let mut l = caps[1].parse::<f64>().ok()?;
            if !caps[2].is_empty() {
                l /= 100.0;
            }
            let c = caps[3].parse().ok()?;
            let h = caps[4].parse().ok()?;
            return Some(ColorSyntax::Oklch(OkLch { l, c, h }));
        }

        if let Some(caps) = RGB_RE.captures(value) {
            return Some(ColorSyntax::Rgb(Rgb8 {
                r: channel(&caps[1]),
                g: channel(&caps[2]),
                b: channel(&caps[3]),
            }));
        }

        if let Some(caps) = HSL_RE.captures(value) {
            return Some(ColorSyntax::Hsl {
                h: caps[1].parse().ok()?,
                s: caps[2].parse().ok()?,
                l: caps[3].parse().ok()?,
            });
        }

        None
    }

    /// Renders the captured color as canonical hex.
    pub fn to_hex(self) -> Hex {
        match self {
            ColorSyntax::Hex(hex) => hex,
            ColorSyntax::Oklch(c) => oklch_to_srgb_hex(c.l, c.c, c.h),
            ColorSyntax::Rgb(rgb) => Hex::from_rgb8(rgb),
            ColorSyntax::Hsl { h, s, l } => Hex::from_rgb8(hsl_to_rgb8(h, s, l)),
        }
    }
}

/// Normalizes any supported CSS color string to canonical hex.
///
/// Unrecognized or malformed input yields `#000000`.
pub fn parse_to_hex(value: &str) -> Hex {
    match ColorSyntax::classify(value) {
        Some(syntax) => syntax.to_hex(),
        None => {
            tracing::debug!(input = value, "unrecognized color string, using {FALLBACK_HEX}");
            Hex::BLACK
        }
    }
}

/// Normalizes a batch of color strings, preserving order.
pub fn parse_all<I, S>(values: I) -> Vec<Hex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| parse_to_hex(v.as_ref()))
        .collect()
}

/// The regex guarantees ASCII digits, so the only parse failure is overflow.
fn channel(digits: &str) -> u8 {
    digits
        .parse::<u64>()
        .map_or(u8::MAX, |v| v.min(u8::MAX as u64) as u8)
}

/// Classic HSL to 8-bit RGB. Hue wraps into [0, 360); saturation and
/// lightness percentages are clamped to [0, 100].
fn hsl_to_rgb8(h: f64, s: f64, l: f64) -> Rgb8 {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let srgb = if s == 0.0 {
        Srgb { r: l, g: l, b: l }
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Srgb {
            r: hue_to_rgb(p, q, h + 1.0 / 3.0),
            g: hue_to_rgb(p, q, h),
            b: hue_to_rgb(p, q, h - 1.0 / 3.0),
        }
    };
    srgb.to_rgb8()
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
