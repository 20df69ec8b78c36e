//! Color types and the OKLCH <-> sRGB converter.
//!
//! The pipeline runs OKLCh -> OKLab -> linear RGB -> gamma-encoded sRGB ->
//! 8-bit channels -> hex, and back. Every step is a pure function over `f64`.
//! Out-of-gamut colors are clipped per channel at the 8-bit quantization step;
//! there is no hue-preserving gamut mapping.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gamma-encoded sRGB color, nominally in [0, 1] per channel.
///
/// Values produced by [`oklch_to_srgb`] are not clamped and may fall outside
/// the unit range for out-of-gamut inputs. [`Srgb::to_rgb8`] is where clipping
/// happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab): lightness, chroma, hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

/// An 8-bit sRGB channel triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in canonical hex form: `#` followed by six lowercase hex digits.
///
/// Any `Hex` value is canonical by construction. Use [`str::parse`] for strict
/// parsing (it rejects anything but `#rrggbb`), or
/// [`crate::parse::parse_to_hex`] for the lenient, total CSS parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex(Rgb8);

/// The hex string the lenient parser returns for unrecognized input.
pub const FALLBACK_HEX: &str = "#000000";

impl Srgb {
    /// Quantizes to 8-bit channels: scale by 255, round, clamp to [0, 255].
    ///
    /// NaN quantizes to 0. Clipping is silent apart from a trace event.
    pub fn to_rgb8(self) -> Rgb8 {
        let in_gamut = [self.r, self.g, self.b]
            .iter()
            .all(|v| (0.0..=1.0).contains(v));
        if !in_gamut {
            tracing::trace!(srgb = ?self, "clipping out-of-gamut color");
        }
        Rgb8 {
            r: quantize_channel(self.r),
            g: quantize_channel(self.g),
            b: quantize_channel(self.b),
        }
    }
}

impl From<Rgb8> for Srgb {
    fn from(c: Rgb8) -> Self {
        Srgb {
            r: c.r as f64 / 255.0,
            g: c.g as f64 / 255.0,
            b: c.b as f64 / 255.0,
        }
    }
}

fn quantize_channel(v: f64) -> u8 {
    let scaled = (v * 255.0).round();
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(0.0, 255.0) as u8
    }
}

impl Hex {
    /// The fallback color `#000000`.
    pub const BLACK: Hex = Hex(Rgb8 { r: 0, g: 0, b: 0 });

    pub fn from_rgb8(rgb: Rgb8) -> Self {
        Hex(rgb)
    }

    /// The channel triple this hex encodes.
    pub fn rgb8(self) -> Rgb8 {
        self.0
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb8 { r, g, b } = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Hex {
    type Err = EngineError;

    /// Parses exactly `#rrggbb` (digits in either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| EngineError::InvalidColor(format!("expected leading '#' in {s:?}")))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits after '#', got {digits:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| EngineError::InvalidColor(format!("invalid channel in {s:?}: {e}")))
        };
        Ok(Hex(Rgb8 {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }))
    }
}

impl PartialEq<str> for Hex {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Hex {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to a single linear component.
///
/// Negative inputs take the linear branch, so the power function only ever
/// sees positive bases.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        c * 12.92
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
///
/// The result is unbounded: saturated OKLab inputs routinely produce negative
/// or >1 channels.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// Converts OKLab to OKLCh.
///
/// Hue is `atan2(b, a)` in degrees, shifted into [0, 360). An exactly
/// achromatic input (`a == b == 0`) gets hue 0. Near-achromatic inputs keep
/// whatever hue `atan2` yields; no threshold is applied.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let chroma = (c.a * c.a + c.b * c.b).sqrt();
    let mut h = c.b.atan2(c.a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    // -1e-15 + 360.0 rounds to 360.0
    if h >= 360.0 {
        h = 0.0;
    }
    OkLch { l: c.l, c: chroma, h }
}

/// Converts OKLCh to OKLab.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// OKLCh to gamma-encoded sRGB, unclamped.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    linear_to_srgb(oklab_to_linear(oklch_to_oklab(c)))
}

/// OKLCh to 8-bit channels, clipping out-of-gamut channels.
pub fn oklch_to_rgb8(c: OkLch) -> Rgb8 {
    oklch_to_srgb(c).to_rgb8()
}

/// Converts an OKLCh triple to canonical hex.
///
/// Never fails: out-of-range inputs are clipped channel by channel, and
/// non-finite intermediates quantize to a deterministic edge value.
pub fn oklch_to_srgb_hex(l: f64, c: f64, h: f64) -> Hex {
    Hex::from_rgb8(oklch_to_rgb8(OkLch { l, c, h }))
}

/// Converts 8-bit sRGB channels to OKLCh.
pub fn srgb_to_oklch(r: u8, g: u8, b: u8) -> OkLch {
    let srgb = Srgb::from(Rgb8 { r, g, b });
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(srgb)))
}

/// Converts a hex color to OKLCh.
pub fn hex_to_oklch(hex: Hex) -> OkLch {
    let Rgb8 { r, g, b } = hex.rgb8();
    srgb_to_oklch(r, g, b)
}
