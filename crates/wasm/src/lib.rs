#![deny(unsafe_code)]
//! WASM bindings for the hueforge color engine.
//!
//! Export names follow the editor UI's camelCase conventions. No binding
//! throws: malformed colors degrade to `#000000`, an unknown gradient type
//! renders as linear, and unparseable stop JSON renders with no stops.

use hueforge_core::{GradientKind, GradientStop, OkLch};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Normalizes any supported CSS color string to `#rrggbb`.
#[wasm_bindgen(js_name = parseToHex)]
pub fn parse_to_hex(value: &str) -> String {
    hueforge_core::parse_to_hex(value).to_string()
}

/// Converts an OKLCh triple to `#rrggbb`, clipping out-of-gamut channels.
#[wasm_bindgen(js_name = oklchToSrgbHex)]
pub fn oklch_to_srgb_hex(l: f64, c: f64, h: f64) -> String {
    hueforge_core::oklch_to_srgb_hex(l, c, h).to_string()
}

/// Converts a color string to `[l, c, h]`.
///
/// The input goes through `parseToHex` first, so any supported syntax works.
#[wasm_bindgen(js_name = hexToOklch)]
pub fn hex_to_oklch(hex: &str) -> Vec<f64> {
    let OkLch { l, c, h } = hueforge_core::hex_to_oklch(hueforge_core::parse_to_hex(hex));
    vec![l, c, h]
}

/// Renders `oklch(L C H)` with the canonical token precision.
#[wasm_bindgen(js_name = formatOklch)]
pub fn format_oklch(l: f64, c: f64, h: f64) -> String {
    hueforge_core::format_oklch(OkLch { l, c, h })
}

/// Renders 8-bit channels as `#rrggbb`.
#[wasm_bindgen(js_name = formatHex)]
pub fn format_hex(r: u8, g: u8, b: u8) -> String {
    hueforge_core::format_hex(r, g, b).to_string()
}

/// Converts a picked color to a canonical `oklch(...)` token string.
#[wasm_bindgen(js_name = hexToOklchToken)]
pub fn hex_to_oklch_token(hex: &str) -> String {
    hueforge_core::hex_to_oklch_token(hueforge_core::parse_to_hex(hex))
}

/// Renders a CSS gradient from a type name, an angle and a JSON stop array.
#[wasm_bindgen(js_name = buildGradientCss)]
pub fn build_gradient_css(kind: &str, angle: f64, stops_json: &str) -> String {
    let kind = kind.parse().unwrap_or(GradientKind::Linear);
    hueforge_core::build_gradient_css(kind, angle, &stops_from_json(stops_json))
}

fn stops_from_json(stops_json: &str) -> Vec<GradientStop> {
    match serde_json::from_str::<Value>(stops_json) {
        Ok(Value::Array(items)) => items.iter().map(GradientStop::from_json).collect(),
        _ => Vec::new(),
    }
}
