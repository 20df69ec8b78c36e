//! CSS gradient composition from OKLCh color stops.
//!
//! [`build_gradient_css`] is the pure serializer: it sorts stops by position,
//! converts each stop to hex and emits a `linear-gradient`, `radial-gradient`
//! or `conic-gradient` string. [`Gradient`] layers the editor's stop-list rules
//! on top (at least two stops, positions clamped to [0, 100], new stops placed
//! after the last one).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{hex_to_oklch, oklch_to_srgb_hex, OkLch};
use crate::error::EngineError;
use crate::params::{param_array, param_f64, param_str};
use crate::parse::parse_to_hex;

/// A gradient needs at least this many stops.
pub const MIN_STOPS: usize = 2;

/// Angle used when a spec does not provide one.
pub const DEFAULT_ANGLE: f64 = 90.0;

/// Distance past the last stop at which [`Gradient::add_stop`] places a new stop.
const NEW_STOP_STEP: f64 = 10.0;

const KIND_NAMES: &[&str] = &["linear", "radial", "conic"];

/// The CSS gradient function to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    /// Always `circle`; the angle is not emitted.
    Radial,
    Conic,
}

impl GradientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conic => "conic",
        }
    }

    /// Returns a slice of all recognized gradient type names.
    pub fn list_names() -> &'static [&'static str] {
        KIND_NAMES
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradientKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(GradientKind::Linear),
            "radial" => Ok(GradientKind::Radial),
            "conic" => Ok(GradientKind::Conic),
            _ => Err(EngineError::UnknownGradientKind(s.to_string())),
        }
    }
}

/// A color at a position (percent) along the gradient.
///
/// Serializes flat: `{ "position": 0, "l": 0.5, "c": 0, "h": 0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    #[serde(flatten)]
    pub color: OkLch,
}

impl GradientStop {
    pub fn new(position: f64, color: OkLch) -> Self {
        Self { position, color }
    }

    /// Reads a stop from JSON.
    ///
    /// `position`, `l`, `c` and `h` default to 0. A `color` string, if present,
    /// is run through the lenient parser and takes precedence over `l`/`c`/`h`.
    pub fn from_json(value: &Value) -> Self {
        let position = param_f64(value, "position", 0.0);
        let color = match value.get("color").and_then(Value::as_str) {
            Some(css) => hex_to_oklch(parse_to_hex(css)),
            None => OkLch {
                l: param_f64(value, "l", 0.0),
                c: param_f64(value, "c", 0.0),
                h: param_f64(value, "h", 0.0),
            },
        };
        Self { position, color }
    }
}

/// Returns the stops stably sorted by ascending position.
///
/// Equal positions keep their input order. NaN positions compare equal to
/// everything, so they stay where the stable sort leaves them.
pub fn sort_stops(stops: &[GradientStop]) -> Vec<GradientStop> {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.position.partial_cmp(&b.position).unwrap_or(Ordering::Equal));
    sorted
}

/// Renders a CSS gradient string.
///
/// Stops are sorted defensively and rendered as `<hex> <position>%`. The
/// radial form always uses `circle` and ignores `angle`.
pub fn build_gradient_css(kind: GradientKind, angle: f64, stops: &[GradientStop]) -> String {
    let stops = sort_stops(stops)
        .iter()
        .map(|s| {
            let hex = oklch_to_srgb_hex(s.color.l, s.color.c, s.color.h);
            format!("{hex} {}%", css_number(s.position))
        })
        .collect::<Vec<_>>()
        .join(", ");

    match kind {
        GradientKind::Linear => format!("linear-gradient({}deg, {stops})", css_number(angle)),
        GradientKind::Radial => format!("radial-gradient(circle, {stops})"),
        GradientKind::Conic => format!("conic-gradient(from {}deg, {stops})", css_number(angle)),
    }
}

/// Shortest round-trip decimal, with negative zero printed as `0`.
fn css_number(v: f64) -> String {
    // -0.0 + 0.0 == +0.0
    format!("{}", v + 0.0)
}

/// A gradient with at least [`MIN_STOPS`] stops.
///
/// Stops are kept in editing order; [`Gradient::to_css`] sorts them on output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub angle: f64,
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Creates a gradient.
    ///
    /// Returns `EngineError::InvalidGradient` if fewer than two stops are given.
    pub fn new(
        kind: GradientKind,
        angle: f64,
        stops: Vec<GradientStop>,
    ) -> Result<Self, EngineError> {
        if stops.len() < MIN_STOPS {
            return Err(EngineError::InvalidGradient(format!(
                "gradient requires at least {MIN_STOPS} stops, got {}",
                stops.len()
            )));
        }
        Ok(Self { kind, angle, stops })
    }

    /// Builds a gradient from a JSON spec:
    /// `{ "type": "linear", "angle": 90, "stops": [ ... ] }`.
    ///
    /// `type` defaults to `linear` and `angle` to 90. An unknown `type` is an
    /// error, as is a stop list shorter than two.
    pub fn from_json(spec: &Value) -> Result<Self, EngineError> {
        let kind = param_str(spec, "type", GradientKind::Linear.as_str()).parse()?;
        let angle = param_f64(spec, "angle", DEFAULT_ANGLE);
        let stops = param_array(spec, "stops")
            .iter()
            .map(GradientStop::from_json)
            .collect();
        Self::new(kind, angle, stops)
    }

    /// Stops in editing order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Appends a stop after the furthest existing one, at
    /// `min(100, max(position) + 10)`, and returns its index.
    pub fn add_stop(&mut self, color: OkLch) -> usize {
        let last = self
            .stops
            .iter()
            .map(|s| s.position)
            .fold(f64::NEG_INFINITY, f64::max);
        let position = clamp_position(last + NEW_STOP_STEP);
        self.stops.push(GradientStop { position, color });
        self.stops.len() - 1
    }

    /// Removes and returns the stop at `index`.
    ///
    /// Refuses to drop below [`MIN_STOPS`].
    pub fn remove_stop(&mut self, index: usize) -> Result<GradientStop, EngineError> {
        self.check_index(index)?;
        if self.stops.len() <= MIN_STOPS {
            tracing::debug!(index, "refusing to remove stop from minimal gradient");
            return Err(EngineError::InvalidGradient(format!(
                "cannot remove stop: gradient requires at least {MIN_STOPS} stops"
            )));
        }
        Ok(self.stops.remove(index))
    }

    /// Moves the stop at `index`, clamping the position to [0, 100].
    pub fn set_stop_position(&mut self, index: usize, position: f64) -> Result<(), EngineError> {
        self.check_index(index)?;
        self.stops[index].position = clamp_position(position);
        Ok(())
    }

    /// Replaces the color of the stop at `index`.
    pub fn set_stop_color(&mut self, index: usize, color: OkLch) -> Result<(), EngineError> {
        self.check_index(index)?;
        self.stops[index].color = color;
        Ok(())
    }

    /// Renders this gradient as CSS. See [`build_gradient_css`].
    pub fn to_css(&self) -> String {
        build_gradient_css(self.kind, self.angle, &self.stops)
    }

    fn check_index(&self, index: usize) -> Result<(), EngineError> {
        if index >= self.stops.len() {
            tracing::debug!(index, len = self.stops.len(), "stop index out of range");
            return Err(EngineError::StopOutOfRange {
                index,
                len: self.stops.len(),
            });
        }
        Ok(())
    }
}

/// Clamps to [0, 100]; NaN goes to 0.
fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gray(l: f64) -> OkLch {
        OkLch { l, c: 0.0, h: 0.0 }
    }

    fn stop(position: f64, l: f64) -> GradientStop {
        GradientStop::new(position, gray(l))
    }

    fn two_stop() -> Gradient {
        Gradient::new(
            GradientKind::Linear,
            90.0,
            vec![stop(0.0, 0.5), stop(100.0, 1.0)],
        )
        .unwrap()
    }

    // -- build_gradient_css --

    #[test]
    fn linear_gray_to_white() {
        let css = build_gradient_css(
            GradientKind::Linear,
            90.0,
            &[stop(0.0, 0.5), stop(100.0, 1.0)],
        );
        assert_eq!(css, "linear-gradient(90deg, #636363 0%, #ffffff 100%)");
    }

    #[test]
    fn stops_are_sorted_by_position() {
        let css = build_gradient_css(
            GradientKind::Linear,
            90.0,
            &[stop(100.0, 1.0), stop(0.0, 0.5)],
        );
        assert_eq!(css, "linear-gradient(90deg, #636363 0%, #ffffff 100%)");
    }

    #[test]
    fn equal_positions_keep_input_order() {
        let css = build_gradient_css(
            GradientKind::Linear,
            0.0,
            &[stop(50.0, 1.0), stop(0.0, 0.0), stop(50.0, 0.5)],
        );
        assert_eq!(
            css,
            "linear-gradient(0deg, #000000 0%, #ffffff 50%, #636363 50%)"
        );
    }

    #[test]
    fn radial_omits_angle() {
        let css = build_gradient_css(
            GradientKind::Radial,
            45.0,
            &[stop(0.0, 0.5), stop(100.0, 1.0)],
        );
        assert!(css.starts_with("radial-gradient(circle, "), "got {css}");
        assert!(!css.contains("45"), "angle leaked into {css}");
        assert_eq!(css, "radial-gradient(circle, #636363 0%, #ffffff 100%)");
    }

    #[test]
    fn conic_uses_from_angle() {
        let css = build_gradient_css(
            GradientKind::Conic,
            180.0,
            &[stop(0.0, 0.0), stop(100.0, 1.0)],
        );
        assert_eq!(css, "conic-gradient(from 180deg, #000000 0%, #ffffff 100%)");
    }

    #[test]
    fn fractional_numbers_render_shortest_form() {
        let css = build_gradient_css(
            GradientKind::Linear,
            12.5,
            &[stop(-0.0, 0.0), stop(33.25, 1.0)],
        );
        assert_eq!(css, "linear-gradient(12.5deg, #000000 0%, #ffffff 33.25%)");
    }

    #[test]
    fn out_of_gamut_stop_is_clipped() {
        let css = build_gradient_css(
            GradientKind::Linear,
            90.0,
            &[
                GradientStop::new(
                    0.0,
                    OkLch {
                        l: 0.9,
                        c: 0.4,
                        h: 150.0,
                    },
                ),
                stop(100.0, 1.0),
            ],
        );
        assert!(css.starts_with("linear-gradient(90deg, #00"), "got {css}");
    }

    #[test]
    fn build_does_not_require_two_stops() {
        assert_eq!(
            build_gradient_css(GradientKind::Linear, 90.0, &[]),
            "linear-gradient(90deg, )"
        );
    }

    // -- GradientKind --

    #[test]
    fn kind_parses_and_displays_lowercase() {
        for name in GradientKind::list_names() {
            let kind: GradientKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), *name);
        }
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let result = "diamond".parse::<GradientKind>();
        assert!(matches!(result, Err(EngineError::UnknownGradientKind(_))));
    }

    #[test]
    fn kind_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&GradientKind::Conic).unwrap(),
            "\"conic\""
        );
    }

    // -- Gradient --

    #[test]
    fn new_rejects_fewer_than_two_stops() {
        let result = Gradient::new(GradientKind::Linear, 90.0, vec![stop(0.0, 0.0)]);
        assert!(matches!(result, Err(EngineError::InvalidGradient(_))));
    }

    #[test]
    fn to_css_matches_free_function() {
        let g = two_stop();
        assert_eq!(g.to_css(), build_gradient_css(g.kind, g.angle, g.stops()));
    }

    #[test]
    fn add_stop_places_new_stop_ten_past_last() {
        let mut g = Gradient::new(
            GradientKind::Linear,
            90.0,
            vec![stop(0.0, 0.0), stop(50.0, 1.0)],
        )
        .unwrap();
        let idx = g.add_stop(gray(0.5));
        assert_eq!(idx, 2);
        assert_eq!(g.stops()[2].position, 60.0);
    }

    #[test]
    fn add_stop_caps_at_100() {
        let mut g = Gradient::new(
            GradientKind::Linear,
            90.0,
            vec![stop(95.0, 0.0), stop(0.0, 1.0)],
        )
        .unwrap();
        g.add_stop(gray(0.5));
        assert_eq!(g.stops()[2].position, 100.0);
        g.add_stop(gray(0.5));
        assert_eq!(g.stops()[3].position, 100.0);
    }

    #[test]
    fn remove_stop_keeps_minimum() {
        let mut g = two_stop();
        assert!(matches!(
            g.remove_stop(0),
            Err(EngineError::InvalidGradient(_))
        ));
        g.add_stop(gray(0.2));
        let removed = g.remove_stop(0).unwrap();
        assert_eq!(removed.position, 0.0);
        assert_eq!(g.stops().len(), 2);
    }

    #[test]
    fn remove_stop_rejects_bad_index() {
        let mut g = two_stop();
        g.add_stop(gray(0.2));
        assert!(matches!(
            g.remove_stop(9),
            Err(EngineError::StopOutOfRange { index: 9, len: 3 })
        ));
    }

    #[test]
    fn set_stop_position_clamps() {
        let mut g = two_stop();
        g.set_stop_position(0, -20.0).unwrap();
        g.set_stop_position(1, 250.0).unwrap();
        assert_eq!(g.stops()[0].position, 0.0);
        assert_eq!(g.stops()[1].position, 100.0);
        g.set_stop_position(1, f64::NAN).unwrap();
        assert_eq!(g.stops()[1].position, 0.0);
        assert!(g.set_stop_position(2, 10.0).is_err());
    }

    #[test]
    fn set_stop_color_changes_output() {
        let mut g = two_stop();
        g.set_stop_color(1, gray(0.0)).unwrap();
        assert_eq!(g.to_css(), "linear-gradient(90deg, #636363 0%, #000000 100%)");
    }

    // -- JSON --

    #[test]
    fn from_json_reads_full_spec() {
        let spec = json!({
            "type": "conic",
            "angle": 45,
            "stops": [
                {"position": 100, "l": 1, "c": 0, "h": 0},
                {"position": 0, "l": 0.5, "c": 0, "h": 0},
            ],
        });
        let g = Gradient::from_json(&spec).unwrap();
        assert_eq!(g.kind, GradientKind::Conic);
        assert_eq!(
            g.to_css(),
            "conic-gradient(from 45deg, #636363 0%, #ffffff 100%)"
        );
    }

    #[test]
    fn from_json_applies_defaults() {
        let spec = json!({"stops": [{}, {"position": 100, "l": 1}]});
        let g = Gradient::from_json(&spec).unwrap();
        assert_eq!(g.kind, GradientKind::Linear);
        assert_eq!(g.angle, DEFAULT_ANGLE);
        assert_eq!(
            g.to_css(),
            "linear-gradient(90deg, #000000 0%, #ffffff 100%)"
        );
    }

    #[test]
    fn from_json_accepts_css_color_strings() {
        let spec = json!({
            "stops": [
                {"position": 0, "color": "rgb(255, 0, 0)"},
                {"position": 100, "color": "#0000ff"},
            ],
        });
        let css = Gradient::from_json(&spec).unwrap().to_css();
        assert_eq!(css, "linear-gradient(90deg, #ff0000 0%, #0000ff 100%)");
    }

    #[test]
    fn stop_color_string_wins_over_components() {
        let stop = GradientStop::from_json(&json!({
            "position": 10, "color": "#ffffff", "l": 0.5, "c": 0.2, "h": 120,
        }));
        assert_eq!(stop.position, 10.0);
        assert!((stop.color.l - 1.0).abs() < 1e-6);

        let ignored = GradientStop::from_json(&json!({"color": 7, "l": 0.5}));
        assert_eq!(ignored.color, OkLch { l: 0.5, c: 0.0, h: 0.0 });
    }

    #[test]
    fn from_json_rejects_unknown_type_and_short_stop_lists() {
        let bad_type = json!({"type": "diamond", "stops": [{}, {}]});
        assert!(matches!(
            Gradient::from_json(&bad_type),
            Err(EngineError::UnknownGradientKind(_))
        ));
        let one_stop = json!({"stops": [{}]});
        assert!(matches!(
            Gradient::from_json(&one_stop),
            Err(EngineError::InvalidGradient(_))
        ));
    }

    #[test]
    fn stop_serializes_flat() {
        let value = serde_json::to_value(stop(25.0, 0.5)).unwrap();
        assert_eq!(
            value,
            json!({"position": 25.0, "l": 0.5, "c": 0.0, "h": 0.0})
        );
        let back: GradientStop = serde_json::from_value(value).unwrap();
        assert_eq!(back, stop(25.0, 0.5));
    }

    #[test]
    fn gradient_serializes_with_type_key() {
        let value = serde_json::to_value(two_stop()).unwrap();
        assert_eq!(value["type"], "linear");
        assert_eq!(value["stops"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn gradient_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Gradient>();
        assert_send_sync::<GradientStop>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn output_positions_are_ascending(
                positions in prop::collection::vec(0u8..=100, 2..8),
            ) {
                let stops: Vec<GradientStop> = positions
                    .iter()
                    .map(|&p| stop(p as f64, 0.5))
                    .collect();
                let css = build_gradient_css(GradientKind::Linear, 90.0, &stops);
                let emitted: Vec<f64> = css
                    .split(", ")
                    .skip(1)
                    .map(|part| {
                        let pct = part.trim_end_matches(')').rsplit(' ').next().unwrap();
                        pct.trim_end_matches('%').parse().unwrap()
                    })
                    .collect();
                prop_assert_eq!(emitted.len(), stops.len());
                prop_assert!(emitted.windows(2).all(|w| w[0] <= w[1]), "not sorted: {}", css);
            }
        }
    }
}
