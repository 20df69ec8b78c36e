//! Gradient specs from files and command-line flags.
//!
//! Both paths produce the same JSON shape and go through
//! [`Gradient::from_json`], so defaults and validation stay in the core.

use std::fs;
use std::path::Path;

use hueforge_core::Gradient;
use serde_json::{json, Value};

use crate::error::CliError;

/// Reads a gradient spec file: `{ "type", "angle", "stops": [...] }`.
pub fn load_gradient_file(path: &Path) -> Result<Gradient, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    let spec: Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid gradient spec in {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "loaded gradient spec");
    Ok(Gradient::from_json(&spec)?)
}

/// Builds a gradient from `--type`, `--angle` and a `--stops` JSON array.
pub fn gradient_from_flags(kind: &str, angle: f64, stops: &str) -> Result<Gradient, CliError> {
    let stops: Value = serde_json::from_str(stops)
        .map_err(|e| CliError::Input(format!("invalid --stops JSON: {e}")))?;
    if !stops.is_array() {
        return Err(CliError::Input("--stops must be a JSON array".into()));
    }
    let spec = json!({ "type": kind, "angle": angle, "stops": stops });
    Ok(Gradient::from_json(&spec)?)
}
