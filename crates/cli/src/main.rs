#![deny(unsafe_code)]
//! CLI binary for hueforge color tokens and gradients.
//!
//! Subcommands:
//! - `hex <value>`: normalize any supported CSS color to hex
//! - `oklch <l> <c> <h>`: convert an OKLCh triple to hex
//! - `token <hex>`: convert a hex color to a canonical `oklch(...)` token
//! - `gradient`: render a CSS gradient from flags or a JSON spec file
//! - `list`: print gradient types and supported color syntaxes

mod error;
mod input;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use hueforge_core::{
    format_oklch, hex_to_oklch, hex_to_oklch_token, oklch_to_srgb_hex, parse_to_hex, GradientKind,
    Hex, OkLch,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

const SYNTAXES: &[&str] = &[
    "#rrggbb",
    "oklch(L[%] C H[ / A])",
    "rgb(R, G, B[, A]) / rgba(...)",
    "hsl(H, S%, L%) / hsla(...)",
];

#[derive(Parser)]
#[command(name = "hueforge", about = "OKLCH color tokens and CSS gradients")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a CSS color string to hex (unrecognized input gives #000000).
    Hex {
        /// Color string, e.g. "oklch(0.7 0.15 250)" or "rgb(10, 20, 30)".
        value: String,
    },
    /// Convert an OKLCh triple to hex, clipping out-of-gamut channels.
    Oklch {
        /// Lightness in [0, 1].
        #[arg(allow_negative_numbers = true)]
        l: f64,
        /// Chroma, typically in [0, 0.4].
        #[arg(allow_negative_numbers = true)]
        c: f64,
        /// Hue in degrees.
        #[arg(allow_negative_numbers = true)]
        h: f64,
    },
    /// Convert a #rrggbb color to a canonical oklch(...) token.
    Token {
        /// Hex color, exactly "#rrggbb".
        hex: String,
    },
    /// Render a CSS gradient.
    Gradient {
        /// Gradient type (linear, radial, conic).
        #[arg(short = 't', long = "type", default_value = "linear")]
        kind: String,

        /// Angle in degrees (ignored by radial gradients).
        #[arg(short, long, default_value_t = 90.0, allow_negative_numbers = true)]
        angle: f64,

        /// Stops as a JSON array of {"position", "l", "c", "h"} or {"position", "color"}.
        #[arg(long, default_value = "[]")]
        stops: String,

        /// Read the whole gradient spec from a JSON file instead of flags.
        #[arg(short, long, conflicts_with_all = ["kind", "angle", "stops"])]
        file: Option<PathBuf>,
    },
    /// List gradient types and supported color syntaxes.
    List,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; that is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Hex { value } => {
            let hex = parse_to_hex(&value);
            if cli.json {
                let info = serde_json::json!({ "input": value, "hex": hex });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{hex}");
            }
        }
        Command::Oklch { l, c, h } => {
            let hex = oklch_to_srgb_hex(l, c, h);
            if cli.json {
                let info = serde_json::json!({
                    "oklch": format_oklch(OkLch { l, c, h }),
                    "hex": hex,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{hex}");
            }
        }
        Command::Token { hex } => {
            let hex: Hex = hex.parse()?;
            let token = hex_to_oklch_token(hex);
            if cli.json {
                let info = serde_json::json!({
                    "hex": hex,
                    "oklch": hex_to_oklch(hex),
                    "token": token,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{token}");
            }
        }
        Command::Gradient {
            kind,
            angle,
            stops,
            file,
        } => {
            let gradient = match file {
                Some(path) => input::load_gradient_file(&path)?,
                None => input::gradient_from_flags(&kind, angle, &stops)?,
            };
            let css = gradient.to_css();
            if cli.json {
                let info = serde_json::json!({ "gradient": gradient, "css": css });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{css}");
            }
        }
        Command::List => {
            let kinds = GradientKind::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "gradient_types": kinds,
                    "color_syntaxes": SYNTAXES,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Gradient types:");
                println!("  {}", kinds.join(", "));
                println!("Color syntaxes:");
                for syntax in SYNTAXES {
                    println!("  {syntax}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
