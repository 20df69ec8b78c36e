//! Error type for the `hueforge` binary.
//!
//! Every failure maps to its own process exit code so scripts can branch on
//! it. Clap exits with 2 on bad arguments before `run` starts.
//!
//! | code | variant | typical cause |
//! |---|---|---|
//! | 10 | `Engine` | unknown gradient type, fewer than two stops |
//! | 11 | `Io` | gradient file missing or unreadable |
//! | 12 | `Input` | `token` given something other than `#rrggbb`, bad `--stops` JSON |
//! | 13 | `Serialization` | `--json` output could not be written |

use hueforge_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The core rejected a gradient.
    Engine(EngineError),
    Io(String),
    /// Malformed hex or stop JSON supplied on the command line or in a file.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

/// Color syntax errors are the user's input; everything else is a gradient
/// the core refused to build.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
