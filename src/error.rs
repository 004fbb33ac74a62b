//! Error types for the wkhtmlx library.
//!
//! A single enum, [`WkhtmlError`], covers every failure the library can
//! report. The variants fall into four groups:
//!
//! * **Decode**: the JSON options document could not be parsed.
//! * **Flags**: strict rendering met a key it has no rule for.
//! * **Lookup**: the converter binary is missing or its version probe failed.
//! * **Invocation**: the child process could not be started or exited
//!   non-zero. A non-zero exit keeps the bytes the tool printed so callers
//!   can show wkhtmltox's own diagnostic text.

use crate::options::Renderer;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the wkhtmlx library.
#[derive(Debug, Error)]
pub enum WkhtmlError {
    // ── Decode errors ─────────────────────────────────────────────────────
    /// The options document is not valid JSON or has a mistyped field.
    #[error("Invalid options JSON: {0}")]
    Decode(#[from] serde_json::Error),

    // ── Flag errors ───────────────────────────────────────────────────────
    /// The key is not part of the renderer's flag vocabulary.
    #[error("Unknown {renderer} flag '--{key}'")]
    UnknownFlag { renderer: Renderer, key: String },

    /// A boolean value was stored under a key with no polarity class,
    /// so there is no way to spell it on the command line.
    #[error("Flag '--{key}' does not take a boolean value")]
    UnregisteredBoolean { key: String },

    // ── Lookup errors ─────────────────────────────────────────────────────
    /// The converter binary was not found on the search path.
    #[error("Converter '{name}' not found on PATH\nInstall wkhtmltopdf (which ships both wkhtmltoimage and wkhtmltopdf) or point the config at the binary.")]
    BinaryNotFound { name: String },

    /// `<binary> --version` could not be run or exited non-zero.
    #[error("Version probe failed for '{path}': {detail}")]
    VersionProbe { path: PathBuf, detail: String },

    // ── Invocation errors ─────────────────────────────────────────────────
    /// The child process could not be launched, or its output could not be read.
    #[error("Failed to run '{binary}': {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but exited with a failure status.
    ///
    /// `code` is `None` when the process was killed by a signal.
    #[error("'{binary}' exited with {}", describe_exit(.code))]
    ExitStatus {
        binary: PathBuf,
        code: Option<i32>,
        output: Vec<u8>,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WkhtmlError {
    /// Bytes the converter printed before failing, if any were captured.
    pub fn output(&self) -> Option<&[u8]> {
        match self {
            WkhtmlError::ExitStatus { output, .. } => Some(output),
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
