//! Find a converter binary and ask it for its version.

use crate::config::ConverterConfig;
use crate::error::WkhtmlError;
use crate::options::Renderer;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// A converter binary found on the system.
#[derive(Debug)]
pub struct ConverterInfo {
    /// Absolute path the name resolved to.
    pub path: PathBuf,
    /// Output of `<path> --version` with trailing line breaks removed.
    ///
    /// A failed probe does not hide the path: the binary exists, it just
    /// could not report a version.
    pub version: Result<String, WkhtmlError>,
}

impl ConverterInfo {
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().ok()
    }
}

/// JSON-friendly view of a [`ConverterInfo`], used by the CLI.
#[derive(Debug, Serialize)]
pub struct ConverterReport {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_error: Option<String>,
}

impl From<&ConverterInfo> for ConverterReport {
    fn from(info: &ConverterInfo) -> Self {
        Self {
            path: info.path.clone(),
            version: info.version().map(str::to_string),
            version_error: info.version.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Resolve `name` (a bare command name or a path) and probe its version.
///
/// # Errors
/// [`WkhtmlError::BinaryNotFound`] if `name` does not resolve to an
/// executable. A failed version probe is reported inside the returned
/// [`ConverterInfo`] instead.
pub fn lookup_converter(name: impl AsRef<Path>) -> Result<ConverterInfo, WkhtmlError> {
    let name = name.as_ref();
    let path = which::which(name).map_err(|e| {
        debug!(name = %name.display(), error = %e, "Converter lookup failed");
        WkhtmlError::BinaryNotFound {
            name: name.display().to_string(),
        }
    })?;
    let version = probe_version(&path);
    debug!(path = %path.display(), ?version, "Converter found");
    Ok(ConverterInfo { path, version })
}

/// [`lookup_converter`] for the binary `config` uses for `renderer`.
pub fn lookup_renderer(
    renderer: Renderer,
    config: &ConverterConfig,
) -> Result<ConverterInfo, WkhtmlError> {
    lookup_converter(config.binary_for(renderer))
}

fn probe_version(path: &Path) -> Result<String, WkhtmlError> {
    let probe_err = |detail: String| WkhtmlError::VersionProbe {
        path: path.to_path_buf(),
        detail,
    };

    let (status, output) =
        combined_output(path, &["--version"]).map_err(|e| probe_err(e.to_string()))?;

    if !status.success() {
        let said = String::from_utf8_lossy(&output);
        return Err(probe_err(format!("exited with {}: {}", status, said.trim_end())));
    }

    Ok(clean_version(&output))
}

/// Run `path` with `args` and collect stdout and stderr from one pipe.
///
/// Some builds print their version banner on stderr.
fn combined_output(path: &Path, args: &[&str]) -> io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = os_pipe::pipe()?;
    let writer_err = writer.try_clone()?;

    let mut cmd = Command::new(path);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_err);
    let mut child = cmd.spawn()?;
    drop(cmd);

    let mut output = Vec::new();
    let read_result = reader.read_to_end(&mut output);
    let status = child.wait()?;
    read_result?;
    Ok((status, output))
}

fn clean_version(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}
