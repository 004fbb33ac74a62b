//! Run a converter binary to completion.
//!
//! The command line is `<binary> <args...> <input> <output>`. stdout and
//! stderr of the child are both connected to the write end of a single OS
//! pipe, so the captured bytes interleave the way a terminal would show
//! them. wkhtmltox reports progress and warnings on stderr and most callers
//! only want "what did it say" when something goes wrong.
//!
//! ## Why spawn_blocking?
//!
//! Draining the pipe and waiting for exit both block the calling thread.
//! [`run_conversion`] moves that onto tokio's blocking pool so a slow page
//! render never stalls a runtime worker.

use crate::error::WkhtmlError;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run `binary` and return everything it printed.
///
/// # Errors
/// * [`WkhtmlError::BinaryNotFound`] if the binary does not exist
/// * [`WkhtmlError::Spawn`] if `working_dir` is not a directory, or for any
///   other launch or read failure
/// * [`WkhtmlError::ExitStatus`] if it exits non-zero; the captured bytes
///   travel with the error
pub async fn run_conversion(
    binary: &Path,
    args: &[String],
    input: &str,
    output: &Path,
    working_dir: Option<&Path>,
) -> Result<Vec<u8>, WkhtmlError> {
    let binary = binary.to_path_buf();
    let args = args.to_vec();
    let input = input.to_string();
    let output = output.to_path_buf();
    let working_dir = working_dir.map(Path::to_path_buf);

    tokio::task::spawn_blocking(move || {
        run_conversion_blocking(&binary, &args, &input, &output, working_dir.as_deref())
    })
    .await
    .map_err(|e| WkhtmlError::Internal(format!("Conversion task panicked: {}", e)))?
}

/// Blocking implementation of [`run_conversion`].
pub fn run_conversion_blocking(
    binary: &Path,
    args: &[String],
    input: &str,
    output: &Path,
    working_dir: Option<&Path>,
) -> Result<Vec<u8>, WkhtmlError> {
    let started_at = Instant::now();
    let spawn_err = |source: std::io::Error| WkhtmlError::Spawn {
        binary: binary.to_path_buf(),
        source,
    };

    // A missing current_dir also fails the spawn with NotFound, which would
    // otherwise read as a missing binary.
    if let Some(dir) = working_dir.filter(|dir| !dir.is_dir()) {
        warn!(binary = %binary.display(), dir = %dir.display(), "Working directory is missing");
        return Err(spawn_err(std::io::Error::new(
            ErrorKind::NotFound,
            format!("working directory '{}' does not exist", dir.display()),
        )));
    }

    let (mut reader, writer) = os_pipe::pipe().map_err(spawn_err)?;
    let writer_err = writer.try_clone().map_err(spawn_err)?;

    let mut cmd = Command::new(binary);
    cmd.args(args)
        .arg(input)
        .arg(output)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_err);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    debug!(binary = %binary.display(), ?args, input, output = %output.display(), "Spawning converter");

    let mut child = cmd.spawn().map_err(|err| {
        warn!(binary = %binary.display(), error = %err, "Failed to spawn converter");
        if err.kind() == ErrorKind::NotFound {
            WkhtmlError::BinaryNotFound {
                name: binary.display().to_string(),
            }
        } else {
            spawn_err(err)
        }
    })?;

    // The command still owns both write ends; the read below only sees EOF
    // once every copy outside the child is closed.
    drop(cmd);

    let mut captured = Vec::new();
    let read_result = reader.read_to_end(&mut captured);
    let status = child.wait().map_err(spawn_err)?;
    read_result.map_err(spawn_err)?;

    let elapsed_ms = started_at.elapsed().as_millis() as u64;
    if !status.success() {
        warn!(
            binary = %binary.display(),
            exit_code = status.code().map(i64::from).unwrap_or(-1),
            elapsed_ms,
            output_bytes = captured.len(),
            "Converter exited with failure"
        );
        return Err(WkhtmlError::ExitStatus {
            binary: binary.to_path_buf(),
            code: status.code(),
            output: captured,
        });
    }

    info!(
        binary = %binary.display(),
        output = %output.display(),
        elapsed_ms,
        "Conversion finished"
    );
    Ok(captured)
}
