//! Conversion entry points.
//!
//! Each call renders a [`FlagSet`] into arguments, runs the converter that
//! the set was built for and hands back whatever the tool printed. The
//! converted document itself lands at `output`; the returned bytes are only
//! wkhtmltox's progress and warning text.

use crate::config::ConverterConfig;
use crate::error::WkhtmlError;
use crate::flags::FlagSet;
use crate::options::{ImageOptions, PdfOptions};
use crate::pipeline::runner;
use std::path::Path;
use tracing::info;

/// Render `flags` to argument tokens, strictly or lossily according to
/// [`ConverterConfig::strict_flags`].
pub fn render_args(flags: &FlagSet, config: &ConverterConfig) -> Result<Vec<String>, WkhtmlError> {
    if config.strict_flags {
        flags.args()
    } else {
        Ok(flags.args_lossy())
    }
}

/// Convert `input` to `output` with the converter `flags` was built for.
///
/// `input` is whatever the binary accepts as a page locator: a URL, a local
/// path or `-` for stdin (which is closed, so `-` reads nothing).
///
/// # Returns
/// The combined stdout/stderr of the converter.
///
/// # Errors
/// Flag errors in strict mode, [`WkhtmlError::BinaryNotFound`] when the
/// configured binary is missing and [`WkhtmlError::ExitStatus`] when it
/// fails. The latter carries the captured output.
///
/// # Example
/// ```rust,no_run
/// use wkhtmlx::{generate, ConverterConfig, FlagSet, Renderer};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut flags = FlagSet::new(Renderer::Pdf);
/// flags.insert("page-size", "A4");
/// flags.insert("grayscale", true);
/// generate(&flags, "https://example.com", "example.pdf", &ConverterConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn generate(
    flags: &FlagSet,
    input: &str,
    output: impl AsRef<Path>,
    config: &ConverterConfig,
) -> Result<Vec<u8>, WkhtmlError> {
    let output = output.as_ref();
    let args = render_args(flags, config)?;
    let binary = config.binary_for(flags.renderer());

    info!(
        renderer = %flags.renderer(),
        input,
        output = %output.display(),
        "Starting conversion"
    );
    runner::run_conversion(binary, &args, input, output, config.working_dir.as_deref()).await
}

/// Convert with `wkhtmltoimage`.
pub async fn generate_image(
    options: &ImageOptions,
    input: &str,
    output: impl AsRef<Path>,
    config: &ConverterConfig,
) -> Result<Vec<u8>, WkhtmlError> {
    generate(&options.to_flag_set(), input, output, config).await
}

/// Convert with `wkhtmltopdf`.
pub async fn generate_pdf(
    options: &PdfOptions,
    input: &str,
    output: impl AsRef<Path>,
    config: &ConverterConfig,
) -> Result<Vec<u8>, WkhtmlError> {
    generate(&options.to_flag_set(), input, output, config).await
}

/// Synchronous counterpart of [`generate`].
///
/// Runs the converter on the calling thread; no tokio runtime is needed.
pub fn generate_sync(
    flags: &FlagSet,
    input: &str,
    output: impl AsRef<Path>,
    config: &ConverterConfig,
) -> Result<Vec<u8>, WkhtmlError> {
    let output = output.as_ref();
    let args = render_args(flags, config)?;
    let binary = config.binary_for(flags.renderer());

    info!(
        renderer = %flags.renderer(),
        input,
        output = %output.display(),
        "Starting conversion"
    );
    runner::run_conversion_blocking(binary, &args, input, output, config.working_dir.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Renderer;

    fn lenient() -> ConverterConfig {
        ConverterConfig::builder().strict_flags(false).build().unwrap()
    }

    fn with_stray_boolean() -> FlagSet {
        let mut fs = FlagSet::new(Renderer::Image);
        fs.insert("format", "png");
        fs.insert("width", true);
        fs
    }

    #[test]
    fn strict_config_rejects_unrenderable_flags() {
        let err = render_args(&with_stray_boolean(), &ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, WkhtmlError::UnregisteredBoolean { .. }));
    }

    #[test]
    fn lenient_config_drops_unrenderable_flags() {
        let args = render_args(&with_stray_boolean(), &lenient()).unwrap();
        assert_eq!(args, vec!["--format", "png"]);
    }

    #[test]
    fn strict_failure_happens_before_spawning() {
        // The binary does not exist; the flag error must win.
        let config = ConverterConfig::builder()
            .image_binary("wkhtmlx-missing-binary")
            .build()
            .unwrap();
        let err = generate_sync(&with_stray_boolean(), "in.html", "out.png", &config).unwrap_err();
        assert!(matches!(err, WkhtmlError::UnregisteredBoolean { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn sync_runs_the_configured_binary() {
        let config = ConverterConfig::builder().pdf_binary("echo").build().unwrap();
        let opts = PdfOptions {
            page_size: Some("A4".into()),
            grayscale: Some(true),
            ..Default::default()
        };
        let out = generate_sync(&opts.to_flag_set(), "in.html", "out.pdf", &config).unwrap();
        assert_eq!(
            String::from_utf8_lossy(&out),
            "--grayscale --page-size A4 in.html out.pdf\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn async_entry_point_on_a_test_runtime() {
        let config = ConverterConfig::builder().image_binary("echo").build().unwrap();
        let opts = ImageOptions {
            quality: Some(80),
            ..Default::default()
        };
        let out = tokio_test::block_on(generate_image(&opts, "a.html", "a.jpg", &config)).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "--quality 80 a.html a.jpg\n");
    }
}
