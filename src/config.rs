//! Configuration for running the wkhtmltox converters.
//!
//! Everything that is about *where and how* the binaries run lives in
//! [`ConverterConfig`], built via its [`ConverterConfigBuilder`]. What the
//! binaries are asked to do lives in the option records instead.

use crate::error::WkhtmlError;
use crate::options::Renderer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the `wkhtmltoimage` binary.
pub const IMAGE_BINARY_ENV: &str = "WKHTMLTOIMAGE_BIN";
/// Environment variable overriding the `wkhtmltopdf` binary.
pub const PDF_BINARY_ENV: &str = "WKHTMLTOPDF_BIN";

/// Configuration shared by every conversion.
///
/// # Example
/// ```rust
/// use wkhtmlx::ConverterConfig;
///
/// let config = ConverterConfig::builder()
///     .pdf_binary("/opt/wkhtmltox/bin/wkhtmltopdf")
///     .strict_flags(false)
///     .build()
///     .unwrap();
/// assert!(!config.strict_flags);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Binary for image conversions. A bare name is resolved on `PATH`.
    /// Default: `wkhtmltoimage`.
    pub image_binary: PathBuf,

    /// Binary for PDF conversions. Default: `wkhtmltopdf`.
    pub pdf_binary: PathBuf,

    /// Reject flags that cannot be rendered instead of dropping them. Default: true.
    ///
    /// When false, an unknown key or a boolean under a key without a
    /// polarity is skipped with a `warn` log and the conversion goes ahead.
    pub strict_flags: bool,

    /// Directory the child process runs in. Relative input and output
    /// paths resolve against it. Default: inherit.
    pub working_dir: Option<PathBuf>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            image_binary: PathBuf::from(Renderer::Image.binary_name()),
            pdf_binary: PathBuf::from(Renderer::Pdf.binary_name()),
            strict_flags: true,
            working_dir: None,
        }
    }
}

impl ConverterConfig {
    /// Create a new builder for `ConverterConfig`.
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder {
            config: Self::default(),
        }
    }

    /// Defaults, with binaries taken from `WKHTMLTOIMAGE_BIN` and
    /// `WKHTMLTOPDF_BIN` when those are set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = env_path(IMAGE_BINARY_ENV) {
            config.image_binary = path;
        }
        if let Some(path) = env_path(PDF_BINARY_ENV) {
            config.pdf_binary = path;
        }
        config
    }

    /// The binary configured for `renderer`.
    pub fn binary_for(&self, renderer: Renderer) -> &Path {
        match renderer {
            Renderer::Image => &self.image_binary,
            Renderer::Pdf => &self.pdf_binary,
        }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Builder for [`ConverterConfig`].
#[derive(Debug)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    pub fn image_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.image_binary = path.into();
        self
    }

    pub fn pdf_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdf_binary = path.into();
        self
    }

    pub fn strict_flags(mut self, v: bool) -> Self {
        self.config.strict_flags = v;
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.working_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConverterConfig, WkhtmlError> {
        let c = &self.config;
        if c.image_binary.as_os_str().is_empty() {
            return Err(WkhtmlError::InvalidConfig(
                "image binary path must not be empty".into(),
            ));
        }
        if c.pdf_binary.as_os_str().is_empty() {
            return Err(WkhtmlError::InvalidConfig(
                "pdf binary path must not be empty".into(),
            ));
        }
        if matches!(&c.working_dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err(WkhtmlError::InvalidConfig(
                "working directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
