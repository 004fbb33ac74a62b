//! Options for `wkhtmltoimage`.

use crate::error::WkhtmlError;
use crate::flags::FlagSet;
use crate::options::{Cookie, CustomHeader, Renderer};
use serde::{Deserialize, Serialize};

/// Flag keys `wkhtmltoimage` is driven with, in rendering order.
pub(crate) const FLAG_KEYS: &[&str] = &[
    "allow",
    "cache-dir",
    "cookie",
    "crop-h",
    "crop-w",
    "crop-x",
    "crop-y",
    "custom-header",
    "custom-header-propagation",
    "debug-javascript",
    "encoding",
    "format",
    "height",
    "images",
    "javascript",
    "javascript-delay",
    "load-error-handling",
    "load-media-error-handling",
    "minimum-font-size",
    "password",
    "quality",
    "run-script",
    "smart-width",
    "stop-slow-scripts",
    "transparent",
    "use-xserver",
    "username",
    "width",
    "zoom",
];

/// Settings for one `wkhtmltoimage` run.
///
/// Every field is optional; `None` means the flag is left off the command
/// line and the binary's own default applies.
///
/// # Example
/// ```rust
/// use wkhtmlx::ImageOptions;
///
/// let opts = ImageOptions {
///     format: Some("png".into()),
///     width: Some(1024),
///     ..Default::default()
/// };
/// let args = opts.to_flag_set().args().unwrap();
/// assert_eq!(args, ["--format", "png", "--width", "1024"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Local files or directories the page may load (repeatable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    /// Web cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,
    /// Additional cookies, URL-encoded values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Vec<Cookie>>,
    /// Crop height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_h: Option<i64>,
    /// Crop width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_w: Option<i64>,
    /// Crop x coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_x: Option<i64>,
    /// Crop y coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_y: Option<i64>,
    /// Additional HTTP headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_header: Option<Vec<CustomHeader>>,
    /// Send `custom_header` with every resource request, not only the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_header_propagation: Option<bool>,
    /// Show javascript debugging output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_javascript: Option<bool>,
    /// Default text encoding of the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Output file format (`png`, `jpg`, `svg`, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Screen height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    /// Load or print images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<bool>,
    /// Allow the page to run javascript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<bool>,
    /// Milliseconds to wait for javascript to finish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript_delay: Option<i64>,
    /// How to handle pages that fail to load (`abort`, `ignore`, `skip`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error_handling: Option<String>,
    /// How to handle media files that fail to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_media_error_handling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_font_size: Option<i64>,
    /// HTTP authentication password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Output image quality (0–100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<i64>,
    /// Scripts to run after the page loads (repeatable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_script: Option<Vec<String>>,
    /// Extend the width to fit unbreakable content. Disable to enforce `width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_width: Option<bool>,
    /// Stop slow running javascripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_slow_scripts: Option<bool>,
    /// Transparent background (PNG only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
    /// Use the X server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_xserver: Option<bool>,
    /// HTTP authentication username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Screen width, as a guide unless `smart_width` is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl ImageOptions {
    /// Decode options from a JSON object with snake_case keys.
    pub fn from_json(data: &[u8]) -> Result<Self, WkhtmlError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self, WkhtmlError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Copy every present setting into a fresh [`FlagSet`].
    pub fn to_flag_set(&self) -> FlagSet {
        let mut fs = FlagSet::new(Renderer::Image);
        fs.insert_present("allow", &self.allow);
        fs.insert_present("cache-dir", &self.cache_dir);
        fs.insert_present("cookie", &self.cookie);
        fs.insert_present("crop-h", &self.crop_h);
        fs.insert_present("crop-w", &self.crop_w);
        fs.insert_present("crop-x", &self.crop_x);
        fs.insert_present("crop-y", &self.crop_y);
        fs.insert_present("custom-header", &self.custom_header);
        fs.insert_present("custom-header-propagation", &self.custom_header_propagation);
        fs.insert_present("debug-javascript", &self.debug_javascript);
        fs.insert_present("encoding", &self.encoding);
        fs.insert_present("format", &self.format);
        fs.insert_present("height", &self.height);
        fs.insert_present("images", &self.images);
        fs.insert_present("javascript", &self.javascript);
        fs.insert_present("javascript-delay", &self.javascript_delay);
        fs.insert_present("load-error-handling", &self.load_error_handling);
        fs.insert_present("load-media-error-handling", &self.load_media_error_handling);
        fs.insert_present("minimum-font-size", &self.minimum_font_size);
        fs.insert_present("password", &self.password);
        fs.insert_present("quality", &self.quality);
        fs.insert_present("run-script", &self.run_script);
        fs.insert_present("smart-width", &self.smart_width);
        fs.insert_present("stop-slow-scripts", &self.stop_slow_scripts);
        fs.insert_present("transparent", &self.transparent);
        fs.insert_present("use-xserver", &self.use_xserver);
        fs.insert_present("username", &self.username);
        fs.insert_present("width", &self.width);
        fs.insert_present("zoom", &self.zoom);
        fs
    }
}

impl From<&ImageOptions> for FlagSet {
    fn from(opts: &ImageOptions) -> Self {
        opts.to_flag_set()
    }
}
