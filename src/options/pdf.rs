//! Options for `wkhtmltopdf`.
//!
//! A few JSON keys differ from the field names to stay compatible with
//! existing option documents: `cookies`, `custom_headers`, `lowquality`,
//! and `smart_width` for the smart-shrinking switch.
//!
//! The smart-shrinking switch is keyed `smart-width` in the flag set, the
//! same key the image converter uses, so existing flag sets keep working.
//! `smart-shrinking` is also accepted for hand-built sets.

use crate::error::WkhtmlError;
use crate::flags::FlagSet;
use crate::options::{Cookie, CustomHeader, Renderer};
use serde::{Deserialize, Serialize};

/// Flag keys `wkhtmltopdf` is driven with, in rendering order.
pub(crate) const FLAG_KEYS: &[&str] = &[
    "allow",
    "cache-dir",
    "cookie",
    "custom-header",
    "custom-header-propagation",
    "debug-javascript",
    "dpi",
    "encoding",
    "external-links",
    "forms",
    "grayscale",
    "images",
    "image-dpi",
    "image-quality",
    "internal-links",
    "javascript",
    "javascript-delay",
    "load-error-handling",
    "load-media-error-handling",
    "lowquality",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "minimum-font-size",
    "no-pdf-compression",
    "orientation",
    "page-height",
    "page-size",
    "page-width",
    "password",
    "run-script",
    "smart-shrinking",
    "smart-width",
    "stop-slow-scripts",
    "title",
    "use-xserver",
    "username",
    "zoom",
];

/// Settings for one `wkhtmltopdf` run.
///
/// Every field is optional; `None` means the flag is left off the command
/// line. Margins and page dimensions are passed through as integers in the
/// binary's default unit (millimetres).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,
    #[serde(rename = "cookies", skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Vec<Cookie>>,
    #[serde(rename = "custom_headers", skip_serializing_if = "Option::is_none")]
    pub custom_header: Option<Vec<CustomHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_header_propagation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_javascript: Option<bool>,
    /// Change the DPI explicitly (X11 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Make links to remote web pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_links: Option<bool>,
    /// Turn HTML form fields into PDF form fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<bool>,
    /// Scale embedded images down to this DPI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_dpi: Option<i64>,
    /// JPEG-compress embedded images to this quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_quality: Option<i64>,
    /// Make local links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error_handling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_media_error_handling: Option<String>,
    /// Generate a lower quality PDF to shrink the output.
    #[serde(rename = "lowquality", skip_serializing_if = "Option::is_none")]
    pub low_quality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_font_size: Option<i64>,
    /// Skip lossless compression of PDF objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_pdf_compression: Option<bool>,
    /// `Landscape` or `Portrait`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_height: Option<i64>,
    /// Named paper size (`A4`, `Letter`, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_script: Option<Vec<String>>,
    /// WebKit's intelligent shrinking strategy (non-constant pixel/dpi ratio).
    #[serde(
        rename = "smart_width",
        alias = "smart_shrinking",
        skip_serializing_if = "Option::is_none"
    )]
    pub smart_shrinking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_slow_scripts: Option<bool>,
    /// Title of the generated PDF.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_xserver: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl PdfOptions {
    /// Decode options from a JSON object with snake_case keys.
    pub fn from_json(data: &[u8]) -> Result<Self, WkhtmlError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self, WkhtmlError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Copy every present setting into a fresh [`FlagSet`].
    pub fn to_flag_set(&self) -> FlagSet {
        let mut fs = FlagSet::new(Renderer::Pdf);
        fs.insert_present("allow", &self.allow);
        fs.insert_present("cache-dir", &self.cache_dir);
        fs.insert_present("cookie", &self.cookie);
        fs.insert_present("custom-header", &self.custom_header);
        fs.insert_present("custom-header-propagation", &self.custom_header_propagation);
        fs.insert_present("debug-javascript", &self.debug_javascript);
        fs.insert_present("dpi", &self.dpi);
        fs.insert_present("encoding", &self.encoding);
        fs.insert_present("external-links", &self.external_links);
        fs.insert_present("forms", &self.forms);
        fs.insert_present("grayscale", &self.grayscale);
        fs.insert_present("images", &self.images);
        fs.insert_present("image-dpi", &self.image_dpi);
        fs.insert_present("image-quality", &self.image_quality);
        fs.insert_present("internal-links", &self.internal_links);
        fs.insert_present("javascript", &self.javascript);
        fs.insert_present("javascript-delay", &self.javascript_delay);
        fs.insert_present("load-error-handling", &self.load_error_handling);
        fs.insert_present("load-media-error-handling", &self.load_media_error_handling);
        fs.insert_present("lowquality", &self.low_quality);
        fs.insert_present("margin-bottom", &self.margin_bottom);
        fs.insert_present("margin-left", &self.margin_left);
        fs.insert_present("margin-right", &self.margin_right);
        fs.insert_present("margin-top", &self.margin_top);
        fs.insert_present("minimum-font-size", &self.minimum_font_size);
        fs.insert_present("no-pdf-compression", &self.no_pdf_compression);
        fs.insert_present("orientation", &self.orientation);
        fs.insert_present("page-height", &self.page_height);
        fs.insert_present("page-size", &self.page_size);
        fs.insert_present("page-width", &self.page_width);
        fs.insert_present("password", &self.password);
        fs.insert_present("run-script", &self.run_script);
        fs.insert_present("smart-width", &self.smart_shrinking);
        fs.insert_present("stop-slow-scripts", &self.stop_slow_scripts);
        fs.insert_present("title", &self.title);
        fs.insert_present("use-xserver", &self.use_xserver);
        fs.insert_present("username", &self.username);
        fs.insert_present("zoom", &self.zoom);
        fs
    }
}

impl From<&PdfOptions> for FlagSet {
    fn from(opts: &PdfOptions) -> Self {
        opts.to_flag_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FlagValue;
    use crate::options::NameValue;
    use crate::polarity;

    fn everything() -> PdfOptions {
        PdfOptions {
            allow: Some(vec!["/srv".into()]),
            cache_dir: Some("/tmp/cache".into()),
            cookie: Some(vec![NameValue::new("a", "1"), NameValue::new("b", "2")]),
            custom_header: Some(vec![NameValue::new("X-A", "1")]),
            custom_header_propagation: Some(false),
            debug_javascript: Some(true),
            dpi: Some(300),
            encoding: Some("utf-8".into()),
            external_links: Some(true),
            forms: Some(false),
            grayscale: Some(true),
            images: Some(false),
            image_dpi: Some(150),
            image_quality: Some(85),
            internal_links: Some(true),
            javascript: Some(true),
            javascript_delay: Some(500),
            load_error_handling: Some("abort".into()),
            load_media_error_handling: Some("ignore".into()),
            low_quality: Some(true),
            margin_bottom: Some(10),
            margin_left: Some(11),
            margin_right: Some(12),
            margin_top: Some(13),
            minimum_font_size: Some(8),
            no_pdf_compression: Some(false),
            orientation: Some("Landscape".into()),
            page_height: Some(297),
            page_size: Some("A4".into()),
            page_width: Some(210),
            password: Some("pw".into()),
            run_script: Some(vec!["go()".into()]),
            smart_shrinking: Some(true),
            stop_slow_scripts: Some(false),
            title: Some("Quarterly".into()),
            use_xserver: Some(true),
            username: Some("me".into()),
            zoom: Some(1.25),
        }
    }

    #[test]
    fn every_field_lands_under_its_key() {
        let fs = everything().to_flag_set();
        let keys: Vec<&str> = fs.iter().map(|(k, _)| k).collect();
        let translated: Vec<&str> = FLAG_KEYS
            .iter()
            .copied()
            .filter(|k| *k != "smart-shrinking")
            .collect();
        assert_eq!(keys, translated);
        assert_eq!(fs.get("margin-top"), Some(&FlagValue::Int(13)));
        assert_eq!(fs.get("page-size"), Some(&FlagValue::Str("A4".into())));
        assert_eq!(fs.get("lowquality"), Some(&FlagValue::Bool(true)));
        assert_eq!(fs.get("smart-width"), Some(&FlagValue::Bool(true)));
        assert!(!fs.contains_key("smart-shrinking"));
        assert_eq!(fs.get("zoom"), Some(&FlagValue::Float(1.25)));
        assert_eq!(
            fs.get("cookie").and_then(FlagValue::as_pairs).map(<[_]>::len),
            Some(2)
        );
    }

    #[test]
    fn unset_fields_produce_no_entries() {
        assert!(PdfOptions::default().to_flag_set().is_empty());
        let opts = PdfOptions {
            title: Some("T".into()),
            ..Default::default()
        };
        let fs = opts.to_flag_set();
        assert_eq!(fs.len(), 1);
        assert!(fs.contains_key("title"));
    }

    #[test]
    fn every_boolean_key_has_a_polarity() {
        for (key, value) in everything().to_flag_set().iter() {
            if value.as_bool().is_some() {
                assert!(polarity::lookup(key).is_some(), "no polarity for {key}");
            }
        }
    }

    #[test]
    fn full_record_renders_strictly() {
        let args = everything().to_flag_set().args().unwrap();
        for expected in [
            "--no-custom-header-propagation",
            "--debug-javascript",
            "--enable-external-links",
            "--disable-forms",
            "--grayscale",
            "--no-images",
            "--enable-internal-links",
            "--enable-javascript",
            "--lowquality",
            "--enable-smart-width",
            "--no-stop-slow-scripts",
            "--use-xserver",
        ] {
            assert!(args.iter().any(|a| a == expected), "missing {expected}");
        }
        assert!(!args.iter().any(|a| a == "--no-pdf-compression"));
    }

    #[test]
    fn json_keys_keep_their_historical_names() {
        let opts = PdfOptions::from_json_str(
            r#"{
                "cookies": [{"name": "sid", "value": "42"}],
                "custom_headers": [{"name": "X-Env", "value": "test"}],
                "lowquality": true,
                "smart_width": false,
                "margin_top": 20,
                "page_size": "Letter",
                "title": null
            }"#,
        )
        .unwrap();
        assert_eq!(opts.cookie, Some(vec![NameValue::new("sid", "42")]));
        assert_eq!(opts.custom_header, Some(vec![NameValue::new("X-Env", "test")]));
        assert_eq!(opts.low_quality, Some(true));
        assert_eq!(opts.smart_shrinking, Some(false));
        assert_eq!(opts.margin_top, Some(20));
        assert_eq!(opts.page_size.as_deref(), Some("Letter"));
        assert_eq!(opts.title, None);

        let args = opts.to_flag_set().args().unwrap();
        assert!(args.iter().any(|a| a == "--disable-smart-width"));
    }

    #[test]
    fn smart_shrinking_alias() {
        let opts = PdfOptions::from_json(br#"{"smart_shrinking": true}"#).unwrap();
        assert_eq!(opts.smart_shrinking, Some(true));
        assert_eq!(opts.to_flag_set().args().unwrap(), vec!["--enable-smart-width"]);
    }

    #[test]
    fn hand_built_smart_width_renders_strictly() {
        let mut fs = FlagSet::new(Renderer::Pdf);
        fs.insert("smart-width", true);
        assert_eq!(fs.args().unwrap(), vec!["--enable-smart-width"]);

        let mut fs = FlagSet::new(Renderer::Pdf);
        fs.insert("smart-shrinking", false);
        assert_eq!(fs.args().unwrap(), vec!["--disable-smart-shrinking"]);
    }

    #[test]
    fn serialising_uses_json_keys() {
        let opts = PdfOptions {
            low_quality: Some(true),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&opts).unwrap(), r#"{"lowquality":true}"#);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = PdfOptions::from_json(b"[1, 2").unwrap_err();
        assert!(matches!(err, WkhtmlError::Decode(_)));
    }
}
