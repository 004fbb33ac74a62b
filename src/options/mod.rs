//! Option records for the two wkhtmltox converters.
//!
//! Each converter gets a flat record of independently optional settings:
//! [`ImageOptions`] for `wkhtmltoimage` and [`PdfOptions`] for `wkhtmltopdf`.
//! A record is built once (by hand or from JSON) and translated into a
//! [`FlagSet`](crate::flags::FlagSet), which is what actually gets rendered
//! onto the command line.
//!
//! The field → flag mapping is written out by hand in each submodule. It is
//! not a case conversion: a few JSON keys and flag keys deliberately differ
//! from the Rust field name (`cookies`, `lowquality`, `smart_width`, …) to
//! stay compatible with existing option documents and with the binaries.

pub mod image;
pub mod pdf;

pub use image::ImageOptions;
pub use pdf::PdfOptions;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which external converter a set of flags is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// `wkhtmltoimage`
    Image,
    /// `wkhtmltopdf`
    Pdf,
}

impl Renderer {
    /// Name of the binary looked up on `PATH` when no override is configured.
    pub fn binary_name(self) -> &'static str {
        match self {
            Renderer::Image => "wkhtmltoimage",
            Renderer::Pdf => "wkhtmltopdf",
        }
    }

    /// Every flag key this renderer knows how to render.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            Renderer::Image => image::FLAG_KEYS,
            Renderer::Pdf => pdf::FLAG_KEYS,
        }
    }

    /// Whether `key` belongs to this renderer's vocabulary.
    pub fn knows(self, key: &str) -> bool {
        self.vocabulary().contains(&key)
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderer::Image => f.write_str("image"),
            Renderer::Pdf => f.write_str("pdf"),
        }
    }
}

/// A `(name, value)` pair for repeatable two-argument flags.
///
/// Rendered as `--<key> <name> <value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Cookie sent with every request (`--cookie <name> <value>`). Values are URL encoded by the caller.
pub type Cookie = NameValue;

/// Extra HTTP header (`--custom-header <name> <value>`).
pub type CustomHeader = NameValue;
