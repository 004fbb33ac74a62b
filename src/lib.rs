//! # wkhtmlx
//!
//! Drive the `wkhtmltoimage` and `wkhtmltopdf` command-line converters from
//! typed options.
//!
//! ## Why this crate?
//!
//! wkhtmltox has a large flag surface with three different spellings for
//! boolean switches (`--images`/`--no-images`, `--enable-forms`/`--disable-forms`,
//! `--grayscale`/nothing). Getting one of them wrong does not fail loudly:
//! the binary prints a usage message and exits. This crate keeps the
//! spelling rules in one table and builds the argument list from typed,
//! JSON-decodable option records.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ImageOptions / PdfOptions   (typed record, or JSON)
//!  │
//!  ├─ 1. Translate  record → FlagSet (ordered key → value map)
//!  ├─ 2. Render     FlagSet → ["--key", "value", ...]
//!  ├─ 3. Run        <binary> args... <input> <output>, in spawn_blocking
//!  └─ 4. Output     converted file at <output> + the tool's own messages
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wkhtmlx::{generate_image, ConverterConfig, ImageOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ImageOptions::from_json_str(r#"{"format": "png", "width": 1024}"#)?;
//!     let config = ConverterConfig::from_env();
//!     let log = generate_image(&options, "https://example.com", "example.png", &config).await?;
//!     eprintln!("{}", String::from_utf8_lossy(&log));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wkhtmlx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! wkhtmlx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod flags;
pub mod lookup;
pub mod options;
pub mod pipeline;
pub mod polarity;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use convert::{generate, generate_image, generate_pdf, generate_sync, render_args};
pub use error::WkhtmlError;
pub use flags::{FlagSet, FlagValue};
pub use lookup::{lookup_converter, lookup_renderer, ConverterInfo, ConverterReport};
pub use options::{Cookie, CustomHeader, ImageOptions, NameValue, PdfOptions, Renderer};
pub use polarity::Polarity;
