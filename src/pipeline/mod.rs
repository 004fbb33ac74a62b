//! Pipeline stages for driving a wkhtmltox converter.
//!
//! ## Data Flow
//!
//! ```text
//! FlagSet ──▶ render ──▶ runner ──▶ captured output
//!            (tokens)   (child process)
//! ```
//!
//! 1. [`render`]: turn a [`FlagSet`](crate::flags::FlagSet) into argument
//!    tokens, strictly or lossily
//! 2. [`runner`]: append the input locator and output path, run the
//!    binary to completion and collect what it printed; the async variant
//!    runs in `spawn_blocking` because the wait is a blocking syscall

pub mod render;
pub mod runner;
