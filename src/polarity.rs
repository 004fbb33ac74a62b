//! How boolean settings are spelled on the command line.
//!
//! wkhtmltox has three conventions for boolean flags, and which one applies
//! is a property of the flag, not of the value. One table serves both
//! converters; keys that exist in both use the same convention in both.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Spelling convention for a boolean flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// `true` → `--<key>`, `false` → `--no-<key>`
    Toggle,
    /// `true` → `--enable-<key>`, `false` → `--disable-<key>`
    EnableDisable,
    /// `true` → `--<key>`, `false` → nothing
    FlagOrAbsent,
}

impl Polarity {
    /// The token for `value` under `key`, or `None` for a false [`Polarity::FlagOrAbsent`].
    pub fn token(self, key: &str, value: bool) -> Option<String> {
        match (self, value) {
            (Polarity::Toggle, true) => Some(format!("--{key}")),
            (Polarity::Toggle, false) => Some(format!("--no-{key}")),
            (Polarity::EnableDisable, true) => Some(format!("--enable-{key}")),
            (Polarity::EnableDisable, false) => Some(format!("--disable-{key}")),
            (Polarity::FlagOrAbsent, true) => Some(format!("--{key}")),
            (Polarity::FlagOrAbsent, false) => None,
        }
    }
}

static POLARITIES: Lazy<HashMap<&'static str, Polarity>> = Lazy::new(|| {
    use Polarity::*;
    HashMap::from([
        ("custom-header-propagation", Toggle),
        ("debug-javascript", Toggle),
        ("images", Toggle),
        ("stop-slow-scripts", Toggle),
        ("external-links", EnableDisable),
        ("forms", EnableDisable),
        ("internal-links", EnableDisable),
        ("javascript", EnableDisable),
        ("smart-shrinking", EnableDisable),
        ("smart-width", EnableDisable),
        ("grayscale", FlagOrAbsent),
        ("lowquality", FlagOrAbsent),
        ("no-pdf-compression", FlagOrAbsent),
        ("transparent", FlagOrAbsent),
        ("use-xserver", FlagOrAbsent),
    ])
});

/// Polarity registered for `key`, if it is a boolean flag.
pub fn lookup(key: &str) -> Option<Polarity> {
    POLARITIES.get(key).copied()
}
