//! Flag rendering: turn a [`FlagSet`] into command-line tokens.
//!
//! Tokens come out in the flag set's insertion order. Per value shape:
//!
//! | value | tokens |
//! |-------|--------|
//! | `Int` / `Str` / `Float` | `--key value` |
//! | `List` | `--key item` per item |
//! | `Pairs` | `--key name value` per pair |
//! | `Bool` | by the key's [`Polarity`] |
//!
//! An entry can be unrenderable in two ways: its key is not in the
//! renderer's vocabulary, or it holds a boolean under a key with no
//! polarity. [`render_strict`] reports the first such entry as an error;
//! [`render_lossy`] drops it and logs a warning.

use crate::error::WkhtmlError;
use crate::flags::{FlagSet, FlagValue};
use crate::options::Renderer;
use crate::polarity::{self, Polarity};
use tracing::{debug, warn};

/// Render every entry, failing on the first one without a rendering rule.
pub fn render_strict(flags: &FlagSet) -> Result<Vec<String>, WkhtmlError> {
    let mut tokens = Vec::with_capacity(flags.len() * 2);
    for (key, value) in flags.iter() {
        render_entry(&mut tokens, flags.renderer(), key, value)?;
    }
    debug!(renderer = %flags.renderer(), ?tokens, "Rendered flags");
    Ok(tokens)
}

/// Render every entry that has a rendering rule and skip the rest.
pub fn render_lossy(flags: &FlagSet) -> Vec<String> {
    let mut tokens = Vec::with_capacity(flags.len() * 2);
    for (key, value) in flags.iter() {
        if let Err(e) = render_entry(&mut tokens, flags.renderer(), key, value) {
            warn!(renderer = %flags.renderer(), key, "Skipping flag: {}", e);
        }
    }
    debug!(renderer = %flags.renderer(), ?tokens, "Rendered flags");
    tokens
}

/// Append the tokens for one entry. Nothing is appended on error.
fn render_entry(
    tokens: &mut Vec<String>,
    renderer: Renderer,
    key: &str,
    value: &FlagValue,
) -> Result<(), WkhtmlError> {
    if !renderer.knows(key) {
        return Err(WkhtmlError::UnknownFlag {
            renderer,
            key: key.to_string(),
        });
    }

    let flag = format!("--{key}");
    match value {
        FlagValue::Int(v) => tokens.extend([flag, v.to_string()]),
        FlagValue::Str(v) => tokens.extend([flag, v.clone()]),
        // `Display` for f64 is the shortest string that round-trips: 0.5 → "0.5", 2.0 → "2".
        FlagValue::Float(v) => tokens.extend([flag, v.to_string()]),
        FlagValue::List(items) => {
            for item in items {
                tokens.extend([flag.clone(), item.clone()]);
            }
        }
        FlagValue::Pairs(pairs) => {
            for pair in pairs {
                tokens.extend([flag.clone(), pair.name.clone(), pair.value.clone()]);
            }
        }
        FlagValue::Bool(v) => {
            let polarity: Polarity =
                polarity::lookup(key).ok_or_else(|| WkhtmlError::UnregisteredBoolean {
                    key: key.to_string(),
                })?;
            tokens.extend(polarity.token(key, *v));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::NameValue;

    fn image(entries: &[(&str, FlagValue)]) -> FlagSet {
        let mut fs = FlagSet::new(Renderer::Image);
        for (k, v) in entries {
            fs.insert(*k, v.clone());
        }
        fs
    }

    fn pdf(entries: &[(&str, FlagValue)]) -> FlagSet {
        let mut fs = FlagSet::new(Renderer::Pdf);
        for (k, v) in entries {
            fs.insert(*k, v.clone());
        }
        fs
    }

    #[test]
    fn scalars_in_insertion_order() {
        let fs = image(&[
            ("crop-h", FlagValue::Int(10)),
            ("format", FlagValue::Str("png".into())),
        ]);
        assert_eq!(render_strict(&fs).unwrap(), vec!["--crop-h", "10", "--format", "png"]);
    }

    #[test]
    fn negative_int() {
        let fs = pdf(&[("margin-left", FlagValue::Int(-5))]);
        assert_eq!(render_strict(&fs).unwrap(), vec!["--margin-left", "-5"]);
    }

    #[test]
    fn float_uses_shortest_decimal() {
        let fs = image(&[("zoom", FlagValue::Float(0.5))]);
        assert_eq!(render_strict(&fs).unwrap(), vec!["--zoom", "0.5"]);

        let fs = image(&[("zoom", FlagValue::Float(2.0))]);
        assert_eq!(render_strict(&fs).unwrap(), vec!["--zoom", "2"]);

        let fs = image(&[("zoom", FlagValue::Float(1.25))]);
        assert_eq!(render_strict(&fs).unwrap(), vec!["--zoom", "1.25"]);
    }

    #[test]
    fn pairs_flatten_to_triples() {
        let fs = pdf(&[(
            "cookie",
            FlagValue::Pairs(vec![
                NameValue::new("session", "abc"),
                NameValue::new("theme", "dark"),
            ]),
        )]);
        let tokens = render_strict(&fs).unwrap();
        assert_eq!(tokens.len(), 6);
        assert_eq!(
            tokens,
            vec!["--cookie", "session", "abc", "--cookie", "theme", "dark"]
        );
    }

    #[test]
    fn string_list_repeats_flag() {
        let fs = image(&[(
            "run-script",
            FlagValue::List(vec!["a()".into(), "b()".into()]),
        )]);
        assert_eq!(
            render_strict(&fs).unwrap(),
            vec!["--run-script", "a()", "--run-script", "b()"]
        );
    }

    #[test]
    fn empty_list_renders_nothing() {
        let fs = image(&[("allow", FlagValue::List(vec![]))]);
        assert!(render_strict(&fs).unwrap().is_empty());
    }

    #[test]
    fn boolean_polarities() {
        let cases: &[(&str, bool, &[&str])] = &[
            ("images", true, &["--images"]),
            ("images", false, &["--no-images"]),
            ("stop-slow-scripts", false, &["--no-stop-slow-scripts"]),
            ("javascript", true, &["--enable-javascript"]),
            ("smart-width", false, &["--disable-smart-width"]),
            ("transparent", true, &["--transparent"]),
            ("transparent", false, &[]),
        ];
        for (key, value, expected) in cases {
            let fs = image(&[(*key, FlagValue::Bool(*value))]);
            assert_eq!(render_strict(&fs).unwrap(), *expected, "{key}={value}");
        }
    }

    #[test]
    fn pdf_only_booleans() {
        let fs = pdf(&[
            ("external-links", FlagValue::Bool(false)),
            ("grayscale", FlagValue::Bool(true)),
            ("lowquality", FlagValue::Bool(false)),
            ("no-pdf-compression", FlagValue::Bool(true)),
            ("smart-shrinking", FlagValue::Bool(true)),
        ]);
        assert_eq!(
            render_strict(&fs).unwrap(),
            vec![
                "--disable-external-links",
                "--grayscale",
                "--no-pdf-compression",
                "--enable-smart-shrinking",
            ]
        );
    }

    #[test]
    fn boolean_without_polarity_is_an_error_when_strict() {
        let fs = image(&[("width", FlagValue::Bool(true))]);
        let err = render_strict(&fs).unwrap_err();
        assert!(
            matches!(err, WkhtmlError::UnregisteredBoolean { ref key } if key == "width"),
            "got: {err:?}"
        );
    }

    #[test]
    fn boolean_without_polarity_is_dropped_when_lossy() {
        let fs = image(&[
            ("format", FlagValue::Str("jpg".into())),
            ("width", FlagValue::Bool(true)),
            ("height", FlagValue::Int(600)),
        ]);
        assert_eq!(render_lossy(&fs), vec!["--format", "jpg", "--height", "600"]);
    }

    #[test]
    fn key_outside_vocabulary() {
        let fs = pdf(&[("crop-h", FlagValue::Int(10)), ("dpi", FlagValue::Int(96))]);
        let err = render_strict(&fs).unwrap_err();
        assert!(matches!(
            err,
            WkhtmlError::UnknownFlag { renderer: Renderer::Pdf, ref key } if key == "crop-h"
        ));
        assert_eq!(render_lossy(&fs), vec!["--dpi", "96"]);
    }

    #[test]
    fn rendering_is_repeatable() {
        let fs = pdf(&[
            ("page-size", FlagValue::Str("A4".into())),
            ("zoom", FlagValue::Float(0.75)),
            ("images", FlagValue::Bool(false)),
            (
                "custom-header",
                FlagValue::Pairs(vec![NameValue::new("X-Trace", "1")]),
            ),
        ]);
        assert_eq!(render_strict(&fs).unwrap(), render_strict(&fs).unwrap());
        assert_eq!(render_lossy(&fs), render_strict(&fs).unwrap());
    }
}
