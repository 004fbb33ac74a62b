//! Flag sets: the renderer-ready form of an options record.
//!
//! A [`FlagSet`] maps canonical kebab-case flag keys (the binary's own
//! spelling, e.g. `"page-size"`) to a [`FlagValue`]. Entries keep their
//! insertion order, so the same set always renders to the same argument list.

use crate::error::WkhtmlError;
use crate::options::{NameValue, Renderer};
use crate::pipeline::render;
use indexmap::IndexMap;

/// A single flag value.
///
/// Closed over the value shapes wkhtmltox flags take, so rendering can
/// dispatch exhaustively on it.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Int(i64),
    Str(String),
    Float(f64),
    Bool(bool),
    /// Repeatable single-argument flag.
    List(Vec<String>),
    /// Repeatable two-argument flag (cookies, custom headers).
    Pairs(Vec<NameValue>),
}

impl FlagValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FlagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FlagValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FlagValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&[NameValue]> {
        match self {
            FlagValue::Pairs(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        FlagValue::Int(v)
    }
}

impl From<i32> for FlagValue {
    fn from(v: i32) -> Self {
        FlagValue::Int(v.into())
    }
}

impl From<f64> for FlagValue {
    fn from(v: f64) -> Self {
        FlagValue::Float(v)
    }
}

impl From<bool> for FlagValue {
    fn from(v: bool) -> Self {
        FlagValue::Bool(v)
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        FlagValue::Str(v)
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        FlagValue::Str(v.to_string())
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(v: Vec<String>) -> Self {
        FlagValue::List(v)
    }
}

impl From<Vec<NameValue>> for FlagValue {
    fn from(v: Vec<NameValue>) -> Self {
        FlagValue::Pairs(v)
    }
}

/// Ordered key/value flags for one renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSet {
    renderer: Renderer,
    entries: IndexMap<String, FlagValue>,
}

impl FlagSet {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            entries: IndexMap::new(),
        }
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    /// Store `value` under `key`, returning the previous value.
    ///
    /// Any key is accepted here. Whether it can be rendered is decided by
    /// [`args`](Self::args) / [`args_lossy`](Self::args_lossy).
    /// Replacing a key keeps its original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FlagValue>,
    ) -> Option<FlagValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Copy `value` in if it is present. Used by the options translators.
    pub(crate) fn insert_present<T>(&mut self, key: &str, value: &Option<T>)
    where
        T: Clone + Into<FlagValue>,
    {
        if let Some(v) = value {
            self.entries.insert(key.to_string(), v.clone().into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FlagValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render to command-line tokens, failing on the first key that has no
    /// rendering rule.
    pub fn args(&self) -> Result<Vec<String>, WkhtmlError> {
        render::render_strict(self)
    }

    /// Render to command-line tokens, skipping keys that have no rendering
    /// rule. Each skip is logged at `warn`.
    pub fn args_lossy(&self) -> Vec<String> {
        render::render_lossy(self)
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = (&'a String, &'a FlagValue);
    type IntoIter = indexmap::map::Iter<'a, String, FlagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_position_on_replace() {
        let mut fs = FlagSet::new(Renderer::Image);
        fs.insert("width", 10);
        fs.insert("format", "png");
        fs.insert("height", 20);
        let previous = fs.insert("width", 30);

        assert_eq!(previous, Some(FlagValue::Int(10)));
        let keys: Vec<&str> = fs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["width", "format", "height"]);
        assert_eq!(fs.get("width").and_then(FlagValue::as_int), Some(30));
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut fs = FlagSet::new(Renderer::Pdf);
        fs.insert("dpi", 300);
        fs.insert("title", "Report");
        fs.insert("zoom", 1.5);
        assert!(fs.remove("title").is_some());
        let keys: Vec<&str> = fs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["dpi", "zoom"]);
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(FlagValue::from("a4").as_str(), Some("a4"));
        assert_eq!(FlagValue::from(0.5).as_float(), Some(0.5));
        assert_eq!(FlagValue::from(true).as_bool(), Some(true));
        assert_eq!(FlagValue::from(7).as_str(), None);
        let list = FlagValue::from(vec!["a".to_string()]);
        assert_eq!(list.as_list(), Some(&["a".to_string()][..]));
        let pairs = FlagValue::from(vec![NameValue::new("k", "v")]);
        assert_eq!(pairs.as_pairs().map(<[_]>::len), Some(1));
    }

    #[test]
    fn insert_present_skips_absent() {
        let mut fs = FlagSet::new(Renderer::Image);
        fs.insert_present::<i64>("height", &None);
        fs.insert_present("width", &Some(10i64));
        assert!(!fs.contains_key("height"));
        assert_eq!(fs.get("width"), Some(&FlagValue::Int(10)));
    }

    #[test]
    fn any_key_can_be_stored() {
        let mut fs = FlagSet::new(Renderer::Image);
        fs.insert("not-a-real-flag", true);
        assert!(fs.contains_key("not-a-real-flag"));
        assert!(!fs.is_empty());
    }
}
