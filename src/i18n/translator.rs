//! Key lookup, pluralization and interpolation over one locale's tree.

use crate::error::LookupError;
use crate::i18n::{Locale, LookupMetrics, ResourceTree, Shape};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").unwrap())
}

/// Names of all `{placeholder}`s in a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Options accepted by [`Translator::lookup`].
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Resolve object and array subtrees instead of only string leaves
    pub return_objects: bool,

    /// Selects the plural form and fills `{count}`
    pub count: Option<i64>,

    /// Named values for `{name}` placeholders
    pub params: Vec<(String, String)>,
}

impl LookupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn return_objects(mut self) -> Self {
        self.return_objects = true;
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    fn value_for(&self, name: &str) -> Option<String> {
        if let Some((_, value)) = self.params.iter().find(|(n, _)| n == name) {
            return Some(value.clone());
        }
        match (name, self.count) {
            ("count", Some(count)) => Some(count.to_string()),
            _ => None,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Text(String),
    /// Object or array subtree (only with `return_objects`)
    Tree(Value),
}

/// Replace `{name}` placeholders. Unknown placeholders are left verbatim.
pub fn interpolate(template: &str, options: &LookupOptions) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| {
            options
                .value_for(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn interpolate_tree(value: &Value, options: &LookupOptions) -> Value {
    match value {
        Value::String(s) => Value::String(interpolate(s, options)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| interpolate_tree(item, options))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), interpolate_tree(v, options)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// CLDR plural category for the supported locales.
///
/// English and Spanish both split into "one" and "other" for integers.
fn plural_category(locale: Locale, count: i64) -> &'static str {
    match locale.code() {
        "en" | "es" if count.abs() == 1 => "one",
        _ => "other",
    }
}

/// Lookup handle for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    locale: Locale,
    tree: &'a ResourceTree,
}

impl<'a> Translator<'a> {
    pub fn new(locale: Locale, tree: &'a ResourceTree) -> Self {
        Self { locale, tree }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Find the value for `key`, honouring the plural suffixes.
    ///
    /// With a count, `<key>_zero` (count 0 only), then `<key>_<category>`,
    /// then the bare key are tried in that order.
    fn resolve(&self, key: &str, count: Option<i64>) -> Option<&'a Value> {
        if let Some(count) = count {
            if count == 0 {
                if let Some(value) = self.tree.get(&format!("{}_zero", key)) {
                    return Some(value);
                }
            }
            let category = plural_category(self.locale, count);
            if let Some(value) = self.tree.get(&format!("{}_{}", key, category)) {
                return Some(value);
            }
        }
        self.tree.get(key)
    }

    /// Look up a key.
    ///
    /// Returns `None` when the key does not exist, or when it names a subtree
    /// and `return_objects` is not set.
    pub fn lookup(&self, key: &str, options: &LookupOptions) -> Option<Translation> {
        let metrics = LookupMetrics::global();
        metrics.record_lookup();

        let result = match self.resolve(key, options.count) {
            Some(Value::String(template)) => Some(Translation::Text(interpolate(template, options))),
            Some(value @ (Value::Object(_) | Value::Array(_))) if options.return_objects => {
                Some(Translation::Tree(interpolate_tree(value, options)))
            }
            _ => None,
        };

        if result.is_none() {
            metrics.record_miss();
            debug!("[{}] lookup of '{}' did not resolve", self.locale.code(), key);
        }
        result
    }

    /// Render-time text lookup. Missing keys render as an empty string.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &LookupOptions::default())
    }

    pub fn t_with(&self, key: &str, options: &LookupOptions) -> String {
        match self.lookup(key, options) {
            Some(Translation::Text(text)) => text,
            Some(Translation::Tree(_)) | None => {
                warn!("[{}] missing translation for '{}'", self.locale.code(), key);
                String::new()
            }
        }
    }

    /// Checked text lookup.
    pub fn try_text(&self, key: &str, options: &LookupOptions) -> Result<String, LookupError> {
        let text_options = LookupOptions {
            return_objects: false,
            ..options.clone()
        };
        if let Some(Translation::Text(text)) = self.lookup(key, &text_options) {
            return Ok(text);
        }

        match self.resolve(key, options.count) {
            Some(value) => Err(self.shape_mismatch(key, "text", value)),
            None => Err(self.missing(key)),
        }
    }

    /// String array under `key`, or `None` if absent or not a string list.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        let metrics = LookupMetrics::global();
        metrics.record_lookup();

        let items = self
            .tree
            .get(key)
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            });

        if items.is_none() {
            metrics.record_miss();
        }
        items
    }

    /// Decode the record array under `key` into typed records.
    ///
    /// Fails with a distinct error when the key is missing, is not an array,
    /// or when any element does not decode as `T`.
    pub fn records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, LookupError> {
        let metrics = LookupMetrics::global();
        metrics.record_lookup();

        let Some(value) = self.tree.get(key) else {
            metrics.record_miss();
            return Err(self.missing(key));
        };
        let Some(items) = value.as_array() else {
            return Err(self.shape_mismatch(key, "list of records", value));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    metrics.record_shape_mismatch();
                    return Err(LookupError::RecordDecode {
                        locale: self.locale.code().to_string(),
                        key: key.to_string(),
                        index,
                        detail: format!("expected a record, found {}", Shape::of(item)),
                    });
                }
                serde_json::from_value(item.clone()).map_err(|e| {
                    metrics.record_shape_mismatch();
                    LookupError::RecordDecode {
                        locale: self.locale.code().to_string(),
                        key: key.to_string(),
                        index,
                        detail: e.to_string(),
                    }
                })
            })
            .collect()
    }

    fn missing(&self, key: &str) -> LookupError {
        LookupError::MissingKey {
            locale: self.locale.code().to_string(),
            key: key.to_string(),
        }
    }

    fn shape_mismatch(&self, key: &str, expected: &str, value: &Value) -> LookupError {
        LookupMetrics::global().record_shape_mismatch();
        LookupError::ShapeMismatch {
            locale: self.locale.code().to_string(),
            key: key.to_string(),
            expected: expected.to_string(),
            found: Shape::of(value).to_string(),
        }
    }
}
