//! Catalog consistency validation.
//!
//! Checks that every locale provides the keys the pages read, with the shape
//! the pages expect, and that every translated catalog mirrors the canonical
//! catalog's structure (same keys, list lengths and record fields) and keeps
//! its `{placeholder}`s.

use crate::i18n::{placeholders, Catalogs, Locale, ResourceTree, Shape};
use serde_json::Value;
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about the catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a page render incorrectly
    pub errors: Vec<String>,

    /// Non-critical findings (extra keys, dropped placeholders)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape a page expects to find under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    Text,
    TextList { len: usize },
    Records {
        len: usize,
        fields: &'static [&'static str],
    },
}

impl ExpectedShape {
    fn matches(&self, shape: &Shape) -> bool {
        match (self, shape) {
            (ExpectedShape::Text, Shape::Text) => true,
            (ExpectedShape::TextList { len }, Shape::TextList { len: actual }) => len == actual,
            (
                ExpectedShape::Records { len, fields },
                Shape::RecordList {
                    len: actual_len,
                    fields: actual,
                },
            ) => {
                len == actual_len
                    && fields.iter().map(|f| f.to_string()).collect::<BTreeSet<_>>() == *actual
            }
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            ExpectedShape::Text => "text".to_string(),
            ExpectedShape::TextList { len } => format!("list of {} strings", len),
            ExpectedShape::Records { len, fields } => {
                let mut fields = fields.to_vec();
                fields.sort_unstable();
                format!("list of {} records {{{}}}", len, fields.join(", "))
            }
        }
    }
}

/// A key read by a page together with its expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRequirement {
    pub key: &'static str,
    pub expected: ExpectedShape,
}

impl KeyRequirement {
    pub const fn text(key: &'static str) -> Self {
        Self {
            key,
            expected: ExpectedShape::Text,
        }
    }

    pub const fn text_list(key: &'static str, len: usize) -> Self {
        Self {
            key,
            expected: ExpectedShape::TextList { len },
        }
    }

    pub const fn records(key: &'static str, len: usize, fields: &'static [&'static str]) -> Self {
        Self {
            key,
            expected: ExpectedShape::Records { len, fields },
        }
    }
}

/// Validator for catalog consistency.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate every loaded catalog against the page requirements and the
    /// canonical catalog.
    pub fn validate(catalogs: &Catalogs, requirements: &[KeyRequirement]) -> ValidationReport {
        let mut report = ValidationReport::new();
        let canonical = Locale::canonical();

        for locale in catalogs.locales() {
            if let Some(tree) = catalogs.tree(locale) {
                Self::check_requirements(locale, tree, requirements, &mut report);
            }
        }

        let Some(canonical_tree) = catalogs.tree(canonical) else {
            report.errors.push(format!(
                "Canonical catalog '{}' is not loaded",
                canonical.code()
            ));
            return report;
        };

        for locale in catalogs.locales() {
            if locale == canonical {
                continue;
            }
            if let Some(tree) = catalogs.tree(locale) {
                compare(
                    "",
                    canonical_tree.root(),
                    tree.root(),
                    locale.code(),
                    &mut report,
                );
            }
        }

        report
    }

    /// Check one catalog against the page requirements.
    pub fn check_requirements(
        locale: Locale,
        tree: &ResourceTree,
        requirements: &[KeyRequirement],
        report: &mut ValidationReport,
    ) {
        for requirement in requirements {
            match tree.get(requirement.key) {
                None => report.errors.push(format!(
                    "[{}] missing key '{}'",
                    locale.code(),
                    requirement.key
                )),
                Some(value) => {
                    let shape = Shape::of(value);
                    if !requirement.expected.matches(&shape) {
                        report.errors.push(format!(
                            "[{}] key '{}' is {}, expected {}",
                            locale.code(),
                            requirement.key,
                            shape,
                            requirement.expected.describe()
                        ));
                    }
                }
            }
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

/// Recursively compare a translated subtree with the canonical one.
fn compare(
    path: &str,
    canonical: &Value,
    translated: &Value,
    code: &str,
    report: &mut ValidationReport,
) {
    match (canonical, translated) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, expected_child) in expected {
                let child_path = join(path, key);
                match actual.get(key) {
                    Some(actual_child) => {
                        compare(&child_path, expected_child, actual_child, code, report)
                    }
                    None => report
                        .errors
                        .push(format!("[{}] missing key '{}'", code, child_path)),
                }
            }
            for key in actual.keys().filter(|key| !expected.contains_key(*key)) {
                report.warnings.push(format!(
                    "[{}] extra key '{}' not in canonical catalog",
                    code,
                    join(path, key)
                ));
            }
        }
        (Value::String(expected), Value::String(actual)) => {
            let expected_names: BTreeSet<_> = placeholders(expected).into_iter().collect();
            let actual_names: BTreeSet<_> = placeholders(actual).into_iter().collect();
            if expected_names != actual_names {
                report.warnings.push(format!(
                    "[{}] placeholder mismatch at '{}': canonical has {:?}, translation has {:?}",
                    code, path, expected_names, actual_names
                ));
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            let expected_shape = Shape::of(canonical);
            let actual_shape = Shape::of(translated);
            if expected_shape != actual_shape {
                report.errors.push(format!(
                    "[{}] key '{}' is {}, canonical is {}",
                    code, path, actual_shape, expected_shape
                ));
                return;
            }
            for (index, (expected_item, actual_item)) in expected.iter().zip(actual).enumerate() {
                compare(
                    &join(path, &index.to_string()),
                    expected_item,
                    actual_item,
                    code,
                    report,
                );
            }
        }
        _ => {
            let expected_shape = Shape::of(canonical);
            let actual_shape = Shape::of(translated);
            if expected_shape != actual_shape {
                report.errors.push(format!(
                    "[{}] key '{}' is {}, canonical is {}",
                    code, path, actual_shape, expected_shape
                ));
            }
        }
    }
}
