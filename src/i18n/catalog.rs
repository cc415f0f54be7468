//! Locale resource trees and the per-locale catalog set.

use crate::error::LookupError;
use crate::i18n::{Locale, LocaleRegistry, Translator};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// A parsed locale catalog: a JSON object addressed by dotted key paths.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    root: Value,
}

impl ResourceTree {
    /// Parse a catalog from its JSON source. The root must be an object.
    pub fn parse(source: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(source).context("Catalog is not valid JSON")?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            bail!("Catalog root must be a JSON object");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted key path.
    ///
    /// Object members are addressed by name, array elements by decimal index
    /// (`dashboard.menu.2`). Empty keys and empty segments never resolve.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return None;
        }

        key.split('.').try_fold(&self.root, |node, segment| {
            if segment.is_empty() {
                return None;
            }
            match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
    }
}

/// One resource tree per enabled locale.
#[derive(Debug, Clone)]
pub struct Catalogs {
    trees: HashMap<Locale, ResourceTree>,
}

impl Catalogs {
    /// Load the catalogs compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let mut trees = HashMap::new();
        for config in LocaleRegistry::get().list_enabled() {
            let tree = ResourceTree::parse(config.embedded_catalog)
                .with_context(|| format!("Embedded catalog for '{}' is invalid", config.code))?;
            trees.insert(Locale::from_code(config.code)?, tree);
        }
        Ok(Self { trees })
    }

    /// Load `<code>.json` for every enabled locale from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut trees = HashMap::new();
        for config in LocaleRegistry::get().list_enabled() {
            let path = dir.join(format!("{}.json", config.code));
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            let tree = ResourceTree::parse(&source)
                .with_context(|| format!("Catalog {} is invalid", path.display()))?;
            trees.insert(Locale::from_code(config.code)?, tree);
        }
        info!("Loaded {} catalogs from {}", trees.len(), dir.display());
        Ok(Self { trees })
    }

    pub fn from_trees(trees: impl IntoIterator<Item = (Locale, ResourceTree)>) -> Self {
        Self {
            trees: trees.into_iter().collect(),
        }
    }

    pub fn tree(&self, locale: Locale) -> Option<&ResourceTree> {
        self.trees.get(&locale)
    }

    /// Loaded locales in registry order.
    pub fn locales(&self) -> Vec<Locale> {
        Locale::enabled()
            .into_iter()
            .filter(|locale| self.trees.contains_key(locale))
            .collect()
    }

    pub fn translator(&self, locale: Locale) -> Result<Translator<'_>, LookupError> {
        self.tree(locale)
            .map(|tree| Translator::new(locale, tree))
            .ok_or_else(|| LookupError::UnknownLocale(locale.code().to_string()))
    }
}
