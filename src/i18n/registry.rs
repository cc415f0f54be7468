//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is a process-wide singleton built with `OnceLock`. Each entry
//! carries the catalog that ships inside the binary, so a locale can never be
//! enabled without a resource tree to back it.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 language code (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the locale (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Whether this is the canonical/source locale (only one should be true)
    ///
    /// Every other catalog is validated against the canonical one.
    pub is_canonical: bool,

    /// Whether this locale is enabled for use
    pub enabled: bool,

    /// Embedded JSON resource tree for this locale
    pub embedded_catalog: &'static str,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the locale is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all enabled locales, in registry order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get the canonical locale configuration.
    ///
    /// # Panics
    /// Panics if no canonical locale is found or if multiple canonical
    /// locales are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LocaleConfig {
        let canonical: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_canonical)
            .collect();

        match canonical.len() {
            0 => panic!("No canonical locale found in registry"),
            1 => canonical[0],
            _ => panic!("Multiple canonical locales found in registry"),
        }
    }
}

/// Default locale configurations: English (canonical) and Spanish.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            embedded_catalog: include_str!("../../locales/en.json"),
        },
        LocaleConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
            embedded_catalog: include_str!("../../locales/es.json"),
        },
    ]
}
