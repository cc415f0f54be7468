//! Internationalization (i18n) module.
//!
//! Locale catalogs are JSON resource trees addressed by dotted key paths.
//! All locale metadata, lookup, pluralization, interpolation and catalog
//! validation lives here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their embedded catalogs
//! - `locale`: Validated `Locale` handle and request negotiation
//! - `catalog`: `ResourceTree` (one parsed catalog) and `Catalogs` (all locales)
//! - `translator`: Lookup with `returnObjects`, `count` and `{name}` interpolation
//! - `shape`: Structural shape of catalog values
//! - `validator`: Page requirements and canonical parity checks
//! - `metrics`: Lookup observability
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Catalogs, Locale, LookupOptions};
//!
//! let catalogs = Catalogs::embedded()?;
//! let t = catalogs.translator(Locale::SPANISH)?;
//! let label = t.t_with("demo.cases", &LookupOptions::new().count(3));
//! ```

mod catalog;
mod locale;
mod metrics;
mod registry;
mod shape;
mod translator;
mod validator;

pub use catalog::{Catalogs, ResourceTree};
pub use locale::Locale;
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use shape::Shape;
pub use translator::{interpolate, placeholders, LookupOptions, Translation, Translator};
pub use validator::{CatalogValidator, ExpectedShape, KeyRequirement, ValidationReport};
