//! Locale type: validated locale handle plus request negotiation.

use crate::error::LookupError;
use crate::i18n::LocaleRegistry;

/// A validated locale.
///
/// Only supported, enabled locales can be constructed, so holders never need
/// to re-check the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639-1 language code (e.g., "en", "es")
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };

    pub const SPANISH: Locale = Locale { code: "es" };

    /// Create a Locale from a language code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered and enabled
    /// * `Err(LookupError::UnknownLocale)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, LookupError> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            _ => Err(LookupError::UnknownLocale(code.to_string())),
        }
    }

    /// Get the canonical (source) locale.
    pub fn canonical() -> Locale {
        let config = LocaleRegistry::get().canonical();
        Locale { code: config.code }
    }

    /// All enabled locales, canonical first when it is listed first.
    pub fn enabled() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Parse a loose locale tag ("es-MX", "EN_us", " es ") into a Locale.
    ///
    /// Only the primary subtag is considered.
    pub fn parse_tag(tag: &str) -> Option<Locale> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        let normalized = tag.to_ascii_lowercase();
        let primary = normalized.split(['-', '_']).next().unwrap_or("");
        Locale::from_code(primary).ok()
    }

    /// Pick the locale for a request.
    ///
    /// Resolution order: explicit `?lang=` value, then the first supported
    /// entry of `Accept-Language` by descending quality, then `default`.
    pub fn negotiate(
        explicit: Option<&str>,
        accept_language: Option<&str>,
        default: Locale,
    ) -> Locale {
        if let Some(locale) = explicit.and_then(Locale::parse_tag) {
            return locale;
        }

        accept_language
            .and_then(from_accept_language)
            .unwrap_or(default)
    }
}

/// First supported locale in an `Accept-Language` header.
fn from_accept_language(header: &str) -> Option<Locale> {
    let mut candidates: Vec<(f32, usize, &str)> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, part)| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((quality, position, tag))
        })
        .collect();

    // Stable on position for equal quality
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

    candidates
        .into_iter()
        .find_map(|(_, _, tag)| Locale::parse_tag(tag))
}
