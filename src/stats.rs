//! Statistic cards shown on workspace pages.

use crate::i18n::Translator;

/// Placeholder rendered when a statistic is unavailable.
pub const MISSING_VALUE: &str = "-";

/// Where a card's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValue {
    Literal(&'static str),
    /// Position in the `admin.stats` array
    Stat(usize),
}

/// Static description of a card, declared per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub label_key: &'static str,
    pub value: CardValue,
    pub color: Option<&'static str>,
    pub trend: Option<&'static str>,
}

impl CardSpec {
    pub const fn literal(label_key: &'static str, value: &'static str) -> Self {
        Self {
            label_key,
            value: CardValue::Literal(value),
            color: None,
            trend: None,
        }
    }

    pub const fn stat(label_key: &'static str, index: usize) -> Self {
        Self {
            label_key,
            value: CardValue::Stat(index),
            color: None,
            trend: None,
        }
    }

    pub const fn color(self, color: &'static str) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub const fn trend(self, trend: &'static str) -> Self {
        Self {
            trend: Some(trend),
            ..self
        }
    }
}

/// A card ready to render. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label_key: &'static str,
    pub label: String,
    pub value: String,
    pub color: Option<&'static str>,
    pub trend: Option<&'static str>,
}

impl StatCard {
    /// Translate the label and resolve the value against `stats`.
    pub fn resolve(spec: &CardSpec, t: &Translator<'_>, stats: &[Option<i64>]) -> Self {
        let value = match spec.value {
            CardValue::Literal(value) => value.to_string(),
            CardValue::Stat(index) => format_stat(stats.get(index).copied().flatten()),
        };

        Self {
            label_key: spec.label_key,
            label: t.t(spec.label_key),
            value,
            color: spec.color,
            trend: spec.trend,
        }
    }
}

pub fn format_stat(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}
