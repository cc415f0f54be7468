//! Product demo walkthrough.
//!
//! Each step pairs translated records from the catalog with literal data kept
//! here, then renders them as an ordered list that animates in one item at a
//! time.

use crate::error::{LookupError, MergeError};
use crate::i18n::{LookupOptions, Translator};
use crate::merge::{merge, Merged};
use crate::pages::layout::{document, html_escape};
use serde::Deserialize;
use thiserror::Error;

/// Delay between consecutive items appearing.
const STAGGER_MS: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioRecord {
    pub scenario: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointRecord {
    pub method: String,
    pub path: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowserRecord {
    pub name: String,
    pub desc: String,
}

/// Expected response of a demo endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedResponse {
    pub status: u16,
    pub latency_ms: u32,
}

pub const SCENARIO_CASE_COUNTS: [i64; 4] = [12, 8, 5, 1];

pub const ENDPOINT_RESPONSES: [ExpectedResponse; 4] = [
    ExpectedResponse { status: 200, latency_ms: 42 },
    ExpectedResponse { status: 201, latency_ms: 87 },
    ExpectedResponse { status: 204, latency_ms: 31 },
    ExpectedResponse { status: 404, latency_ms: 12 },
];

pub const BROWSER_ICONS: [&str; 3] = ["chrome", "firefox", "safari"];

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("demo content unavailable: {0}")]
    Lookup(#[from] LookupError),

    #[error("demo content out of sync: {0}")]
    Merge(#[from] MergeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoStep {
    Scenarios,
    Endpoints,
    Browsers,
}

impl DemoStep {
    pub const ALL: [DemoStep; 3] = [DemoStep::Scenarios, DemoStep::Endpoints, DemoStep::Browsers];

    pub fn slug(self) -> &'static str {
        match self {
            DemoStep::Scenarios => "scenarios",
            DemoStep::Endpoints => "endpoints",
            DemoStep::Browsers => "browsers",
        }
    }

    pub fn from_slug(slug: &str) -> Option<DemoStep> {
        DemoStep::ALL.into_iter().find(|step| step.slug() == slug)
    }

    fn records_key(self) -> &'static str {
        match self {
            DemoStep::Scenarios => "demo.scenarios",
            DemoStep::Endpoints => "demo.endpoints",
            DemoStep::Browsers => "demo.browsers",
        }
    }

    pub fn title_key(self) -> &'static str {
        match self {
            DemoStep::Scenarios => "demo.steps.scenarios.title",
            DemoStep::Endpoints => "demo.steps.endpoints.title",
            DemoStep::Browsers => "demo.steps.browsers.title",
        }
    }

    pub fn subtitle_key(self) -> &'static str {
        match self {
            DemoStep::Scenarios => "demo.steps.scenarios.subtitle",
            DemoStep::Endpoints => "demo.steps.endpoints.subtitle",
            DemoStep::Browsers => "demo.steps.browsers.subtitle",
        }
    }

    /// Step after this one, if any.
    pub fn next(self) -> Option<DemoStep> {
        match self {
            DemoStep::Scenarios => Some(DemoStep::Endpoints),
            DemoStep::Endpoints => Some(DemoStep::Browsers),
            DemoStep::Browsers => None,
        }
    }
}

/// One rendered entry of a demo step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoItem {
    pub heading: String,
    pub detail: String,
    pub badge: String,
    /// Extra CSS class (browser icon)
    pub icon: Option<&'static str>,
}

fn scenario_item(t: &Translator<'_>, merged: Merged<ScenarioRecord, i64>) -> DemoItem {
    DemoItem {
        heading: merged.translated.scenario,
        detail: merged.translated.desc,
        badge: t.t_with("demo.cases", &LookupOptions::new().count(merged.local)),
        icon: None,
    }
}

fn endpoint_item(t: &Translator<'_>, merged: Merged<EndpointRecord, ExpectedResponse>) -> DemoItem {
    let response = LookupOptions::new()
        .param("status", merged.local.status.to_string())
        .param("latency", merged.local.latency_ms.to_string());
    DemoItem {
        heading: format!("{} {}", merged.translated.method, merged.translated.path),
        detail: merged.translated.desc,
        badge: t.t_with("demo.response", &response),
        icon: None,
    }
}

fn browser_item(merged: Merged<BrowserRecord, &'static str>) -> DemoItem {
    DemoItem {
        heading: merged.translated.name,
        detail: merged.translated.desc,
        badge: String::new(),
        icon: Some(merged.local),
    }
}

/// Resolve the items of `step` for the translator's locale.
pub fn build(t: &Translator<'_>, step: DemoStep) -> Result<Vec<DemoItem>, DemoError> {
    let key = step.records_key();
    let items: Vec<DemoItem> = match step {
        DemoStep::Scenarios => merge(t.records::<ScenarioRecord>(key)?, &SCENARIO_CASE_COUNTS[..])?
            .into_iter()
            .map(|m| scenario_item(t, m))
            .collect(),
        DemoStep::Endpoints => merge(t.records::<EndpointRecord>(key)?, &ENDPOINT_RESPONSES[..])?
            .into_iter()
            .map(|m| endpoint_item(t, m))
            .collect(),
        DemoStep::Browsers => merge(t.records::<BrowserRecord>(key)?, &BROWSER_ICONS[..])?
            .into_iter()
            .map(browser_item)
            .collect(),
    };
    Ok(items)
}

fn render_item(position: usize, item: &DemoItem) -> String {
    let class = item
        .icon
        .map(|icon| format!(" icon-{}", icon))
        .unwrap_or_default();
    let badge = if item.badge.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="badge">{}</span>"#, html_escape(&item.badge))
    };

    format!(
        r#"<li class="demo-step{class}" style="animation-delay: {delay}ms"><h3>{heading}</h3><p>{detail}</p>{badge}</li>"#,
        delay = position * STAGGER_MS,
        heading = html_escape(&item.heading),
        detail = html_escape(&item.detail),
    )
}

/// Render the full page for `step`.
pub fn render(t: &Translator<'_>, step: DemoStep) -> Result<String, DemoError> {
    let items = build(t, step)?;
    let title = t.try_text(step.title_key(), &LookupOptions::new())?;
    let subtitle = t.t(step.subtitle_key());

    let list: String = items
        .iter()
        .enumerate()
        .map(|(position, item)| render_item(position, item))
        .collect();

    let next = step
        .next()
        .map(|next| {
            format!(
                r#"<a class="btn" href="/demo/{}">{}</a>"#,
                next.slug(),
                html_escape(&t.t(next.title_key()))
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<main class="demo"><h1>{}</h1><p class="subtitle">{}</p><ol class="demo-steps">{}</ol>{}<p><a href="/dashboard">{}</a></p></main>"#,
        html_escape(&title),
        html_escape(&subtitle),
        list,
        next,
        html_escape(&t.t("common.backToDashboard"))
    );

    Ok(document(t.locale(), &title, &body, None))
}
