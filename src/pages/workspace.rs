//! Workspace-scoped dashboard pages.
//!
//! Every menu entry renders the same frame: sidebar, a header with the menu
//! title and a description naming the workspace, and a grid of stat cards.
//! Only the overview binds its cards to `admin.stats`.

use crate::i18n::{LookupOptions, Translator};
use crate::menu::{menu_title, MenuKey};
use crate::pages::layout::{document, html_escape, sidebar};
use crate::remote::{AdminStats, QueryState};
use crate::stats::{CardSpec, CardValue, StatCard};
use chrono::{DateTime, Utc};

/// Seconds before a page with a pending query reloads itself.
pub const LOADING_REFRESH_SECS: u32 = 2;

const OVERVIEW: &[CardSpec] = &[
    CardSpec::stat("dashboard.overview.stats.users", 0).color("blue"),
    CardSpec::stat("dashboard.overview.stats.workspaces", 1).color("purple"),
    CardSpec::stat("dashboard.overview.stats.runs", 2).color("green"),
    CardSpec::stat("dashboard.overview.stats.cases", 3).color("orange"),
];

const TEST_CASES: &[CardSpec] = &[
    CardSpec::literal("dashboard.testCases.stats.total", "248").color("blue"),
    CardSpec::literal("dashboard.testCases.stats.passing", "231")
        .color("green")
        .trend("+3%"),
    CardSpec::literal("dashboard.testCases.stats.failing", "17")
        .color("red")
        .trend("-2%"),
];

const API_TESTS: &[CardSpec] = &[
    CardSpec::literal("dashboard.apiTests.stats.endpoints", "64").color("blue"),
    CardSpec::literal("dashboard.apiTests.stats.passRate", "98.4%")
        .color("green")
        .trend("+0.6%"),
    CardSpec::literal("dashboard.apiTests.stats.avgLatency", "142 ms").color("orange"),
];

const BROWSER_TESTS: &[CardSpec] = &[
    CardSpec::literal("dashboard.browserTests.stats.browsers", "5").color("purple"),
    CardSpec::literal("dashboard.browserTests.stats.sessions", "1,204")
        .color("blue")
        .trend("+12%"),
];

const TEST_RUNS: &[CardSpec] = &[
    CardSpec::literal("dashboard.testRuns.stats.today", "36").color("blue"),
    CardSpec::literal("dashboard.testRuns.stats.week", "214")
        .color("green")
        .trend("+8%"),
    CardSpec::literal("dashboard.testRuns.stats.flaky", "4").color("orange"),
];

const REPORTS: &[CardSpec] = &[
    CardSpec::literal("dashboard.reports.stats.generated", "52").color("blue"),
    CardSpec::literal("dashboard.reports.stats.scheduled", "6").color("purple"),
];

const MEMBERS: &[CardSpec] = &[
    CardSpec::literal("dashboard.members.stats.members", "14").color("blue"),
    CardSpec::literal("dashboard.members.stats.invites", "3").color("orange"),
];

const SETTINGS: &[CardSpec] = &[
    CardSpec::literal("dashboard.settings.stats.integrations", "7").color("green"),
    CardSpec::literal("dashboard.settings.stats.webhooks", "2").color("purple"),
];

/// Cards shown on the page for `key`.
pub fn cards_for(key: MenuKey) -> &'static [CardSpec] {
    match key {
        MenuKey::Overview => OVERVIEW,
        MenuKey::TestCases => TEST_CASES,
        MenuKey::ApiTests => API_TESTS,
        MenuKey::BrowserTests => BROWSER_TESTS,
        MenuKey::TestRuns => TEST_RUNS,
        MenuKey::Reports => REPORTS,
        MenuKey::Members => MEMBERS,
        MenuKey::Settings => SETTINGS,
    }
}

/// Whether the page for `key` needs `admin.stats`.
pub fn uses_stats(key: MenuKey) -> bool {
    cards_for(key)
        .iter()
        .any(|spec| matches!(spec.value, CardValue::Stat(_)))
}

fn accent(color: Option<&str>) -> &'static str {
    match color {
        Some("blue") => "#2680c2",
        Some("green") => "#3e7c17",
        Some("red") => "#ba2525",
        Some("orange") => "#de911d",
        Some("purple") => "#724bb7",
        _ => "#9aa5b1",
    }
}

fn render_card(card: &StatCard) -> String {
    let trend = card
        .trend
        .map(|trend| format!(r#"<span class="stat-trend">{}</span>"#, html_escape(trend)))
        .unwrap_or_default();

    format!(
        r#"<div class="stat-card" style="--accent: {}"><span class="stat-label">{}</span><span class="stat-value">{}</span>{}</div>"#,
        accent(card.color),
        html_escape(&card.label),
        html_escape(&card.value),
        trend
    )
}

fn render_cards(t: &Translator<'_>, specs: &[CardSpec], stats: &[Option<i64>]) -> String {
    let cards: String = specs
        .iter()
        .map(|spec| render_card(&StatCard::resolve(spec, t, stats)))
        .collect();
    format!(r#"<div class="stat-grid">{}</div>"#, cards)
}

/// Rendered page plus whether it should reload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePage {
    pub html: String,
    pub pending: bool,
}

/// Render the page for `key` inside `workspace`.
///
/// `stats` is only consulted when the page binds cards to `admin.stats`.
/// `now` stamps the "updated" line after a successful query.
pub fn render(
    t: &Translator<'_>,
    key: MenuKey,
    workspace: &str,
    stats: &QueryState<AdminStats>,
    now: DateTime<Utc>,
) -> WorkspacePage {
    let title = menu_title(t, key).unwrap_or_default();
    let workspace_options = LookupOptions::new().param("workspace", workspace);
    let description = t.t_with(key.description_key(), &workspace_options);
    let label = t.t_with("dashboard.workspaceLabel", &workspace_options);

    let specs = cards_for(key);
    let (content, pending) = if !uses_stats(key) {
        (render_cards(t, specs, &[]), false)
    } else {
        match stats {
            QueryState::Loading => (
                format!(
                    r#"<div class="panel loading"><p>{}</p><p class="hint">{}</p></div>"#,
                    html_escape(&t.t("common.loading")),
                    html_escape(&t.t("common.refreshHint"))
                ),
                true,
            ),
            QueryState::Error(_) => (
                format!(
                    r#"<p class="error">{}</p>{}"#,
                    html_escape(&t.t("common.error")),
                    render_cards(t, specs, &[])
                ),
                false,
            ),
            QueryState::Success(stats) => {
                let time = now.format("%Y-%m-%d %H:%M UTC").to_string();
                let updated = t.t_with("common.updatedAt", &LookupOptions::new().param("time", time));
                (
                    format!(
                        r#"{}<p class="updated">{}</p>"#,
                        render_cards(t, specs, stats.values()),
                        html_escape(&updated)
                    ),
                    false,
                )
            }
        }
    };

    let body = format!(
        r#"{nav}<main><header><p class="workspace">{label}</p><h1>{title}</h1><p class="desc">{description}</p></header>{content}</main>"#,
        nav = sidebar(t, workspace, key),
        label = html_escape(&label),
        title = html_escape(&title),
        description = html_escape(&description),
    );

    let refresh = pending.then_some(LOADING_REFRESH_SECS);
    WorkspacePage {
        html: document(t.locale(), &title, &body, refresh),
        pending,
    }
}
