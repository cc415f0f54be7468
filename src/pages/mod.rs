//! HTML views.

pub mod demo;
pub mod layout;
pub mod not_found;
pub mod redirect;
pub mod workspace;

use crate::i18n::KeyRequirement;
use crate::menu::{MenuKey, MENU_KEY_PATH};
use demo::{DemoStep, BROWSER_ICONS, ENDPOINT_RESPONSES, SCENARIO_CASE_COUNTS};

const STATIC_KEYS: &[KeyRequirement] = &[
    KeyRequirement::text("common.error"),
    KeyRequirement::text("common.loading"),
    KeyRequirement::text("common.refreshHint"),
    KeyRequirement::text("common.updatedAt"),
    KeyRequirement::text("common.backToDashboard"),
    KeyRequirement::text("dashboard.workspaceLabel"),
    KeyRequirement::text("dashboard.redirect.loading"),
    KeyRequirement::text("dashboard.redirect.error"),
    KeyRequirement::text("dashboard.redirect.empty.title"),
    KeyRequirement::text("dashboard.redirect.empty.desc"),
    KeyRequirement::text("dashboard.redirect.empty.action"),
    KeyRequirement::text("dashboard.notFound.title"),
    KeyRequirement::text("dashboard.notFound.desc"),
    KeyRequirement::text("dashboard.notFound.workspaceTitle"),
    KeyRequirement::text("dashboard.notFound.workspaceDesc"),
    KeyRequirement::text("dashboard.notFound.back"),
    KeyRequirement::records(
        "demo.scenarios",
        SCENARIO_CASE_COUNTS.len(),
        &["scenario", "desc"],
    ),
    KeyRequirement::records(
        "demo.endpoints",
        ENDPOINT_RESPONSES.len(),
        &["method", "path", "desc"],
    ),
    KeyRequirement::records("demo.browsers", BROWSER_ICONS.len(), &["name", "desc"]),
    KeyRequirement::text("demo.cases_one"),
    KeyRequirement::text("demo.cases_other"),
    KeyRequirement::text("demo.response"),
];

/// Every catalog key a page reads, with the shape it expects.
pub fn required_keys() -> Vec<KeyRequirement> {
    let mut keys = vec![KeyRequirement::text_list(MENU_KEY_PATH, MenuKey::ALL.len())];

    for key in MenuKey::ALL {
        keys.push(KeyRequirement::text(key.description_key()));
        keys.extend(
            workspace::cards_for(key)
                .iter()
                .map(|spec| KeyRequirement::text(spec.label_key)),
        );
    }

    keys.extend_from_slice(STATIC_KEYS);

    for step in DemoStep::ALL {
        keys.push(KeyRequirement::text(step.title_key()));
        keys.push(KeyRequirement::text(step.subtitle_key()));
    }

    keys
}
