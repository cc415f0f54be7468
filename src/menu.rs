//! Dashboard menu keys.
//!
//! The catalog stores the menu as an ordered list under `dashboard.menu`.
//! `MenuKey` owns that ordering: pages ask for a key, never for a raw index,
//! and the catalog validator checks that the list has one entry per key.

use crate::i18n::Translator;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const MENU_KEY_PATH: &str = "dashboard.menu";

/// Bytes escaped in a single path segment, `/` and `%` included.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `/dashboard/{workspace}` with the identifier encoded as one segment.
///
/// The result is plain ASCII and always usable as a `Location` header.
pub fn workspace_path(workspace: &str) -> String {
    format!("/dashboard/{}", utf8_percent_encode(workspace, PATH_SEGMENT))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    Overview,
    TestCases,
    ApiTests,
    BrowserTests,
    TestRuns,
    Reports,
    Members,
    Settings,
}

impl MenuKey {
    /// Every key, in catalog order.
    pub const ALL: [MenuKey; 8] = [
        MenuKey::Overview,
        MenuKey::TestCases,
        MenuKey::ApiTests,
        MenuKey::BrowserTests,
        MenuKey::TestRuns,
        MenuKey::Reports,
        MenuKey::Members,
        MenuKey::Settings,
    ];

    /// Position of this key's label in `dashboard.menu`.
    pub fn index(self) -> usize {
        match self {
            MenuKey::Overview => 0,
            MenuKey::TestCases => 1,
            MenuKey::ApiTests => 2,
            MenuKey::BrowserTests => 3,
            MenuKey::TestRuns => 4,
            MenuKey::Reports => 5,
            MenuKey::Members => 6,
            MenuKey::Settings => 7,
        }
    }

    /// URL path segment under `/dashboard/{workspace}/`.
    pub fn slug(self) -> &'static str {
        match self {
            MenuKey::Overview => "overview",
            MenuKey::TestCases => "cases",
            MenuKey::ApiTests => "api",
            MenuKey::BrowserTests => "browsers",
            MenuKey::TestRuns => "runs",
            MenuKey::Reports => "reports",
            MenuKey::Members => "members",
            MenuKey::Settings => "settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<MenuKey> {
        MenuKey::ALL.into_iter().find(|key| key.slug() == slug)
    }

    /// Catalog key of this page's header description.
    pub fn description_key(self) -> &'static str {
        match self {
            MenuKey::Overview => "dashboard.overview.desc",
            MenuKey::TestCases => "dashboard.testCases.desc",
            MenuKey::ApiTests => "dashboard.apiTests.desc",
            MenuKey::BrowserTests => "dashboard.browserTests.desc",
            MenuKey::TestRuns => "dashboard.testRuns.desc",
            MenuKey::Reports => "dashboard.reports.desc",
            MenuKey::Members => "dashboard.members.desc",
            MenuKey::Settings => "dashboard.settings.desc",
        }
    }

    /// Link target for this page within a workspace.
    pub fn href(self, workspace: &str) -> String {
        match self {
            MenuKey::Overview => workspace_path(workspace),
            other => format!("{}/{}", workspace_path(workspace), other.slug()),
        }
    }
}

/// Entry `index` of a menu list; out-of-range indices yield `None`.
pub fn menu_item(items: &[String], index: usize) -> Option<&str> {
    items.get(index).map(String::as_str)
}

/// Localized label for `key`, or `None` if the catalog list is too short.
pub fn menu_title(t: &Translator<'_>, key: MenuKey) -> Option<String> {
    let items = t.list(MENU_KEY_PATH)?;
    menu_item(&items, key.index()).map(str::to_string)
}
