//! `/dashboard`: send the user to their first workspace.

use crate::i18n::Translator;
use crate::menu::workspace_path;
use crate::pages::layout::{document, html_escape};
use crate::pages::workspace::LOADING_REFRESH_SECS;
use crate::remote::{QueryState, WorkspaceSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectState {
    Loading,
    Error,
    /// The user has no workspaces yet
    Empty,
    /// `replace` keeps `/dashboard` out of the browser history
    Redirecting { target: String, replace: bool },
}

impl RedirectState {
    pub fn from_query(workspaces: &QueryState<Vec<WorkspaceSummary>>) -> Self {
        match workspaces {
            QueryState::Loading => RedirectState::Loading,
            QueryState::Error(_) => RedirectState::Error,
            QueryState::Success(list) => match list.first() {
                Some(first) => RedirectState::Redirecting {
                    target: workspace_path(&first.slug),
                    replace: true,
                },
                None => RedirectState::Empty,
            },
        }
    }
}

/// Render the non-redirecting states. `Redirecting` renders a plain link
/// page for clients that do not follow the HTTP redirect.
pub fn render(t: &Translator<'_>, state: &RedirectState, create_workspace_url: &str) -> String {
    let (title, body, refresh) = match state {
        RedirectState::Loading => {
            let text = t.t("dashboard.redirect.loading");
            let body = format!(
                r#"<main class="panel loading"><p>{}</p><p class="hint">{}</p></main>"#,
                html_escape(&text),
                html_escape(&t.t("common.refreshHint"))
            );
            (text, body, Some(LOADING_REFRESH_SECS))
        }
        RedirectState::Error => {
            let text = t.t("dashboard.redirect.error");
            let body = format!(
                r#"<main class="panel error"><p>{}</p></main>"#,
                html_escape(&text)
            );
            (t.t("common.error"), body, None)
        }
        RedirectState::Empty => {
            let title = t.t("dashboard.redirect.empty.title");
            let body = format!(
                r#"<main class="panel empty"><h1>{}</h1><p>{}</p><a class="btn" href="{}">{}</a></main>"#,
                html_escape(&title),
                html_escape(&t.t("dashboard.redirect.empty.desc")),
                html_escape(create_workspace_url),
                html_escape(&t.t("dashboard.redirect.empty.action"))
            );
            (title, body, None)
        }
        RedirectState::Redirecting { target, .. } => {
            let text = t.t("dashboard.redirect.loading");
            let body = format!(
                r#"<main class="panel"><a href="{}">{}</a></main>"#,
                html_escape(target),
                html_escape(&text)
            );
            (text, body, None)
        }
    };

    document(t.locale(), &title, &body, refresh)
}
