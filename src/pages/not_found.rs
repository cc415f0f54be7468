//! Not-found pages.

use crate::i18n::{LookupOptions, Translator};
use crate::menu::workspace_path;
use crate::pages::layout::{document, html_escape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundVariant {
    /// Unknown path or section
    Dashboard,
    /// Workspace absent from `workspace.list`
    Workspace,
}

/// Where the "go back" link points.
pub fn fallback_target(fallback: Option<&str>) -> String {
    match fallback.filter(|f| !f.is_empty()) {
        Some(workspace) => workspace_path(workspace),
        None => "/dashboard".to_string(),
    }
}

/// Render a not-found page. `workspace` is the identifier that was asked
/// for, `fallback` the workspace the back link returns to.
pub fn render(
    t: &Translator<'_>,
    variant: NotFoundVariant,
    workspace: Option<&str>,
    fallback: Option<&str>,
) -> String {
    let (title, description) = match variant {
        NotFoundVariant::Dashboard => (
            t.t("dashboard.notFound.title"),
            t.t("dashboard.notFound.desc"),
        ),
        NotFoundVariant::Workspace => (
            t.t("dashboard.notFound.workspaceTitle"),
            t.t_with(
                "dashboard.notFound.workspaceDesc",
                &LookupOptions::new().param("workspace", workspace.unwrap_or_default()),
            ),
        ),
    };

    let body = format!(
        r#"<main class="panel not-found"><h1>{}</h1><p>{}</p><a class="btn" href="{}">{}</a></main>"#,
        html_escape(&title),
        html_escape(&description),
        html_escape(&fallback_target(fallback)),
        html_escape(&t.t("dashboard.notFound.back"))
    );

    document(t.locale(), &title, &body, None)
}
