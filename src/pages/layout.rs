//! Document shell shared by every page.

use crate::i18n::{Locale, Translator};
use crate::menu::{menu_item, MenuKey, MENU_KEY_PATH};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; color: #1f2933; }
nav.sidebar { width: 14rem; background: #f5f7fa; padding: 1.5rem 1rem; }
nav.sidebar a { display: block; padding: .4rem .6rem; color: inherit; text-decoration: none; border-radius: .3rem; }
nav.sidebar a.active { background: #e4e7eb; font-weight: 600; }
main { flex: 1; padding: 2rem; }
.stat-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr)); gap: 1rem; }
.stat-card { border: 1px solid #e4e7eb; border-left: 4px solid var(--accent, #9aa5b1); border-radius: .4rem; padding: 1rem; }
.stat-label { display: block; color: #616e7c; font-size: .85rem; }
.stat-value { display: block; font-size: 1.8rem; font-weight: 700; }
.stat-trend { font-size: .8rem; color: #3e7c17; }
.panel { max-width: 32rem; margin: 4rem auto; text-align: center; }
.btn { display: inline-block; margin-top: 1rem; padding: .5rem 1rem; border-radius: .3rem; background: #2680c2; color: #fff; text-decoration: none; }
.demo-steps { list-style: none; padding: 0; }
.demo-step { opacity: 0; animation: step-in .4s ease-out forwards; border: 1px solid #e4e7eb; border-radius: .4rem; padding: 1rem; margin-bottom: .75rem; }
@keyframes step-in { from { opacity: 0; transform: translateY(.5rem); } to { opacity: 1; transform: none; } }
"#;

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Full HTML document. `refresh_secs` adds a meta refresh so pending
/// queries are re-evaluated.
pub fn document(locale: Locale, title: &str, body: &str, refresh_secs: Option<u32>) -> String {
    let lang = locale.code();
    let title = html_escape(title);
    let refresh = refresh_secs
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{}">"#, secs))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"##
    )
}

/// Workspace navigation built from the localized menu.
pub fn sidebar(t: &Translator<'_>, workspace: &str, active: MenuKey) -> String {
    let items = t.list(MENU_KEY_PATH).unwrap_or_default();
    let links: String = MenuKey::ALL
        .iter()
        .map(|key| {
            let label = html_escape(menu_item(&items, key.index()).unwrap_or_default());
            let href = html_escape(&key.href(workspace));
            let class = if *key == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect();

    format!(r#"<nav class="sidebar">{links}</nav>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalogs;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_document_sets_lang_and_title() {
        let html = document(Locale::SPANISH, "Resumen <1>", "<p>body</p>", None);
        assert!(html.contains(r#"<html lang="es">"#));
        assert!(html.contains("<title>Resumen &lt;1&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn test_document_refresh() {
        let html = document(Locale::ENGLISH, "t", "", Some(2));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="2">"#));
    }

    #[test]
    fn test_sidebar_marks_active_entry() {
        let catalogs = Catalogs::embedded().unwrap();
        let t = catalogs.translator(Locale::ENGLISH).unwrap();
        let nav = sidebar(&t, "acme", MenuKey::Reports);

        assert!(nav.contains(r#"<a href="/dashboard/acme">Overview</a>"#));
        assert!(nav.contains(r#"<a href="/dashboard/acme/reports" class="active">Reports</a>"#));
        assert_eq!(nav.matches("<a ").count(), MenuKey::ALL.len());
    }
}
