//! HTML page layout.
//!
//! Pages are a fixed shell: header with the site title, a navigation sidebar
//! and the article. Everything except the article fragment is escaped; the
//! fragment is already sanitized by the renderer.

use std::fmt::Write;

use axum::http::StatusCode;
use mdsite_renderer::escape_html;
use mdsite_site::NavEntry;

use crate::handlers::to_url_path;

/// Stylesheet linked from every page.
const STYLESHEET: &str = "/static/css/site.css";

/// Data for rendering a document page.
pub(crate) struct PageView<'a> {
    /// Site title.
    pub(crate) site_title: &'a str,
    /// Key of the document being shown.
    pub(crate) active: &'a str,
    /// Sidebar entries.
    pub(crate) navigation: &'a [NavEntry],
    /// Sanitized article HTML.
    pub(crate) article: &'a str,
}

impl PageView<'_> {
    /// Title for `<title>`: the document name followed by the site title.
    fn document_title(&self) -> String {
        match self.active.rsplit('/').next() {
            Some(name) if !name.is_empty() => format!("{name} - {}", self.site_title),
            _ => self.site_title.to_owned(),
        }
    }
}

/// Render a complete document page.
pub(crate) fn render_page(page: &PageView<'_>) -> String {
    let mut html = String::with_capacity(page.article.len() + 4096);

    write_head(&mut html, &page.document_title());
    html.push_str("<body>\n");
    write_header(&mut html, page.site_title);
    html.push_str("<div class=\"layout\">\n");

    html.push_str("<aside class=\"sidebar\">\n<nav>\n");
    render_nav_items(&mut html, page.navigation, page.active);
    html.push_str("</nav>\n</aside>\n");

    html.push_str("<main>\n<article class=\"content\">\n");
    html.push_str(page.article);
    html.push_str("\n</article>\n</main>\n");

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Render one of the built-in error pages.
pub(crate) fn render_error_page(status: StatusCode) -> String {
    let (heading, message) = if status == StatusCode::NOT_FOUND {
        ("Page not found", "The page you requested does not exist.")
    } else {
        ("Something went wrong", "The page could not be displayed. Please try again later.")
    };
    let code = status.as_u16();

    let mut html = String::with_capacity(1024);
    write_head(&mut html, &format!("{code} {heading}"));
    html.push_str("<body class=\"error\">\n<main>\n");
    let _ = writeln!(html, "<h1>{code}</h1>");
    let _ = writeln!(html, "<p>{}</p>", escape_html(message));
    html.push_str("<p><a href=\"/\">Back to start</a></p>\n");
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn write_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET}\">");
    html.push_str("</head>\n");
}

fn write_header(html: &mut String, site_title: &str) {
    let _ = writeln!(
        html,
        "<header><a href=\"/\" class=\"brand\">{}</a></header>",
        escape_html(site_title)
    );
}

/// Render a navigation level. Directories nest their children.
fn render_nav_items(html: &mut String, items: &[NavEntry], active: &str) {
    if items.is_empty() {
        return;
    }

    html.push_str("<ul>\n");
    for item in items {
        let name = escape_html(&item.name);
        if item.is_dir {
            let _ = writeln!(html, "<li class=\"dir\"><span>{name}</span>");
            render_nav_items(html, &item.children, active);
            html.push_str("</li>\n");
        } else {
            let href = escape_html(&to_url_path(&item.link));
            if item.link == active {
                let _ = writeln!(html, "<li><a href=\"{href}\" class=\"active\">{name}</a></li>");
            } else {
                let _ = writeln!(html, "<li><a href=\"{href}\">{name}</a></li>");
            }
        }
    }
    html.push_str("</ul>\n");
}
