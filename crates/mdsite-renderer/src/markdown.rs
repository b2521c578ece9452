//! Markdown conversion.

use std::collections::HashMap;

use ammonia::Builder;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::sanitize::content_policy;
use crate::util::slugify;

/// Markdown renderer producing sanitized HTML fragments.
///
/// Holds the parser options and sanitizer policy so both are built once and
/// shared by every render. `HtmlRenderer` is `Send + Sync` and can be used
/// from any number of threads.
pub struct HtmlRenderer {
    options: Options,
    policy: Builder<'static>,
}

impl HtmlRenderer {
    /// Create a renderer with the common GitHub-style extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_DEFINITION_LIST);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);

        Self {
            options,
            policy: content_policy(),
        }
    }

    /// Convert raw source bytes into sanitized HTML.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD before parsing.
    #[must_use]
    pub fn render(&self, source: &[u8]) -> String {
        let markdown = String::from_utf8_lossy(source);
        self.sanitize(&self.to_html(&markdown))
    }

    /// Convert markdown to raw, unsanitized HTML.
    ///
    /// Headings receive slug ids (`## Getting started` -> `id="getting-started"`),
    /// de-duplicated with a numeric suffix.
    #[must_use]
    pub fn to_html(&self, markdown: &str) -> String {
        let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();
        assign_heading_ids(&mut events);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Sanitize an HTML fragment: scripts, event handlers, and unsafe URLs
    /// are removed; common formatting markup is kept.
    #[must_use]
    pub fn sanitize(&self, html: &str) -> String {
        self.policy.clean(html).to_string()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill in `id` for every heading that doesn't already carry one.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut i = 0;

    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            let mut text = String::new();
            let mut end = i + 1;
            while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
                if let Event::Text(t) | Event::Code(t) = &events[end] {
                    text.push_str(t);
                }
                end += 1;
            }

            let slug = unique_slug(&mut seen, &text);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slug));
            }
            i = end;
        }
        i += 1;
    }
}

fn unique_slug(seen: &mut HashMap<String, usize>, text: &str) -> String {
    let base = match slugify(text) {
        s if s.is_empty() => "section".to_owned(),
        s => s,
    };

    let count = seen.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_renders_with_id() {
        let renderer = HtmlRenderer::new();

        let html = renderer.render(b"# Hello");

        assert_eq!(html.trim(), r#"<h1 id="hello">Hello</h1>"#);
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let renderer = HtmlRenderer::new();

        let html = renderer.to_html("## Setup\n\n## Setup\n\n## Setup");

        assert!(html.contains(r#"<h2 id="setup">"#));
        assert!(html.contains(r#"<h2 id="setup-1">"#));
        assert!(html.contains(r#"<h2 id="setup-2">"#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let renderer = HtmlRenderer::new();

        let html = renderer.to_html("## The `render` call");

        assert!(html.contains(r#"id="the-render-call""#));
    }

    #[test]
    fn test_punctuation_only_heading_falls_back() {
        let renderer = HtmlRenderer::new();

        let html = renderer.to_html("# ???");

        assert!(html.contains(r#"id="section""#));
    }

    #[test]
    fn test_script_tags_are_stripped() {
        let renderer = HtmlRenderer::new();
        let source = b"# Title\n\n<script>alert('x')</script>\n\nText <script src=\"evil.js\"></script>";

        let html = renderer.render(source);

        assert!(!html.contains("<script"));
        assert!(!html.contains("alert("));
        assert!(html.contains("Text"));
    }

    #[test]
    fn test_event_handlers_and_javascript_urls_are_stripped() {
        let renderer = HtmlRenderer::new();
        let source = b"<img src=\"a.png\" onerror=\"alert(1)\">\n\n[click](javascript:alert(1))";

        let html = renderer.render(source);

        assert!(!html.contains("onerror"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"src="a.png""#));
    }

    #[test]
    fn test_formatting_survives_sanitizing() {
        let renderer = HtmlRenderer::new();
        let source = b"**bold** _em_ ~~gone~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```";

        let html = renderer.render(source);

        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_task_list_and_definition_list() {
        let renderer = HtmlRenderer::new();

        let html = renderer.render(b"- [x] done\n- [ ] todo\n\nTerm\n: Definition\n");

        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains("checked"));
        assert!(html.contains("<dt>Term</dt>"));
        assert!(html.contains("<dd>Definition</dd>"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let renderer = HtmlRenderer::new();

        let html = renderer.render(b"caf\xE9");

        assert!(html.contains("caf\u{FFFD}"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = HtmlRenderer::new();
        let source = b"# A\n\n## B\n\n[link](https://example.com)\n";

        assert_eq!(renderer.render(source), renderer.render(source));
    }
}
