//! Markdown to sanitized HTML conversion.
//!
//! Rendering is a two-stage, pure transform:
//!
//! 1. [`HtmlRenderer::to_html`]: markdown -> raw HTML (`pulldown-cmark`)
//! 2. [`HtmlRenderer::sanitize`]: raw HTML -> safe HTML (`ammonia`)
//!
//! [`HtmlRenderer::render`] runs both over raw source bytes. Neither stage can
//! fail: invalid UTF-8 is replaced, and the sanitizer always produces output.
//!
//! # Example
//!
//! ```
//! use mdsite_renderer::HtmlRenderer;
//!
//! let renderer = HtmlRenderer::new();
//! let html = renderer.render(b"# Hello\n\n<script>alert(1)</script>");
//! assert!(html.contains(">Hello</h1>"));
//! assert!(!html.contains("<script"));
//! ```

mod markdown;
mod sanitize;
mod util;

pub use markdown::HtmlRenderer;
pub use util::{escape_html, slugify};
