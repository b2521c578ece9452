//! Sanitizer policy for rendered documents.

use ammonia::Builder;

/// Policy for user-generated content.
///
/// Starts from ammonia's defaults (formatting, tables, links and images with
/// safe URL schemes; no scripts, styles, or event handlers) and additionally
/// keeps:
/// - `id` on any element, so heading anchors work
/// - `class` on `code`, so `language-*` hints reach syntax highlighters
/// - disabled checkboxes, so task list items keep their state
pub(crate) fn content_policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .add_generic_attributes(&["id"])
        .add_tag_attributes("code", &["class"])
        .add_tags(&["input"])
        .add_tag_attributes("input", &["checked"])
        .set_tag_attribute_value("input", "type", "checkbox")
        .set_tag_attribute_value("input", "disabled", "");
    builder
}
