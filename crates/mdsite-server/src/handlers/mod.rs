//! HTTP request handlers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub(crate) mod navigation;
pub(crate) mod pages;

/// Path segment characters left as-is: A-Z a-z 0-9 - . _ ~
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Convert a document key (without leading slash) to a URL path.
///
/// Each `/`-separated segment is percent-encoded, so file names containing
/// `?`, `#` or `%` still link back to their own document.
pub(crate) fn to_url_path(key: &str) -> String {
    let mut url = String::with_capacity(key.len() + 1);
    for segment in key.split('/') {
        url.push('/');
        url.extend(utf8_percent_encode(segment, SEGMENT_ENCODE_SET));
    }
    url
}
