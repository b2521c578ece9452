/// Check that a document key stays inside its root when joined to a path.
///
/// A safe key is non-empty, relative, uses `/` as its only separator and has
/// no empty, `.` or `..` segments.
#[must_use]
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains(['\\', '\0'])
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_document_keys() {
        assert!(is_safe_key("intro"));
        assert!(is_safe_key("guide/intro"));
        assert!(is_safe_key("guide/v1.2/notes"));
        assert!(is_safe_key("..hidden"));
    }

    #[test]
    fn test_rejects_escaping_keys() {
        assert!(!is_safe_key(""));
        assert!(!is_safe_key("../secret"));
        assert!(!is_safe_key("guide/../../etc/passwd"));
        assert!(!is_safe_key("/etc/passwd"));
        assert!(!is_safe_key("guide//intro"));
        assert!(!is_safe_key("guide/"));
        assert!(!is_safe_key("./intro"));
        assert!(!is_safe_key("guide\\..\\intro"));
        assert!(!is_safe_key("intro\0"));
    }
}
