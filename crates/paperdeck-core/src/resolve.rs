//! Relative-URL resolution against a configurable base.

/// Resolve a possibly-relative path into a usable URL.
///
/// Rules, in order:
/// - absent, empty, or whitespace-only `path` resolves to `None`;
/// - a `path` that already begins with `http` is passed through unchanged;
/// - a non-blank `base` is normalized to exactly one trailing `/` and
///   joined with `path` stripped of any leading `/`;
/// - with no usable base, `path` is passed through unchanged (it may be a
///   local file path).
pub fn resolve_url(base: Option<&str>, path: Option<&str>) -> Option<String> {
    let path = match path {
        Some(p) if !p.trim().is_empty() => p,
        _ => return None,
    };

    if path.starts_with("http") {
        return Some(path.to_string());
    }

    match base {
        Some(b) if !b.trim().is_empty() => Some(format!(
            "{}/{}",
            b.trim_end_matches('/'),
            path.trim_start_matches('/')
        )),
        _ => Some(path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_path_resolves_to_none_for_any_base() {
        for base in [None, Some(""), Some("https://a.com/")] {
            assert_eq!(resolve_url(base, None), None);
            assert_eq!(resolve_url(base, Some("")), None);
            assert_eq!(resolve_url(base, Some("   ")), None);
        }
    }

    #[test]
    fn absolute_url_passes_through_unchanged() {
        assert_eq!(
            resolve_url(None, Some("http://x")),
            Some("http://x".to_string())
        );
        assert_eq!(
            resolve_url(Some("https://a.com/"), Some("http://x")),
            Some("http://x".to_string())
        );
        assert_eq!(
            resolve_url(Some("https://a.com/"), Some("https://b.org/p.pdf")),
            Some("https://b.org/p.pdf".to_string())
        );
    }

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(
            resolve_url(Some("https://a.com/"), Some("b/c")),
            Some("https://a.com/b/c".to_string())
        );
        assert_eq!(
            resolve_url(Some("https://a.com"), Some("/b/c")),
            Some("https://a.com/b/c".to_string())
        );
        assert_eq!(
            resolve_url(Some("https://a.com//"), Some("//b/c")),
            Some("https://a.com/b/c".to_string())
        );
    }

    #[test]
    fn no_base_passes_relative_path_through() {
        assert_eq!(
            resolve_url(None, Some("rel/path")),
            Some("rel/path".to_string())
        );
        assert_eq!(
            resolve_url(Some("  "), Some("rel/path")),
            Some("rel/path".to_string())
        );
    }
}
