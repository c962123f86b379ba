//! Helpers for keeping secrets and local paths out of log lines.

use std::path::Path;

/// Maximum length of a response body quoted in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Truncates a response body for error messages, on a character boundary.
pub fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}... (truncated)", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_redact_path_returns_filename() {
        assert_eq!(
            redact_path(&PathBuf::from("/home/user/Pictures/filter.jpg")),
            "filter.jpg"
        );
    }

    #[test]
    fn test_redact_path_no_filename() {
        assert_eq!(redact_path(&PathBuf::from("/")), "<unknown>");
    }

    #[test]
    fn test_truncate_short_body_unchanged() {
        assert_eq!(truncate_body("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_truncate_multibyte_body() {
        let body = "错".repeat(MAX_ERROR_BODY_CHARS + 10);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("... (truncated)"));
        assert_eq!(
            truncated.chars().filter(|c| *c == '错').count(),
            MAX_ERROR_BODY_CHARS
        );
    }
}
