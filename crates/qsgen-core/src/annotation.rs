//! Generation marker detection
//!
//! A struct opts into query-set generation with a doc-comment line of the
//! exact shape `gen:qs`:
//!
//! ```text
//! /// gen:qs
//! pub struct User { .. }
//! ```

/// Directive keyword on the left of the colon.
const DIRECTIVE: &str = "gen";

/// Directive value on the right of the colon.
const QUERY_SET: &str = "qs";

/// Whether a struct's doc-comment block requests query-set generation.
///
/// Each line must still carry its comment marker (`///`, `//!` or `//`).
/// A missing doc block never selects.
///
/// # Examples
///
/// ```
/// use qsgen_core::annotation::needs_query_set;
///
/// let doc = vec!["/// User accounts.".to_string(), "/// gen:qs".to_string()];
///
/// assert!(needs_query_set(Some(doc.as_slice())));
/// assert!(!needs_query_set(None));
/// ```
pub fn needs_query_set(doc: Option<&[String]>) -> bool {
    let Some(lines) = doc else {
        return false;
    };

    lines.iter().any(|line| is_query_set_marker(line))
}

fn is_query_set_marker(line: &str) -> bool {
    let parts: Vec<&str> = line.trim().split(':').collect();

    parts.len() == 2
        && strip_comment_marker(parts[0]).trim() == DIRECTIVE
        && parts[1].trim() == QUERY_SET
}

fn strip_comment_marker(s: &str) -> &str {
    s.strip_prefix("///")
        .or_else(|| s.strip_prefix("//!"))
        .or_else(|| s.strip_prefix("//"))
        .unwrap_or(s)
}
