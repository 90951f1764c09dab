//! Display-string helpers shared by both dispatch surfaces.

/// Longest title that still fits the largest font size.
pub const MAX_TITLE_LARGE: usize = 30;
/// Longest title/summary at the standard card font size.
pub const MAX_TITLE_MEDIUM: usize = 45;
/// Longest summary at the smallest comfortable font size.
pub const MAX_SUMMARY_SMALL: usize = 52;
/// Longest title on a sheet card before truncation.
pub const MAX_SHEET_TITLE: usize = 86;

/// Shorten `s` to at most `max_length` characters, replacing the tail with
/// `...` when it does not fit. A truncated result is exactly `max_length`
/// characters long.
pub fn truncate(max_length: usize, s: &str) -> String {
    if s.chars().count() > max_length {
        let kept: String = s.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Uppercase the first character: `open` becomes `Open`.
pub fn titleize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalize an optional author into a displayable handle with the leading
/// marker. Absent authors render as a plain placeholder.
pub fn user_handle(author: Option<&str>) -> String {
    match author {
        Some(h) if h.starts_with('@') => h.to_string(),
        Some(h) => format!("@{h}"),
        None => "unknown".to_string(),
    }
}

/// Shorten a content hash for display: leading `#` plus the first 8
/// characters of the digest.
pub fn short_hash(hash: &str) -> String {
    let digest = hash.trim_start_matches('#');
    let kept: String = digest.chars().take(8).collect();
    format!("#{kept}")
}

/// Format an ISO-8601 timestamp as `"MMM d, yyyy"` (e.g. `Feb 3, 2024`).
/// Unparsable input is passed through unchanged.
pub fn format_date(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_over_limit_is_exactly_max() {
        let long = "a".repeat(50);
        let out = truncate(45, &long);
        assert_eq!(out.chars().count(), 45);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..42], &long[..42]);
    }

    #[test]
    fn test_truncate_at_or_under_limit_unchanged() {
        let exact = "b".repeat(45);
        assert_eq!(truncate(45, &exact), exact);
        assert_eq!(truncate(45, "short"), "short");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let s = "héllo wörld extra long títle here";
        let out = truncate(10, s);
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("open"), "Open");
        assert_eq!(titleize("merged"), "Merged");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_user_handle() {
        assert_eq!(user_handle(Some("@alice")), "@alice");
        assert_eq!(user_handle(Some("alice")), "@alice");
        assert_eq!(user_handle(None), "unknown");
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("#abcdef1234567890"), "#abcdef12");
        assert_eq!(short_hash("abcdef1234567890"), "#abcdef12");
        assert_eq!(short_hash("#ab"), "#ab");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-02-03T10:30:00Z"), "Feb 3, 2024");
        assert_eq!(format_date("2023-11-21T00:00:00+01:00"), "Nov 21, 2023");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
