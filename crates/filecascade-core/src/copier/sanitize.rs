/// Folder-name sanitization for destination directories.
use crate::config::INVALID_FOLDER_NAME;

/// Characters that are invalid in a folder name on at least one supported platform.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip forbidden and control characters, then leading/trailing dots and
/// spaces. Never returns an empty string.
pub fn sanitize_folder_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !matches!(*c, '\u{0}'..='\u{1f}'))
        .collect();
    let trimmed = stripped.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        INVALID_FOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_forbidden_characters() {
        assert_eq!(sanitize_folder_name("My:Run*1"), "MyRun1");
        assert_eq!(sanitize_folder_name(r#"a<b>c"d/e\f|g?h"#), "abcdefgh");
    }

    #[test]
    fn all_invalid_becomes_placeholder() {
        assert_eq!(sanitize_folder_name("<>:*?"), "Invalid_Name");
        assert_eq!(sanitize_folder_name(" . . "), "Invalid_Name");
        assert_eq!(sanitize_folder_name(""), "Invalid_Name");
    }

    #[test]
    fn trims_dots_and_spaces_but_keeps_inner_ones() {
        assert_eq!(sanitize_folder_name("  ..Run 1.. "), "Run 1");
        assert_eq!(sanitize_folder_name("v1.2 final"), "v1.2 final");
    }

    #[test]
    fn control_characters_are_removed() {
        assert_eq!(sanitize_folder_name("Run\t1\n"), "Run1");
        // DEL (0x7f) is outside the stripped range.
        assert_eq!(sanitize_folder_name("a\u{7f}b"), "a\u{7f}b");
    }

    #[test]
    fn trim_happens_after_stripping() {
        // The colon hides a trailing space until it is removed.
        assert_eq!(sanitize_folder_name("Run 1 :"), "Run 1");
    }

    #[test]
    fn unicode_is_preserved() {
        assert_eq!(sanitize_folder_name("Messung Ä/ß"), "Messung Äß");
    }
}
