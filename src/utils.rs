use regex::Regex;
use std::sync::LazyLock;

static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```|markdown").expect("fence pattern is valid"));

/// Truncate to at most `max_chars` characters, keeping the head
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Remove code-fence markers and the literal word `markdown`
///
/// Repeats until nothing matches, so a marker that only appears once another
/// one is cut out is removed too.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    while FENCE_PATTERN.is_match(&cleaned) {
        cleaned = FENCE_PATTERN.replace_all(&cleaned, "").into_owned();
    }
    cleaned
}

/// Convert a string to a sanitized filename
pub fn sanitize_filename(name: &str) -> String {
    let mut name = name.trim().replace("http://", "").replace("https://", "");
    name = name.replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"', '<', '>', '|'], "_");
    name = name.replace(char::is_whitespace, "_");

    if name.is_empty() {
        return "brochure".to_string();
    }

    // Limit filename length
    if name.chars().count() > 100 {
        truncate_chars(&name, 100).to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 0), "");
        // Counts characters, not bytes
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```markdown\n# Title\n```"), "\n# Title\n");
        assert_eq!(strip_code_fences("plain"), "plain");
        // Only the exact triple fence is removed
        assert_eq!(strip_code_fences("``"), "``");
        assert_eq!(strip_code_fences("````"), "`");
        // Markers that join up after a removal
        assert_eq!(strip_code_fences("# A mark```down b"), "# A  b");
        assert_eq!(strip_code_fences("``markdown`"), "");
        assert_eq!(strip_code_fences("markmarkdowndown"), "");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hugging Face"), "Hugging_Face");
        assert_eq!(sanitize_filename("https://a.b/c?d=e"), "a.b_c_d_e");
        assert_eq!(sanitize_filename("   "), "brochure");
        assert_eq!(sanitize_filename(&"x".repeat(150)).len(), 100);
    }
}
