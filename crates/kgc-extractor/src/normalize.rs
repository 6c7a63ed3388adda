//! Text normalization for raw crawled documents.
//!
//! Cleaning runs three passes in a fixed order:
//! - markup tags are removed
//! - whitespace runs collapse to a single space
//! - characters outside the working charset (word characters, CJK,
//!   common Chinese/Latin punctuation, quotes) are dropped
//!
//! The cleaned text is then trimmed. Sentence splitting is a separate
//! concern and operates on both Chinese and Latin terminal punctuation.

use std::sync::LazyLock;

use regex::Regex;

/// HTML/XML-style tags, e.g. `<p>` or `</div>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Any run of whitespace, including newlines and tabs.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Everything outside the working charset: word characters, whitespace,
/// CJK ideographs and the punctuation that carries sentence structure.
static CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s\u{4E00}-\u{9FFF}.,，。？?!！:：;；()（）“”"']+"#).unwrap()
});

/// Sentence-terminal punctuation, Chinese and Latin.
const SENTENCE_TERMINALS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

// ============================================================================
// TextNormalizer
// ============================================================================

/// Cleans raw document text down to the working charset.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw text fragment. Order matters: tags are removed
    /// before whitespace collapses, and the charset filter runs last so
    /// that stripped markup cannot leave stray angle brackets behind.
    pub fn clean(&self, text: &str) -> String {
        let text = TAG_RE.replace_all(text, "");
        let text = WHITESPACE_RE.replace_all(&text, " ");
        let text = CHARSET_RE.replace_all(&text, "");
        text.trim().to_string()
    }
}

/// Split text into sentence segments on terminal punctuation.
///
/// Segments are returned raw: surrounding whitespace is kept and empty
/// segments (from consecutive terminals) are preserved. Callers decide
/// how much trimming they need.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(&SENTENCE_TERMINALS[..]).collect()
}

/// Truncate to at most `limit` characters, never splitting a multi-byte
/// character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_clean_strips_tags() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.clean("<p>知识图谱</p>是一种<b>语义网络</b>");
        assert_eq!(cleaned, "知识图谱是一种语义网络");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.clean("知识图谱\n\t  包括   本体论");
        assert_eq!(cleaned, "知识图谱 包括 本体论");
    }

    #[test]
    fn test_clean_drops_out_of_charset_symbols() {
        let normalizer = TextNormalizer::new();
        let cleaned = normalizer.clean("知识图谱★△包括€本体论");
        assert_eq!(cleaned, "知识图谱包括本体论");
    }

    #[test]
    fn test_clean_keeps_working_punctuation() {
        let normalizer = TextNormalizer::new();
        let text = "定义：知识图谱（KG）是“结构化”的，包括RDF、吗？";
        let cleaned = normalizer.clean(text);
        assert_eq!(cleaned, "定义：知识图谱（KG）是“结构化”的，包括RDF吗？");
    }

    #[test]
    fn test_clean_trims_edges() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.clean("  知识图谱  "), "知识图谱");
        assert_eq!(normalizer.clean(""), "");
        assert_eq!(normalizer.clean("   \n\t "), "");
    }

    #[test]
    fn test_split_sentences_mixed_terminals() {
        let segments = split_sentences("知识图谱包括本体论。语义网使用RDF！对吗？Yes.");
        assert_eq!(
            segments,
            vec!["知识图谱包括本体论", "语义网使用RDF", "对吗", "Yes", ""]
        );
    }

    #[test]
    fn test_split_sentences_without_terminal() {
        assert_eq!(split_sentences("没有终结符"), vec!["没有终结符"]);
    }

    #[test]
    fn test_split_sentences_keeps_raw_segments() {
        let segments = split_sentences("第一句。 第二句。");
        assert_eq!(segments, vec!["第一句", " 第二句", ""]);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("知识图谱", 2), "知识");
        assert_eq!(truncate_chars("知识图谱", 10), "知识图谱");
        assert_eq!(truncate_chars("abc知识", 4), "abc知");
        assert_eq!(truncate_chars("", 5), "");
    }

    proptest! {
        #[test]
        fn clean_never_leaves_markup_or_raw_whitespace(text in ".*") {
            let cleaned = TextNormalizer::new().clean(&text);
            prop_assert!(!cleaned.contains('<'));
            prop_assert!(!cleaned.contains('>'));
            prop_assert!(!cleaned.contains('\n'));
            prop_assert!(!cleaned.contains('\t'));
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }
    }
}
