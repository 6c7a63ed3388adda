//! Named-entity recognition backends.
//!
//! The statistical strategy sits behind the [`NerBackend`] trait so the
//! model can be swapped (or stubbed in tests) without touching the
//! extractor. The default backend is pattern-based: a set of regexes for
//! span types that are reliable to recognize lexically in mixed
//! Chinese/Latin technical text.

use kgc_core::Result;
use regex::Regex;

/// A single tagged span produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NerSpan {
    pub text: String,
    pub label: String,
}

impl NerSpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Backend interface for the statistical extraction strategy.
pub trait NerBackend: Send + Sync {
    /// Tag every recognized span in `text`.
    fn tag(&self, text: &str) -> Result<Vec<NerSpan>>;

    /// Backend name, used in logs when a backend fails.
    fn name(&self) -> &str;
}

// ============================================================================
// PatternNer
// ============================================================================

/// Regex-driven backend covering dates, quantities, book-title marks and
/// suffix-marked organizations and person references.
pub struct PatternNer {
    patterns: Vec<(Regex, String)>,
}

impl PatternNer {
    pub fn new() -> Self {
        let mut ner = Self {
            patterns: Vec::new(),
        };
        ner.add_default_patterns();
        ner
    }

    fn add_default_patterns(&mut self) {
        // Dates
        self.add_pattern(r"\d{4}年(?:\d{1,2}月(?:\d{1,2}日)?)?", "DATE");
        self.add_pattern(r"\d{1,2}月\d{1,2}日", "DATE");
        self.add_pattern(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}", "DATE");

        // Quantities
        self.add_pattern(r"\d+(?:\.\d+)?%", "PERCENT");
        self.add_pattern(r"\d+(?:\.\d+)?(?:亿|万)?元", "MONEY");

        // Suffix-marked references
        self.add_pattern(
            r"[\u{4E00}-\u{9FFF}]{2,6}(?:大学|学院|公司|集团|研究院|研究所|实验室|中心)",
            "ORG",
        );
        self.add_pattern(r"[\u{4E00}-\u{9FFF}]{1,3}(?:教授|博士|院士|先生|女士)", "PERSON");

        // Book-title marks; the capture keeps the title, not the marks
        self.add_pattern(r"《([^《》]+)》", "WORK");
    }

    /// Register a pattern. Invalid regexes are skipped silently so a bad
    /// custom pattern cannot take the whole backend down.
    pub fn add_pattern(&mut self, pattern: &str, label: &str) {
        if let Ok(re) = Regex::new(pattern) {
            self.patterns.push((re, label.to_string()));
        }
    }
}

impl Default for PatternNer {
    fn default() -> Self {
        Self::new()
    }
}

impl NerBackend for PatternNer {
    fn tag(&self, text: &str) -> Result<Vec<NerSpan>> {
        let mut spans = Vec::new();
        for (re, label) in &self.patterns {
            for caps in re.captures_iter(text) {
                // A capture group narrows the span; group 0 is the whole match.
                if let Some(mat) = caps.get(1).or_else(|| caps.get(0)) {
                    spans.push(NerSpan::new(mat.as_str(), label.clone()));
                }
            }
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

// ============================================================================
// Tests
// ============================================================================
