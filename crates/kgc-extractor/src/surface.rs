//! Surface-pattern extraction.
//!
//! Candidates marked by writing conventions rather than vocabulary:
//! quoted terms, definitions introduced by a colon, and parenthetical
//! asides. Each match is stripped of its delimiters and must keep more
//! than one character to count.

use std::sync::LazyLock;

use kgc_core::{vocab::labels, Entity, Strategy};
use regex::Regex;

/// Terms between CJK curly quotes.
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[“”][^“”]+[“”]").unwrap());

/// Definition bodies after a full- or half-width colon, up to the next
/// clause or sentence boundary.
static COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[：:][^。！？.!?，,；;]+").unwrap());

/// Parenthetical content, full- or half-width.
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[（(][^）)]+[）)]").unwrap());

/// Convention-based entity candidate source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfacePatterns;

impl SurfacePatterns {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for mat in QUOTED_RE.find_iter(text) {
            let term = mat
                .as_str()
                .trim_matches(|c| matches!(c, '“' | '”' | '"'))
                .trim();
            push_candidate(&mut entities, term, labels::QUOTED_TERM);
        }

        for mat in COLON_RE.find_iter(text) {
            let term = mat
                .as_str()
                .trim_matches(|c| matches!(c, '：' | ':'))
                .trim();
            push_candidate(&mut entities, term, labels::DEFINITION);
        }

        for mat in PAREN_RE.find_iter(text) {
            let term = mat
                .as_str()
                .trim_matches(|c| matches!(c, '（' | '(' | '）' | ')'))
                .trim();
            push_candidate(&mut entities, term, labels::PARENTHESIS);
        }

        entities
    }
}

fn push_candidate(entities: &mut Vec<Entity>, term: &str, label: &str) {
    if term.chars().count() > 1 {
        entities.push(Entity::new(term, label, Strategy::Regex));
    }
}

// ============================================================================
// Tests
// ============================================================================
