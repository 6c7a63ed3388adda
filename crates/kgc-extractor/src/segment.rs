//! Lexical extraction through Chinese word segmentation.
//!
//! Wraps a jieba segmenter seeded with the knowledge-graph vocabulary so
//! multi-character domain terms survive segmentation as single words.
//! Only noun-like parts of speech are kept.

use jieba_rs::Jieba;
use kgc_core::{vocab::KG_TERMS, Entity, Strategy};

/// Parts of speech accepted as entity candidates: common nouns, person
/// and place names, organization names, other proper nouns and nominal
/// verbs.
const ACCEPTED_POS: [&str; 6] = ["n", "nr", "ns", "nt", "nz", "vn"];

/// Segmenter-backed entity candidate source.
pub struct Segmenter {
    jieba: Jieba,
}

impl Segmenter {
    /// Build a segmenter with the domain vocabulary registered as nouns.
    pub fn new() -> Self {
        let mut jieba = Jieba::new();
        for term in KG_TERMS {
            jieba.add_word(term, Some(10), Some("n"));
        }
        Self { jieba }
    }

    /// Segment `text` and return noun-like words longer than one
    /// character, labeled with their part-of-speech tag.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        self.jieba
            .tag(text, true)
            .into_iter()
            .filter(|tagged| {
                ACCEPTED_POS.contains(&tagged.tag) && tagged.word.chars().count() > 1
            })
            .map(|tagged| Entity::new(tagged.word, tagged.tag, Strategy::Jieba))
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
