//! Entity extraction over a fixed strategy cascade.
//!
//! Four candidate sources run in order:
//! 1. statistical NER (capped to a character budget)
//! 2. jieba segmentation filtered to noun-like parts of speech
//! 3. surface patterns (quotes, colons, parentheses)
//! 4. the domain term dictionary
//!
//! Candidates are deduplicated by text only; the first strategy to
//! produce a given text decides its label. A failing NER backend is
//! logged and skipped so the remaining strategies still run.

use indexmap::IndexSet;
use kgc_core::{vocab::labels, vocab::KG_TERMS, Entity, Strategy};
use tracing::{debug, warn};

use crate::ner::{NerBackend, PatternNer};
use crate::normalize::truncate_chars;
use crate::segment::Segmenter;
use crate::surface::SurfacePatterns;

/// Character budget for the statistical NER pass. Long documents are
/// truncated for this strategy only; the others see the full text.
pub const DEFAULT_NER_CHAR_LIMIT: usize = 10_000;

pub struct EntityExtractor {
    ner: Box<dyn NerBackend>,
    segmenter: Segmenter,
    surface: SurfacePatterns,
    ner_char_limit: usize,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            ner: Box::new(PatternNer::new()),
            segmenter: Segmenter::new(),
            surface: SurfacePatterns::new(),
            ner_char_limit: DEFAULT_NER_CHAR_LIMIT,
        }
    }

    /// Replace the statistical backend.
    pub fn with_backend(mut self, ner: Box<dyn NerBackend>) -> Self {
        self.ner = ner;
        self
    }

    pub fn with_ner_char_limit(mut self, limit: usize) -> Self {
        self.ner_char_limit = limit;
        self
    }

    /// Run every strategy over `text` and return the deduplicated
    /// entity list in first-seen order.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut candidates = Vec::new();

        let head = truncate_chars(text, self.ner_char_limit);
        match self.ner.tag(head) {
            Ok(spans) => {
                candidates.extend(
                    spans
                        .into_iter()
                        .filter(|span| span.text.chars().count() > 1)
                        .map(|span| Entity::new(span.text, span.label, Strategy::Ner)),
                );
            }
            Err(e) => {
                warn!("NER backend '{}' failed, skipping: {e}", self.ner.name());
            }
        }

        candidates.extend(self.segmenter.extract(text));
        candidates.extend(self.surface.extract(text));

        for term in KG_TERMS {
            if text.contains(term) {
                candidates.push(Entity::new(term, labels::KG_TERM, Strategy::Term));
            }
        }

        let mut seen = IndexSet::new();
        candidates.retain(|entity| seen.insert(entity.text.clone()));
        debug!("extracted {} entities ({} unique texts)", candidates.len(), seen.len());
        candidates
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use kgc_core::{KgcError, Result};

    use super::*;
    use crate::ner::NerSpan;

    /// Backend that reports a fixed span whenever its needle is present
    /// in the text it receives.
    struct NeedleNer {
        needle: &'static str,
        label: &'static str,
    }

    impl NerBackend for NeedleNer {
        fn tag(&self, text: &str) -> Result<Vec<NerSpan>> {
            if text.contains(self.needle) {
                Ok(vec![NerSpan::new(self.needle, self.label)])
            } else {
                Ok(Vec::new())
            }
        }

        fn name(&self) -> &str {
            "needle"
        }
    }

    struct FailingNer;

    impl NerBackend for FailingNer {
        fn tag(&self, _text: &str) -> Result<Vec<NerSpan>> {
            Err(KgcError::Extraction("model unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn texts(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_first_strategy_wins_on_duplicate_text() {
        let extractor = EntityExtractor::new().with_backend(Box::new(NeedleNer {
            needle: "RDF",
            label: "TECH",
        }));
        let entities = extractor.extract("图中用到RDF");

        let rdf: Vec<&Entity> = entities.iter().filter(|e| e.text == "RDF").collect();
        assert_eq!(rdf.len(), 1);
        assert_eq!(rdf[0].label, "TECH");
        assert_eq!(rdf[0].strategy, Strategy::Ner);
    }

    #[test]
    fn test_dictionary_terms_found_by_containment() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("本体论是知识图谱的基础");

        let t = texts(&entities);
        assert!(t.contains(&"本体论"));
        assert!(t.contains(&"知识图谱"));
        // 本体 is a term of its own and appears inside 本体论.
        assert!(t.contains(&"本体"));
    }

    #[test]
    fn test_short_ner_spans_dropped() {
        let extractor = EntityExtractor::new().with_backend(Box::new(NeedleNer {
            needle: "X",
            label: "SHORT",
        }));
        let entities = extractor.extract("X标记");
        assert!(entities.iter().all(|e| e.label != "SHORT"));
    }

    #[test]
    fn test_ner_failure_leaves_other_strategies_running() {
        let extractor = EntityExtractor::new().with_backend(Box::new(FailingNer));
        let entities = extractor.extract("知识图谱包括本体论");

        assert!(texts(&entities).contains(&"知识图谱"));
    }

    #[test]
    fn test_ner_budget_truncates_only_that_strategy() {
        let extractor = EntityExtractor::new()
            .with_backend(Box::new(NeedleNer {
                needle: "SPARQL",
                label: "TECH",
            }))
            .with_ner_char_limit(4);
        let entities = extractor.extract("知识图谱用SPARQL查询");

        // The backend saw only the first four characters.
        assert!(entities.iter().all(|e| e.strategy != Strategy::Ner));
        // Dictionary lookup still scanned the full text.
        assert!(texts(&entities).contains(&"SPARQL"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = EntityExtractor::new();
        let text = "知识图谱（KG）使用“三元组”存储，包括实体和关系。";

        let first: BTreeSet<(String, String)> = extractor
            .extract(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect();
        let second: BTreeSet<(String, String)> = extractor
            .extract(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect();

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_empty_text_yields_no_entities() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("").is_empty());
    }
}
