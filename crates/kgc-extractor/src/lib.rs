//! KGC Extractor - text-to-triples extraction pipeline
//!
//! This crate turns raw crawled documents into entity and relation
//! lists:
//! - **Normalization**: markup removal, whitespace collapse, charset
//!   filtering, sentence splitting
//! - **Entities**: a four-strategy cascade (statistical NER, jieba POS
//!   filtering, surface patterns, domain dictionary) deduplicated by
//!   text
//! - **Relations**: a deterministic cue matcher plus an optional LLM
//!   supplier
//! - **Aggregation**: corpus-level first-occurrence-wins merging with a
//!   seed-data fallback for empty runs

pub mod aggregate;
pub mod entity;
pub mod ner;
pub mod normalize;
pub mod pipeline;
pub mod relation;
pub mod segment;
pub mod surface;

pub use aggregate::{placeholder_entities, placeholder_relations, CorpusAggregator};
pub use entity::EntityExtractor;
pub use ner::{NerBackend, NerSpan, PatternNer};
pub use normalize::{split_sentences, TextNormalizer};
pub use pipeline::Processor;
pub use relation::{LlmRelationExtractor, RelationExtractor};
pub use segment::Segmenter;
pub use surface::SurfacePatterns;

use kgc_core::{Entity, Relation};

/// Entities and relations extracted from a single document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

/// Corpus-wide extraction result after merging.
#[derive(Debug, Clone, Default)]
pub struct CorpusExtraction {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub documents_processed: usize,
    pub documents_failed: usize,
}

impl CorpusExtraction {
    /// True when nothing was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }
}
