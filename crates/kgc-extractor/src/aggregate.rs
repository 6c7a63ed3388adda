//! Corpus-level aggregation.
//!
//! Per-document extractions merge into corpus lists with
//! first-occurrence-wins deduplication: entities collapse on their text,
//! relations on the (subject, predicate, object) triple. Both lists keep
//! document order, then extraction order within a document.

use indexmap::IndexSet;
use kgc_core::{vocab::labels, Entity, Method, Relation, Strategy};

/// Confidence carried by the placeholder seed data.
const PLACEHOLDER_CONFIDENCE: f64 = 0.9;

pub struct CorpusAggregator;

impl CorpusAggregator {
    /// Merge per-document lists into corpus lists. The first occurrence
    /// of an entity text or a relation triple wins; later duplicates are
    /// dropped regardless of label, confidence or sentence.
    pub fn merge(
        entity_lists: Vec<Vec<Entity>>,
        relation_lists: Vec<Vec<Relation>>,
    ) -> (Vec<Entity>, Vec<Relation>) {
        let mut seen_texts: IndexSet<String> = IndexSet::new();
        let mut entities = Vec::new();
        for entity in entity_lists.into_iter().flatten() {
            if seen_texts.insert(entity.text.clone()) {
                entities.push(entity);
            }
        }

        let mut seen_triples: IndexSet<(String, String, String)> = IndexSet::new();
        let mut relations = Vec::new();
        for relation in relation_lists.into_iter().flatten() {
            let triple = (
                relation.subject.clone(),
                relation.predicate.clone(),
                relation.object.clone(),
            );
            if seen_triples.insert(triple) {
                relations.push(relation);
            }
        }

        (entities, relations)
    }
}

/// Seed entities emitted when a run produces no corpus at all, so every
/// downstream consumer still receives a well-formed graph.
pub fn placeholder_entities() -> Vec<Entity> {
    ["知识图谱", "本体论", "RDF", "SPARQL", "知识表示"]
        .into_iter()
        .map(|text| Entity::new(text, labels::KG_TERM, Strategy::Term))
        .collect()
}

/// Seed relations matching [`placeholder_entities`].
pub fn placeholder_relations() -> Vec<Relation> {
    [
        ("知识图谱", "includes", "本体论", "知识图谱包括本体论"),
        ("知识图谱", "uses", "RDF", "知识图谱使用RDF"),
        ("RDF", "queried_by", "SPARQL", "RDF通过SPARQL查询"),
        ("知识图谱", "requires", "知识表示", "知识图谱需要知识表示"),
    ]
    .into_iter()
    .map(|(subject, predicate, object, sentence)| {
        Relation::new(
            subject,
            predicate,
            object,
            sentence,
            PLACEHOLDER_CONFIDENCE,
            Method::Placeholder,
        )
    })
    .collect()
}

// ============================================================================
// Tests
// ============================================================================
