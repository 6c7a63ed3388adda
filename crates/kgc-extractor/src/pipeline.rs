//! Document and corpus processing.
//!
//! A [`Processor`] owns the full extraction cascade. Per document it
//! composes the working text (title, cleaned summary, cleaned content),
//! extracts entities, then relations. Per corpus it contains individual
//! document failures, merges the survivors and falls back to seed data
//! when nothing at all was processed.

use std::sync::Arc;

use kgc_core::{AppConfig, LlmClient, RawDocument, Result};
use tracing::{error, info, warn};

use crate::aggregate::{placeholder_entities, placeholder_relations, CorpusAggregator};
use crate::entity::EntityExtractor;
use crate::normalize::TextNormalizer;
use crate::relation::{LlmRelationExtractor, RelationExtractor};
use crate::{CorpusExtraction, Extraction};

pub struct Processor {
    normalizer: TextNormalizer,
    entity_extractor: EntityExtractor,
    relation_extractor: RelationExtractor,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            entity_extractor: EntityExtractor::new(),
            relation_extractor: RelationExtractor::new(),
        }
    }

    /// Wire a processor from configuration. The LLM client is optional;
    /// without one the relation extractor stays cue-only.
    pub fn from_config(config: &AppConfig, llm: Option<Arc<dyn LlmClient>>) -> Self {
        let entity_extractor =
            EntityExtractor::new().with_ner_char_limit(config.extraction.ner_char_limit);
        let mut relation_extractor =
            RelationExtractor::new().with_max_entities(config.extraction.max_relation_entities);
        if let Some(client) = llm {
            relation_extractor = relation_extractor
                .with_llm(LlmRelationExtractor::from_config(client, &config.llm));
        }
        Self {
            normalizer: TextNormalizer::new(),
            entity_extractor,
            relation_extractor,
        }
    }

    pub fn with_llm(mut self, llm: LlmRelationExtractor) -> Self {
        self.relation_extractor = self.relation_extractor.with_llm(llm);
        self
    }

    /// Compose the text a document is processed under: the raw title,
    /// then the cleaned summary and content.
    pub fn document_text(&self, document: &RawDocument) -> String {
        let summary = self.normalizer.clean(&document.summary);
        let content = self.normalizer.clean(&document.content);
        format!("{}. {} {}", document.title, summary, content)
    }

    /// Extract entities and relations from a single document.
    pub async fn process_document(&self, document: &RawDocument) -> Result<Extraction> {
        let text = self.document_text(document);
        let entities = self.entity_extractor.extract(&text);
        let relations = self.relation_extractor.extract(&text, &entities).await;
        Ok(Extraction {
            entities,
            relations,
        })
    }

    /// Process every document, containing per-document failures. When
    /// the corpus is empty or every document failed, seed data stands in
    /// so downstream stages always receive a graph.
    pub async fn process_corpus(&self, documents: &[RawDocument]) -> CorpusExtraction {
        let mut entity_lists = Vec::new();
        let mut relation_lists = Vec::new();
        let mut failed = 0;

        for document in documents {
            match self.process_document(document).await {
                Ok(extraction) => {
                    info!(
                        "processed '{}': {} entities, {} relations",
                        document.title,
                        extraction.entities.len(),
                        extraction.relations.len()
                    );
                    entity_lists.push(extraction.entities);
                    relation_lists.push(extraction.relations);
                }
                Err(e) => {
                    error!("failed to process '{}': {e}", document.title);
                    failed += 1;
                }
            }
        }

        if failed == documents.len() {
            warn!("no documents processed, falling back to seed data");
            return CorpusExtraction {
                entities: placeholder_entities(),
                relations: placeholder_relations(),
                documents_processed: 0,
                documents_failed: failed,
            };
        }

        let (entities, relations) = CorpusAggregator::merge(entity_lists, relation_lists);
        info!(
            "corpus merged: {} entities, {} relations from {} documents ({} failed)",
            entities.len(),
            relations.len(),
            documents.len() - failed,
            failed
        );
        CorpusExtraction {
            entities,
            relations,
            documents_processed: documents.len() - failed,
            documents_failed: failed,
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use kgc_core::Method;

    use super::*;

    fn doc(title: &str, content: &str) -> RawDocument {
        RawDocument::new(title).with_content(content)
    }

    #[test]
    fn test_document_text_keeps_title_raw() {
        let processor = Processor::new();
        let document = RawDocument::new("知识图谱综述")
            .with_summary("<p>一篇  综述</p>")
            .with_content("正文★部分");

        assert_eq!(
            processor.document_text(&document),
            "知识图谱综述. 一篇 综述 正文部分"
        );
    }

    #[tokio::test]
    async fn test_process_document_links_entities_and_relations() {
        let processor = Processor::new();
        let extraction = processor
            .process_document(&doc("图谱简介", "知识图谱包括本体论。"))
            .await
            .unwrap();

        let texts: Vec<&str> = extraction.entities.iter().map(|e| e.text.as_str()).collect();
        assert!(texts.contains(&"知识图谱"));
        assert!(texts.contains(&"本体论"));

        assert!(extraction.relations.iter().any(|r| {
            r.subject == "知识图谱"
                && r.predicate == "includes"
                && r.object == "本体论"
                && r.method == Method::Pattern
        }));
    }

    #[tokio::test]
    async fn test_corpus_deduplicates_across_documents() {
        let processor = Processor::new();
        let corpus = [
            doc("第一篇", "知识图谱包括本体论。"),
            doc("第二篇", "知识图谱包括本体论。另有语义网。"),
        ];

        let result = processor.process_corpus(&corpus).await;

        let kg_count = result
            .entities
            .iter()
            .filter(|e| e.text == "知识图谱")
            .count();
        assert_eq!(kg_count, 1);

        let triple_count = result
            .relations
            .iter()
            .filter(|r| r.subject == "知识图谱" && r.predicate == "includes" && r.object == "本体论")
            .count();
        assert_eq!(triple_count, 1);

        assert_eq!(result.documents_processed, 2);
        assert_eq!(result.documents_failed, 0);
    }

    #[tokio::test]
    async fn test_empty_corpus_falls_back_to_seed_data() {
        let processor = Processor::new();
        let result = processor.process_corpus(&[]).await;

        assert_eq!(result.entities.len(), 5);
        assert_eq!(result.relations.len(), 4);
        assert!(result
            .relations
            .iter()
            .all(|r| r.method == Method::Placeholder));
        assert_eq!(result.documents_processed, 0);
    }

    #[tokio::test]
    async fn test_document_yielding_nothing_is_not_replaced_by_seed() {
        let processor = Processor::new();
        let result = processor.process_corpus(&[doc("空", "")]).await;

        // One document processed fine, it just found nothing relevant;
        // seed data only stands in when no document went through.
        assert_eq!(result.documents_processed, 1);
        assert!(result.relations.is_empty());
    }
}
