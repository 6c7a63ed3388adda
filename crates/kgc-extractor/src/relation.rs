//! Relation extraction.
//!
//! Two suppliers feed the relation list:
//! - a deterministic cue matcher that scans sentences for predicate cue
//!   words between entity pairs
//! - an optional LLM supplier that prompts a chat model for triples and
//!   parses its JSON answer
//!
//! The cue matcher always runs; the LLM is additive and its failures
//! degrade to an empty contribution.

use std::sync::Arc;
use std::sync::LazyLock;

use kgc_core::{
    vocab::CUE_LEXICON, Entity, LlmClient, LlmConfig, Method, Relation,
};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::normalize::{split_sentences, truncate_chars};

/// Confidence assigned to every cue-matched relation.
const PATTERN_CONFIDENCE: f64 = 0.8;

/// Confidence assumed when the LLM omits the field.
const DEFAULT_LLM_CONFIDENCE: f64 = 0.8;

/// Maximum characters allowed between a cue and the object entity.
const MAX_CUE_GAP_CHARS: usize = 20;

/// Entity-pair scanning is quadratic per sentence, so the entity list is
/// capped before pairing.
pub const DEFAULT_MAX_ENTITIES: usize = 200;

// ============================================================================
// Cue matcher
// ============================================================================

pub struct RelationExtractor {
    max_entities: usize,
    llm: Option<LlmRelationExtractor>,
}

impl RelationExtractor {
    pub fn new() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
            llm: None,
        }
    }

    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Attach an LLM supplier. Without one, only cue matches are
    /// produced.
    pub fn with_llm(mut self, llm: LlmRelationExtractor) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Extract relations from `text` given its entity list. Cue matches
    /// come first, then any LLM-supplied triples.
    pub async fn extract(&self, text: &str, entities: &[Entity]) -> Vec<Relation> {
        let mut relations = self.extract_with_cues(text, entities);

        if let Some(llm) = &self.llm {
            let supplied = llm.extract(text, entities).await;
            info!("LLM supplied {} relations", supplied.len());
            relations.extend(supplied);
        } else {
            debug!("no LLM supplier configured, cue matches only");
        }

        relations
    }

    /// Scan every sentence for every cue word and emit a relation for
    /// each entity pair that passes the positional test.
    pub fn extract_with_cues(&self, text: &str, entities: &[Entity]) -> Vec<Relation> {
        let texts: Vec<&str> = entities
            .iter()
            .take(self.max_entities)
            .map(|e| e.text.as_str())
            .collect();
        let sentences = split_sentences(text);

        let mut relations = Vec::new();
        for (cue, predicate) in CUE_LEXICON {
            for sentence in &sentences {
                if !sentence.contains(cue) {
                    continue;
                }
                for subject in &texts {
                    if !sentence.contains(subject) {
                        continue;
                    }
                    for object in &texts {
                        if subject == object || !sentence.contains(object) {
                            continue;
                        }
                        if cue_links(sentence, subject, cue, object) {
                            relations.push(Relation::new(
                                *subject,
                                predicate.as_str(),
                                *object,
                                sentence.trim(),
                                PATTERN_CONFIDENCE,
                                Method::Pattern,
                            ));
                        }
                    }
                }
            }
        }
        relations
    }
}

impl Default for RelationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional test for a candidate triple within one sentence.
///
/// The cue must first occur after the subject's first occurrence and no
/// later than the object's, and at most [`MAX_CUE_GAP_CHARS`] characters
/// may separate the cue from the object. A cue found only past the
/// object would support the mirrored triple instead; mirrored candidates
/// are recognized but deliberately never emitted, so the matcher yields
/// subject-first readings only (recorded as an open question in
/// DESIGN.md).
fn cue_links(sentence: &str, subject: &str, cue: &str, object: &str) -> bool {
    let Some(subject_pos) = sentence.find(subject) else {
        return false;
    };
    let Some(object_pos) = sentence.find(object) else {
        return false;
    };

    let after_subject = subject_pos + subject.len();
    let cue_pos = match sentence[after_subject..].find(cue) {
        Some(offset) => after_subject + offset,
        // Mirrored case: the cue, if present at all, precedes the
        // subject's occurrence.
        None => return false,
    };
    if cue_pos > object_pos {
        // Mirrored case: the cue sits past the object.
        return false;
    }

    // Gap in characters between cue end and object start; a cue running
    // into the object counts as zero.
    let cue_end = cue_pos + cue.len();
    let gap = if object_pos > cue_end {
        sentence[cue_end..object_pos].chars().count()
    } else {
        0
    };
    gap <= MAX_CUE_GAP_CHARS
}

// ============================================================================
// LLM supplier
// ============================================================================

/// System instruction for the relation-extraction chat call.
const RELATION_SYSTEM_PROMPT: &str =
    "你是一个专业的知识图谱关系提取助手，擅长从文本中识别实体间的语义关系。";

/// Required answer shape, echoed verbatim into the prompt.
const RESPONSE_FORMAT: &str = r#"[
  {
    "subject": "实体1",
    "predicate": "关系类型",
    "object": "实体2",
    "sentence": "包含这种关系的原始句子",
    "confidence": 0.9
  }
]"#;

/// First JSON array of objects inside an otherwise free-form answer.
static JSON_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").unwrap());

/// One triple as the model reports it.
#[derive(Debug, Deserialize)]
struct LlmTriple {
    subject: String,
    predicate: String,
    object: String,
    #[serde(default)]
    sentence: String,
    confidence: Option<f64>,
}

pub struct LlmRelationExtractor {
    client: Arc<dyn LlmClient>,
    prompt_char_limit: usize,
    prompt_entity_limit: usize,
}

impl LlmRelationExtractor {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            prompt_char_limit: 8_000,
            prompt_entity_limit: 30,
        }
    }

    pub fn from_config(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            prompt_char_limit: config.prompt_char_limit,
            prompt_entity_limit: config.prompt_entity_limit,
        }
    }

    /// Ask the model for triples. Any request or parse failure logs a
    /// warning and contributes nothing.
    pub async fn extract(&self, text: &str, entities: &[Entity]) -> Vec<Relation> {
        let prompt = self.build_prompt(text, entities);
        match self.client.generate(RELATION_SYSTEM_PROMPT, &prompt).await {
            Ok(response) => self.parse_response(response.trim()),
            Err(e) => {
                warn!("LLM relation request failed: {e}");
                Vec::new()
            }
        }
    }

    /// Compose the user prompt: truncated text, the known entities and
    /// the preferred predicate vocabulary with Chinese glosses.
    pub fn build_prompt(&self, text: &str, entities: &[Entity]) -> String {
        let text = truncate_chars(text, self.prompt_char_limit);
        let entity_list = entities
            .iter()
            .take(self.prompt_entity_limit)
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let vocabulary = CUE_LEXICON
            .iter()
            .map(|(_, predicate)| format!("- {} ({})", predicate.as_str(), predicate.gloss()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "请从以下文本中提取实体之间的关系，并以JSON格式返回三元组(主体,关系,客体)。\n\
             文本内容: {text}\n\n\
             已识别的实体: {entity_list}\n\n\
             请分析文本，找出这些实体之间的关系。关系类型主要包括（尽可能规约到以下关系）:\n\
             {vocabulary}\n\
             注意，所有的关系类型必须使用英文（例如\"is_a\"是正确的，但是\"是一种\"则是错误的），括号里的中文仅供参考。\n\
             请严格按照以下格式返回结果:\n{RESPONSE_FORMAT}"
        )
    }

    /// Parse the model answer. A clean JSON array parses directly;
    /// otherwise the first array-of-objects inside the answer is tried.
    pub fn parse_response(&self, response: &str) -> Vec<Relation> {
        let triples: Vec<LlmTriple> = match serde_json::from_str(response) {
            Ok(triples) => triples,
            Err(_) => {
                let Some(mat) = JSON_ARRAY_RE.find(response) else {
                    warn!("no JSON array found in LLM response");
                    return Vec::new();
                };
                match serde_json::from_str(mat.as_str()) {
                    Ok(triples) => triples,
                    Err(e) => {
                        warn!("failed to parse JSON from LLM response: {e}");
                        return Vec::new();
                    }
                }
            }
        };

        triples
            .into_iter()
            .map(|t| {
                Relation::new(
                    t.subject,
                    t.predicate,
                    t.object,
                    t.sentence,
                    t.confidence.unwrap_or(DEFAULT_LLM_CONFIDENCE),
                    Method::Openai,
                )
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use kgc_core::{KgcError, Result, Strategy};

    use super::*;

    fn entity(text: &str) -> Entity {
        Entity::new(text, "TEST", Strategy::Term)
    }

    fn entities(texts: &[&str]) -> Vec<Entity> {
        texts.iter().map(|t| entity(t)).collect()
    }

    #[test]
    fn test_cue_between_entities_is_extracted() {
        let extractor = RelationExtractor::new();
        let relations =
            extractor.extract_with_cues("知识图谱包括本体论", &entities(&["知识图谱", "本体论"]));

        assert_eq!(relations.len(), 1);
        let rel = &relations[0];
        assert_eq!(rel.subject, "知识图谱");
        assert_eq!(rel.predicate, "includes");
        assert_eq!(rel.object, "本体论");
        assert_eq!(rel.sentence, "知识图谱包括本体论");
        assert_eq!(rel.confidence, 0.8);
        assert_eq!(rel.method, Method::Pattern);
    }

    #[test]
    fn test_cue_before_both_entities_is_rejected() {
        let extractor = RelationExtractor::new();
        let relations =
            extractor.extract_with_cues("包括知识图谱的本体论", &entities(&["知识图谱", "本体论"]));
        assert!(relations.is_empty());
    }

    #[test]
    fn test_cue_after_object_is_rejected() {
        let extractor = RelationExtractor::new();
        let relations = extractor
            .extract_with_cues("知识图谱本体论包括语义网", &entities(&["知识图谱", "本体论"]));
        assert!(relations.is_empty());
    }

    #[test]
    fn test_gap_budget_is_twenty_characters() {
        let extractor = RelationExtractor::new();
        let pair = entities(&["知识图谱", "本体论"]);

        let close = format!("知识图谱包括{}本体论", "的".repeat(20));
        assert_eq!(extractor.extract_with_cues(&close, &pair).len(), 1);

        let far = format!("知识图谱包括{}本体论", "的".repeat(21));
        assert!(extractor.extract_with_cues(&far, &pair).is_empty());
    }

    #[test]
    fn test_relations_follow_cue_order() {
        let extractor = RelationExtractor::new();
        let relations = extractor.extract_with_cues(
            "知识图谱包括本体论。语义网使用RDF。",
            &entities(&["知识图谱", "本体论", "语义网", "RDF"]),
        );

        let predicates: Vec<&str> = relations.iter().map(|r| r.predicate.as_str()).collect();
        assert_eq!(predicates, vec!["includes", "uses"]);
        assert_eq!(relations[1].subject, "语义网");
        assert_eq!(relations[1].object, "RDF");
    }

    #[test]
    fn test_stored_sentence_is_trimmed() {
        let extractor = RelationExtractor::new();
        let relations = extractor.extract_with_cues(
            "前一句。 语义网使用RDF。",
            &entities(&["语义网", "RDF"]),
        );
        assert_eq!(relations[0].sentence, "语义网使用RDF");
    }

    #[test]
    fn test_entity_cap_limits_pairing() {
        let extractor = RelationExtractor::new().with_max_entities(1);
        let relations =
            extractor.extract_with_cues("知识图谱包括本体论", &entities(&["知识图谱", "本体论"]));
        assert!(relations.is_empty());
    }

    #[test]
    fn test_same_entity_never_pairs_with_itself() {
        let extractor = RelationExtractor::new();
        let relations =
            extractor.extract_with_cues("知识图谱包括知识图谱", &entities(&["知识图谱"]));
        assert!(relations.is_empty());
    }

    // ------------------------------------------------------------------
    // LLM supplier
    // ------------------------------------------------------------------

    struct FixedClient {
        response: String,
    }

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LlmClient for FailingClient {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(KgcError::LlmError("connection refused".to_string()))
        }
    }

    fn supplier(response: &str) -> LlmRelationExtractor {
        LlmRelationExtractor::new(Arc::new(FixedClient {
            response: response.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_llm_triples_parsed_from_clean_json() {
        let llm = supplier(
            r#"[{"subject": "知识图谱", "predicate": "uses", "object": "RDF",
                "sentence": "知识图谱使用RDF", "confidence": 0.95}]"#,
        );
        let relations = llm.extract("知识图谱使用RDF", &entities(&["知识图谱", "RDF"])).await;

        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].predicate, "uses");
        assert_eq!(relations[0].confidence, 0.95);
        assert_eq!(relations[0].method, Method::Openai);
    }

    #[tokio::test]
    async fn test_llm_json_recovered_from_prose() {
        let llm = supplier(
            "以下是提取结果：\n[\n  {\"subject\": \"A\", \"predicate\": \"is_a\", \"object\": \"B\"}\n]\n希望对你有帮助。",
        );
        let relations = llm.extract("text", &[]).await;

        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].subject, "A");
        assert_eq!(relations[0].sentence, "");
        assert_eq!(relations[0].confidence, 0.8);
    }

    #[tokio::test]
    async fn test_llm_garbage_yields_nothing() {
        let llm = supplier("抱歉，我无法完成这个任务。");
        assert!(llm.extract("text", &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_llm_failure_degrades_to_empty() {
        let llm = LlmRelationExtractor::new(Arc::new(FailingClient));
        assert!(llm.extract("text", &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_llm_supplements_cue_matches() {
        let llm = supplier(
            r#"[{"subject": "语义网", "predicate": "based_on", "object": "RDF",
                "sentence": "语义网基于RDF标准", "confidence": 0.9}]"#,
        );
        let extractor = RelationExtractor::new().with_llm(llm);
        let relations = extractor
            .extract("知识图谱包括本体论", &entities(&["知识图谱", "本体论"]))
            .await;

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].method, Method::Pattern);
        assert_eq!(relations[1].method, Method::Openai);
    }

    #[test]
    fn test_prompt_carries_text_entities_and_vocabulary() {
        let llm = supplier("[]");
        let prompt = llm.build_prompt("知识图谱使用RDF", &entities(&["知识图谱", "RDF"]));

        assert!(prompt.contains("知识图谱使用RDF"));
        assert!(prompt.contains("知识图谱, RDF"));
        assert!(prompt.contains("- is_a (是一种)"));
        assert!(prompt.contains("- uses (使用)"));
        assert!(prompt.contains("\"confidence\": 0.9"));
    }

    #[test]
    fn test_prompt_truncates_long_text() {
        let llm = supplier("[]");
        let text = format!("{}MARKER", "知".repeat(8_000));
        let prompt = llm.build_prompt(&text, &[]);
        assert!(!prompt.contains("MARKER"));
    }

    #[test]
    fn test_prompt_caps_entity_list() {
        let llm = supplier("[]");
        let many: Vec<Entity> = (0..40).map(|i| entity(&format!("实体{i}"))).collect();
        let prompt = llm.build_prompt("text", &many);

        assert!(prompt.contains("实体29"));
        assert!(!prompt.contains("实体30,"));
        assert!(!prompt.contains("实体39"));
    }
}
