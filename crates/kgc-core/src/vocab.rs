//! Domain vocabulary for knowledge-graph extraction
//!
//! Holds the fixed term dictionary used by the dictionary strategy and the
//! tokenizer, the ordered cue lexicon driving the positional relation
//! matcher, and the category markers shared across strategies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Domain term dictionary
// ============================================================================

/// Curated knowledge-graph terminology (zh)
///
/// Matched by substring containment for guaranteed-recall entity tagging,
/// and loaded into the tokenizer as custom nouns.
pub const KG_TERMS: [&str; 54] = [
    "知识图谱",
    "本体论",
    "语义网",
    "RDF",
    "SPARQL",
    "图数据库",
    "三元组",
    "实体",
    "关系",
    "属性",
    "类别",
    "子类",
    "推理",
    "链接数据",
    "知识抽取",
    "知识表示",
    "知识推理",
    "知识融合",
    "本体",
    "词向量",
    "语义",
    "查询",
    "数据挖掘",
    "机器学习",
    "自然语言处理",
    "NLP",
    "实体识别",
    "命名实体",
    "关系抽取",
    "知识库",
    "知识工程",
    "语义网络",
    "语义框架",
    "语义角色",
    "知识表示与推理",
    "知识获取",
    "知识发现",
    "知识计算",
    "知识问答",
    "图谱构建",
    "图谱应用",
    "图谱可视化",
    "图谱查询",
    "图谱推理",
    "图谱融合",
    "图谱存储",
    "图谱更新",
    "图谱评估",
    "图谱标准",
    "语义搜索",
    "语义推理",
    "语义标注",
    "语义计算",
    "语义集成",
];

// ============================================================================
// Predicate vocabulary
// ============================================================================

/// Canonical relation predicates
///
/// The pattern matcher only ever emits these; LLM responses are asked to
/// stick to them but are not programmatically constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    IsA,
    Includes,
    Contains,
    BelongsTo,
    ComposedOf,
    UsedFor,
    BasedOn,
    AppliedTo,
    DefinedAs,
    EquivalentTo,
    Produces,
    LeadsTo,
    DependsOn,
    RelatedTo,
    DerivedFrom,
    Affects,
    Supports,
    Implements,
    Extends,
    Uses,
}

impl Predicate {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsA => "is_a",
            Self::Includes => "includes",
            Self::Contains => "contains",
            Self::BelongsTo => "belongs_to",
            Self::ComposedOf => "composed_of",
            Self::UsedFor => "used_for",
            Self::BasedOn => "based_on",
            Self::AppliedTo => "applied_to",
            Self::DefinedAs => "defined_as",
            Self::EquivalentTo => "equivalent_to",
            Self::Produces => "produces",
            Self::LeadsTo => "leads_to",
            Self::DependsOn => "depends_on",
            Self::RelatedTo => "related_to",
            Self::DerivedFrom => "derived_from",
            Self::Affects => "affects",
            Self::Supports => "supports",
            Self::Implements => "implements",
            Self::Extends => "extends",
            Self::Uses => "uses",
        }
    }

    /// Chinese gloss shown in the LLM prompt
    pub fn gloss(&self) -> &'static str {
        match self {
            Self::IsA => "是一种",
            Self::Includes => "包括",
            Self::Contains => "包含",
            Self::BelongsTo => "属于",
            Self::ComposedOf => "由...组成",
            Self::UsedFor => "用于",
            Self::BasedOn => "基于",
            Self::AppliedTo => "应用于",
            Self::DefinedAs => "定义为",
            Self::EquivalentTo => "等同于",
            Self::Produces => "产生",
            Self::LeadsTo => "导致",
            Self::DependsOn => "依赖于",
            Self::RelatedTo => "相关于",
            Self::DerivedFrom => "源自",
            Self::Affects => "影响",
            Self::Supports => "支持",
            Self::Implements => "实现",
            Self::Extends => "扩展",
            Self::Uses => "使用",
        }
    }

    /// Get from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "is_a" => Some(Self::IsA),
            "includes" => Some(Self::Includes),
            "contains" => Some(Self::Contains),
            "belongs_to" => Some(Self::BelongsTo),
            "composed_of" => Some(Self::ComposedOf),
            "used_for" => Some(Self::UsedFor),
            "based_on" => Some(Self::BasedOn),
            "applied_to" => Some(Self::AppliedTo),
            "defined_as" => Some(Self::DefinedAs),
            "equivalent_to" => Some(Self::EquivalentTo),
            "produces" => Some(Self::Produces),
            "leads_to" => Some(Self::LeadsTo),
            "depends_on" => Some(Self::DependsOn),
            "related_to" => Some(Self::RelatedTo),
            "derived_from" => Some(Self::DerivedFrom),
            "affects" => Some(Self::Affects),
            "supports" => Some(Self::Supports),
            "implements" => Some(Self::Implements),
            "extends" => Some(Self::Extends),
            "uses" => Some(Self::Uses),
            _ => None,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cue substrings and the predicates they map to, in match order
///
/// The matcher walks this list front to back; earlier cues win duplicate
/// triples at corpus dedup, so the order is part of the observable behavior.
pub const CUE_LEXICON: [(&str, Predicate); 20] = [
    ("是", Predicate::IsA),
    ("包括", Predicate::Includes),
    ("包含", Predicate::Contains),
    ("属于", Predicate::BelongsTo),
    ("由", Predicate::ComposedOf),
    ("用于", Predicate::UsedFor),
    ("基于", Predicate::BasedOn),
    ("应用于", Predicate::AppliedTo),
    ("定义为", Predicate::DefinedAs),
    ("等同于", Predicate::EquivalentTo),
    ("产生", Predicate::Produces),
    ("导致", Predicate::LeadsTo),
    ("依赖于", Predicate::DependsOn),
    ("相关于", Predicate::RelatedTo),
    ("源自", Predicate::DerivedFrom),
    ("影响", Predicate::Affects),
    ("支持", Predicate::Supports),
    ("实现", Predicate::Implements),
    ("扩展", Predicate::Extends),
    ("使用", Predicate::Uses),
];

// ============================================================================
// Category markers
// ============================================================================

/// Label values assigned by the surface-pattern and dictionary strategies
pub mod labels {
    /// Span between full quotation marks
    pub const QUOTED_TERM: &str = "QUOTED_TERM";
    /// Span following a colon
    pub const DEFINITION: &str = "DEFINITION";
    /// Span inside parentheses
    pub const PARENTHESIS: &str = "PARENTHESIS";
    /// Domain dictionary hit
    pub const KG_TERM: &str = "KG_TERM";
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_roundtrip() {
        for (_, predicate) in CUE_LEXICON {
            assert_eq!(Predicate::from_str(predicate.as_str()), Some(predicate));
        }
        assert_eq!(Predicate::from_str("queried_by"), None);
    }

    #[test]
    fn test_cue_lexicon_order() {
        assert_eq!(CUE_LEXICON[0], ("是", Predicate::IsA));
        assert_eq!(CUE_LEXICON[1], ("包括", Predicate::Includes));
        assert_eq!(CUE_LEXICON[19], ("使用", Predicate::Uses));
    }

    #[test]
    fn test_terms_are_unique_and_multichar() {
        let mut seen = std::collections::HashSet::new();
        for term in KG_TERMS {
            assert!(seen.insert(term), "duplicate term {term}");
            assert!(term.chars().count() > 1, "single-char term {term}");
        }
    }

    #[test]
    fn test_predicate_serde_matches_as_str() {
        let json = serde_json::to_string(&Predicate::BelongsTo).unwrap();
        assert_eq!(json, r#""belongs_to""#);
    }
}
