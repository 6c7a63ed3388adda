//! KGC Core - Domain models, configuration, and shared types
//!
//! This crate defines the core abstractions used throughout the KGC system:
//! - Entity and relation models with their identity rules
//! - Extraction provenance enums (strategy, method)
//! - Raw document input records
//! - Common error types
//! - The LLM client trait used by the relation extractor
//! - Configuration management

pub mod config;
pub mod vocab;

pub use config::{AppConfig, ConfigError, DataConfig, ExtractionConfig, LlmConfig, LoggingConfig};
pub use vocab::{Predicate, CUE_LEXICON, KG_TERMS};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for KGC operations
#[derive(Error, Debug)]
pub enum KgcError {
    #[error("Document load error: {0}")]
    DocumentLoad(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Graph error: {0}")]
    GraphError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, KgcError>;

// ============================================================================
// Extraction Provenance
// ============================================================================

/// Which entity-extraction strategy produced a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// Statistical named-entity recognition over truncated text
    Ner,
    /// Part-of-speech filtered tokenizer output
    Jieba,
    /// Surface regex patterns (quotes, colons, parentheses)
    Regex,
    /// Fixed domain-vocabulary lookup
    Term,
}

impl Strategy {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ner => "NER",
            Self::Jieba => "JIEBA",
            Self::Regex => "REGEX",
            Self::Term => "TERM",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which relation-extraction method produced a triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Deterministic cue-pattern matcher
    Pattern,
    /// LLM triple supplier
    Openai,
    /// Fallback seed data for degraded runs
    Placeholder,
}

impl Method {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Openai => "openai",
            Self::Placeholder => "placeholder",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Domain Models
// ============================================================================

/// An entity mention admitted to the knowledge graph
///
/// Identity is the `text` field alone: two mentions with the same surface
/// string are the same entity no matter which strategy found them, and the
/// first occurrence's `label`/`strategy` win on merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Surface string; whitespace-normalized upstream by the text cleaner
    pub text: String,

    /// Strategy-specific subtype: an NER category, a POS tag, or one of the
    /// fixed markers in [`vocab::labels`]
    pub label: String,

    /// Strategy that produced the mention
    #[serde(rename = "type")]
    pub strategy: Strategy,
}

impl Entity {
    /// Create a new entity mention
    pub fn new(text: impl Into<String>, label: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            strategy,
        }
    }
}

/// A directed relation triple with its evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Subject entity text (need not exist as a separate [`Entity`] record)
    pub subject: String,

    /// Predicate name; canonical values come from [`vocab::Predicate`] but
    /// LLM-supplied strings pass through unchanged
    pub predicate: String,

    /// Object entity text
    pub object: String,

    /// Sentence the relation was read from
    pub sentence: String,

    /// Confidence score in [0, 1]
    pub confidence: f64,

    /// Extraction provenance
    pub method: Method,
}

impl Relation {
    /// Create a new relation triple
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        sentence: impl Into<String>,
        confidence: f64,
        method: Method,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            sentence: sentence.into(),
            confidence,
            method,
        }
    }

    /// Identity key used for deduplication
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.subject, &self.predicate, &self.object)
    }
}

// ============================================================================
// Input Records
// ============================================================================

/// Raw document as delivered by the upstream crawler dump
///
/// Every field is optional in the wire format; missing fields default to
/// empty strings rather than failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub source: String,
}

impl RawDocument {
    /// Create a document with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the source tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for chat-completion LLM backends
///
/// The relation extractor only needs a single system + user exchange; tests
/// substitute deterministic fakes.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a system and user message, return the assistant's text
    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}

// ============================================================================
// Tests
// ============================================================================
