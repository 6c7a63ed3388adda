//! KGC Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults for local runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Input/output locations
    pub data: DataConfig,

    /// Extraction pipeline knobs
    pub extraction: ExtractionConfig,

    /// LLM relation supplier configuration
    pub llm: LlmConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Data locations
        if let Ok(dir) = std::env::var("KGC_INPUT_DIR") {
            config.data.input_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("KGC_OUTPUT_DIR") {
            config.data.output_dir = PathBuf::from(dir);
        }

        // Extraction
        if let Ok(value) = std::env::var("KGC_USE_LLM") {
            config.extraction.use_llm =
                value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "KGC_USE_LLM".to_string(),
                    value,
                })?;
        }

        // LLM
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.llm.base_url = Some(url);
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        if env_config.data.input_dir != DataConfig::default().input_dir {
            self.data.input_dir = env_config.data.input_dir;
        }
        if env_config.data.output_dir != DataConfig::default().output_dir {
            self.data.output_dir = env_config.data.output_dir;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }

        // Always use env for sensitive values
        if env_config.llm.api_key.is_some() {
            self.llm.api_key = env_config.llm.api_key;
        }

        Ok(self)
    }

    /// Whether the LLM relation supplier should run
    ///
    /// Requires both the feature switch and a credential; a missing key is a
    /// soft-disable, not an error.
    pub fn llm_enabled(&self) -> bool {
        self.extraction.use_llm && self.llm.api_key.is_some()
    }
}

/// Input/output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory (or file) holding raw document dumps
    pub input_dir: PathBuf,

    /// Directory receiving every produced artifact
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/processed"),
        }
    }
}

/// Extraction pipeline knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Character cap for the statistical NER pass
    pub ner_char_limit: usize,

    /// Most entities considered by the pattern relation matcher; bounds the
    /// sentences x cues x entities^2 loop
    pub max_relation_entities: usize,

    /// Enable the LLM relation supplement (still gated on a credential)
    pub use_llm: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ner_char_limit: 10_000,
            max_relation_entities: 200,
            use_llm: true,
        }
    }
}

/// LLM relation supplier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key; absent means the supplier is disabled
    pub api_key: Option<String>,

    /// API base URL (for compatible endpoints)
    pub base_url: Option<String>,

    /// Model name to use
    pub model: String,

    /// Maximum tokens for the completion
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Character cap applied to the text embedded in the prompt
    pub prompt_char_limit: usize,

    /// Most entity texts listed in the prompt
    pub prompt_entity_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 2000,
            temperature: 0.3,
            timeout_secs: 60,
            prompt_char_limit: 8000,
            prompt_entity_limit: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.ner_char_limit, 10_000);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.prompt_entity_limit, 30);
        assert_eq!(config.data.output_dir, PathBuf::from("data/processed"));
    }

    #[test]
    fn test_llm_soft_disable() {
        let mut config = AppConfig::default();
        assert!(config.extraction.use_llm);
        assert!(!config.llm_enabled());

        config.llm.api_key = Some("sk-test".to_string());
        assert!(config.llm_enabled());

        config.extraction.use_llm = false;
        assert!(!config.llm_enabled());
    }

    #[test]
    fn test_parse_toml() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [data]
            input_dir = "dumps"
            output_dir = "out"

            [extraction]
            ner_char_limit = 5000
            max_relation_entities = 50
            use_llm = false

            [llm]
            model = "gpt-4o-mini"
            max_tokens = 1000
            temperature = 0.2
            timeout_secs = 30
            prompt_char_limit = 4000
            prompt_entity_limit = 10

            [logging]
            level = "debug"
            json_format = false
            include_location = false
            "#,
        )
        .unwrap();

        assert_eq!(parsed.data.input_dir, PathBuf::from("dumps"));
        assert_eq!(parsed.extraction.ner_char_limit, 5000);
        assert!(!parsed.extraction.use_llm);
        assert_eq!(parsed.llm.model, "gpt-4o-mini");
        assert_eq!(parsed.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [extraction]
            use_llm = false
            "#,
        )
        .unwrap();

        assert!(!parsed.extraction.use_llm);
        assert_eq!(parsed.extraction.ner_char_limit, 10_000);
        assert_eq!(parsed.llm.model, "gpt-3.5-turbo");
        assert_eq!(parsed.data.input_dir, PathBuf::from("data/raw"));
    }
}
