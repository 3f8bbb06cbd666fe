//! Engine configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` / `PORT` | `3000` |
//! | `LLM_BASE_URL` / `OLLAMA_BASE_URL` | `http://localhost:11434` |
//! | `LLM_MODEL` / `OLLAMA_MODEL` | `llama3.2` |
//! | `LLM_API_KEY` | unset |
//! | `LLM_TIMEOUT_SECS` | `60` |
//! | `LLM_MAX_RETRIES` | `2` |
//! | `VOCABULARY_DB` | `vocabulary.db` (`:memory:` keeps words in process) |

use std::time::Duration;

use crate::infrastructure::openai_compat::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT,
};
use crate::infrastructure::resilient_llm::RetryConfig;

/// `VOCABULARY_DB` value selecting the in-memory repository.
pub const IN_MEMORY_DB: &str = ":memory:";

/// Where room vocabularies live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyStorage {
    Sqlite(String),
    InMemory,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub retry: RetryConfig,
    pub storage: VocabularyStorage,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(*k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let server_port = var(&["SERVER_PORT", "PORT"])
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let llm_timeout = var(&["LLM_TIMEOUT_SECS"])
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LLM_TIMEOUT);
        let retry = RetryConfig {
            max_retries: var(&["LLM_MAX_RETRIES"])
                .and_then(|s| s.parse().ok())
                .unwrap_or(RetryConfig::default().max_retries),
            ..RetryConfig::default()
        };
        let storage = match var(&["VOCABULARY_DB"]) {
            Some(path) if path == IN_MEMORY_DB => VocabularyStorage::InMemory,
            Some(path) => VocabularyStorage::Sqlite(path),
            None => VocabularyStorage::Sqlite("vocabulary.db".to_string()),
        };

        Self {
            server_host: var(&["SERVER_HOST"]).unwrap_or_else(|| "0.0.0.0".into()),
            server_port,
            llm_base_url: var(&["LLM_BASE_URL", "OLLAMA_BASE_URL"])
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.into()),
            llm_model: var(&["LLM_MODEL", "OLLAMA_MODEL"])
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.into()),
            llm_api_key: var(&["LLM_API_KEY"]),
            llm_timeout,
            retry,
            storage,
        }
    }
}
