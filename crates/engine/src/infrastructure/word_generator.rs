//! LLM-backed word generator.
//!
//! Asks a chat model for the noun that results from combining two words and
//! reads back a small JSON object. Models like to wrap JSON in prose or code
//! fences, so parsing starts at the first `{` and stops after one object.

use async_trait::async_trait;
use std::sync::Arc;

use infcraft_domain::{CandidateWord, CraftPair, Word};

use crate::infrastructure::ports::{
    ChatMessage, GenerationError, LlmPort, LlmRequest, WordGeneratorPort,
};

const SYSTEM_PROMPT: &str = "You are the crafting engine of a word combination game. \
Given two words, answer with the single noun that best results from combining them. \
Prefer concrete, evocative nouns, and keep them short (one to three words). \
Answer with one JSON object and nothing else: {\"emoji\": \"<one emoji>\", \"text\": \"<noun>\"}";

/// Worked exchange shown before the real request.
const EXAMPLE_PROMPT: &str = "Combine \"Earth\" (🌍) and \"Water\" (💧).";
const EXAMPLE_REPLY: &str = r#"{"emoji": "🟤", "text": "Mud"}"#;

/// Temperature for crafting; a little variety keeps discoveries interesting.
const CRAFT_TEMPERATURE: f32 = 0.7;

/// Replies are a tiny JSON object.
const CRAFT_MAX_TOKENS: u32 = 64;

/// [`WordGeneratorPort`] implemented on top of any [`LlmPort`].
pub struct LlmWordGenerator {
    llm: Arc<dyn LlmPort>,
}

impl LlmWordGenerator {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

fn describe(word: &Word) -> String {
    format!("\"{}\" ({})", word.text(), word.emoji())
}

fn build_request(pair: &CraftPair) -> LlmRequest {
    let prompt = format!(
        "Combine {} and {}.",
        describe(pair.first()),
        describe(pair.second())
    );
    LlmRequest::new(vec![
        ChatMessage::user(EXAMPLE_PROMPT),
        ChatMessage::assistant(EXAMPLE_REPLY),
        ChatMessage::user(prompt),
    ])
        .with_system_prompt(SYSTEM_PROMPT)
        .with_temperature(CRAFT_TEMPERATURE)
        .with_max_tokens(Some(CRAFT_MAX_TOKENS))
}

/// Extract the first JSON object in `content` as a candidate word.
fn parse_candidate(content: &str) -> Result<CandidateWord, GenerationError> {
    let start = content.find('{').ok_or_else(|| {
        GenerationError::invalid_response(format!("No JSON object in reply: {}", content.trim()))
    })?;

    let mut stream =
        serde_json::Deserializer::from_str(&content[start..]).into_iter::<CandidateWord>();
    match stream.next() {
        Some(Ok(candidate)) => Ok(candidate),
        Some(Err(e)) => Err(GenerationError::invalid_response(format!(
            "Malformed word object: {}",
            e
        ))),
        None => Err(GenerationError::invalid_response("Empty reply")),
    }
}

#[async_trait]
impl WordGeneratorPort for LlmWordGenerator {
    async fn generate(&self, pair: &CraftPair) -> Result<CandidateWord, GenerationError> {
        let response = self.llm.generate(build_request(pair)).await?;
        tracing::debug!(
            pair = %pair,
            reply = %response.content,
            finish_reason = ?response.finish_reason,
            "LLM answered craft prompt"
        );
        parse_candidate(&response.content)
    }
}
