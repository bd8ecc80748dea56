//! OpenAI-compatible embedding and chat provider.
//!
//! Implements both capability traits against any API exposing the
//! `/embeddings` and `/chat/completions` endpoints. The API key is resolved
//! from the configured environment variable exactly once, at construction.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use paddockdocs_shared::{OpenAiConfig, PaddockError, Result, TokenUsage};

use crate::{AnswerProvider, EmbeddingProvider};

/// User-Agent string for model API requests.
const USER_AGENT: &str = concat!("paddockdocs/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single model API call.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// System prompt framing the answer capability.
const SYSTEM_PROMPT: &str = "You answer questions about official race-event documents. \
    Use only the provided document excerpts. If the excerpts do not contain the answer, say so.";

/// Client for an OpenAI-compatible API, carrying pricing for cost accounting.
#[derive(Debug)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    prompt_usd_per_million: f64,
    completion_usd_per_million: f64,
}

impl OpenAiClient {
    /// Build a client from config, resolving the API key from the configured
    /// env var. Fails with a config error when the key is absent or empty.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PaddockError::config(format!(
                    "model API key not found. Set the {} environment variable.",
                    config.api_key_env
                ))
            })?;

        Self::with_api_key(config, api_key)
    }

    /// Build a client with an explicit API key (no env lookup).
    pub fn with_api_key(config: &OpenAiConfig, api_key: String) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaddockError::Model(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
            prompt_usd_per_million: config.prompt_usd_per_million,
            completion_usd_per_million: config.completion_usd_per_million,
        })
    }

    /// USD cost of one invocation under the configured pricing.
    fn cost_usd(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens as f64 * self.prompt_usd_per_million / 1_000_000.0
            + completion_tokens as f64 * self.completion_usd_per_million / 1_000_000.0
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{endpoint}", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PaddockError::Model(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaddockError::Model(format!(
                "{url}: HTTP {status}: {}",
                body.chars().take(300).collect::<String>()
            )));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| PaddockError::Model(format!("{url}: invalid response: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

// ---------------------------------------------------------------------------
// Capability impls
// ---------------------------------------------------------------------------

impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: &self.embedding_model,
            input: text,
        };

        let response: EmbeddingsResponse = self.post_json("/embeddings", &request).await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| PaddockError::Model("embeddings response contained no data".into()))
    }
}

impl AnswerProvider for OpenAiClient {
    async fn answer(
        &self,
        question: &str,
        context_chunks: &[&str],
        shared_context: Option<&str>,
    ) -> Result<(String, TokenUsage)> {
        let mut system = SYSTEM_PROMPT.to_string();
        if let Some(ctx) = shared_context {
            system.push_str("\n\nDomain context: ");
            system.push_str(ctx);
        }

        let mut user = String::from("Document excerpts:\n\n");
        for (i, chunk) in context_chunks.iter().enumerate() {
            user.push_str(&format!("--- excerpt {} ---\n{chunk}\n\n", i + 1));
        }
        user.push_str("Question: ");
        user.push_str(question);

        debug!(
            chunks = context_chunks.len(),
            question_len = question.len(),
            "invoking chat completion"
        );

        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response: ChatResponse = self.post_json("/chat/completions", &request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| PaddockError::Model("chat response contained no choices".into()))?;

        let usage = response.usage.unwrap_or_default();
        let accounted = TokenUsage {
            total_tokens: usage.total_tokens,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_cost_usd: self.cost_usd(usage.prompt_tokens, usage.completion_tokens),
        };

        Ok((text, accounted))
    }
}
