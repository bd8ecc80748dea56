//! Retrieval-augmented summarization over downloaded PDF documents.
//!
//! ```text
//! PDF paths -> pdftext -> chunk -> EmbeddingProvider -> RetrievalIndex
//!                                                            |
//! question battery -> AnswerProvider <-- all indexed chunks -+
//! ```
//!
//! The embedding and answer engines are external collaborators behind the
//! [`EmbeddingProvider`] and [`AnswerProvider`] capability traits;
//! [`OpenAiClient`] implements both against any OpenAI-compatible API.

pub mod chunk;
pub mod index;
pub mod openai;
pub mod pdftext;
pub mod qa;
pub mod questions;

use paddockdocs_shared::{Result, TokenUsage};

pub use index::{RetrievalIndex, build_index};
pub use openai::OpenAiClient;
pub use qa::summarize;
pub use questions::{QuestionBattery, battery_for};

/// Capability: turn text into a fixed-dimension embedding vector.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

/// Capability: answer a question given context chunks and an optional
/// free-text domain context string. Returns the answer text and the
/// invocation's token/cost accounting.
pub trait AnswerProvider {
    fn answer(
        &self,
        question: &str,
        context_chunks: &[&str],
        shared_context: Option<&str>,
    ) -> impl Future<Output = Result<(String, TokenUsage)>> + Send;
}
