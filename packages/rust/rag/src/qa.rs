//! Question-answering orchestration.
//!
//! Full-context mode: every question receives every indexed chunk as
//! context. There is no ranked retrieval here; cost grows with corpus size.
//! A single failed answer call aborts the batch; no partial summaries.

use tracing::{info, instrument};

use paddockdocs_shared::{QuestionAnswer, Result};

use crate::AnswerProvider;
use crate::index::RetrievalIndex;
use crate::questions::QuestionBattery;

/// Answer each battery question in order against the full index contents.
///
/// The output preserves question order exactly, with one entry per
/// question. Usage counters are logged per question; aggregation across
/// questions is the caller's concern.
#[instrument(skip_all, fields(questions = battery.questions.len(), chunks = index.len()))]
pub async fn summarize<A: AnswerProvider>(
    index: &RetrievalIndex,
    battery: &QuestionBattery,
    answerer: &A,
) -> Result<Vec<QuestionAnswer>> {
    let context_chunks: Vec<&str> = index.all_chunks().collect();
    let mut answers = Vec::with_capacity(battery.questions.len());

    for question in battery.questions {
        let (answer, usage) = answerer
            .answer(question, &context_chunks, battery.shared_context)
            .await?;

        info!(
            question,
            total_tokens = usage.total_tokens,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_cost_usd = usage.total_cost_usd,
            "question answered"
        );

        answers.push(QuestionAnswer {
            question: (*question).to_string(),
            answer,
            usage,
        });
    }

    Ok(answers)
}
