//! End-to-end pipelines: resolve → discover → download → classify →
//! index → answer.

pub mod classify;
pub mod pipeline;

pub use classify::{classify, is_event_notes, is_infringements};
pub use pipeline::{
    ClassSummary, FetchConfig, FetchReport, ProgressReporter, SilentProgress, SummarizeConfig,
    fetch_documents, summarize_documents,
};
