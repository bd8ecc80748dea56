//! In-memory retrieval index.
//!
//! Built fresh per (season, GP, document class) invocation and discarded
//! after the question batch completes; nothing is persisted. The index
//! supports exhaustive retrieval (the mode the QA orchestrator uses) and
//! cosine top-k search.

use std::path::PathBuf;

use tracing::{info, instrument};

use paddockdocs_shared::{PaddockError, Result};

use crate::EmbeddingProvider;
use crate::chunk;
use crate::pdftext;

/// One embedded chunk.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Similarity-searchable index over one document subset.
#[derive(Debug, Default)]
pub struct RetrievalIndex {
    chunks: Vec<IndexedChunk>,
}

impl RetrievalIndex {
    /// An index with no chunks (the "nothing was asked for" case).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Every indexed chunk's text, in insertion order.
    pub fn all_chunks(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|c| c.text.as_str())
    }

    /// Top-k chunks by cosine similarity to the query vector.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(&str, f32)> {
        let mut scored: Vec<(&str, f32)> = self
            .chunks
            .iter()
            .map(|c| (c.text.as_str(), cosine_similarity(query, &c.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched or zero vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Build an index over the given document paths.
///
/// Missing paths are skipped. An empty path list, or a list where every
/// path is missing, yields an explicitly empty index. When at least one
/// document is present but chunking produces nothing,
/// [`PaddockError::EmptyCorpus`] is raised: there was something to
/// summarize and no text came out of it.
#[instrument(skip_all, fields(paths = paths.len()))]
pub async fn build_index<E: EmbeddingProvider>(
    paths: &[PathBuf],
    embedder: &E,
) -> Result<RetrievalIndex> {
    if paths.is_empty() {
        return Ok(RetrievalIndex::empty());
    }

    let docs = pdftext::load_documents(paths);
    if docs.is_empty() {
        info!("no documents present on disk, index is empty");
        return Ok(RetrievalIndex::empty());
    }

    let texts: Vec<String> = docs
        .iter()
        .flat_map(|d| chunk::split_text(&d.text))
        .collect();

    if texts.is_empty() {
        return Err(PaddockError::empty_corpus(format!(
            "{} document(s) loaded but no extractable text was found",
            docs.len()
        )));
    }

    let index = embed_chunks(texts, embedder).await?;
    info!(chunks = index.len(), "retrieval index built");
    Ok(index)
}

/// Embed each chunk and insert it into a fresh index.
pub(crate) async fn embed_chunks<E: EmbeddingProvider>(
    texts: Vec<String>,
    embedder: &E,
) -> Result<RetrievalIndex> {
    let mut chunks = Vec::with_capacity(texts.len());
    for text in texts {
        let embedding = embedder.embed(&text).await?;
        chunks.push(IndexedChunk { text, embedding });
    }
    Ok(RetrievalIndex { chunks })
}
