//! End-to-end fetch and summarize pipelines.
//!
//! `fetch_documents` acquires PDFs for one season or the whole archive.
//! `summarize_documents` runs the full chain for one (season, GP) pair:
//! resolve the season, discover and download its documents, then answer a
//! fixed question battery per requested document class. Both pipelines are
//! stateless between runs; idempotence comes from the downloader's
//! skip-if-exists behavior.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use paddockdocs_discovery::{build_client, discover, find_season, resolve_seasons};
use paddockdocs_downloader::{Downloader, download_dir_for};
use paddockdocs_rag::{
    AnswerProvider, EmbeddingProvider, OpenAiClient, battery_for, build_index, summarize,
};
use paddockdocs_shared::{
    AppConfig, DocumentClass, PaddockError, QuestionAnswer, Result, validate_api_key,
};

use crate::classify;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Receives coarse pipeline progress, for interactive frontends.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline phase has started.
    fn phase(&self, message: &str);

    /// The pipeline finished.
    fn done(&self, message: &str);
}

/// Reporter that swallows all progress. The default for library callers.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _message: &str) {}
    fn done(&self, _message: &str) {}
}

// ---------------------------------------------------------------------------
// Fetch pipeline
// ---------------------------------------------------------------------------

/// Parameters for a fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Season year or label; `None` fetches every listed season.
    pub season: Option<String>,
    /// Grand Prix name filter applied to discovered filenames.
    pub gp: Option<String>,
    /// Re-download documents that already exist locally.
    pub force: bool,
    /// Root directory for downloaded PDFs.
    pub download_dir: PathBuf,
}

/// What a fetch run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    /// Seasons whose index pages were processed.
    pub seasons: usize,
    /// Documents discovered and handed to the downloader.
    pub documents: usize,
}

/// Discover and download documents for one season or the whole archive.
#[instrument(skip_all, fields(season = ?fetch.season, gp = ?fetch.gp, force = fetch.force))]
pub async fn fetch_documents(
    config: &AppConfig,
    fetch: &FetchConfig,
    progress: &dyn ProgressReporter,
) -> Result<FetchReport> {
    let client = build_client()?;

    progress.phase("Resolving seasons");
    let listing_url = config.portal.documents_url();
    let all_seasons = resolve_seasons(&client, &listing_url).await?;

    let selected: Vec<_> = match &fetch.season {
        Some(wanted) => {
            let season = find_season(&all_seasons, wanted).ok_or_else(|| {
                PaddockError::config(format!("no document index found for season '{wanted}'"))
            })?;
            vec![season.clone()]
        }
        None => all_seasons,
    };

    let downloader = Downloader::new()?;
    let mut documents = 0;

    for season in &selected {
        progress.phase(&format!("Fetching documents for {}", season.label));
        let refs = discover(&client, &season.index_url, fetch.gp.as_deref()).await?;

        if refs.is_empty() {
            warn!(season = %season.label, "no matching documents on the index page");
            continue;
        }

        downloader
            .download_all(
                &refs,
                &fetch.download_dir,
                Some(&season.year),
                fetch.gp.as_deref(),
                fetch.force,
            )
            .await?;
        documents += refs.len();
    }

    let report = FetchReport {
        seasons: selected.len(),
        documents,
    };
    info!(seasons = report.seasons, documents = report.documents, "fetch complete");
    progress.done(&format!(
        "Fetched {} document(s) across {} season(s)",
        report.documents, report.seasons
    ));

    Ok(report)
}

// ---------------------------------------------------------------------------
// Summarize pipeline
// ---------------------------------------------------------------------------

/// Parameters for a summarize run.
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    /// Season year or label (e.g. "2024" or "SEASON 2024").
    pub season: String,
    /// Grand Prix name (e.g. "Bahrain Grand Prix").
    pub gp: String,
    /// Document classes to summarize, in report order.
    pub classes: Vec<DocumentClass>,
    /// Re-download documents that already exist locally.
    pub force: bool,
    /// Root directory for downloaded PDFs.
    pub download_dir: PathBuf,
}

/// The answered battery for one document class of one (season, GP) pair.
///
/// `entries` is empty when no local document matched the class; no model
/// call is made in that case.
#[derive(Debug, Clone)]
pub struct ClassSummary {
    pub class: DocumentClass,
    pub season: String,
    pub gp: String,
    pub entries: Vec<QuestionAnswer>,
    pub generated_at: DateTime<Utc>,
}

/// Run the full summarize chain for one (season, GP) pair.
///
/// Fails fast when the model API key is absent, before any network
/// traffic. Returns one [`ClassSummary`] per requested class, in the
/// requested order.
#[instrument(skip_all, fields(season = %cfg.season, gp = %cfg.gp))]
pub async fn summarize_documents(
    config: &AppConfig,
    cfg: &SummarizeConfig,
    progress: &dyn ProgressReporter,
) -> Result<Vec<ClassSummary>> {
    validate_api_key(config)?;
    let model = OpenAiClient::from_config(&config.openai)?;

    let client = build_client()?;

    progress.phase("Resolving seasons");
    let listing_url = config.portal.documents_url();
    let seasons = resolve_seasons(&client, &listing_url).await?;
    let season = find_season(&seasons, &cfg.season)
        .ok_or_else(|| {
            PaddockError::config(format!(
                "no document index found for season '{}'",
                cfg.season
            ))
        })?
        .clone();

    progress.phase(&format!("Discovering documents for {}", season.label));
    let refs = discover(&client, &season.index_url, Some(&cfg.gp)).await?;
    info!(count = refs.len(), gp = %cfg.gp, "documents discovered");

    progress.phase("Downloading documents");
    let downloader = Downloader::new()?;
    downloader
        .download_all(
            &refs,
            &cfg.download_dir,
            Some(&season.year),
            Some(&cfg.gp),
            cfg.force,
        )
        .await?;

    let dir = download_dir_for(&cfg.download_dir, Some(&season.year), Some(&cfg.gp))?;

    let mut summaries = Vec::with_capacity(cfg.classes.len());
    for &class in &cfg.classes {
        progress.phase(&format!("Summarizing {class} documents"));
        let entries = summarize_class(&dir, class, &model, &model).await?;
        summaries.push(ClassSummary {
            class,
            season: season.label.clone(),
            gp: cfg.gp.clone(),
            entries,
            generated_at: Utc::now(),
        });
    }

    progress.done("Summaries complete");
    Ok(summaries)
}

/// Answer one class's battery over the matching local documents.
///
/// An empty match list short-circuits to an empty answer set without
/// touching either provider.
async fn summarize_class<E, A>(
    dir: &Path,
    class: DocumentClass,
    embedder: &E,
    answerer: &A,
) -> Result<Vec<QuestionAnswer>>
where
    E: EmbeddingProvider,
    A: AnswerProvider,
{
    let Some(battery) = battery_for(class) else {
        warn!(%class, "no question battery for class");
        return Ok(Vec::new());
    };

    let paths = class_files(dir, class)?;
    if paths.is_empty() {
        info!(%class, dir = %dir.display(), "no matching documents, skipping class");
        return Ok(Vec::new());
    }

    info!(%class, count = paths.len(), "building retrieval index");
    let index = build_index(&paths, embedder).await?;
    summarize(&index, battery, answerer).await
}

/// List a directory's PDFs that belong to a class, sorted by filename.
///
/// A missing directory is an empty listing, not an error.
fn class_files(dir: &Path, class: DocumentClass) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| PaddockError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PaddockError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".pdf") && classify::matches_class(&name, class) {
            names.push(name);
        }
    }

    // Directory iteration order is platform-dependent
    names.sort();
    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}
