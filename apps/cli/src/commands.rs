//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use paddockdocs_core::pipeline::{
    ClassSummary, FetchConfig, ProgressReporter, SummarizeConfig, fetch_documents,
    summarize_documents,
};
use paddockdocs_shared::{AppConfig, DocumentClass, TokenUsage, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// paddockdocs - fetch and summarize official race documents.
#[derive(Parser)]
#[command(
    name = "paddockdocs",
    version,
    about = "Fetch official race documents and answer per-class question batteries over them.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Download PDFs for one season or the whole archive.
    Fetch {
        /// Season year or label (e.g. "2024"). Omit to fetch every season.
        #[arg(short, long)]
        season: Option<String>,

        /// Grand Prix name filter (e.g. "Bahrain Grand Prix").
        #[arg(short, long)]
        gp: Option<String>,

        /// Re-download documents that already exist locally.
        #[arg(long)]
        force: bool,

        /// Root directory for downloaded PDFs (defaults to config value).
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },

    /// Download and summarize one Grand Prix's documents.
    Summarize {
        /// Season year or label (e.g. "2024").
        #[arg(short, long)]
        season: String,

        /// Grand Prix name (e.g. "Bahrain Grand Prix").
        #[arg(short, long)]
        gp: String,

        /// Summarize event-notes documents only.
        #[arg(long)]
        event_notes: bool,

        /// Summarize infringement documents only.
        #[arg(long)]
        infringements: bool,

        /// Re-download documents that already exist locally.
        #[arg(long)]
        force: bool,

        /// Root directory for downloaded PDFs (defaults to config value).
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "paddockdocs=info",
        1 => "paddockdocs=debug",
        _ => "paddockdocs=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch {
            season,
            gp,
            force,
            download_dir,
        } => cmd_fetch(season, gp, force, download_dir).await,
        Command::Summarize {
            season,
            gp,
            event_notes,
            infringements,
            force,
            download_dir,
        } => cmd_summarize(season, gp, event_notes, infringements, force, download_dir).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

fn effective_download_dir(config: &AppConfig, override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| PathBuf::from(&config.downloads.dir))
}

async fn cmd_fetch(
    season: Option<String>,
    gp: Option<String>,
    force: bool,
    download_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let fetch = FetchConfig {
        season,
        gp,
        force,
        download_dir: effective_download_dir(&config, download_dir),
    };

    info!(season = ?fetch.season, gp = ?fetch.gp, "fetching documents");

    let reporter = CliProgress::new();
    let report = fetch_documents(&config, &fetch, &reporter).await?;
    reporter.clear();

    println!();
    println!("  Fetch complete.");
    println!("  Seasons:   {}", report.seasons);
    println!("  Documents: {}", report.documents);
    println!("  Directory: {}", fetch.download_dir.display());
    println!();

    Ok(())
}

async fn cmd_summarize(
    season: String,
    gp: String,
    event_notes: bool,
    infringements: bool,
    force: bool,
    download_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;

    // Neither flag means both classes
    let classes = match (event_notes, infringements) {
        (true, false) => vec![DocumentClass::EventNotes],
        (false, true) => vec![DocumentClass::Infringements],
        _ => vec![DocumentClass::EventNotes, DocumentClass::Infringements],
    };

    let cfg = SummarizeConfig {
        season,
        gp,
        classes,
        force,
        download_dir: effective_download_dir(&config, download_dir),
    };

    info!(season = %cfg.season, gp = %cfg.gp, "summarizing documents");

    let reporter = CliProgress::new();
    let summaries = summarize_documents(&config, &cfg, &reporter).await?;
    reporter.clear();

    for summary in &summaries {
        print_summary(summary);
    }
    print_totals(&summaries);

    Ok(())
}

/// Print one class's answered battery in question order.
fn print_summary(summary: &ClassSummary) {
    let heading = format!(
        "{} / {} / {}",
        summary.season,
        summary.gp,
        class_title(summary.class)
    );
    println!();
    println!("{heading}");
    println!("{}", "=".repeat(heading.len()));

    if summary.entries.is_empty() {
        println!();
        println!("No matching documents found, nothing to summarize.");
        return;
    }

    for entry in &summary.entries {
        println!();
        println!("{}", entry.question);
        println!("{}", "-".repeat(entry.question.len().min(79)));
        println!("{}", entry.answer);
    }
}

/// Print aggregate token and cost accounting across every answer.
fn print_totals(summaries: &[ClassSummary]) {
    let total = summaries
        .iter()
        .flat_map(|s| &s.entries)
        .fold(TokenUsage::default(), |acc, e| TokenUsage {
            total_tokens: acc.total_tokens + e.usage.total_tokens,
            prompt_tokens: acc.prompt_tokens + e.usage.prompt_tokens,
            completion_tokens: acc.completion_tokens + e.usage.completion_tokens,
            total_cost_usd: acc.total_cost_usd + e.usage.total_cost_usd,
        });

    println!();
    println!("  Tokens: {} total ({} prompt, {} completion)",
        total.total_tokens, total.prompt_tokens, total.completion_tokens);
    println!("  Cost:   ${:.4}", total.total_cost_usd);
    println!();
}

fn class_title(class: DocumentClass) -> &'static str {
    match class {
        DocumentClass::EventNotes => "Event Notes",
        DocumentClass::Infringements => "Infringements",
        DocumentClass::Unclassified => "Unclassified",
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    fn done(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }
}
