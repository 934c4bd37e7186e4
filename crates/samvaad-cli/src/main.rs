use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use samvaad_client::AnalysisClient;
use samvaad_core::document::Document;
use samvaad_core::{Sentiment, trend};
use samvaad_engine::{KeywordQuery, UploadCoordinator};
use samvaad_store::{DraftStore, FileStore, KvStore, ReviewLedger};

mod display;

#[derive(Parser)]
#[command(
    name = "samvaad",
    version,
    about = "Track and analyse consultation feedback sentiment"
)]
struct Cli {
    /// Directory holding the durable store.
    #[arg(long, env = "SAMVAAD_DATA_DIR", default_value = ".samvaad")]
    data_dir: PathBuf,

    /// Base URL of the analysis service.
    #[arg(long, env = "SAMVAAD_ANALYSIS_URL", default_value = "http://localhost:5001")]
    analysis_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage consultation drafts.
    #[command(subcommand)]
    Draft(DraftCommand),
    /// Upload review documents to a draft as one classification batch.
    Upload {
        draft_id: i64,
        /// PDF files to submit.
        files: Vec<PathBuf>,
    },
    /// Show the sentiment summary for a draft.
    Summary { draft_id: i64 },
    /// Show the day-by-day sentiment trend for a draft.
    Trend { draft_id: i64 },
    /// List a draft's reviews.
    Reviews { draft_id: i64 },
    /// Show keyword frequencies for one sentiment of a draft.
    Keywords {
        draft_id: i64,
        sentiment: Sentiment,
    },
    /// Show the per-comment breakdown for one review.
    Review { draft_id: i64, review_id: u64 },
}

#[derive(Subcommand)]
enum DraftCommand {
    /// Create a new draft.
    Create {
        title: String,
        /// Calendar date of the consultation (defaults to today).
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List all drafts, optionally filtered by a search term.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one draft with its sentiment summary.
    Show { draft_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("samvaad v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let store: Arc<dyn KvStore> = Arc::new(FileStore::open(&cli.data_dir)?);
    let drafts = DraftStore::new(store.clone());
    let ledger = ReviewLedger::new(store.clone());
    let client = Arc::new(AnalysisClient::new(cli.analysis_url));

    match cli.command {
        Command::Draft(DraftCommand::Create {
            title,
            date,
            description,
        }) => {
            let date =
                date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
            let draft = drafts.create(&title, &date, &description)?;
            println!("created draft {} ({})", draft.id, draft.title);
        }
        Command::Draft(DraftCommand::List { search }) => {
            let found = match search {
                Some(term) => drafts.search(&term)?,
                None => drafts.list()?,
            };
            display::print_drafts(&found);
        }
        Command::Draft(DraftCommand::Show { draft_id }) => {
            let draft = drafts
                .get(draft_id)?
                .with_context(|| format!("no draft with id {draft_id}"))?;
            let summary = ledger.summary(draft_id)?;
            display::print_draft(&draft, &summary);
        }
        Command::Upload { draft_id, files } => {
            let mut documents = Vec::with_capacity(files.len());
            for path in &files {
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .with_context(|| format!("not a usable filename: {}", path.display()))?;
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                documents.push(Document::new(filename, bytes));
            }

            let coordinator = UploadCoordinator::new(drafts, ledger, client);
            let outcome = coordinator.submit(draft_id, &documents).await?;
            println!("accepted {} document(s)", outcome.accepted);
            display::print_summary(&outcome.summary);
        }
        Command::Summary { draft_id } => {
            display::print_summary(&ledger.summary(draft_id)?);
        }
        Command::Trend { draft_id } => {
            display::print_trend(&trend::build(&ledger.get_all(draft_id)?));
        }
        Command::Reviews { draft_id } => {
            display::print_reviews(&ledger.get_all(draft_id)?);
        }
        Command::Keywords {
            draft_id,
            sentiment,
        } => {
            let query = KeywordQuery::new(ledger, client);
            let frequencies = query.frequencies(draft_id, sentiment).await?;
            display::print_keywords(&frequencies);
        }
        Command::Review {
            draft_id,
            review_id,
        } => {
            let review = ledger
                .get_all(draft_id)?
                .into_iter()
                .find(|r| r.id == review_id)
                .with_context(|| format!("no review with id {review_id} in draft {draft_id}"))?;
            let details = client.review_details(&review.source_filename()).await?;
            display::print_review_details(&review, &details);
        }
    }

    Ok(())
}
