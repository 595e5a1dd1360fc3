//! pdfchat CLI application
//!
//! Command-line interface for the pdfchat-rs library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdfchat_rs::{
    AnswerGenerator, ChatSession, Config, DocumentIngestor, DocumentRetriever, DocumentStore,
    OpenAiGenerator,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfchat")]
#[command(about = "Ask questions about PDF documents stored in SQLite")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and environment)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest PDFs, then chat about everything stored (default)
    Chat {
        /// PDF files to ingest first (defaults to the configured list)
        pdfs: Vec<PathBuf>,

        /// Chat over the existing store without ingesting anything
        #[arg(long)]
        skip_ingest: bool,
    },

    /// Extract and store PDFs without chatting
    Ingest {
        /// PDF files to ingest
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,
    },

    /// Answer a single question and exit
    Ask {
        /// The question
        question: String,
    },

    /// Show document store statistics
    Stats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging(None);

    let cli = Cli::parse();

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    let command = cli.command.unwrap_or(Commands::Chat {
        pdfs: Vec::new(),
        skip_ingest: false,
    });

    match command {
        Commands::Chat { pdfs, skip_ingest } => {
            chat_command(&config, pdfs, skip_ingest).await?;
        }
        Commands::Ingest { pdfs } => {
            ingest_command(&config, &pdfs)?;
        }
        Commands::Ask { question } => {
            ask_command(&config, &question).await?;
        }
        Commands::Stats => {
            stats_command(&config)?;
        }
    }

    Ok(())
}

/// Load `.env` (or `env_file`), then start the logger so `RUST_LOG` from the file applies
fn init_logging(env_file: Option<&Path>) -> Option<PathBuf> {
    let loaded = match env_file {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    // Initialize logging
    if let Err(e) = env_logger::try_init() {
        eprintln!("Logger already initialized: {}", e);
    }

    let loaded = loaded.ok();
    if let Some(path) = &loaded {
        log::debug!("Loaded environment from {}", path.display());
    }
    loaded
}

fn open_store(config: &Config) -> anyhow::Result<DocumentStore> {
    DocumentStore::new(&config.database.path).with_context(|| {
        format!(
            "Failed to open document store {}",
            config.database.path.display()
        )
    })
}

fn build_answerer(
    config: &Config,
    store: DocumentStore,
) -> anyhow::Result<AnswerGenerator<OpenAiGenerator>> {
    let generator =
        OpenAiGenerator::new(&config.llm).context("Failed to configure the language model")?;
    Ok(AnswerGenerator::new(DocumentRetriever::new(store), generator))
}

async fn chat_command(
    config: &Config,
    pdfs: Vec<PathBuf>,
    skip_ingest: bool,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    // Fail on a missing API key before spending time on extraction
    let answerer = build_answerer(config, store.clone())?;

    if !skip_ingest {
        let pdfs = if pdfs.is_empty() {
            config.pdf_files.clone()
        } else {
            pdfs
        };
        DocumentIngestor::new(store)
            .ingest_all(&pdfs)
            .context("Failed to ingest PDF files")?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ChatSession::new(&answerer)
        .run(stdin.lock(), stdout.lock())
        .await
        .context("Chat session failed")?;

    Ok(())
}

fn ingest_command(config: &Config, pdfs: &[PathBuf]) -> anyhow::Result<()> {
    let ingestor = DocumentIngestor::new(open_store(config)?);

    let progress = ProgressBar::new(pdfs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .context("Invalid progress bar template")?,
    );

    for pdf in pdfs {
        progress.set_message(display_name(pdf));
        let id = ingestor
            .ingest_file(pdf)
            .with_context(|| format!("Failed to ingest {}", pdf.display()))?;
        progress.println(format!("Stored {} as document {}", pdf.display(), id));
        progress.inc(1);
    }
    progress.finish_with_message("done");

    Ok(())
}

async fn ask_command(config: &Config, question: &str) -> anyhow::Result<()> {
    let answerer = build_answerer(config, open_store(config)?)?;
    let response = answerer
        .ask(question)
        .await
        .context("Failed to generate an answer")?;
    println!("Chatbot: {}", response);
    Ok(())
}

fn stats_command(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let stats = store.stats().context("Failed to read statistics")?;

    println!("Database: {}", store.path().display());
    println!("  Schema version: {}", stats.schema_version);
    println!("  Documents: {}", stats.document_count);
    println!("  Content size: {} bytes", stats.content_bytes);
    println!("  Database size: {} bytes", stats.file_size_bytes);
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
