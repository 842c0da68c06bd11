use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use termdex_core::persist::{load_documents, load_index};
use termdex_core::{index_corpus, IndexerConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect a TF-IDF weighted-term index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and document store from a CSV file
    Build {
        /// Source CSV file with a header row
        #[arg(long)]
        input: PathBuf,
        /// Header name of the column holding document text
        #[arg(long)]
        column: String,
        /// Output path of the index artifact
        #[arg(long)]
        index: PathBuf,
        /// Output path of the documents artifact
        #[arg(long)]
        documents: PathBuf,
        /// Also write a JSON manifest describing the index
        #[arg(long)]
        meta: Option<PathBuf>,
        /// Worker threads for tokenization and weighting (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Load persisted artifacts and print a summary
    Inspect {
        #[arg(long)]
        index: PathBuf,
        #[arg(long)]
        documents: Option<PathBuf>,
        /// Number of vocabulary terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, column, index, documents, meta, threads } => {
            if let Some(n) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build_global()
                    .context("configuring worker pool")?;
            }
            let mut config = IndexerConfig::new(input, column, index, documents);
            config.meta_output = meta;
            build(&config)
        }
        Commands::Inspect { index, documents, top } => inspect(&index, documents.as_deref(), top),
    }
}

fn build(config: &IndexerConfig) -> Result<()> {
    let index = index_corpus(config)
        .with_context(|| format!("indexing {}", config.source.display()))?;
    tracing::info!(
        num_docs = index.num_docs(),
        vocabulary = index.vocabulary().len(),
        entries = index.size(),
        "index build complete"
    );
    Ok(())
}

fn inspect(index_path: &Path, documents_path: Option<&Path>, top: usize) -> Result<()> {
    let index = load_index(index_path)
        .with_context(|| format!("loading index {}", index_path.display()))?;
    println!("documents:  {}", index.num_docs());
    println!("vocabulary: {}", index.vocabulary().len());
    println!("entries:    {}", index.size());
    for (id, term) in index.vocabulary().iter().take(top).enumerate() {
        println!("  {id:>6}  {term:<24} df={:.4}", index.df(term));
    }

    if let Some(path) = documents_path {
        let documents = load_documents(path)
            .with_context(|| format!("loading documents {}", path.display()))?;
        println!("stored documents: {}", documents.len());
    }
    Ok(())
}
