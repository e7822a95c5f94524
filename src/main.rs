use anyhow::Context;
use budgetsim::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Similar-project recommendations for budget-evaluation records
#[derive(Parser, Debug)]
#[command(name = "budgetsim")]
#[command(about = "Precompute and query similar budget-evaluation projects", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every project against the corpus and write the similarity index
    Generate {
        /// Path to the projects dataset
        #[arg(short, long, default_value = "./data/projects.json")]
        projects: PathBuf,

        /// Where to write the similarity index
        #[arg(short, long, default_value = "./data/similarities.json")]
        output: PathBuf,

        /// JSON similarity configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Recommendations kept per project (overrides the config)
        #[arg(long)]
        top_n: Option<usize>,

        /// Disable the parallel outer loop
        #[arg(long)]
        sequential: bool,
    },

    /// Print the precomputed similar projects of one project
    Similar {
        /// Project id
        id: String,

        #[arg(short, long, default_value = "./data/projects.json")]
        projects: PathBuf,

        #[arg(short, long, default_value = "./data/similarities.json")]
        index: PathBuf,

        /// Number of entries to print
        #[arg(short, default_value_t = 5)]
        n: usize,
    },

    /// Explain the live similarity score between two projects
    Explain {
        source: String,
        target: String,

        #[arg(short, long, default_value = "./data/projects.json")]
        projects: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimilarityConfig> {
    match path {
        Some(path) => SimilarityConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(SimilarityConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("budgetsim v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Generate {
            projects,
            output,
            config,
            top_n,
            sequential,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(top_n) = top_n {
                config.top_n = top_n;
            }
            if sequential {
                config.parallel = false;
            }

            let store = load_store(&projects)
                .with_context(|| format!("loading projects from {}", projects.display()))?;
            let index = Precomputer::new(config).run_repository(&store);
            IndexFile::new(&output)
                .save(&index)
                .with_context(|| format!("writing index to {}", output.display()))?;
            info!("Similarity index written to {:?}", output);
        }

        Command::Similar { id, projects, index, n } => {
            let store = load_store(&projects)
                .with_context(|| format!("loading projects from {}", projects.display()))?;
            let index = IndexFile::new(&index).load()?;
            let reader = SimilarityIndexReader::new(store, index)?;

            let similar = reader.get_similar(&id, n)?;
            println!("{}", serde_json::to_string_pretty(&similar)?);
        }

        Command::Explain {
            source,
            target,
            projects,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            let store = load_store(&projects)
                .with_context(|| format!("loading projects from {}", projects.display()))?;

            let a = store.get(&source).ok_or_else(|| Error::ProjectNotFound(source.clone()))?;
            let b = store.get(&target).ok_or_else(|| Error::ProjectNotFound(target.clone()))?;

            let scorer = SimilarityScorer::for_corpus(store.all(), Arc::new(TinySegmenter), &config);
            let explained = ExplainedPair::compute(&scorer, a, b);
            println!("{}", serde_json::to_string_pretty(&explained)?);
        }
    }

    Ok(())
}
