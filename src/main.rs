use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use pagesift::config::DEFAULT_DECISION_THRESHOLD;
use pagesift::worker_pool::ClassifierPool;
use pagesift::{
    BatchedClassifier, ChunkPolicy, FilterConfig, LabelVocabulary, LexiconClassifier, PageFilter,
    PageFilterRequest, SentenceSplitter,
};

#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(about = "Offset-preserving web page text segmentation and content filtering")]
#[command(version)]
struct Args {
    /// TOML configuration file; PAGESIFT_* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Probability a label needs before the lexicon classifier reports it
    #[arg(long, global = true, env = "PAGESIFT_DECISION_THRESHOLD", default_value_t = DEFAULT_DECISION_THRESHOLD)]
    threshold: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a text block into offset-addressed fragments
    Segment {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Element id attached to every fragment
        #[arg(long, default_value = "text")]
        element_id: String,
    },

    /// Run a page filter request through the full pipeline
    Filter {
        /// Lexicon JSON mapping label codes to keywords
        #[arg(long)]
        lexicon: PathBuf,

        /// Request JSON file (reads stdin when omitted)
        request: Option<PathBuf>,
    },

    /// Classify raw texts
    Classify {
        /// Lexicon JSON mapping label codes to keywords
        #[arg(long)]
        lexicon: PathBuf,

        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// List the label vocabulary
    Labels,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the JSON results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    info!(?config, "Loaded configuration");

    match args.command {
        Command::Segment { file, element_id } => {
            let text = read_input(file.as_deref())?;
            let policy = ChunkPolicy::with_splitter(
                config.split_threshold,
                config.attach_trailing_punctuation,
                Box::new(SentenceSplitter::with_default_rules()?),
            )?;
            let expansion = policy.expand(&element_id, &text);
            print_json(&json!({
                "fragments": expansion.fragments,
                "degenerateSpans": expansion.degenerate_spans,
            }))?;
        }
        Command::Filter { lexicon, request } => {
            let raw = read_input(request.as_deref())?;
            let request: PageFilterRequest = serde_json::from_str(&raw).context("Failed to parse page filter request")?;

            let classifier = lexicon_classifier(&lexicon, args.threshold)?;
            let filter = PageFilter::new(classifier, Box::new(SentenceSplitter::with_default_rules()?), config)?;
            let response = filter.filter_page(&request).await?;
            print_json(&response)?;
        }
        Command::Classify { lexicon, texts } => {
            let classifier = BatchedClassifier::new(lexicon_classifier(&lexicon, args.threshold)?, config.classifier_batch_size);
            let pool = ClassifierPool::new(classifier, config.max_concurrent_classifications);
            let predictions = pool.classify(texts.clone()).await?;

            let results: Vec<_> = texts
                .iter()
                .zip(&predictions)
                .map(|(text, prediction)| {
                    json!({
                        "text": text,
                        "labels": prediction.labels,
                        "confidence": prediction.confidence,
                    })
                })
                .collect();
            print_json(&results)?;
        }
        Command::Labels => {
            for label in LabelVocabulary::default().labels() {
                println!("{}\t{}", label.code, label.description);
            }
        }
    }

    Ok(())
}

/// Defaults, then the optional TOML file, then environment overrides
fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    let Some(path) = path else {
        return Ok(FilterConfig::from_env()?);
    };
    if !path.is_file() {
        bail!("Config file does not exist: {}", path.display());
    }
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(FilterConfig::from_toml(&raw)?.with_env_overrides(std::env::vars())?)
}

fn lexicon_classifier(path: &Path, threshold: f64) -> Result<LexiconClassifier> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("Decision threshold must be within [0, 1], got {threshold}");
    }
    Ok(LexiconClassifier::from_file(path)?.with_threshold(threshold))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
