use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use litsynth::analysis::openai::OpenAiAnalyzer;
use litsynth::clustering::{LabeledFrequency, PartialRatio, SynonymClusterer};
use litsynth::config::Config;
use litsynth::pipeline::PaperOutcome;

/// litsynth: literature-review synthesis.
///
/// Extracts structured metadata from paper abstracts with a language model
/// and groups the reported technologies into synonym clusters.
#[derive(Parser)]
#[command(name = "litsynth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every abstract in a BibTeX file with the language model
    Analyze {
        /// The BibTeX file to read
        bib: PathBuf,

        /// Where to write the results JSON (default: <output dir>/results.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Only analyze the first N entries
        #[arg(long)]
        limit: Option<usize>,

        /// Number of abstracts to analyze in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// Cluster technology labels from a results file and write the CSV report
    Aggregate {
        /// Results JSON written by `analyze`
        results: PathBuf,

        /// Similarity threshold in [0, 100] (default: LITSYNTH_SIMILARITY_THRESHOLD or 90)
        #[arg(long)]
        threshold: Option<f64>,

        /// Drop clusters whose aggregate frequency is below this (default: 5)
        #[arg(long)]
        min_frequency: Option<u64>,

        /// Directory for the CSV report (default: LITSYNTH_OUTPUT_DIR or ./output)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Cluster literal labels, each counted once, and print the clusters
    Cluster {
        /// Labels in leader order
        #[arg(required = true)]
        labels: Vec<String>,

        /// Similarity threshold in [0, 100]
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// List the entries parsed from a BibTeX file
    Entries {
        /// The BibTeX file to read
        bib: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("litsynth=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            bib,
            out,
            limit,
            concurrency,
        } => {
            let config = Config::load()?;
            config.require_api_key()?;

            let mut entries = litsynth::bibtex::read_file(&bib)?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            let analyzer = OpenAiAnalyzer::new(
                &config.api_url,
                config.api_key.clone(),
                config.model.clone(),
                config.requests_per_second,
            )?;
            info!(model = analyzer.model(), entries = entries.len(), "Starting analysis");
            println!(
                "Analyzing {} abstracts with {} ({} concurrent)...",
                entries.len(),
                analyzer.model(),
                concurrency
            );

            let outcomes =
                litsynth::pipeline::analyze_entries(&analyzer, &entries, concurrency).await;

            let mut papers = Vec::with_capacity(outcomes.len());
            let mut failed = 0;
            for outcome in outcomes {
                match outcome {
                    PaperOutcome::Analyzed { info, .. } => papers.push(info),
                    PaperOutcome::Failed { key, reason } => {
                        failed += 1;
                        println!("  {} {}: {}", "!".yellow(), key, reason);
                    }
                }
            }

            let out = out.unwrap_or_else(|| config.output_dir.join("results.json"));
            litsynth::analysis::results::write_results(&out, &papers)?;

            println!(
                "\n{}",
                format!(
                    "Analyzed {} papers ({} failed). Results saved to: {}",
                    papers.len(),
                    failed,
                    out.display()
                )
                .bold()
            );
            println!(
                "{}",
                format!("Next: litsynth aggregate {}", out.display()).dimmed()
            );
        }

        Commands::Aggregate {
            results,
            threshold,
            min_frequency,
            out_dir,
        } => {
            let config = Config::load()?;
            let threshold = threshold.unwrap_or(config.similarity_threshold);
            let min_frequency = min_frequency.unwrap_or(config.min_frequency);
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());

            let (summary, report_path) =
                litsynth::pipeline::aggregate::run(&results, threshold, min_frequency, &out_dir)?;

            println!(
                "{} distinct labels grouped into {} clusters (threshold {threshold})",
                summary.labels.len(),
                summary.clusters.len()
            );
            litsynth::output::terminal::display_report(&summary.rows, min_frequency);
            println!(
                "{}",
                format!("CSV report saved to: {}", report_path.display()).bold()
            );
        }

        Commands::Cluster { labels, threshold } => {
            let config = Config::load()?;
            let threshold = threshold.unwrap_or(config.similarity_threshold);

            let entries: Vec<LabeledFrequency> = labels
                .into_iter()
                .map(|label| LabeledFrequency::new(label, 1))
                .collect();
            let clusterer = SynonymClusterer::new(PartialRatio::default(), threshold)?;
            let clusters = clusterer.cluster(&entries)?;

            litsynth::output::terminal::display_clusters(&clusters);
        }

        Commands::Entries { bib } => {
            let entries = litsynth::bibtex::read_file(&bib)?;
            litsynth::output::terminal::display_entries(&entries);
        }
    }

    Ok(())
}
