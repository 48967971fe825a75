use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prettytable::{Cell, Row as PrettyRow, Table};
use std::path::{Path, PathBuf};
use tokio::time::Instant;
use tracing::{info, warn};

use sift::document::{AdmissionReport, JsonFileSource};
use sift::nutrition::{score_cluster, ClusterNutrition, NutritionScorer, ScoreReport, Scorer};
use sift::{ClusterEngine, Clustering, Document, EngineConfig, SiftError};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ", ",
    env!("BUILD_PROFILE"),
    ")"
);

/// Longest title shown in table output
const TITLE_PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[clap(name = "sift", about = "Group overlapping news articles", version, long_version = LONG_VERSION)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster the articles in a JSON file
    Cluster {
        /// JSON array of articles ({"url", "text", "title", ...})
        #[clap(required = true)]
        input: PathBuf,

        /// Minimum similarity (0.0-1.0) for two articles to share a cluster
        #[clap(short, long)]
        threshold: Option<f64>,

        /// Minimum article length in characters
        #[clap(short, long)]
        min_chars: Option<usize>,

        /// Print clusters as JSON instead of a table
        #[clap(short, long)]
        json: bool,

        /// Include average nutrition scores per cluster
        #[clap(short, long)]
        nutrition: bool,
    },

    /// Score each admitted article
    Score {
        #[clap(required = true)]
        input: PathBuf,

        /// Print reports as JSON instead of a table
        #[clap(short, long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    sift::logging::configure_logging();

    let args = Cli::parse();

    match args.command {
        Commands::Cluster {
            input,
            threshold,
            min_chars,
            json,
            nutrition,
        } => {
            // Validated once the CLI overrides are in, by ClusterEngine::new
            let mut config = EngineConfig::new().with_env_overrides()?;
            if let Some(threshold) = threshold {
                config = config.with_threshold(threshold);
            }
            if let Some(min_chars) = min_chars {
                config = config.with_min_text_chars(min_chars);
            }
            cluster_command(&input, config, json, nutrition).await?;
        }
        Commands::Score { input, json } => {
            score_command(&input, EngineConfig::new().with_env_overrides()?, json).await?;
        }
    }

    Ok(())
}

async fn load_documents(input: &Path) -> Result<Vec<Document>> {
    let source = JsonFileSource::new(input);
    let articles = source
        .load()
        .await
        .with_context(|| format!("Failed to load articles from {}", input.display()))?;

    Ok(articles.into_iter().map(|a| a.into_document()).collect())
}

async fn cluster_command(input: &Path, config: EngineConfig, json: bool, nutrition: bool) -> Result<()> {
    let start_time = Instant::now();
    let engine = ClusterEngine::new(config)?;
    let documents = load_documents(input).await?;
    info!("Clustering {} articles from {}", documents.len(), input.display());

    // The whole batch is loaded before clustering starts; vocabulary is batch-global
    let result = tokio::task::spawn_blocking(move || engine.admit_and_cluster(documents))
        .await
        .context("Clustering task panicked")?;

    let (clustering, report) = match result {
        Ok(output) => output,
        Err(SiftError::EmptyCorpus(reason)) => {
            warn!("Nothing to cluster: {}", reason);
            println!("Found 0 clusters.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let scorer = NutritionScorer::new();
    let summaries: Vec<Option<ClusterNutrition>> = if nutrition {
        clustering
            .iter()
            .map(|cluster| score_cluster(&scorer, cluster))
            .collect()
    } else {
        Vec::new()
    };

    if json {
        print_clusters_json(&clustering, &report, &summaries)?;
    } else {
        print_clusters_table(&clustering, &report, &summaries);
    }

    info!("Clustering completed in {:.2?}", start_time.elapsed());
    Ok(())
}

async fn score_command(input: &Path, config: EngineConfig, json: bool) -> Result<()> {
    config.validate()?;
    let documents = load_documents(input).await?;
    let (admitted, report) = config.admission_filter().admit(documents);

    let scorer = NutritionScorer::new();
    let reports: Vec<ScoreReport> = admitted.iter().map(|doc| scorer.score(doc)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("Title"),
        Cell::new("Facts"),
        Cell::new("Bias"),
        Cell::new("Emotion"),
        Cell::new("Perspective"),
        Cell::new("Complexity"),
        Cell::new("Source"),
    ]));

    for score in &reports {
        table.add_row(PrettyRow::new(vec![
            Cell::new(&preview(score.title.as_deref().or(score.url.as_deref()))),
            Cell::new(&format!("{:.2}", score.fact_density)),
            Cell::new(&format!("{:.2}", score.bias_content)),
            Cell::new(&format!("{:.2}", score.emotional_calories)),
            Cell::new(&format!("{:.2}", score.perspective_vitamins)),
            Cell::new(&format!("{:.2}", score.complexity_index)),
            Cell::new(&format!("{:.0}", score.source_minerals)),
        ]));
    }

    table.printstd();
    print_admission(&report);
    Ok(())
}

fn print_clusters_json(
    clustering: &Clustering,
    report: &AdmissionReport,
    summaries: &[Option<ClusterNutrition>],
) -> Result<()> {
    let clusters: Vec<serde_json::Value> = clustering
        .iter()
        .enumerate()
        .map(|(idx, cluster)| {
            let mut value = serde_json::json!({
                "representative": cluster.representative,
                "size": cluster.len(),
                "members": cluster.members,
            });
            if let Some(Some(summary)) = summaries.get(idx) {
                value["nutrition"] = serde_json::json!(summary);
            }
            value
        })
        .collect();

    let output = serde_json::json!({
        "admission": report,
        "cluster_count": clustering.len(),
        "clusters": clusters,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_clusters_table(clustering: &Clustering, report: &AdmissionReport, summaries: &[Option<ClusterNutrition>]) {
    let mut table = Table::new();
    let mut header = vec![Cell::new("Cluster"), Cell::new("Articles"), Cell::new("Titles")];
    if !summaries.is_empty() {
        header.extend([Cell::new("Facts"), Cell::new("Bias"), Cell::new("Complexity")]);
    }
    table.add_row(PrettyRow::new(header));

    for (idx, cluster) in clustering.iter().enumerate() {
        let titles = cluster
            .members
            .iter()
            .map(|doc| preview(doc.title().or(doc.url())))
            .collect::<Vec<_>>()
            .join("\n");

        let mut row = vec![
            Cell::new(&cluster.representative),
            Cell::new(&cluster.len().to_string()),
            Cell::new(&titles),
        ];
        if let Some(Some(summary)) = summaries.get(idx) {
            row.extend([
                Cell::new(&format!("{:.2}", summary.fact_density)),
                Cell::new(&format!("{:.2}", summary.bias_content)),
                Cell::new(&format!("{:.2}", summary.complexity_index)),
            ]);
        }
        table.add_row(PrettyRow::new(row));
    }

    table.printstd();
    println!("Found {} clusters.", clustering.len());
    print_admission(report);
}

fn print_admission(report: &AdmissionReport) {
    println!(
        "Admitted {} of {} articles ({} too short, {} with ad copy)",
        report.admitted, report.received, report.too_short, report.advertisement
    );
}

fn preview(title: Option<&str>) -> String {
    let title = title.unwrap_or("(untitled)");
    if title.chars().count() <= TITLE_PREVIEW_CHARS {
        return title.to_string();
    }
    let cut: String = title.chars().take(TITLE_PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}
