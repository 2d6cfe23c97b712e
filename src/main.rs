use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use esf_results::cache::{enrichment_digest, EnrichmentCache};
use esf_results::dataset::EnrichedDataset;
use esf_results::enrich::enrich_records;
use esf_results::ingest::parse_results_csv;
use esf_results::summary::{centile_summary, discipline_card, points_summary, status_breakdown};
use esf_results::{logging, Config};

#[derive(Parser)]
#[command(name = "esf_results")]
#[command(about = "ESF ski test result enrichment pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a raw results CSV and write the derived dataset as JSON
    Enrich {
        /// Raw results CSV
        #[arg(long)]
        input: PathBuf,
        /// Reference configuration TOML (roster + birth dates)
        #[arg(long)]
        config: PathBuf,
        /// Destination for the enriched JSON
        #[arg(long)]
        output: PathBuf,
        /// Optional cache directory; identical input+config reuses the cached run
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Print per-person summary statistics for each discipline
    Report {
        /// Raw results CSV
        #[arg(long)]
        input: PathBuf,
        /// Reference configuration TOML (roster + birth dates)
        #[arg(long)]
        config: PathBuf,
        /// Restrict the report to a single discipline (exact raw label)
        #[arg(long)]
        discipline: Option<String>,
    },
}

fn load_dataset(
    input: &PathBuf,
    config_path: &PathBuf,
    cache_dir: Option<&PathBuf>,
) -> Result<(EnrichedDataset, Config), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let raw_bytes = fs::read(input)?;

    if let Some(dir) = cache_dir {
        let cache = EnrichmentCache::new(dir);
        let key = enrichment_digest(&raw_bytes, &config)?;
        if let Some(records) = cache.load(&key)? {
            info!("Reusing cached enrichment run");
            let roster = config.people.clone();
            return Ok((EnrichedDataset::new(records, roster), config));
        }

        let records = parse_results_csv(raw_bytes.as_slice())?;
        let (enriched, report) = enrich_records(records, &config);
        cache.store(&key, &enriched)?;
        print_report_summary(&report);
        let roster = config.people.clone();
        return Ok((EnrichedDataset::new(enriched, roster), config));
    }

    let records = parse_results_csv(raw_bytes.as_slice())?;
    let (enriched, report) = enrich_records(records, &config);
    print_report_summary(&report);
    let roster = config.people.clone();
    Ok((EnrichedDataset::new(enriched, roster), config))
}

fn print_report_summary(report: &esf_results::enrich::EnrichmentReport) {
    println!("📊 Enrichment summary:");
    println!("   Raw records: {}", report.total_records);
    println!("   Kept (roster): {}", report.kept_records);
    println!("   Explicit dates: {}", report.explicit_dates);
    println!("   Fallback dates: {}", report.fallback_dates);
    println!("   Unknown disciplines: {}", report.unknown_disciplines);
    println!("   Distinct courses: {}", report.distinct_courses);
}

fn fmt_opt(value: Option<f64>, digits: usize) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.digits$}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            input,
            config,
            output,
            cache_dir,
        } => {
            println!("🔄 Enriching {}...", input.display());

            let (dataset, _) = match load_dataset(&input, &config, cache_dir.as_ref()) {
                Ok(loaded) => loaded,
                Err(e) => {
                    error!("Enrichment failed: {}", e);
                    return Err(e);
                }
            };

            let json = serde_json::to_string_pretty(dataset.records())?;
            fs::write(&output, json)?;
            println!("💾 Saved {} enriched records to {}", dataset.len(), output.display());
        }
        Commands::Report {
            input,
            config,
            discipline,
        } => {
            let (dataset, _) = load_dataset(&input, &config, None)?;
            let cutoff = Local::now().naive_local() - Duration::days(3 * 365);

            for (name, records) in dataset.group_by_discipline() {
                if name.is_empty() {
                    continue;
                }
                if let Some(wanted) = discipline.as_deref() {
                    if name != wanted {
                        continue;
                    }
                }

                println!("\n=== {name} ===");
                for person in dataset.roster() {
                    let subset: Vec<_> = records
                        .iter()
                        .copied()
                        .filter(|r| &r.record.person == person)
                        .collect();
                    if subset.is_empty() {
                        continue;
                    }

                    let card = discipline_card(&subset);
                    let breakdown = status_breakdown(&subset);
                    let points = points_summary(&subset, cutoff);
                    let centiles = centile_summary(&subset, cutoff);

                    println!("\n{person}");
                    println!("   Participations: {}", card.participations);
                    println!("   Finished rate: {}%", fmt_opt(card.finished_rate, 0));
                    println!("   Best medal: {}", card.best_medal);
                    println!(
                        "   Statuses: {} finished / {} DNF / {} DSQ / {} DNS",
                        breakdown.finished, breakdown.dnf, breakdown.dsq, breakdown.dns
                    );
                    println!(
                        "   Points: mean {} | top5 {} | ≤3y {} | record {}",
                        fmt_opt(points.mean_all, 2),
                        fmt_opt(points.mean_top_k, 2),
                        fmt_opt(points.mean_recent, 2),
                        fmt_opt(points.record, 2)
                    );
                    println!(
                        "   Centile: mean {} | top5 {} | ≤3y {} | record {}",
                        fmt_opt(centiles.mean_all, 1),
                        fmt_opt(centiles.mean_top_k, 1),
                        fmt_opt(centiles.mean_recent, 1),
                        fmt_opt(centiles.record, 1)
                    );
                }
            }
        }
    }
    Ok(())
}
