//! Analyze one CSV upload from the command line.
//!
//! ```text
//! cargo run --example analyze_reviews -- reviews.csv review
//! ```
//!
//! `vectorizador.json` and `modelo_naive_bayes.json` must be in the working
//! directory. The two-column result is written next to the input as
//! `resultados_reseñas.csv`.

use anyhow::{Context, Result};
use review_sentiment::pipelines::sentiment_analysis_pipeline::DEFAULT_EXPORT_FILE_NAME;
use review_sentiment::{ActionOutcome, ArtifactConfig, Dashboard};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(column)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: analyze_reviews <file.csv> <column>");
    };

    println!("Loading artifacts...");
    let dashboard = Dashboard::start(ArtifactConfig::default())
        .context("No se encontraron los artefactos del modelo")?;

    let upload = std::fs::read(&input).with_context(|| format!("Failed to read {input}"))?;
    println!(
        "Columns: {}",
        dashboard.columns(&upload).unwrap_or_default().join(", ")
    );

    match dashboard.analyze_upload(&upload, &column) {
        ActionOutcome::Completed(report) => {
            println!("\n=== Resumen del Análisis ===");
            println!("Total de Reseñas: {}", report.total());
            println!("Positivas:        {}", report.positives());
            println!("Negativas:        {}", report.negatives());

            for row in report.rows().take(10) {
                println!("{:<12} {}", row.sentiment.tag(), row.text);
            }

            let out = std::path::Path::new(&input).with_file_name(DEFAULT_EXPORT_FILE_NAME);
            let file = std::fs::File::create(&out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            report.write_csv(file)?;
            println!("\nResults written to {}", out.display());
        }
        ActionOutcome::Failed { message } => {
            eprintln!("{message}");
        }
    }

    Ok(())
}
