use anyhow::anyhow;
use console::style;
use processor::RunSummary;
use std::error::Error;
use tracing::{error, info};

mod config;
mod processor;
mod telemetry;

const SUMMARY_TOP_WORDS: usize = 3;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    telemetry::init_telemetry()?;

    let config = config::ReportConfig::try_from_env().map_err(|e| anyhow!("{e:#}"))?;
    config.validate().map_err(|e| anyhow!("{e:#}"))?;

    info!(
        "Starting emotion analysis of groups: {:?}",
        config.groups.iter().map(|g| &g.label).collect::<Vec<_>>()
    );

    let processor = processor::Processor::new(config);
    match processor.run() {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Emotion analysis failed: {e:#}");
            Err(anyhow!("{e:#}").into())
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} transcripts in {} groups",
        style("Analysed").green().bold(),
        summary.transcripts,
        summary.scores.len()
    );

    for score in summary.scores.iter() {
        println!(
            "\n{} {} sentences, {} tokens",
            style(&score.group).cyan().bold(),
            score.sentences,
            score.tokens
        );
        for emotion in summary.emotions.iter() {
            let words = score
                .top_words(*emotion, SUMMARY_TOP_WORDS)
                .into_iter()
                .map(|(word, _)| word)
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "  {:<14}{:>6}  {}",
                emotion.label(),
                score.counts.get(*emotion),
                style(words).dim()
            );
        }
    }

    for (group, columns) in summary.matrix_columns.iter() {
        println!("\nMatrix of {}: {} n-gram columns", style(group).cyan(), columns);
    }
    println!(
        "\n{} {}",
        style("Report").green().bold(),
        summary.output_path.display()
    );
}
