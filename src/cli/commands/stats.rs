//! Stats command handler

use crate::cli::selected_kinds;
use crate::config::Config;
use crate::constants::PLACEHOLDER;
use crate::domain::MediaKind;
use crate::services::ReportService;
use anyhow::Context;
use std::sync::Arc;

fn score_cell(score: f64) -> String {
    if score > 0.0 {
        format!("{score:.2}")
    } else {
        PLACEHOLDER.to_string()
    }
}

pub async fn cmd_stats(
    config: &Config,
    kind: Option<MediaKind>,
    json: bool,
    limit: usize,
) -> anyhow::Result<()> {
    let service = Arc::new(ReportService::new(config.clone()));

    for kind in selected_kinds(kind) {
        let worker = Arc::clone(&service);
        let (summary, ranking) = tokio::task::spawn_blocking(move || worker.summarize(kind))
            .await
            .context("Stats task failed")?
            .with_context(|| format!("Failed to rank {kind} exports"))?;

        let top = &ranking.series[..limit.min(ranking.series.len())];

        if json {
            let value = serde_json::json!({
                "summary": summary,
                "top": top,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            continue;
        }

        println!(
            "{} ranking ({} series, {} scored, {} users, global average {})",
            kind.label(),
            summary.series,
            summary.scored_series,
            summary.users,
            score_cell(summary.global_average)
        );
        println!("{:-<70}", "");

        for (i, series) in top.iter().enumerate() {
            println!(
                "{:>4}. {:>6} {:>6} {:>3} votes  {}",
                i + 1,
                score_cell(series.weighted_score),
                score_cell(series.avg_score),
                series.vote_count(),
                series.title
            );
        }

        if ranking.series.len() > top.len() {
            println!("  ... {} more", ranking.series.len() - top.len());
        }
        println!();
    }

    Ok(())
}
