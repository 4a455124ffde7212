//! Generate command handler

use super::fetch::refresh_exports;
use crate::cli::selected_kinds;
use crate::clients::MalExportClient;
use crate::config::Config;
use crate::domain::MediaKind;
use crate::services::ReportService;
use anyhow::Context;
use std::sync::Arc;

pub async fn cmd_generate(
    config: &Config,
    kind: Option<MediaKind>,
    skip_fetch: bool,
) -> anyhow::Result<()> {
    let service = Arc::new(ReportService::new(config.clone()));
    service.workspace().ensure_exists()?;
    service.preflight()?;

    let client = if skip_fetch {
        None
    } else {
        Some(MalExportClient::from_config(&config.fetch)?)
    };
    let users = config.unique_users();

    for kind in selected_kinds(kind) {
        if let Some(client) = &client {
            refresh_exports(service.workspace(), client, &users, kind).await?;
        }

        let worker = Arc::clone(&service);
        let summary = tokio::task::spawn_blocking(move || worker.generate(kind))
            .await
            .context("Report task failed")?
            .with_context(|| format!("Failed to generate the {kind} report"))?;

        if client.is_some() && !config.paths.keep_exports {
            service.workspace().clear_exports(kind)?;
        }

        println!(
            "✓ {}: {} series from {} users, {} page(s) in {}",
            kind.label(),
            summary.series,
            summary.users,
            summary.pages_written.len(),
            service.workspace().output_dir().display()
        );
        for path in &summary.skipped_files {
            println!("  skipped: {}", path.display());
        }
    }

    Ok(())
}
