//! Fetch command handler

use crate::cli::selected_kinds;
use crate::clients::{FetchReport, MalExportClient};
use crate::config::Config;
use crate::domain::MediaKind;
use crate::library::Workspace;
use tracing::warn;

/// Empties the export directory of `kind` and downloads fresh exports into it.
pub(super) async fn refresh_exports(
    workspace: &Workspace,
    client: &MalExportClient,
    users: &[String],
    kind: MediaKind,
) -> anyhow::Result<FetchReport> {
    workspace.clear_exports(kind)?;

    if users.is_empty() {
        warn!(kind = %kind, "No users configured, nothing to fetch");
        return Ok(FetchReport::default());
    }

    Ok(client
        .fetch_all(users, kind, &workspace.exports_dir(kind))
        .await)
}

pub async fn cmd_fetch(config: &Config, kind: Option<MediaKind>) -> anyhow::Result<()> {
    let workspace = Workspace::from_config(&config.paths);
    workspace.ensure_exists()?;

    let client = MalExportClient::from_config(&config.fetch)?;
    let users = config.unique_users();

    for kind in selected_kinds(kind) {
        let report = refresh_exports(&workspace, &client, &users, kind).await?;
        println!(
            "{}: {} downloaded, {} failed",
            kind.label(),
            report.downloaded.len(),
            report.failed.len()
        );
        for user in &report.failed {
            println!("  failed: {user}");
        }
    }

    println!(
        "Exports are in {}",
        workspace.temp_dir().display()
    );
    Ok(())
}
