use crate::config::FetchConfig;
use crate::constants::EXPORT_EXTENSION;
use crate::domain::MediaKind;
use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Outcome of one fetch run.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Downloads list exports into the temp directory.
#[derive(Clone)]
pub struct MalExportClient {
    client: Client,
    base_url: Url,
    max_parallel: usize,
    batch_delay: Duration,
    settle: Duration,
}

impl MalExportClient {
    /// # Errors
    /// Returns an error if the export URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("listarr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        let base_url = Url::parse(&config.export_url)
            .with_context(|| format!("Invalid export URL: {}", config.export_url))?;

        Ok(Self {
            client,
            base_url,
            max_parallel: config.max_parallel_downloads.max(1),
            batch_delay: Duration::from_secs(config.batch_delay_seconds),
            settle: Duration::from_secs(config.settle_seconds),
        })
    }

    #[must_use]
    pub fn export_url(&self, user: &str, kind: MediaKind) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("u", user)
            .append_pair("status", "all")
            .append_pair("type", kind.as_str());
        url
    }

    async fn fetch_one(&self, user: &str, kind: MediaKind, dest: &Path) -> Result<PathBuf> {
        let url = self.export_url(user, kind);
        debug!(user, kind = %kind, url = %url, "Fetching export");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let path = dest.join(format!("{}.{EXPORT_EXTENSION}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Fetches the export of every user, at most `max_parallel` at a time.
    ///
    /// Resolves only after every download has finished and the settle delay
    /// has passed. Failed users are logged and listed in the report.
    pub async fn fetch_all(&self, users: &[String], kind: MediaKind, dest: &Path) -> FetchReport {
        let mut report = FetchReport::default();
        let batches: Vec<&[String]> = users.chunks(self.max_parallel).collect();

        for (i, batch) in batches.iter().enumerate() {
            if i > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let results = join_all(batch.iter().map(|user| self.fetch_one(user, kind, dest))).await;

            for (user, result) in batch.iter().zip(results) {
                match result {
                    Ok(path) => report.downloaded.push(path),
                    Err(e) => {
                        warn!(event = "export_fetch_failed", user = %user, kind = %kind, error = %e, "Fetch failed");
                        report.failed.push(user.clone());
                    }
                }
            }
        }

        if !self.settle.is_zero() && !users.is_empty() {
            tokio::time::sleep(self.settle).await;
        }

        info!(
            event = "exports_fetched",
            kind = %kind,
            downloaded = report.downloaded.len(),
            failed = report.failed.len(),
            "Fetched exports"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url() {
        let client = MalExportClient::from_config(&FetchConfig::default()).unwrap();
        let url = client.export_url("Areko", MediaKind::Manga);
        assert_eq!(
            url.as_str(),
            "https://myanimelist.net/malappinfo.php?u=Areko&status=all&type=manga"
        );
    }

    #[test]
    fn test_export_url_encodes_user() {
        let client = MalExportClient::from_config(&FetchConfig::default()).unwrap();
        let url = client.export_url("a b&c", MediaKind::Anime);
        assert!(url.as_str().contains("u=a+b%26c"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FetchConfig {
            export_url: "not a url".to_string(),
            ..FetchConfig::default()
        };
        assert!(MalExportClient::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_empty_user_list_fetches_nothing() {
        let config = FetchConfig {
            settle_seconds: 0,
            ..FetchConfig::default()
        };
        let client = MalExportClient::from_config(&config).unwrap();
        let report = client
            .fetch_all(&[], MediaKind::Anime, &std::env::temp_dir())
            .await;
        assert!(report.downloaded.is_empty());
        assert!(report.failed.is_empty());
    }
}
