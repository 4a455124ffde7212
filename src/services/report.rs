//! Report service: runs the whole pipeline for one kind and writes its pages.

use crate::config::Config;
use crate::domain::MediaKind;
use crate::library::{Workspace, WorkspaceError};
use crate::render::{Template, TemplateError, render_pages};
use crate::services::normalizer::normalize_directory;
use crate::services::pagination::PagePlan;
use crate::services::ranking::Ranking;
use crate::services::weighting::score_catalog;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Export directory is not readable: {path}: {source}")]
    Exports {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one report run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportSummary {
    pub kind: MediaKind,
    pub users: usize,
    pub series: usize,
    pub scored_series: usize,
    pub global_average: f64,
    pub pages_written: Vec<String>,
    pub skipped_files: Vec<PathBuf>,
}

impl ReportSummary {
    fn from_ranking(ranking: &Ranking, pages_written: Vec<String>) -> Self {
        Self {
            kind: ranking.kind,
            users: ranking.users.len(),
            series: ranking.series.len(),
            scored_series: ranking.scored_series(),
            global_average: ranking.global_average,
            pages_written,
            skipped_files: ranking.skipped.clone(),
        }
    }
}

pub struct ReportService {
    config: Config,
    workspace: Workspace,
}

impl ReportService {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let workspace = Workspace::from_config(&config.paths);
        Self { config, workspace }
    }

    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn check_config(&self) -> Result<(), ReportError> {
        let ranking = &self.config.ranking;
        if ranking.page_size == 0 {
            return Err(ReportError::Config("page size must be > 0".to_string()));
        }
        if !(ranking.min_votes.is_finite() && ranking.min_votes > 0.0) {
            return Err(ReportError::Config(
                "minimum votes must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks everything a run needs before any stage starts and returns
    /// the loaded template.
    ///
    /// # Errors
    ///
    /// Fails for an invalid configuration, an unreadable template or an
    /// inaccessible directory.
    pub fn preflight(&self) -> Result<Template, ReportError> {
        self.check_config()?;
        let template = Template::load(&self.config.paths.template_file)?;
        self.workspace.validate()?;
        Ok(template)
    }

    /// Normalizes, scores and orders the exports of `kind`.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or the export directory of
    /// `kind` cannot be listed. Unreadable export files are skipped.
    pub fn rank(&self, kind: MediaKind) -> Result<Ranking, ReportError> {
        self.check_config()?;

        let dir = self.workspace.exports_dir(kind);
        let catalog = normalize_directory(&dir, kind)
            .map_err(|source| ReportError::Exports { path: dir, source })?;

        let (catalog, global) = score_catalog(catalog, self.config.ranking.min_votes);
        Ok(Ranking::from_catalog(catalog, global))
    }

    /// Ranks `kind` without writing anything.
    ///
    /// # Errors
    ///
    /// See [`ReportService::rank`].
    pub fn summarize(&self, kind: MediaKind) -> Result<(ReportSummary, Ranking), ReportError> {
        let ranking = self.rank(kind)?;
        Ok((ReportSummary::from_ranking(&ranking, Vec::new()), ranking))
    }

    /// Builds and writes every page of `kind`.
    ///
    /// The template and both directories are checked before any stage runs,
    /// so a failed run leaves the previous pages untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, an unreadable
    /// template, an inaccessible directory or a failed write.
    pub fn generate(&self, kind: MediaKind) -> Result<ReportSummary, ReportError> {
        let template = self.preflight()?;

        let ranking = self.rank(kind)?;
        let plan = PagePlan::new(kind, ranking.series.len(), self.config.ranking.page_size);
        let pages = render_pages(&ranking, &plan, &self.config.render);

        self.workspace.remove_stale_pages(kind)?;

        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            let path = self
                .workspace
                .write_page(&page.file_name, &template.fill(&page.slots))?;
            info!(event = "page_written", kind = %kind, path = %path.display(), "Wrote page");
            written.push(page.file_name);
        }

        let summary = ReportSummary::from_ranking(&ranking, written);
        if !summary.skipped_files.is_empty() {
            warn!(
                event = "exports_skipped",
                kind = %kind,
                count = summary.skipped_files.len(),
                "Some exports could not be read"
            );
        }
        info!(
            event = "report_generated",
            kind = %kind,
            users = summary.users,
            series = summary.series,
            pages = summary.pages_written.len(),
            global_average = summary.global_average,
            "Report generated"
        );

        Ok(summary)
    }
}
