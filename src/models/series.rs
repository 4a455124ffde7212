use crate::domain::{MediaKind, SeriesId, UserId, WatchStatus};
use serde::Serialize;

/// Progress counters for one kind of media.
///
/// Used both for a series' totals and for a user's own progress. Anime only
/// track episodes, manga track chapters and volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Progress {
    Anime { episodes: u32 },
    Manga { chapters: u32, volumes: u32 },
}

impl Progress {
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Anime { .. } => MediaKind::Anime,
            Self::Manga { .. } => MediaKind::Manga,
        }
    }

    #[cfg(test)]
    pub const fn empty(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Anime => Self::Anime { episodes: 0 },
            MediaKind::Manga => Self::Manga {
                chapters: 0,
                volumes: 0,
            },
        }
    }
}

/// One user's record against a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchEntry {
    pub user: UserId,
    pub progress: Progress,
    /// 1-10, 0 means the user did not score the series.
    pub score: u8,
    pub status: WatchStatus,
}

impl WatchEntry {
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score > 0
    }
}

/// A title tracked by at least one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: SeriesId,
    pub kind: MediaKind,
    pub title: String,
    pub synonyms: String,
    pub image: String,
    pub totals: Progress,
    pub avg_score: f64,
    /// Only meaningful once the series has a scored watcher.
    pub weighted_score: f64,
    pub watchers: Vec<WatchEntry>,
}

impl Series {
    #[must_use]
    pub fn new(
        id: SeriesId,
        title: impl Into<String>,
        synonyms: impl Into<String>,
        image: impl Into<String>,
        totals: Progress,
    ) -> Self {
        Self {
            id,
            kind: totals.kind(),
            title: title.into(),
            synonyms: synonyms.into(),
            image: image.into(),
            totals,
            avg_score: 0.0,
            weighted_score: 0.0,
            watchers: Vec::new(),
        }
    }

    /// Watchers that gave the series a score.
    pub fn scored_watchers(&self) -> impl Iterator<Item = &WatchEntry> {
        self.watchers.iter().filter(|w| w.is_scored())
    }

    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.scored_watchers().count()
    }
}
