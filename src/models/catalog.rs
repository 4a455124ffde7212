//! Merged view over every export of one media kind.
//!
//! Each export file is parsed into an [`ExportDelta`] that owns its user and
//! entries. Deltas are folded into a [`Catalog`] one at a time, so no record is
//! ever shared between two files while they are being read.

use crate::domain::{MediaKind, SeriesId, UserId};
use crate::models::{Series, User, WatchEntry};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Everything one export file contributes to the catalog.
#[derive(Debug, Clone)]
pub struct ExportDelta {
    pub source: PathBuf,
    pub user: User,
    /// Series metadata as seen in this export, paired with the user's entry.
    pub entries: Vec<(Series, WatchEntry)>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub kind: MediaKind,
    pub series: BTreeMap<SeriesId, Series>,
    pub users: BTreeMap<UserId, User>,
    /// Export files that were not merged.
    pub skipped: Vec<PathBuf>,
}

impl Catalog {
    #[must_use]
    pub const fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            series: BTreeMap::new(),
            users: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Folds one export into the catalog.
    ///
    /// The first export seen for a series provides its metadata. A second
    /// export for a user id that is already present is skipped entirely so
    /// the user's scores are not counted twice.
    #[must_use]
    pub fn merge(mut self, delta: ExportDelta) -> Self {
        if self.users.contains_key(&delta.user.id) {
            warn!(
                event = "duplicate_export",
                user = %delta.user.name,
                user_id = %delta.user.id,
                path = %delta.source.display(),
                "Skipping second export for the same user"
            );
            self.skipped.push(delta.source);
            return self;
        }

        for (series, entry) in delta.entries {
            if series.kind != self.kind {
                warn!(
                    event = "kind_mismatch",
                    series_id = %series.id,
                    expected = %self.kind,
                    found = %series.kind,
                    "Ignoring entry of the wrong kind"
                );
                continue;
            }
            self.series
                .entry(series.id)
                .or_insert(series)
                .watchers
                .push(entry);
        }

        self.users.insert(delta.user.id, delta.user);
        self
    }

    /// Records an export that could not be parsed.
    #[must_use]
    pub fn skip(mut self, source: PathBuf) -> Self {
        self.skipped.push(source);
        self
    }

    #[cfg(test)]
    pub fn user_name(&self, id: UserId) -> Option<&str> {
        self.users.get(&id).map(|u| u.name.as_str())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchStatus;
    use crate::models::{Progress, UserTally};

    fn delta(user_id: u64, name: &str, scores: &[(u32, u8)]) -> ExportDelta {
        let tally = scores
            .iter()
            .fold(UserTally::default(), |t, (_, s)| t.record(*s));
        ExportDelta {
            source: PathBuf::from(format!("{name}.xml")),
            user: tally.finish(UserId::new(user_id), name),
            entries: scores
                .iter()
                .map(|(id, score)| {
                    (
                        Series::new(
                            SeriesId::new(*id),
                            format!("Series {id}"),
                            "",
                            "",
                            Progress::Anime { episodes: 12 },
                        ),
                        WatchEntry {
                            user: UserId::new(user_id),
                            progress: Progress::Anime { episodes: 12 },
                            score: *score,
                            status: WatchStatus::Completed,
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_merge_shares_series_between_users() {
        let catalog = Catalog::new(MediaKind::Anime)
            .merge(delta(1, "Areko", &[(10, 8), (20, 5)]))
            .merge(delta(2, "belarion", &[(10, 9)]));

        assert_eq!(catalog.users.len(), 2);
        assert_eq!(catalog.series.len(), 2);
        assert_eq!(catalog.series[&SeriesId::new(10)].watchers.len(), 2);
        assert_eq!(catalog.user_name(UserId::new(2)), Some("belarion"));
    }

    #[test]
    fn test_duplicate_user_is_skipped() {
        let catalog = Catalog::new(MediaKind::Anime)
            .merge(delta(1, "Areko", &[(10, 8)]))
            .merge(delta(1, "Areko", &[(10, 8)]));

        assert_eq!(catalog.series[&SeriesId::new(10)].watchers.len(), 1);
        assert_eq!(catalog.skipped, vec![PathBuf::from("Areko.xml")]);
    }

    #[test]
    fn test_wrong_kind_entries_are_ignored() {
        let catalog = Catalog::new(MediaKind::Manga).merge(delta(1, "Jun", &[(10, 8)]));

        assert!(catalog.series.is_empty());
        assert_eq!(catalog.users.len(), 1);
    }
}
