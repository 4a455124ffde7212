//! Typed schema for MyAnimeList list exports (`malappinfo` XML).
//!
//! Anime and manga exports share the user block but carry different entry
//! elements, so each kind has its own document struct. Unknown elements are
//! ignored. Counter fields are read leniently: a blank or non-numeric value
//! counts as zero, matching how the site itself fills unused counters.

use crate::domain::{MediaKind, SeriesId, UserId, WatchStatus};
use crate::models::{ExportDelta, Progress, Series, UserTally, WatchEntry};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_SCORE: u32 = 10;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to read export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed export {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Export {path} has no usable user block")]
    MissingUser { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct UserBlock {
    #[serde(default, deserialize_with = "lenient_u64")]
    user_id: u64,
    #[serde(default)]
    user_name: String,
}

#[derive(Debug, Deserialize)]
struct AnimeExport {
    myinfo: Option<UserBlock>,
    #[serde(default)]
    anime: Vec<AnimeRecord>,
}

#[derive(Debug, Deserialize)]
struct MangaExport {
    myinfo: Option<UserBlock>,
    #[serde(default)]
    manga: Vec<MangaRecord>,
}

#[derive(Debug, Deserialize)]
struct AnimeRecord {
    #[serde(default, deserialize_with = "lenient_u32")]
    series_animedb_id: u32,
    #[serde(default)]
    series_title: String,
    #[serde(default)]
    series_synonyms: String,
    #[serde(default)]
    series_image: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    series_episodes: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_watched_episodes: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_score: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_status: u32,
}

#[derive(Debug, Deserialize)]
struct MangaRecord {
    #[serde(default, deserialize_with = "lenient_u32")]
    series_mangadb_id: u32,
    #[serde(default)]
    series_title: String,
    #[serde(default)]
    series_synonyms: String,
    #[serde(default)]
    series_image: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    series_chapters: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    series_volumes: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_read_chapters: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_read_volumes: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_score: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    my_status: u32,
}

/// Kind-independent view of one export entry.
struct RawEntry {
    id: u32,
    title: String,
    synonyms: String,
    image: String,
    totals: Progress,
    progress: Progress,
    score: u32,
    status: u32,
}

impl From<AnimeRecord> for RawEntry {
    fn from(r: AnimeRecord) -> Self {
        Self {
            id: r.series_animedb_id,
            title: r.series_title,
            synonyms: r.series_synonyms,
            image: r.series_image,
            totals: Progress::Anime {
                episodes: r.series_episodes,
            },
            progress: Progress::Anime {
                episodes: r.my_watched_episodes,
            },
            score: r.my_score,
            status: r.my_status,
        }
    }
}

impl From<MangaRecord> for RawEntry {
    fn from(r: MangaRecord) -> Self {
        Self {
            id: r.series_mangadb_id,
            title: r.series_title,
            synonyms: r.series_synonyms,
            image: r.series_image,
            totals: Progress::Manga {
                chapters: r.series_chapters,
                volumes: r.series_volumes,
            },
            progress: Progress::Manga {
                chapters: r.my_read_chapters,
                volumes: r.my_read_volumes,
            },
            score: r.my_score,
            status: r.my_status,
        }
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0))
}

/// Reads and parses one export file.
///
/// # Errors
///
/// Returns an [`ExportError`] when the file cannot be read, is not valid XML
/// for the given kind, or lacks a user block.
pub fn read_export(path: &Path, kind: MediaKind) -> Result<ExportDelta, ExportError> {
    let xml = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&xml, kind, path)
}

/// Parses an export document into the delta it contributes to a catalog.
///
/// # Errors
///
/// See [`read_export`].
pub fn parse_export(xml: &str, kind: MediaKind, source: &Path) -> Result<ExportDelta, ExportError> {
    let xml_error = |e: quick_xml::DeError| ExportError::Xml {
        path: source.to_path_buf(),
        source: e,
    };

    let (user, raw): (Option<UserBlock>, Vec<RawEntry>) = match kind {
        MediaKind::Anime => {
            let doc: AnimeExport = quick_xml::de::from_str(xml).map_err(xml_error)?;
            (doc.myinfo, doc.anime.into_iter().map(RawEntry::from).collect())
        }
        MediaKind::Manga => {
            let doc: MangaExport = quick_xml::de::from_str(xml).map_err(xml_error)?;
            (doc.myinfo, doc.manga.into_iter().map(RawEntry::from).collect())
        }
    };

    let user = user
        .filter(|u| u.user_id > 0 && !u.user_name.trim().is_empty())
        .ok_or_else(|| ExportError::MissingUser {
            path: source.to_path_buf(),
        })?;
    let user_id = UserId::new(user.user_id);

    let mut tally = UserTally::default();
    let mut entries = Vec::with_capacity(raw.len());

    for entry in raw {
        if entry.id == 0 {
            warn!(
                event = "export_entry_skipped",
                user = %user.user_name,
                title = %entry.title,
                "Entry has no catalog id"
            );
            continue;
        }

        let score = if entry.score > MAX_SCORE {
            warn!(
                event = "export_score_clamped",
                user = %user.user_name,
                series_id = entry.id,
                score = entry.score,
                "Score above {MAX_SCORE}, clamping"
            );
            MAX_SCORE
        } else {
            entry.score
        };
        #[allow(clippy::cast_possible_truncation)]
        let score = score as u8;
        tally = tally.record(score);

        let series = Series::new(
            SeriesId::new(entry.id),
            entry.title,
            entry.synonyms,
            entry.image,
            entry.totals,
        );
        let watch = WatchEntry {
            user: user_id,
            progress: entry.progress,
            score,
            status: WatchStatus::from_code(entry.status),
        };
        entries.push((series, watch));
    }

    debug!(
        user = %user.user_name,
        kind = %kind,
        entries = entries.len(),
        scored = tally.count(),
        "Parsed export"
    );

    Ok(ExportDelta {
        source: source.to_path_buf(),
        user: tally.finish(user_id, user.user_name.trim()),
        entries,
    })
}
