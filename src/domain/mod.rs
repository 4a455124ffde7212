//! Domain primitives shared by every pipeline stage.
//!
//! Catalog and user ids are wrapped in newtypes so a series id can never be
//! passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog identifier of a series in the source database.
///
/// # Examples
///
/// ```rust
/// use listarr::domain::SeriesId;
///
/// let id = SeriesId::new(5114);
/// assert_eq!(id.value(), 5114);
/// assert_eq!(id.to_string(), "5114");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(u32);

impl SeriesId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SeriesId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Numeric account identifier of an exporting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// The two list types a user can export.
///
/// The kind decides which progress unit applies (episodes vs. chapters and
/// volumes) and is part of every output file name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    pub const ALL: [Self; 2] = [Self::Anime, Self::Manga];

    /// Lowercase name used in export URLs and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }

    /// Capitalized name shown in page titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anime => "Anime",
            Self::Manga => "Manga",
        }
    }

    /// Column header for the per-user progress column.
    #[must_use]
    pub const fn progress_header(self) -> &'static str {
        match self {
            Self::Anime => "Seen",
            Self::Manga => "Read",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            other => anyhow::bail!("Unknown media kind: {other}"),
        }
    }
}

/// List status of a single entry, decoded from the export's numeric code.
///
/// Code 5 is not used by the source site's enumeration. It and any other
/// unexpected code stay visible as [`WatchStatus::Unknown`] instead of being
/// folded into one of the known states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WatchStatus {
    InProgress,
    Completed,
    OnHold,
    Dropped,
    Planned,
    Unknown(u32),
}

impl WatchStatus {
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::InProgress,
            2 => Self::Completed,
            3 => Self::OnHold,
            4 => Self::Dropped,
            6 => Self::Planned,
            other => Self::Unknown(other),
        }
    }

    /// Display label for the given kind, `None` for unknown codes.
    #[must_use]
    pub const fn label(self, kind: MediaKind) -> Option<&'static str> {
        match (self, kind) {
            (Self::InProgress, MediaKind::Anime) => Some("Watching"),
            (Self::InProgress, MediaKind::Manga) => Some("Reading"),
            (Self::Completed, _) => Some("Completed"),
            (Self::OnHold, _) => Some("On-Hold"),
            (Self::Dropped, _) => Some("Dropped"),
            (Self::Planned, MediaKind::Anime) => Some("Plan to Watch"),
            (Self::Planned, MediaKind::Manga) => Some("Plan to Read"),
            (Self::Unknown(_), _) => None,
        }
    }
}
