use crate::domain::UserId;
use serde::Serialize;

/// An exporting user, finalized after all of their entries were read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Number of entries with a score above zero.
    pub scored_count: u32,
    /// Mean of the scored entries, 0 when there are none.
    pub avg_score: f64,
}

impl User {
    #[must_use]
    pub const fn has_scores(&self) -> bool {
        self.scored_count > 0
    }
}

/// Running score sum for one user while their export is being read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserTally {
    count: u32,
    sum: u64,
}

impl UserTally {
    /// Records one entry score; unscored (0) entries are ignored.
    #[must_use]
    pub const fn record(self, score: u8) -> Self {
        if score == 0 {
            return self;
        }
        Self {
            count: self.count + 1,
            sum: self.sum + score as u64,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / f64::from(self.count)
        }
    }

    #[must_use]
    pub fn finish(self, id: UserId, name: impl Into<String>) -> User {
        User {
            id,
            name: name.into(),
            scored_count: self.count,
            avg_score: self.average(),
        }
    }
}
