//! Ranking sorter.
//!
//! All three orderings are stable and strictly descending on a single key.
//! Keys are compared exactly; equal keys keep their previous relative order.

use crate::domain::{MediaKind, UserId};
use crate::models::{Catalog, Series, User, WatchEntry};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Descending order on a float key with exact equality as the tie rule.
#[allow(clippy::float_cmp)]
fn descending_f64(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

pub fn sort_series_by_weighted(series: &mut [Series]) {
    series.sort_by(|a, b| descending_f64(a.weighted_score, b.weighted_score));
}

pub fn sort_users_by_scored_count(users: &mut [User]) {
    users.sort_by(|a, b| b.scored_count.cmp(&a.scored_count));
}

pub fn sort_watchers_by_score(watchers: &mut [WatchEntry]) {
    watchers.sort_by(|a, b| b.score.cmp(&a.score));
}

/// The fully ordered model handed to pagination and rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub kind: MediaKind,
    pub global_average: f64,
    pub series: Vec<Series>,
    pub users: Vec<User>,
    #[serde(skip)]
    pub skipped: Vec<PathBuf>,
    #[serde(skip)]
    names: BTreeMap<UserId, String>,
}

impl Ranking {
    /// Orders a scored catalog. The catalog's id order is the prior order
    /// that ties fall back to.
    #[must_use]
    pub fn from_catalog(catalog: Catalog, global_average: f64) -> Self {
        let names = catalog
            .users
            .values()
            .map(|u| (u.id, u.name.clone()))
            .collect();

        let mut series: Vec<Series> = catalog.series.into_values().collect();
        for s in &mut series {
            sort_watchers_by_score(&mut s.watchers);
        }
        sort_series_by_weighted(&mut series);

        let mut users: Vec<User> = catalog.users.into_values().collect();
        sort_users_by_scored_count(&mut users);

        Self {
            kind: catalog.kind,
            global_average,
            series,
            users,
            skipped: catalog.skipped,
            names,
        }
    }

    #[must_use]
    pub fn user_name(&self, id: UserId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn scored_series(&self) -> usize {
        self.series.iter().filter(|s| s.avg_score > 0.0).count()
    }
}
