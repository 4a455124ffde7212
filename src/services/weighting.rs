//! Damped-mean ("weighted") score.
//!
//! `weighted = v/(v+m) * s + m/(v+m) * c` where `s` is the series average,
//! `v` its vote count, `c` the global average and `m` the minimum-votes
//! constant. Few votes pull the score towards `c`, many votes towards `s`.

use crate::models::Catalog;
use crate::services::statistics::{global_average, series_average};
use tracing::debug;

pub const DEFAULT_MIN_VOTES: f64 = 1.0;

/// Weighted score of one series. Returns 0 for unscored series.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weighted_score(average: f64, votes: usize, global: f64, min_votes: f64) -> f64 {
    if average <= 0.0 {
        return 0.0;
    }
    let v = votes as f64;
    let m = min_votes;
    (v / (v + m)) * average + (m / (v + m)) * global
}

/// Recomputes every series average, the global average and every weighted
/// score from the catalog's current entries.
///
/// Returns the scored catalog together with its global average.
#[must_use]
pub fn score_catalog(mut catalog: Catalog, min_votes: f64) -> (Catalog, f64) {
    for series in catalog.series.values_mut() {
        series.avg_score = series_average(series);
    }

    let global = global_average(catalog.series.values().map(|s| s.avg_score));

    for series in catalog.series.values_mut() {
        series.weighted_score =
            weighted_score(series.avg_score, series.vote_count(), global, min_votes);
    }

    debug!(
        kind = %catalog.kind,
        global_average = global,
        series = catalog.series.len(),
        "Scored catalog"
    );

    (catalog, global)
}
