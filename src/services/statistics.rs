//! Score statistics over a catalog.
//!
//! Unscored entries (score 0) are not votes: they count neither in the
//! numerator nor in the denominator of any average.

use crate::models::Series;

/// Mean of the strictly positive watcher scores, 0 when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn series_average(series: &Series) -> f64 {
    let (sum, count) = series
        .scored_watchers()
        .fold((0u64, 0u64), |(sum, count), w| (sum + u64::from(w.score), count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Mean of all series averages that are above zero, 0 when none qualify.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn global_average<I>(averages: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = averages
        .into_iter()
        .filter(|avg| *avg > 0.0)
        .fold((0.0, 0u64), |(sum, count), avg| (sum + avg, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}
