//! Builds the ranking page fragments from a [`Ranking`].
//!
//! Every function returns a fresh [`Element`]; nothing is mutated after it has
//! been handed out.

use crate::config::RenderConfig;
use crate::constants::PLACEHOLDER;
use crate::domain::MediaKind;
use crate::models::{Progress, Series, User, WatchEntry};
use crate::render::html::Element;
use crate::services::pagination::{NavLink, Page};
use crate::services::ranking::Ranking;

/// Sign class of a score difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffClass {
    Equal,
    Negative,
    Positive,
}

impl DiffClass {
    /// Equal when the base value is unscored or the difference is exactly
    /// zero, otherwise by sign.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn classify(diff: f64, base_scored: bool) -> Self {
        if !base_scored || diff == 0.0 {
            Self::Equal
        } else if diff < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    #[must_use]
    pub const fn css_suffix(self) -> &'static str {
        match self {
            Self::Equal => "diff-equal",
            Self::Negative => "diff-negative",
            Self::Positive => "diff-positive",
        }
    }
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

/// `"{done} / {total} {unit}"` for the first non-zero counter, `-` if none.
#[must_use]
pub fn progress_label(progress: &Progress, totals: &Progress) -> String {
    let fmt = |done: u32, total: u32, unit: &str| {
        let total = if total > 0 {
            total.to_string()
        } else {
            PLACEHOLDER.to_string()
        };
        format!("{done} / {total} {unit}")
    };

    match (progress, totals) {
        (Progress::Anime { episodes }, Progress::Anime { episodes: total }) if *episodes > 0 => {
            fmt(*episodes, *total, "E")
        }
        (
            Progress::Manga { chapters, volumes },
            Progress::Manga {
                chapters: total_chapters,
                volumes: total_volumes,
            },
        ) => {
            if *chapters > 0 {
                fmt(*chapters, *total_chapters, "C")
            } else if *volumes > 0 {
                fmt(*volumes, *total_volumes, "V")
            } else {
                PLACEHOLDER.to_string()
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

pub struct TableRenderer<'a> {
    config: &'a RenderConfig,
    kind: MediaKind,
}

impl<'a> TableRenderer<'a> {
    #[must_use]
    pub const fn new(config: &'a RenderConfig, kind: MediaKind) -> Self {
        Self { config, kind }
    }

    fn prefixed(&self, name: &str) -> String {
        format!("{}{name}", self.config.css_prefix)
    }

    fn row<I, N>(cells: I, header: bool, class: String) -> Element
    where
        I: IntoIterator<Item = N>,
        N: Into<crate::render::html::Node>,
    {
        let tag = if header { "th" } else { "td" };
        Element::new("tr")
            .class(class)
            .children(cells.into_iter().map(|c| Element::new(tag).child(c)))
    }

    fn diff_span(&self, class: DiffClass, text: String) -> Element {
        Element::new("span")
            .class(self.prefixed(class.css_suffix()))
            .text(text)
    }

    fn user_row(&self, user: &User, global_average: f64) -> Element {
        let scored = user.has_scores();
        let diff = user.avg_score - global_average;
        let (average, diff_text) = if scored {
            (two_decimals(user.avg_score), two_decimals(diff.abs()))
        } else {
            (PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
        };

        let profile = Element::new("a")
            .attr("title", "Profile")
            .attr(
                "href",
                format!(
                    "{}{}",
                    self.config.profile_url,
                    urlencoding::encode(&user.name)
                ),
            )
            .attr("target", "_blank")
            .text(self.config.profile_label.clone());

        Element::new("tr")
            .class(self.prefixed("info-table-data"))
            .child(Element::new("td").text(user.name.clone()))
            .child(Element::new("td").text(user.scored_count.to_string()))
            .child(Element::new("td").text(average))
            .child(
                Element::new("td")
                    .child(self.diff_span(DiffClass::classify(diff, scored), diff_text)),
            )
            .child(Element::new("td").child(profile))
    }

    /// The user summary table, one row per user in ranking order.
    #[must_use]
    pub fn user_table(&self, ranking: &Ranking) -> Element {
        Element::new("table")
            .attr("id", self.prefixed("info-table"))
            .child(Self::row(
                ["Name", "Series", "Average Score", "Diff", "Profile"],
                true,
                self.prefixed("info-table-head"),
            ))
            .children(
                ranking
                    .users
                    .iter()
                    .map(|u| self.user_row(u, ranking.global_average)),
            )
    }

    fn watcher_row(&self, ranking: &Ranking, series: &Series, entry: &WatchEntry) -> Element {
        let scored = entry.is_scored();
        let diff = f64::from(entry.score) - series.weighted_score;
        let diff_text = if scored {
            two_decimals(diff.abs())
        } else {
            PLACEHOLDER.to_string()
        };
        let score = if scored {
            entry.score.to_string()
        } else {
            PLACEHOLDER.to_string()
        };

        let name = ranking.user_name(entry.user).unwrap_or(PLACEHOLDER);
        let status = entry.status.label(self.kind).unwrap_or(PLACEHOLDER);

        Element::new("tr")
            .child(Element::new("td").text(name))
            .child(Element::new("td").text(status))
            .child(Element::new("td").text(progress_label(&entry.progress, &series.totals)))
            .child(
                Element::new("td")
                    .child(self.diff_span(DiffClass::classify(diff, scored), diff_text)),
            )
            .child(Element::new("td").text(score))
    }

    /// Expandable detail row listing every watcher of `series`.
    #[must_use]
    pub fn series_details(&self, ranking: &Ranking, series: &Series) -> Element {
        let base_url = match self.kind {
            MediaKind::Anime => &self.config.anime_url,
            MediaKind::Manga => &self.config.manga_url,
        };

        let image = Element::new("a")
            .attr("target", "_blank")
            .attr("title", series.title.clone())
            .attr("href", format!("{base_url}{}", series.id))
            .child(
                Element::new("img")
                    .class(self.prefixed("detail-image"))
                    .attr("alt", series.title.clone())
                    .attr("src", series.image.clone()),
            );

        let table = Element::new("table")
            .class(self.prefixed("detail-table"))
            .child(Self::row(
                ["User", "Status", self.kind.progress_header(), "Diff", "Score"],
                true,
                String::new(),
            ))
            .children(
                series
                    .watchers
                    .iter()
                    .map(|w| self.watcher_row(ranking, series, w)),
            );

        Element::new("tr")
            .class(self.prefixed("main-table-details"))
            .child(
                Element::new("td").attr("colspan", "4").child(
                    Element::new("div")
                        .class(self.prefixed("detail-wrapper"))
                        .child(image)
                        .child(table),
                ),
            )
    }

    fn series_row(rank: usize, series: &Series, class: String) -> Element {
        let avg = if series.avg_score > 0.0 {
            two_decimals(series.avg_score)
        } else {
            PLACEHOLDER.to_string()
        };
        let weighted = if series.weighted_score > 0.0 {
            two_decimals(series.weighted_score)
        } else {
            PLACEHOLDER.to_string()
        };

        Self::row(
            [rank.to_string(), series.title.clone(), avg, weighted],
            false,
            class,
        )
    }

    /// Main ranking table for the series positions covered by `page`.
    ///
    /// Ranks are global: the first row of page 2 continues after page 1.
    #[must_use]
    pub fn main_table(&self, ranking: &Ranking, page: &Page) -> Element {
        let end = page.range.end.min(ranking.series.len());
        let start = page.range.start.min(end);

        ranking.series[start..end].iter().enumerate().fold(
            Element::new("table")
                .attr("id", self.prefixed("main-table"))
                .child(Self::row(
                    ["Rank", "Name", "Score", "Weighted Score"],
                    true,
                    self.prefixed("main-table-head"),
                )),
            |table, (offset, series)| {
                table
                    .child(Self::series_row(
                        start + offset + 1,
                        series,
                        self.prefixed("main-table-data"),
                    ))
                    .child(self.series_details(ranking, series))
            },
        )
    }

    /// Page navigation, one link per page.
    #[must_use]
    pub fn pagination(&self, links: &[NavLink]) -> Element {
        let entry_class = self.prefixed("pagination-entry");
        let center = Element::new("div")
            .attr("id", self.prefixed("pagination-center"))
            .children(links.iter().map(|link| {
                let class = if link.active {
                    format!("{entry_class} active")
                } else {
                    entry_class.clone()
                };
                Element::new("a")
                    .class(class)
                    .attr("href", link.href.clone())
                    .text(link.number.to_string())
            }));

        Element::new("div")
            .attr("id", self.prefixed("pagination-wrapper"))
            .child(center)
    }
}
