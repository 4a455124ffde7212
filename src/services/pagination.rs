//! Splits a ranking into fixed-size pages and names their output files.

use crate::domain::MediaKind;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub file_name: String,
    /// Positions in the sorted series list covered by this page.
    pub range: Range<usize>,
}

impl Page {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// One entry of the page navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub number: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    kind: MediaKind,
    pages: Vec<Page>,
}

/// Output file name of page `number` (1-based).
#[must_use]
pub fn page_file_name(kind: MediaKind, number: usize) -> String {
    if number <= 1 {
        format!("{kind}.html")
    } else {
        format!("{kind}_{number}.html")
    }
}

impl PagePlan {
    /// Plans `ceil(total / page_size)` pages. A `page_size` of 0 is treated
    /// as 1; configuration validation rejects it before this point.
    #[must_use]
    pub fn new(kind: MediaKind, total: usize, page_size: usize) -> Self {
        let size = page_size.max(1);
        let count = total.div_ceil(size);

        let pages = (1..=count)
            .map(|number| {
                let start = (number - 1) * size;
                Page {
                    number,
                    file_name: page_file_name(kind, number),
                    range: start..(number * size).min(total),
                }
            })
            .collect();

        Self { kind, pages }
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[cfg(test)]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Navigation only exists when there is more than one page.
    #[must_use]
    pub fn needs_navigation(&self) -> bool {
        self.pages.len() > 1
    }

    /// Links to every page with `current` marked active, `None` on
    /// single-page plans.
    #[must_use]
    pub fn navigation(&self, current: usize) -> Option<Vec<NavLink>> {
        if !self.needs_navigation() {
            return None;
        }
        Some(
            self.pages
                .iter()
                .map(|p| NavLink {
                    number: p.number,
                    href: p.file_name.clone(),
                    active: p.number == current,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_has_no_navigation() {
        let plan = PagePlan::new(MediaKind::Anime, 150, 200);
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.pages()[0].file_name, "anime.html");
        assert_eq!(plan.pages()[0].range, 0..150);
        assert!(plan.navigation(1).is_none());
    }

    #[test]
    fn test_multi_page_names_and_ranges() {
        let plan = PagePlan::new(MediaKind::Manga, 401, 200);
        let names: Vec<&str> = plan.pages().iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["manga.html", "manga_2.html", "manga_3.html"]);
        assert_eq!(plan.pages()[1].range, 200..400);
        assert_eq!(plan.pages()[2].range, 400..401);
    }

    #[test]
    fn test_page_sizes_sum_to_total() {
        for (total, size) in [(0, 200), (1, 1), (199, 200), (200, 200), (201, 200), (1000, 7)] {
            let plan = PagePlan::new(MediaKind::Anime, total, size);
            assert_eq!(plan.page_count(), total.div_ceil(size));
            assert_eq!(plan.pages().iter().map(Page::len).sum::<usize>(), total);
            assert!(plan.pages().iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn test_navigation_marks_current_page() {
        let plan = PagePlan::new(MediaKind::Anime, 5, 2);
        let nav = plan.navigation(2).unwrap();
        assert_eq!(nav.len(), 3);
        assert_eq!(nav[0].href, "anime.html");
        assert_eq!(nav[1].href, "anime_2.html");
        assert!(nav[1].active);
        assert!(!nav[0].active && !nav[2].active);
    }

    #[test]
    fn test_empty_plan() {
        let plan = PagePlan::new(MediaKind::Anime, 0, 200);
        assert!(plan.is_empty());
        assert!(!plan.needs_navigation());
    }
}
