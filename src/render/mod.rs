//! Report renderer: turns a ranking and its page plan into page fragments.

pub mod html;
pub mod tables;
pub mod template;

pub use tables::{DiffClass, TableRenderer};
pub use template::{DEFAULT_TEMPLATE, PageSlots, Template, TemplateError};

use crate::config::RenderConfig;
use crate::services::pagination::{Page, PagePlan, page_file_name};
use crate::services::ranking::Ranking;

/// One output document before template substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub file_name: String,
    pub slots: PageSlots,
}

/// Renders every planned page.
///
/// An empty ranking still produces a single page with empty tables so the
/// output directory always holds a current `{kind}.html`.
#[must_use]
pub fn render_pages(ranking: &Ranking, plan: &PagePlan, config: &RenderConfig) -> Vec<RenderedPage> {
    let renderer = TableRenderer::new(config, ranking.kind);
    let users = renderer.user_table(ranking).to_string();
    let title = ranking.kind.label().to_string();

    if plan.is_empty() {
        let page = Page {
            number: 1,
            file_name: page_file_name(ranking.kind, 1),
            range: 0..0,
        };
        return vec![RenderedPage {
            file_name: page.file_name.clone(),
            slots: PageSlots {
                title,
                list: renderer.main_table(ranking, &page).to_string(),
                pagination: String::new(),
                users,
            },
        }];
    }

    plan.pages()
        .iter()
        .map(|page| RenderedPage {
            file_name: page.file_name.clone(),
            slots: PageSlots {
                title: title.clone(),
                list: renderer.main_table(ranking, page).to_string(),
                pagination: plan
                    .navigation(page.number)
                    .map(|links| renderer.pagination(&links).to_string())
                    .unwrap_or_default(),
                users: users.clone(),
            },
        })
        .collect()
}
