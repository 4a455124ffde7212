pub mod normalizer;
pub mod pagination;
pub mod ranking;
pub mod report;
pub mod statistics;
pub mod weighting;

pub use pagination::{NavLink, Page, PagePlan};
pub use ranking::Ranking;
pub use report::{ReportError, ReportService, ReportSummary};
