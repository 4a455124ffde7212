pub mod catalog;
pub mod series;
pub mod user;

pub use catalog::{Catalog, ExportDelta};
pub use series::{Progress, Series, WatchEntry};
pub use user::{User, UserTally};
