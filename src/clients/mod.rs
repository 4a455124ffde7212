pub mod mal;

pub use mal::{FetchReport, MalExportClient};
