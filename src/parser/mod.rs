pub mod export;

pub use export::{ExportError, parse_export, read_export};
