/// Shown wherever a value does not exist (no score, no total, unknown status).
pub const PLACEHOLDER: &str = "-";

pub const EXPORT_EXTENSION: &str = "xml";

pub mod slots {

    pub const TYPE: &str = "{$TYPE}";

    pub const LIST: &str = "{$LIST}";

    pub const PAGINATION: &str = "{$PAGINATION}";

    pub const USER: &str = "{$USER}";
}

pub mod limits {

    pub const DEFAULT_STATS_LIMIT: usize = 20;
}
