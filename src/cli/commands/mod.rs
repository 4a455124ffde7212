mod fetch;
mod generate;
mod init;
mod stats;

pub use fetch::cmd_fetch;
pub use generate::cmd_generate;
pub use init::cmd_init;
pub use stats::cmd_stats;
