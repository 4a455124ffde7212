//! Command-line interface for listarr

mod commands;

use crate::domain::MediaKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// listarr - community rankings from merged `MyAnimeList` exports
#[derive(Parser)]
#[command(name = "listarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch exports and write the ranking pages
    #[command(alias = "g")]
    Generate {
        /// Only this kind (default: both)
        #[arg(long, value_enum)]
        kind: Option<MediaKind>,
        /// Use the exports already in the temp directory
        #[arg(long)]
        skip_fetch: bool,
    },

    /// Only download the exports of the configured users
    Fetch {
        #[arg(long, value_enum)]
        kind: Option<MediaKind>,
    },

    /// Print the top of the ranking without writing pages
    #[command(alias = "s")]
    Stats {
        #[arg(long, value_enum)]
        kind: Option<MediaKind>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Number of series to show
        #[arg(long, default_value_t = crate::constants::limits::DEFAULT_STATS_LIMIT)]
        limit: usize,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

/// Kinds selected by an optional `--kind` flag.
#[must_use]
pub fn selected_kinds(kind: Option<MediaKind>) -> Vec<MediaKind> {
    kind.map_or_else(|| MediaKind::ALL.to_vec(), |k| vec![k])
}

pub use commands::*;
