pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod domain;
pub mod library;
pub mod models;
pub mod parser;
pub mod render;
pub mod services;

use clap::CommandFactory;
pub use cli::{Cli, Commands};
pub use config::Config;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        return cli::cmd_init(cli.config.as_deref());
    }

    config.validate()?;

    match command {
        Commands::Generate { kind, skip_fetch } => cli::cmd_generate(&config, kind, skip_fetch).await,
        Commands::Fetch { kind } => cli::cmd_fetch(&config, kind).await,
        Commands::Stats { kind, json, limit } => cli::cmd_stats(&config, kind, json, limit).await,
        Commands::Init => cli::cmd_init(cli.config.as_deref()),
    }
}
