use clap::Parser;
use listarr::{Cli, Commands, Config, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // `init` may be pointed at a config file it has yet to create.
    let config = match (&cli.command, cli.config.as_deref()) {
        (Some(Commands::Init), Some(path)) if !path.exists() => Config::default(),
        (_, path) => Config::load_with_override(path)?,
    };
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
