pub mod analysis;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod services;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
pub use error::HarvestError;

pub async fn run() -> anyhow::Result<()> {
    // Credentials may live in a local .env file; real environment wins.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::FindProjects { output } => cli::cmd_find_projects(&config, output).await,
        Commands::PullYarns => cli::cmd_pull_yarns(&config).await,
        Commands::Analyze { top } => cli::cmd_analyze(&config, top),
        Commands::Whoami => cli::cmd_whoami(&config).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}
