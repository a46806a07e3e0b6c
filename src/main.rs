//! ghrest - GitHub REST API from the command line
//!
//! Search GitHub, browse gists and look up users and repositories.
//!
//! Available as the `ghrest` command.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghrest::cli::commands::{Cli, Commands};
use ghrest::cli::{auth, config, gist, lookup, search};
use ghrest::core::{Auth, Config};
use ghrest::error::Result;
use ghrest::github::GitHub;

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let credentials = cli.token.clone().map(Auth::token).or_else(Auth::from_env);

    // Local commands need neither the network nor a runtime
    let command = match cli.command {
        Commands::Config(args) => return config::handle_config(args.command),
        Commands::Auth(args) => return auth::handle_auth(args.command, credentials.as_ref()),
        command => command,
    };

    let settings = Config::load()?.with_env_overrides()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.worker_threads())
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let github = GitHub::from_config(&settings, credentials)?;
        let result = match command {
            Commands::Search(args) => search::handle_search(&github, args).await,
            Commands::Gist(args) => gist::handle_gist(&github, args.command).await,
            Commands::User { login } => lookup::handle_user(&github, &login).await,
            Commands::Repo { full_name } => lookup::handle_repo(&github, &full_name).await,
            Commands::Config(_) | Commands::Auth(_) => Ok(()),
        };
        github.log_rate_limit();
        result
    })
}
