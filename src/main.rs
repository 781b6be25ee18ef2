//! Tanktrack CLI - Track construction stages of water tanks across building levels

use clap::Parser;
use tanktrack::cli::{commands, Cli, Commands};
use tanktrack::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides the flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(code = e.code(), "command failed");
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> tanktrack::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => commands::init::run(cwd, force).await,
        Some(Commands::List { level, json }) => {
            commands::list::run(cwd, level.as_deref(), json).await
        }
        Some(Commands::Show {
            level,
            id,
            sub,
            json,
        }) => commands::show::run(cwd, &level, &id, sub, json).await,
        Some(Commands::Stages { level, id, sub }) => {
            commands::stages::run(cwd, &level, &id, sub).await
        }
        Some(Commands::Advance {
            level,
            id,
            stage,
            sub,
        }) => commands::advance::run(cwd, &level, &id, &stage, sub).await,
        Some(Commands::Undo {
            level,
            id,
            stage,
            sub,
            yes,
        }) => commands::undo::run(cwd, &level, &id, &stage, sub, yes).await,
        Some(Commands::Report { json }) => commands::report::run(cwd, json).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
