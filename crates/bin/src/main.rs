mod backend;
mod cli;
mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, PermissionCommands, RoleCommands, UserCommands};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run(&args).await,
        Some(Commands::Health(args)) => commands::health::run(&args, format).await,
        Some(Commands::User(UserCommands::Add(args))) => commands::user::add(&args, format).await,
        Some(Commands::User(UserCommands::List(args))) => commands::user::list(&args, format).await,
        Some(Commands::Role(RoleCommands::Add(args))) => commands::role::add(&args, format).await,
        Some(Commands::Permission(PermissionCommands::Add(args))) => {
            commands::role::add_permission(&args, format).await
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
