//! CLI argument definitions for the Roster binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Backend {
    /// SQLite database (default)
    Sqlite,
    /// PostgreSQL database (for shared deployments)
    Postgres,
    /// In-memory with JSON persistence (for development and ephemeral deployments)
    Inmemory,
}

/// Roster user directory server
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Roster: users, roles and permissions over HTTP")]
#[command(version)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Roster server
    Serve(ServeArgs),
    /// Check health of a running Roster server
    Health(HealthArgs),
    /// Manage users
    #[command(subcommand)]
    User(UserCommands),
    /// Manage roles
    #[command(subcommand)]
    Role(RoleCommands),
    /// Manage permissions
    #[command(subcommand)]
    Permission(PermissionCommands),
}

/// Shared backend configuration for commands that open the store
#[derive(clap::Args, Debug, Clone)]
pub struct BackendConfig {
    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "ROSTER_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores roster.db
    /// For InMemory: stores roster.json
    #[arg(short = 'D', long, env = "ROSTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "ROSTER_POSTGRES_URL")]
    pub postgres_url: Option<String>,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "ROSTER_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "ROSTER_HOST")]
    pub host: String,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user with a hashed password
    Add(UserAddArgs),
    /// List all users
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct UserAddArgs {
    /// Email address (login identifier)
    #[arg(long)]
    pub email: String,

    /// Password, read from the environment when not given
    #[arg(long, env = "ROSTER_USER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Identifier of the user's role
    #[arg(long)]
    pub role: String,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub backend_config: BackendConfig,
}

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// Create a role
    Add(RoleAddArgs),
}

#[derive(clap::Args, Debug)]
pub struct RoleAddArgs {
    /// Role identifier (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Permission identifiers granted by this role
    #[arg(short, long = "permission")]
    pub permissions: Vec<String>,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}

#[derive(Subcommand, Debug)]
pub enum PermissionCommands {
    /// Create a permission
    Add(PermissionAddArgs),
}

#[derive(clap::Args, Debug)]
pub struct PermissionAddArgs {
    /// Permission identifier (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}
