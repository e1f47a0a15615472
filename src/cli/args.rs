//! Argument parsing (clap derive).

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Landra - property management API for landlords
#[derive(Parser, Debug)]
#[command(name = "landra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level, ignoring RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations, then serve the API
    Serve(ServeArgs),

    /// Inspect or change the database schema
    Migrate(MigrateArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// TCP port
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "SERVER_PORT")]
    pub port: u16,
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Apply everything pending
    Up,
    /// Revert the newest applied migration
    Down,
    /// List migrations as applied or pending
    Status,
    /// Drop all tables and apply every migration again
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["landra", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.host, DEFAULT_SERVER_HOST),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_migrate_action() {
        let cli = Cli::try_parse_from(["landra", "-v", "migrate", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
