use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cdn-purge-web")]
#[command(about = "Operator front-end for CDN cache purges.")]
pub struct CommandLine {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CDN_PURGE_CONFIG", default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Load and validate the configuration, verify the API token, then exit
    #[command(alias = "check")]
    CheckConfig,
    /// Read a password from stdin and print a salted PBKDF2 hash for `[[auth.users]]`
    HashPassword,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
