pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "showreel")]
#[command(about = "Showreel CLI - Command-line client for the Showreel media platform")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Remote name to use instead of the current remote")]
    pub remote: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Remote server management")]
    Remote {
        #[command(subcommand)]
        cmd: commands::remote::RemoteCommands,
    },

    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Browse media processes and their input schemas")]
    Process {
        #[command(subcommand)]
        cmd: commands::process::ProcessCommands,
    },

    #[command(about = "Create and monitor media-processing jobs")]
    Job {
        #[command(subcommand)]
        cmd: commands::job::JobCommands,
    },

    #[command(about = "Browse generated job outputs")]
    Output {
        #[command(subcommand)]
        cmd: commands::output::OutputCommands,
    },

    #[command(about = "Show the tenant metrics summary")]
    Dashboard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let remote_override = cli.remote.clone();

    match cli.command {
        Commands::Remote { cmd } => commands::remote::handle(cmd, output_format).await,
        Commands::Auth { cmd } => {
            commands::auth::handle(cmd, remote_override, output_format).await
        }
        Commands::Process { cmd } => {
            commands::process::handle(cmd, remote_override, output_format).await
        }
        Commands::Job { cmd } => commands::job::handle(cmd, remote_override, output_format).await,
        Commands::Output { cmd } => {
            commands::output::handle(cmd, remote_override, output_format).await
        }
        Commands::Dashboard => commands::dashboard::handle(remote_override, output_format).await,
    }
}
