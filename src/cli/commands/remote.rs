use clap::Subcommand;
use serde_json::json;
use url::Url;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::store::*;

#[derive(Subcommand)]
pub enum RemoteCommands {
    #[command(about = "Add a remote server")]
    Add {
        #[arg(help = "Remote name")]
        name: String,
        #[arg(help = "Server base URL, e.g. https://api.showreel.example")]
        url: String,
        #[arg(long, default_value = "", help = "Description")]
        description: String,
    },

    #[command(about = "List configured remotes")]
    List,

    #[command(about = "Switch the current remote")]
    Use {
        #[arg(help = "Remote name")]
        name: String,
    },

    #[command(about = "Remove a remote")]
    Remove {
        #[arg(help = "Remote name")]
        name: String,
    },
}

pub async fn handle(cmd: RemoteCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        RemoteCommands::Add {
            name,
            url,
            description,
        } => {
            // Validate before persisting so a typo does not poison later calls
            Url::parse(&url).map_err(|e| anyhow::anyhow!("invalid url '{}': {}", url, e))?;

            let mut config = load_remote_config()?;
            if config.remotes.contains_key(&name) {
                anyhow::bail!("remote '{}' already exists", name);
            }

            config
                .remotes
                .insert(name.clone(), RemoteInfo::new(url.clone(), description));
            save_remote_config(&config)?;

            // First remote becomes current automatically
            let mut env_config = load_environment_config()?;
            if env_config.current_remote.is_none() {
                env_config.current_remote = Some(name.clone());
                save_environment_config(&env_config)?;
            }

            output_success(
                &output_format,
                &format!("Remote '{}' added", name),
                Some(json!({ "remote": name, "url": url })),
            )
        }
        RemoteCommands::List => {
            let config = load_remote_config()?;
            let env_config = load_environment_config()?;

            if config.remotes.is_empty() {
                return output_empty_collection(&output_format, "remotes", "No remotes configured");
            }

            match output_format {
                OutputFormat::Json => {
                    let remotes: Vec<_> = sorted_remotes(&config)
                        .into_iter()
                        .map(|(name, info)| {
                            json!({
                                "name": name,
                                "url": info.url,
                                "description": info.description,
                                "added_at": info.added_at,
                                "current": env_config.current_remote.as_ref() == Some(name)
                            })
                        })
                        .collect();
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "remotes": remotes }))?
                    );
                }
                OutputFormat::Text => {
                    println!("{:<15} {:<40} {}", "NAME", "URL", "DESCRIPTION");
                    println!("{}", "-".repeat(75));
                    for (name, info) in sorted_remotes(&config) {
                        let current_marker = if env_config.current_remote.as_ref() == Some(name) {
                            "*"
                        } else {
                            " "
                        };
                        println!(
                            "{}{:<14} {:<40} {}",
                            current_marker, name, info.url, info.description
                        );
                    }
                }
            }

            Ok(())
        }
        RemoteCommands::Use { name } => {
            let config = load_remote_config()?;
            if !config.remotes.contains_key(&name) {
                anyhow::bail!("remote '{}' not found", name);
            }

            let mut env_config = load_environment_config()?;
            env_config.current_remote = Some(name.clone());
            save_environment_config(&env_config)?;

            output_success(
                &output_format,
                &format!("Switched to remote '{}'", name),
                Some(json!({ "current_remote": name })),
            )
        }
        RemoteCommands::Remove { name } => {
            let mut config = load_remote_config()?;
            if config.remotes.remove(&name).is_none() {
                anyhow::bail!("remote '{}' not found", name);
            }
            save_remote_config(&config)?;

            let mut env_config = load_environment_config()?;
            if env_config.current_remote.as_deref() == Some(name.as_str()) {
                env_config.current_remote = None;
                save_environment_config(&env_config)?;
            }

            output_success(
                &output_format,
                &format!("Remote '{}' removed", name),
                None,
            )
        }
    }
}

/// Remotes in name order. The backing map has no stable iteration order,
/// so listings sort before printing.
fn sorted_remotes(config: &RemoteConfig) -> Vec<(&String, &RemoteInfo)> {
    let mut remotes: Vec<_> = config.remotes.iter().collect();
    remotes.sort_by(|(a, _), (b, _)| a.cmp(b));
    remotes
}
