use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::session::store;
use crate::session::Session;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the current remote under a tenant slug")]
    Login {
        #[arg(help = "Tenant slug")]
        tenant: String,
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (falls back to SHOWREEL_PASSWORD)")]
        password: Option<String>,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information from the server")]
    Whoami,
}

pub async fn handle(
    cmd: AuthCommands,
    remote_override: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login {
            tenant,
            username,
            password,
        } => {
            let password = match password.or_else(|| std::env::var("SHOWREEL_PASSWORD").ok()) {
                Some(password) => password,
                None => anyhow::bail!("no password given: pass --password or set SHOWREEL_PASSWORD"),
            };

            let client = anon_client(remote_override)?;
            let login = client.login(&tenant, &username, &password).await?;

            let session = Session::from_login(
                login.token,
                login.user.tenant.clone(),
                login.user.username.clone(),
                login.user.role.clone(),
            );
            store::save_session(&session)?;

            output_success(
                &output_format,
                &format!("Logged in to '{}' as {}", session.tenant, session.username),
                Some(json!({
                    "tenant": session.tenant,
                    "username": session.username,
                    "role": session.role,
                    "expires_at": session.expires_at,
                })),
            )
        }
        AuthCommands::Logout => {
            store::clear_session()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            match store::load_session()? {
                Some(session) => match output_format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&json!({
                                "logged_in": true,
                                "tenant": session.tenant,
                                "username": session.username,
                                "role": session.role,
                                "expires_at": session.expires_at,
                                "saved_at": session.saved_at,
                            }))?
                        );
                    }
                    OutputFormat::Text => {
                        println!("Logged in to tenant '{}' as {}", session.tenant, session.username);
                        println!("Role: {}", session.role);
                        match session.expires_at {
                            Some(expires_at) => {
                                println!("Token expires: {}", expires_at.format("%Y-%m-%d %H:%M:%S UTC"))
                            }
                            None => println!("Token expires: unknown"),
                        }
                    }
                },
                None => match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&json!({"logged_in": false}))?);
                    }
                    OutputFormat::Text => {
                        println!("Not logged in");
                    }
                },
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let (client, _session) = authed_client(remote_override)?;
            let user = client.whoami().await?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "user": user }))?);
                }
                OutputFormat::Text => {
                    println!("User: {} ({})", user.username, user.id);
                    println!("Tenant: {}", user.tenant);
                    println!("Role: {}", user.role);
                }
            }
            Ok(())
        }
    }
}
