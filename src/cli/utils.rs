use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::session::store::{load_environment_config, load_remote_config, load_session, RemoteInfo};
use crate::session::{ClearOnUnauthorized, Session};
use crate::config;
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(obj) = response.as_object_mut() {
                    obj.extend(extra);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ collection_name: [] }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Resolve the remote to talk to: an explicit `--remote` override, else
/// the configured current remote, else the config default.
pub fn resolve_remote(remote_override: Option<String>) -> anyhow::Result<RemoteInfo> {
    let remote_config = load_remote_config()?;

    let name = match remote_override {
        Some(name) => name,
        None => match load_environment_config()?.current_remote {
            Some(current) => current,
            None => match &config::config().session.default_remote {
                Some(default) => default.clone(),
                None => anyhow::bail!(
                    "no remote selected. Add one with 'showreel remote add <name> <url>'"
                ),
            },
        },
    };

    remote_config
        .remotes
        .get(&name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("remote '{}' not found", name))
}

/// Client with no credentials, for login and health checks.
pub fn anon_client(remote_override: Option<String>) -> anyhow::Result<ApiClient> {
    let remote = resolve_remote(remote_override)?;
    Ok(ApiClient::new(&remote.url)?)
}

/// Client carrying the stored session token, with the session-clearing
/// guard installed so a 401/403 logs the user out locally.
pub fn authed_client(remote_override: Option<String>) -> anyhow::Result<(ApiClient, Session)> {
    let session = load_session()?.ok_or(crate::error::ClientError::NotLoggedIn)?;
    let remote = resolve_remote(remote_override)?;
    let client = ApiClient::new(&remote.url)?
        .with_token(session.token.clone())
        .with_guard(Arc::new(ClearOnUnauthorized));
    Ok((client, session))
}
