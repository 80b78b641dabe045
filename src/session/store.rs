// File-backed persistence for the CLI: stored session plus the remote
// server registry, as JSON files under the user config dir.
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteInfo {
    pub url: String,
    pub description: String,
    pub added_at: DateTime<Utc>,
}

impl RemoteInfo {
    pub fn new(url: String, description: String) -> Self {
        Self {
            url,
            description,
            added_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub remotes: HashMap<String, RemoteInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub current_remote: Option<String>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("SHOWREEL_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("showreel").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_remote_config() -> anyhow::Result<RemoteConfig> {
    let remote_file = get_config_dir()?.join("remotes.json");

    if !remote_file.exists() {
        return Ok(RemoteConfig::default());
    }

    let content = fs::read_to_string(remote_file)?;
    let config: RemoteConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_remote_config(config: &RemoteConfig) -> anyhow::Result<()> {
    let remote_file = get_config_dir()?.join("remotes.json");
    let content = serde_json::to_string_pretty(config)?;
    fs::write(remote_file, content)?;
    Ok(())
}

pub fn load_environment_config() -> anyhow::Result<EnvironmentConfig> {
    let env_file = get_config_dir()?.join("env.json");

    if !env_file.exists() {
        return Ok(EnvironmentConfig::default());
    }

    let content = fs::read_to_string(env_file)?;
    let config: EnvironmentConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_environment_config(config: &EnvironmentConfig) -> anyhow::Result<()> {
    let env_file = get_config_dir()?.join("env.json");
    let content = serde_json::to_string_pretty(config)?;
    fs::write(env_file, content)?;
    Ok(())
}

/// Rehydrate the persisted session. A missing file is `None`; an expired
/// session is cleared on the spot and also reported as `None`, so every
/// caller sees the same logged-out state.
pub fn load_session() -> anyhow::Result<Option<Session>> {
    let session_file = get_config_dir()?.join("session.json");

    if !session_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&session_file)?;
    let session: Session = match serde_json::from_str(&content) {
        Ok(session) => session,
        Err(e) => {
            // A corrupt session file should not wedge the CLI
            tracing::warn!("discarding unreadable session file: {}", e);
            fs::remove_file(&session_file)?;
            return Ok(None);
        }
    };

    if session.is_expired() {
        tracing::info!("stored session for '{}' has expired", session.tenant);
        fs::remove_file(&session_file)?;
        return Ok(None);
    }

    Ok(Some(session))
}

pub fn save_session(session: &Session) -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");
    let content = serde_json::to_string_pretty(session)?;
    fs::write(session_file, content)?;
    Ok(())
}

pub fn clear_session() -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");
    if session_file.exists() {
        fs::remove_file(session_file)?;
    }
    Ok(())
}
