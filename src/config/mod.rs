use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Tokens within this many seconds of expiry are treated as expired,
    /// so a request does not start with a token that dies in flight.
    pub expiry_leeway_secs: i64,
    pub default_remote: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("SHOWREEL_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("SHOWREEL_HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = v.parse().unwrap_or(self.http.timeout_secs);
        }
        if let Ok(v) = env::var("SHOWREEL_HTTP_CONNECT_TIMEOUT_SECS") {
            self.http.connect_timeout_secs = v.parse().unwrap_or(self.http.connect_timeout_secs);
        }
        if let Ok(v) = env::var("SHOWREEL_HTTP_USER_AGENT") {
            self.http.user_agent = v;
        }
        if let Ok(v) = env::var("SHOWREEL_HTTP_REQUEST_LOGGING") {
            self.http.enable_request_logging = v.parse().unwrap_or(self.http.enable_request_logging);
        }
        if let Ok(v) = env::var("SHOWREEL_SESSION_EXPIRY_LEEWAY_SECS") {
            self.session.expiry_leeway_secs = v.parse().unwrap_or(self.session.expiry_leeway_secs);
        }
        if let Ok(v) = env::var("SHOWREEL_DEFAULT_REMOTE") {
            self.session.default_remote = Some(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            http: HttpConfig {
                timeout_secs: 30,
                connect_timeout_secs: 10,
                user_agent: format!("showreel-client/{}", env!("CARGO_PKG_VERSION")),
                enable_request_logging: true,
            },
            session: SessionConfig {
                expiry_leeway_secs: 30,
                default_remote: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            http: HttpConfig {
                timeout_secs: 20,
                connect_timeout_secs: 5,
                user_agent: format!("showreel-client/{}", env!("CARGO_PKG_VERSION")),
                enable_request_logging: true,
            },
            session: SessionConfig {
                expiry_leeway_secs: 60,
                default_remote: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            http: HttpConfig {
                timeout_secs: 15,
                connect_timeout_secs: 5,
                user_agent: format!("showreel-client/{}", env!("CARGO_PKG_VERSION")),
                enable_request_logging: false,
            },
            session: SessionConfig {
                expiry_leeway_secs: 60,
                default_remote: None,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.enable_request_logging);
        assert_eq!(config.session.expiry_leeway_secs, 30);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.http.timeout_secs, 15);
        assert!(!config.http.enable_request_logging);
        assert_eq!(config.session.expiry_leeway_secs, 60);
    }
}
