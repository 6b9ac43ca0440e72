use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::llm::CompletionOptions;

pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub profiler: ProfilerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let timeout_secs = optional_var("PADEL_AI_TIMEOUT_SECS")
            .map(|raw| raw.parse::<u64>().map_err(|_| ConfigError::InvalidTimeout))
            .transpose()?
            .unwrap_or(30);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let profiler = ProfilerConfig {
            base_url: optional_var("PADEL_AI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
            model: optional_var("PADEL_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            api_key: optional_var("PADEL_AI_API_KEY"),
            timeout_secs,
            language: optional_var("PADEL_AI_LANGUAGE").unwrap_or_else(|| "es".to_string()),
        };

        let storage = StorageConfig {
            catalog_path: optional_var("PADEL_CATALOG_PATH").map(PathBuf::from),
            profile_dir: optional_var("PADEL_PROFILE_DIR").map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            profiler,
            storage,
        })
    }
}

/// Blank values count as unset.
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the chat-completion backend.
#[derive(Clone)]
pub struct ProfilerConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Language the model writes its analysis in.
    pub language: String,
}

impl ProfilerConfig {
    /// A keyless setup only makes sense against a self-hosted endpoint.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some() || self.base_url.trim_end_matches('/') != DEFAULT_AI_BASE_URL
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            ..CompletionOptions::default()
        }
    }
}

impl fmt::Debug for ProfilerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilerConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .finish()
    }
}

/// Data locations. Unset paths fall back to the embedded catalog and the
/// in-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub catalog_path: Option<PathBuf>,
    pub profile_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "PADEL_AI_TIMEOUT_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "PADEL_AI_BASE_URL",
            "PADEL_AI_MODEL",
            "PADEL_AI_API_KEY",
            "PADEL_AI_TIMEOUT_SECS",
            "PADEL_AI_LANGUAGE",
            "PADEL_CATALOG_PATH",
            "PADEL_PROFILE_DIR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.profiler.base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.profiler.model, DEFAULT_AI_MODEL);
        assert_eq!(config.profiler.timeout_secs, 30);
        assert_eq!(config.profiler.language, "es");
        assert!(config.profiler.api_key.is_none());
        assert!(!config.profiler.is_enabled());
        assert!(config.storage.catalog_path.is_none());
        assert!(config.storage.profile_dir.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_profiler_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PADEL_AI_BASE_URL", "http://localhost:11434/v1");
        env::set_var("PADEL_AI_MODEL", "llava");
        env::set_var("PADEL_AI_API_KEY", "   ");
        env::set_var("PADEL_AI_TIMEOUT_SECS", "5");
        env::set_var("PADEL_PROFILE_DIR", "/tmp/padel-profiles");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.profiler.model, "llava");
        assert!(config.profiler.api_key.is_none());
        assert!(config.profiler.is_enabled());
        assert_eq!(
            config.profiler.completion_options().timeout,
            Duration::from_secs(5)
        );
        assert_eq!(
            config.storage.profile_dir,
            Some(PathBuf::from("/tmp/padel-profiles"))
        );
        reset_env();
    }

    #[test]
    fn rejects_invalid_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PADEL_AI_TIMEOUT_SECS", "soon");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));

        env::set_var("PADEL_AI_TIMEOUT_SECS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));
        reset_env();
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ProfilerConfig {
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            api_key: Some("sk-secret".to_string()),
            timeout_secs: 30,
            language: "es".to_string(),
        };

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(config.is_enabled());
    }
}
