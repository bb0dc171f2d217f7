/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tuneline_resolver::ResolverOptions;
use tuneline_storage::{PLAYLISTS_FILE, USERS_FILE};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `TUNELINE_AUTH__JWT_SECRET`
pub const ENV_PREFIX: &str = "TUNELINE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_resolver")]
    pub resolver: ResolverSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Static web assets served for any path outside `/api`
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl StorageSettings {
    pub fn playlists_path(&self) -> PathBuf {
        self.data_dir.join(PLAYLISTS_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
    #[serde(default = "default_binary_path")]
    pub binary_path: PathBuf,

    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Lifetime of cached stream URLs; unset keeps them for the whole process
    #[serde(default)]
    pub stream_ttl_secs: Option<u64>,

    /// Arguments placed before the mode arguments on every call
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl ResolverSettings {
    pub fn options(&self) -> ResolverOptions {
        ResolverOptions {
            binary_path: self.binary_path.clone(),
            extra_args: self.extra_args.clone(),
            search_limit: self.search_limit,
            audio_format: self.audio_format.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn stream_ttl(&self) -> Option<Duration> {
        self.stream_ttl_secs.map(Duration::from_secs)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml`; a missing file is skipped.
    /// Environment variables win over the file, with `__` between nested
    /// keys: `TUNELINE_RESOLVER__TIMEOUT_SECS=30`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if config_path.exists() {
            tracing::info!("Loading configuration from {}", config_path.display());
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set TUNELINE_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.resolver.search_limit == 0 {
            return Err(ServerError::Config(
                "resolver.search_limit must be at least 1".to_string(),
            ));
        }

        if self.resolver.timeout_secs == 0 {
            return Err(ServerError::Config(
                "resolver.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        web_dir: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_resolver() -> ResolverSettings {
    ResolverSettings {
        binary_path: default_binary_path(),
        search_limit: default_search_limit(),
        audio_format: default_audio_format(),
        timeout_secs: default_timeout_secs(),
        stream_ttl_secs: None,
        extra_args: Vec::new(),
    }
}

fn default_binary_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_search_limit() -> u32 {
    10
}

fn default_audio_format() -> String {
    "bestaudio".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            resolver: default_resolver(),
        }
    }
}
