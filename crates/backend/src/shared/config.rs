use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Optional log file, appended to without ANSI colors
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrdersConfig {
    /// Log a warning when a non-empty status string is not recognized
    #[serde(default = "default_true")]
    pub warn_on_unrecognized_status: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            warn_on_unrecognized_status: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[logging]
filter = "info"
file = "target/logs/backend.log"

[orders]
warn_on_unrecognized_status = true
"#;

static ORDERS_CONFIG: OnceCell<OrdersConfig> = OnceCell::new();

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// config.toml at the given path
    File(PathBuf),
    /// Embedded default; `missing` is the config.toml path that was probed
    Embedded { missing: Option<PathBuf> },
}

impl ConfigSource {
    /// Report the source once the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!("Loaded config from: {}", path.display());
            }
            ConfigSource::Embedded { missing: Some(path) } => {
                tracing::warn!("config.toml not found at: {}", path.display());
                tracing::info!("Using default embedded configuration");
            }
            ConfigSource::Embedded { missing: None } => {
                tracing::info!("Using default embedded configuration");
            }
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Runs before tracing is initialized, so nothing is logged here;
/// call [`ConfigSource::log`] afterwards.
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    match exe_dir {
        Some(dir) => load_config_from_dir(&dir),
        None => Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded { missing: None })),
    }
}

/// Load `config.toml` from `dir`, falling back to the embedded default
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<(Config, ConfigSource)> {
    let config_path = dir.join("config.toml");

    if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path)?;
        let config = parse_config(&contents)?;
        return Ok((config, ConfigSource::File(config_path)));
    }

    Ok((
        parse_config(DEFAULT_CONFIG)?,
        ConfigSource::Embedded {
            missing: Some(config_path),
        },
    ))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Make order settings available to request handlers.
/// Only the first call has an effect.
pub fn install_orders_config(config: &OrdersConfig) {
    if ORDERS_CONFIG.set(config.clone()).is_err() {
        tracing::debug!("Orders config already installed, keeping the first one");
    }
}

/// Order settings installed at startup, or defaults when none were installed
pub fn orders_config() -> OrdersConfig {
    ORDERS_CONFIG.get().cloned().unwrap_or_default()
}

/// Resolve the log file path relative to the executable directory
pub fn get_log_file_path(config: &LoggingConfig) -> Option<PathBuf> {
    let file = config.file.as_deref()?.trim();
    if file.is_empty() {
        return None;
    }

    let path = Path::new(file);
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Some(exe_dir.join(path));
        }
    }

    Some(PathBuf::from(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.filter, "info");
        assert!(config.orders.warn_on_unrecognized_status);
    }

    #[test]
    fn test_orders_section_is_optional() {
        let config = parse_config(
            r#"
[server]
host = "0.0.0.0"
port = 8080

[logging]
filter = "debug"
"#,
        )
        .unwrap();
        assert!(config.orders.warn_on_unrecognized_status);
        assert!(config.logging.file.is_none());
        assert!(get_log_file_path(&config.logging).is_none());
    }

    #[test]
    fn test_absolute_log_path_kept() {
        let logging = LoggingConfig {
            filter: "info".to_string(),
            file: Some("/var/log/backend.log".to_string()),
        };
        assert_eq!(
            get_log_file_path(&logging),
            Some(PathBuf::from("/var/log/backend.log"))
        );
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "backend-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_falls_back_to_embedded() {
        let dir = scratch_dir("missing");
        let (config, source) = load_config_from_dir(&dir).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            source,
            ConfigSource::Embedded {
                missing: Some(dir.join("config.toml"))
            }
        );
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_file_next_to_binary_wins() {
        let dir = scratch_dir("present");
        std::fs::write(
            dir.join("config.toml"),
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[logging]\nfilter = \"warn\"\n\n[orders]\nwarn_on_unrecognized_status = false\n",
        )
        .unwrap();

        let (config, source) = load_config_from_dir(&dir).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.orders.warn_on_unrecognized_status);
        assert_eq!(source, ConfigSource::File(dir.join("config.toml")));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(parse_config("[server]\nport = \"x\"").is_err());
    }
}
