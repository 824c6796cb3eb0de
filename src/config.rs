use std::env;
use std::path::PathBuf;

pub const DATA_FILE_ENV_VAR: &str = "FRIDGE_DATA_FILE";
pub const DEFAULT_DATA_FILE: &str = "fridge_data.json";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl AppConfig {
    /// Reads the configuration from the environment, loading `.env` first.
    /// `data_file_override` (the `--data-file` flag) wins over the environment.
    pub fn load(data_file_override: Option<PathBuf>) -> Self {
        dotenv::dotenv().ok();
        Self::resolve(data_file_override, env::var(DATA_FILE_ENV_VAR).ok())
    }

    fn resolve(data_file_override: Option<PathBuf>, env_data_file: Option<String>) -> Self {
        let data_file = data_file_override
            .or_else(|| env_data_file.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_file }
    }
}

/// Sets up `env_logger`; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_env() {
        let config = AppConfig::resolve(Some(PathBuf::from("cli.json")), Some("env.json".into()));
        assert_eq!(config.data_file, PathBuf::from("cli.json"));
    }

    #[test]
    fn test_env_then_default() {
        let config = AppConfig::resolve(None, Some("env.json".into()));
        assert_eq!(config.data_file, PathBuf::from("env.json"));

        let config = AppConfig::resolve(None, Some("  ".into()));
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }
}
