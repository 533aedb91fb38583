use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ICON_VERSION: &str = "13.24.1";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub base_url: Option<String>,
    pub icon_version: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("ANALYTICS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let base_url = match lookup("ANALYTICS_BASE_URL") {
            Some(url) if url.trim().is_empty() => {
                return Err(AppError::ConfigError(
                    "ANALYTICS_BASE_URL is set but empty".to_string(),
                ));
            }
            Some(url) => Some(url.trim().trim_end_matches('/').to_string()),
            None => None,
        };

        let icon_version = lookup("ANALYTICS_ICON_VERSION")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON_VERSION.to_string());

        Ok(Config {
            data_dir,
            base_url,
            icon_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.base_url, None);
        assert_eq!(config.icon_version, "13.24.1");
    }

    #[test]
    fn test_values_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANALYTICS_DATA_DIR", "/srv/site/data"),
            ("ANALYTICS_BASE_URL", "https://example.org/data/"),
            ("ANALYTICS_ICON_VERSION", "14.1.1"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/site/data"));
        assert_eq!(config.base_url.as_deref(), Some("https://example.org/data"));
        assert_eq!(config.icon_version, "14.1.1");
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("ANALYTICS_BASE_URL", "  ")]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
