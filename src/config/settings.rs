use serde::{Deserialize, Serialize};

/// Default Google Custom Search JSON API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Environment variable overriding `search.api_key`
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable overriding `search.search_engine_id`
pub const SEARCH_ENGINE_ID_ENV: &str = "GOOGLE_SEARCH_ENGINE_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file
    #[serde(default)]
    pub debug: bool,

    /// Log file or directory (defaults next to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 keeps everything)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,

    /// Search provider settings
    #[serde(default)]
    pub search: SearchSettings,
}

impl Config {
    /// Overlay credentials from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Overlay credentials from `lookup`; unset or empty values are ignored
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = non_empty(API_KEY_ENV) {
            self.search.api_key = Some(api_key);
        }
        if let Some(engine_id) = non_empty(SEARCH_ENGINE_ID_ENV) {
            self.search.search_engine_id = Some(engine_id);
        }
    }
}

/// Settings for the recipe search provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Google API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Programmable search engine id (`cx`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_engine_id: Option<String>,

    /// Search endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds (unbounded when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            search_engine_id: None,
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

impl SearchSettings {
    /// Both credentials, or `None` if either is missing or blank
    pub fn credentials(&self) -> Option<Credentials> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Some(Credentials {
            api_key: present(&self.api_key)?,
            search_engine_id: present(&self.search_engine_id)?,
        })
    }
}

/// Credentials required to call the provider
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub search_engine_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("search_engine_id", &self.search_engine_id)
            .finish()
    }
}

/// Debug log file rotation policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    /// One file, appended forever
    None,
    /// One file per day
    Daily,
    /// One file per process start
    Session,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.debug);
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert!(config.search.credentials().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            debug = true
            debug_log_rotation = "daily"
            debug_log_keep = 3

            [search]
            api_key = "AIzaExample"
            search_engine_id = "0123:abc"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.debug_log_rotation, Some(DebugLogRotation::Daily));
        assert_eq!(config.debug_log_keep, Some(3));
        assert_eq!(config.search.timeout_secs, Some(10));

        let credentials = config.search.credentials().unwrap();
        assert_eq!(credentials.api_key, "AIzaExample");
        assert_eq!(credentials.search_engine_id, "0123:abc");
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let settings = SearchSettings {
            api_key: Some("   ".to_string()),
            search_engine_id: Some("cx".to_string()),
            ..Default::default()
        };
        assert!(settings.credentials().is_none());

        let settings = SearchSettings {
            api_key: Some("key".to_string()),
            search_engine_id: Some(String::new()),
            ..Default::default()
        };
        assert!(settings.credentials().is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [(API_KEY_ENV, "from-env"), (SEARCH_ENGINE_ID_ENV, "")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config.search.api_key = Some("from-file".to_string());
        config.search.search_engine_id = Some("cx-file".to_string());
        config.apply_env_with(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.search.api_key.as_deref(), Some("from-env"));
        // Empty env value does not clobber the file value
        assert_eq!(config.search.search_engine_id.as_deref(), Some("cx-file"));
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let credentials = Credentials {
            api_key: "AIzaSecret".to_string(),
            search_engine_id: "cx".to_string(),
        };
        assert!(!format!("{credentials:?}").contains("AIzaSecret"));
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.search.endpoint, DEFAULT_ENDPOINT);
        assert!(parsed.search.api_key.is_none());
    }
}
