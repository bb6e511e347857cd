//! Configuration management

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the REST API serving `/students` and `/teachers`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// What to do when a store warm-up fetch fails
    #[serde(default)]
    pub warm_up: WarmUpPolicy,

    /// Consecutive guard redirects allowed before a navigation fails
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            warm_up: WarmUpPolicy::default(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    25
}

/// Handling of a failed warm-up fetch in the pre-navigation hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmUpPolicy {
    /// Log and keep navigating with an empty store
    #[default]
    Proceed,
    /// Fail the navigation
    Abort,
}

/// Load configuration from defaults, an optional file, then `CLASSROOM_*`
/// environment variables.
#[cfg(feature = "native")]
pub fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let path = path
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("classroom"));

    let config = ::config::Config::builder()
        // Load from config file if it exists
        .add_source(::config::File::with_name(&path.to_string_lossy()).required(false))
        // Override with environment variables (CLASSROOM_API_BASE_URL, CLASSROOM_WARM_UP, etc.)
        .add_source(
            ::config::Environment::with_prefix("CLASSROOM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent"))).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000/");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.warm_up, WarmUpPolicy::Proceed);
        assert_eq!(config.max_redirects, 25);
    }

    #[test]
    #[serial]
    fn test_file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classroom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api_base_url = \"http://api.example/\"").unwrap();
        writeln!(file, "warm_up = \"abort\"").unwrap();

        std::env::set_var("CLASSROOM_MAX_REDIRECTS", "3");
        let config = load_config(Some(&dir.path().join("classroom")));
        std::env::remove_var("CLASSROOM_MAX_REDIRECTS");

        let config = config.unwrap();
        assert_eq!(config.api_base_url, "http://api.example/");
        assert_eq!(config.warm_up, WarmUpPolicy::Abort);
        assert_eq!(config.max_redirects, 3);
    }
}
