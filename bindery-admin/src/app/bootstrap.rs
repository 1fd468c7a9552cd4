use std::sync::Arc;
use std::time::Duration;

use crate::app::cli::Cli;
use crate::infrastructure::adapters::ApiClientAdapter;
use crate::infrastructure::testing::TestApiService;
use crate::infrastructure::{ApiClient, ApiService, Config};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_url: Arc<str>,
    pub api_token: Option<Arc<str>>,
    pub use_test_stubs: bool,
    pub navigation_delay: Duration,
    pub toast_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AppConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: Arc::from(server_url.into()),
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            server_url: Arc::from(config.server_url.as_str()),
            api_token: None,
            use_test_stubs: false,
            navigation_delay: Duration::from_millis(config.navigation_delay_ms),
            toast_duration: Duration::from_millis(config.toast_duration_ms),
        }
    }

    /// Config file under the platform config dir, then `BINDERY_*` variables
    pub fn from_environment() -> Self {
        Self::from_config(&Config::load())
            .with_env(|key| std::env::var(key).ok())
    }

    /// Apply `BINDERY_*` overrides read through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("BINDERY_SERVER_URL") {
            self.server_url = Arc::from(url);
        }
        if let Some(token) = lookup("BINDERY_API_TOKEN") {
            self.api_token = Some(Arc::from(token));
        }
        if let Some(value) = lookup("BINDERY_USE_TEST_STUBS") {
            self.use_test_stubs = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        if let Some(ms) = parse_millis(&lookup, "BINDERY_NAVIGATION_DELAY_MS") {
            self.navigation_delay = ms;
        }
        if let Some(ms) = parse_millis(&lookup, "BINDERY_TOAST_DURATION_MS") {
            self.toast_duration = ms;
        }
        self
    }

    /// Command line flags win over everything else
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.server_url {
            self.server_url = Arc::from(url.as_str());
        }
        if let Some(token) = &cli.token {
            self.api_token = Some(Arc::from(token.as_str()));
        }
        if cli.offline {
            self.use_test_stubs = true;
        }
        if let Some(ms) = cli.navigation_delay_ms {
            self.navigation_delay = Duration::from_millis(ms);
        }
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn use_test_stubs(&self) -> bool {
        self.use_test_stubs
    }

    pub fn with_test_stubs(mut self, enabled: bool) -> Self {
        self.use_test_stubs = enabled;
        self
    }
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

/// The API service the form runs against: the in-memory stub in offline
/// mode, the HTTP client otherwise
pub async fn build_api(config: &AppConfig) -> anyhow::Result<Arc<dyn ApiService>> {
    if config.use_test_stubs() {
        log::info!("Using in-memory library server");
        return Ok(Arc::new(TestApiService::with_sample_data()));
    }

    let client = ApiClient::new(config.server_url())?;
    if let Some(token) = &config.api_token {
        client.set_token(Some(token.to_string())).await;
    }
    Ok(Arc::new(ApiClientAdapter::new(Arc::new(client))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_come_from_config_file_values() {
        let config = AppConfig::default();
        assert_eq!(config.server_url(), "http://localhost:10801");
        assert_eq!(config.navigation_delay, Duration::from_millis(750));
        assert!(!config.use_test_stubs());
    }

    #[test]
    fn env_overrides_config() {
        let config = AppConfig::default().with_env(env(&[
            ("BINDERY_SERVER_URL", "https://bindery.lan"),
            ("BINDERY_USE_TEST_STUBS", "yes"),
            ("BINDERY_NAVIGATION_DELAY_MS", "100"),
            ("BINDERY_TOAST_DURATION_MS", "soon"),
        ]));

        assert_eq!(config.server_url(), "https://bindery.lan");
        assert!(config.use_test_stubs());
        assert_eq!(config.navigation_delay, Duration::from_millis(100));
        assert_eq!(config.toast_duration, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn offline_mode_uses_stub() {
        let api = build_api(&AppConfig::default().with_test_stubs(true))
            .await
            .unwrap();
        assert_eq!(api.base_url(), "memory://bindery");
        assert_eq!(api.fetch_libraries().await.unwrap().len(), 1);
    }
}
