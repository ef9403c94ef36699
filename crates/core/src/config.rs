use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `OUTREACH_CONSOLE__` and merged over built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Base URLs of the independent backend services the console fronts.
/// Each one is a separate deployment with its own HTTP contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_keyword_monitor_url")]
    pub keyword_monitor_url: String,
    #[serde(default = "default_keyword_search_url")]
    pub keyword_search_url: String,
    #[serde(default = "default_member_export_url")]
    pub member_export_url: String,
    #[serde(default = "default_account_sessions_url")]
    pub account_sessions_url: String,
    #[serde(default = "default_workflow_start_url")]
    pub workflow_start_url: String,
}

// Default functions
fn default_node_id() -> String {
    "console-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_keyword_monitor_url() -> String {
    "http://localhost:8008".to_string()
}
fn default_keyword_search_url() -> String {
    "http://localhost:8010".to_string()
}
fn default_member_export_url() -> String {
    "http://localhost:8011".to_string()
}
fn default_account_sessions_url() -> String {
    "http://localhost:8007".to_string()
}
fn default_workflow_start_url() -> String {
    "http://localhost:5678/webhook/outreach-master".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            keyword_monitor_url: default_keyword_monitor_url(),
            keyword_search_url: default_keyword_search_url(),
            member_export_url: default_member_export_url(),
            account_sessions_url: default_account_sessions_url(),
            workflow_start_url: default_workflow_start_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            services: ServicesConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("OUTREACH_CONSOLE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
