mod env;

use serde::Deserialize;
use std::collections::HashMap;

pub use crate::evaluator::TrendConfig;

/// Complete Symbiotek configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbiotekConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Simulated sensor feed
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_simulator_enabled")]
    pub enabled: bool,
    /// Seconds between simulated readings for every plant
    #[serde(default = "default_simulator_interval")]
    pub interval_seconds: u64,
}

fn default_simulator_enabled() -> bool {
    true
}

fn default_simulator_interval() -> u64 {
    30
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_simulator_enabled(),
            interval_seconds: default_simulator_interval(),
        }
    }
}

/// Plant store retention
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Readings kept per plant and sensor kind; also caps the history entries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    500
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

/// Gauge bounds for display code
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Added to the profile's upper light bound to size the light gauge
    #[serde(default = "default_light_gauge_headroom")]
    pub light_gauge_headroom: f64,
    /// Light gauge bound when the plant type is unknown
    #[serde(default = "default_light_gauge_fallback")]
    pub light_gauge_fallback: f64,
}

fn default_light_gauge_headroom() -> f64 {
    10_000.0
}

fn default_light_gauge_fallback() -> f64 {
    30_000.0
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            light_gauge_headroom: default_light_gauge_headroom(),
            light_gauge_fallback: default_light_gauge_fallback(),
        }
    }
}

/// Text-generation collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_chat_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_chat_temperature")]
    pub temperature: f32,
    #[serde(default = "default_chat_timeout")]
    pub timeout_seconds: u64,
    /// Read from OPENAI_API_KEY only, never from the file
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_chat_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_chat_max_tokens() -> u32 {
    150
}

fn default_chat_temperature() -> f32 {
    0.8
}

fn default_chat_timeout() -> u64 {
    30
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_chat_base_url(),
            model: default_chat_model(),
            max_tokens: default_chat_max_tokens(),
            temperature: default_chat_temperature(),
            timeout_seconds: default_chat_timeout(),
            api_key: None,
        }
    }
}

/// Identity resolution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Bearer token → user id
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<SymbiotekConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: SymbiotekConfig = toml::from_str(&contents)?;
    Ok(config)
}
