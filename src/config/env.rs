use super::SymbiotekConfig;

impl SymbiotekConfig {
    /// Apply overrides from env vars on top of the file/default values.
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|name| std::env::var(name).ok());
        self
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("SYMBIOTEK_BIND_ADDR") {
            if !v.trim().is_empty() {
                self.server.bind_addr = v.trim().to_string();
            }
        }
        if let Some(v) = var("SYMBIOTEK_SIMULATOR_ENABLED") {
            if let Ok(b) = v.parse::<bool>() {
                self.simulator.enabled = b;
            }
        }
        if let Some(v) = var("SYMBIOTEK_SIMULATOR_INTERVAL_SECONDS") {
            if let Ok(n) = v.parse::<u64>() {
                self.simulator.interval_seconds = n;
            }
        }
        if let Some(v) = var("SYMBIOTEK_AUTH_ENABLED") {
            if let Ok(b) = v.parse::<bool>() {
                self.auth.enabled = b;
            }
        }
        if let Some(v) = var("OPENAI_API_KEY") {
            if !v.is_empty() {
                self.chat.api_key = Some(v);
            }
        }
    }
}
