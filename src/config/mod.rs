use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub games_api_base: String,
    pub groups_api_base: String,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
}

impl Config {
    /// 所有配置项均有默认值，环境变量只做覆盖
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".to_string()),
            games_api_base: env::var("ROBLOX_GAMES_API")
                .unwrap_or_else(|_| "https://games.roblox.com".to_string()),
            groups_api_base: env::var("ROBLOX_GROUPS_API")
                .unwrap_or_else(|_| "https://groups.roblox.com".to_string()),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
