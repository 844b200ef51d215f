use std::sync::Arc;

use tokio::sync::Mutex;

use cache::VisitCache;
use config::Config;
use roblox::RobloxClient;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod roblox;
pub mod router;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub roblox: RobloxClient,
    pub cache: Arc<Mutex<VisitCache>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let roblox = RobloxClient::new(&config);
        let cache = Arc::new(Mutex::new(VisitCache::new(
            config.cache_ttl(),
            config.cache_max_entries,
        )));
        Self {
            config,
            roblox,
            cache,
        }
    }
}
