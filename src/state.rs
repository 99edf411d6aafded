use std::sync::Arc;

use crate::bhashini::BhashiniClient;
use crate::config::AppConfig;
use crate::offline::{CacheStorage, DiskOrigin, OfflineWorker, ShellOrigin};

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bhashini: Arc<BhashiniClient>,
    pub worker: Arc<OfflineWorker>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let bhashini = Arc::new(BhashiniClient::new(&config));
        let storage = Arc::new(CacheStorage::new());
        let origin: Arc<dyn ShellOrigin> = Arc::new(DiskOrigin::new(config.public_dir.clone()));
        let worker = Arc::new(OfflineWorker::new(storage, origin));

        Self {
            config: Arc::new(config),
            bhashini,
            worker,
        }
    }
}
