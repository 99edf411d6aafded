pub mod cache;
pub mod worker;

pub use cache::{AssetResponse, CacheStorage, CacheStore};
pub use worker::{
    DiskOrigin, OfflineWorker, ShellOrigin, API_PREFIX, CACHE_GENERATION, SHELL_ASSETS,
};
