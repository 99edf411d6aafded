pub mod bhashini;
pub mod config;
pub mod error;
pub mod handlers;
pub mod lang;
pub mod offline;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::ProxyError;
pub use state::AppState;
