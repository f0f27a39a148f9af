pub mod api;
pub mod config;
pub mod token_store;

pub use api::ApiError;
pub use config::ConfigError;
pub use token_store::TokenStoreError;
