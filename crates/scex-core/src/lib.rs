pub mod app_config;
pub mod config;
pub mod error;
pub mod products;
pub mod row;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use products::{RawImage, RawProduct, RawVariant, DEFAULT_VARIANT_TITLE};
pub use row::{OutputRow, COLUMNS};
