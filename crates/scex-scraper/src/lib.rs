pub mod client;
pub mod detect;
pub mod error;
pub mod html;
pub mod rate_limit;
pub mod sitemap;
pub mod types;
pub mod woo;

pub use client::{build_http_client, ShopifyClient};
pub use detect::{detect_platform, Platform};
pub use error::ScraperError;
pub use woo::WooClient;
