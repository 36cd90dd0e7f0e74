//! The `scrape` and `detect` commands.

mod runner;

use clap::{Args, ValueEnum};

use scex_core::AppConfig;
use scex_scraper::{build_http_client, detect_platform};

pub use runner::run;

/// Platform selection: auto-detect by default, or force one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Auto,
    Shopify,
    Wordpress,
    Both,
}

/// Fetch method selection. `all` runs every method relevant to the
/// resolved platform, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    All,
    Standard,
    Paginated,
    Collections,
    WooApi,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Storefront URL, with or without scheme
    pub url: String,

    #[arg(long, value_enum, default_value_t = PlatformArg::Auto)]
    pub platform: PlatformArg,

    #[arg(long, value_enum, default_value_t = MethodArg::All)]
    pub method: MethodArg,

    /// Keep only rows with this vendor (case-insensitive)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Keep only rows with this product type (case-insensitive)
    #[arg(long = "product-type")]
    pub product_type: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Output path; "-" writes to stdout. Defaults to a timestamped
    /// file name in the working directory.
    #[arg(long)]
    pub output: Option<String>,
}

/// `scex detect <url>` — print the detected platform.
///
/// # Errors
///
/// Returns an error only when the HTTP client cannot be built; detection
/// itself degrades to `unknown`.
pub async fn detect(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let client = build_http_client(config.request_timeout_secs, &config.user_agent)?;
    let platform = detect_platform(&client, url).await;
    println!("{platform}");
    Ok(())
}

/// Whether `method` should run under the operator's `--method` choice.
pub(crate) fn method_enabled(selected: MethodArg, method: MethodArg) -> bool {
    selected == MethodArg::All || selected == method
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_enables_every_method() {
        for method in [
            MethodArg::Standard,
            MethodArg::Paginated,
            MethodArg::Collections,
            MethodArg::WooApi,
            MethodArg::Html,
        ] {
            assert!(method_enabled(MethodArg::All, method));
        }
    }

    #[test]
    fn specific_method_enables_only_itself() {
        assert!(method_enabled(MethodArg::Paginated, MethodArg::Paginated));
        assert!(!method_enabled(MethodArg::Paginated, MethodArg::Standard));
        assert!(!method_enabled(MethodArg::Paginated, MethodArg::Html));
    }
}
