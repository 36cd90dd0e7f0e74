//! The fetch → aggregate → normalize → filter → export pipeline.
//!
//! Methods run sequentially in a fixed priority order; a failing method
//! is logged and contributes nothing. Only the "every method came back
//! empty" case is an error the operator sees.

use scex_core::AppConfig;
use scex_export::{filter_rows, products_to_rows, to_csv, to_json, Aggregate, ExportError};
use scex_scraper::{
    build_http_client, detect_platform, html, sitemap, Platform, ShopifyClient, WooClient,
};

use super::{method_enabled, FormatArg, MethodArg, PlatformArg, ScrapeArgs};

/// Which platform's methods the run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Shopify,
    WordPress,
    Both,
}

impl Target {
    fn includes_shopify(self) -> bool {
        matches!(self, Target::Shopify | Target::Both)
    }

    fn includes_wordpress(self) -> bool {
        matches!(self, Target::WordPress | Target::Both)
    }
}

async fn resolve_target(arg: PlatformArg, client: &reqwest::Client, url: &str) -> Target {
    match arg {
        PlatformArg::Shopify => Target::Shopify,
        PlatformArg::Wordpress => Target::WordPress,
        PlatformArg::Both => Target::Both,
        PlatformArg::Auto => match detect_platform(client, url).await {
            Platform::Shopify => Target::Shopify,
            Platform::WordPress => Target::WordPress,
            Platform::Unknown => {
                tracing::warn!(url = %url, "platform not clearly detected; trying all methods");
                Target::Both
            }
        },
    }
}

/// Runs the whole scrape pipeline for one storefront.
///
/// # Errors
///
/// Returns [`ExportError::EmptyResult`] when every method produced zero
/// products, and propagates serialization or file-write failures.
pub async fn run(config: &AppConfig, args: ScrapeArgs) -> anyhow::Result<()> {
    let shopify = ShopifyClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;
    let woo = WooClient::new(config.request_timeout_secs, &config.user_agent)?;
    let plain = build_http_client(config.request_timeout_secs, &config.user_agent)?;

    let target = resolve_target(args.platform, &plain, &args.url).await;
    tracing::info!(url = %args.url, target = ?target, "starting scrape");

    let mut aggregate = Aggregate::new();

    if target.includes_shopify() {
        if method_enabled(args.method, MethodArg::Standard) {
            match shopify.fetch_standard(&args.url, config.page_size).await {
                Ok(products) => {
                    let added = aggregate.push(products);
                    tracing::info!(added, "shopify standard fetch");
                }
                Err(e) => tracing::warn!(error = %e, "shopify standard fetch produced no data"),
            }
        }

        if method_enabled(args.method, MethodArg::Paginated) {
            match shopify
                .fetch_paginated(
                    &args.url,
                    config.page_size,
                    config.max_pages,
                    config.inter_request_delay_ms,
                )
                .await
            {
                Ok(products) => {
                    let added = aggregate.push(products);
                    tracing::info!(added, "shopify paginated fetch");
                }
                Err(e) => tracing::warn!(error = %e, "shopify paginated fetch produced no data"),
            }
        }

        if method_enabled(args.method, MethodArg::Collections) {
            match shopify
                .fetch_by_collections(&args.url, config.inter_request_delay_ms)
                .await
            {
                Ok((products, counts)) => {
                    let added = aggregate.push(products);
                    aggregate.push_collection_counts(counts);
                    tracing::info!(added, "shopify per-collection fetch");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "shopify per-collection fetch produced no data");
                }
            }
        }
    }

    if target.includes_wordpress() {
        if method_enabled(args.method, MethodArg::WooApi) {
            match woo.fetch_products(&args.url).await {
                Ok(products) => {
                    let added = aggregate.push(products);
                    tracing::info!(added, "woocommerce api fetch");
                }
                Err(e) => tracing::warn!(error = %e, "woocommerce api fetch produced no data"),
            }
        }

        if method_enabled(args.method, MethodArg::Html) {
            // Best-effort by contract; an empty result is its own report.
            let products = html::fetch_via_html(&plain, &args.url).await;
            let added = aggregate.push(products);
            tracing::info!(added, "html shop-page fetch");
        }
    }

    if aggregate.is_empty() {
        // Sharpen the terminal report: a sitemap full of product pages
        // means the store exists but its endpoints are restricted.
        let product_pages = sitemap::fetch_product_urls(&plain, &args.url).await;
        if product_pages.is_empty() {
            tracing::warn!(url = %args.url, "no products and no sitemap product pages");
        } else {
            tracing::warn!(
                url = %args.url,
                sitemap_product_pages = product_pages.len(),
                "sitemap lists product pages, but every product endpoint came back empty"
            );
        }
        return Err(ExportError::EmptyResult.into());
    }

    let (products, collection_counts) = aggregate.into_parts();
    for (name, count) in &collection_counts {
        tracing::debug!(collection = %name, count = *count, "collection size");
    }

    let rows = products_to_rows(&products);
    let rows = filter_rows(rows, args.vendor.as_deref(), args.product_type.as_deref());
    tracing::info!(
        products = products.len(),
        rows = rows.len(),
        collections = collection_counts.len(),
        "normalized catalog"
    );

    let (payload, extension) = match args.format {
        FormatArg::Csv => (to_csv(&rows)?, "csv"),
        FormatArg::Json => (to_json(&rows)?, "json"),
    };

    match args.output.as_deref() {
        Some("-") => print!("{payload}"),
        Some(path) => {
            std::fs::write(path, &payload)?;
            println!("wrote {} rows to {path}", rows.len());
        }
        None => {
            let path = default_output_name(extension);
            std::fs::write(&path, &payload)?;
            println!("wrote {} rows to {path}", rows.len());
        }
    }

    Ok(())
}

/// Timestamped default export file name, e.g. `products_20240301T101500.csv`.
fn default_output_name(extension: &str) -> String {
    format!(
        "products_{}.{extension}",
        chrono::Utc::now().format("%Y%m%dT%H%M%S")
    )
}
