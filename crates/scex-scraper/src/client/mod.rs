//! HTTP client for Shopify's public storefront JSON endpoints.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ShopifyCollection, ShopifyCollectionsResponse, ShopifyProductsResponse};

use scex_core::RawProduct;

pub use origin::normalize_store_url;

/// Builds a plain `reqwest::Client` with the scraper's timeout and
/// `User-Agent`, shared by the adapters that don't need retry state
/// (platform detection, sitemap discovery, HTML scraping).
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the client cannot be constructed.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Client for `products.json`, `collections.json`, and the
/// per-collection product feeds.
///
/// Rate limiting (429), not-found (404), and other non-2xx responses
/// surface as typed errors; transient failures are retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct ShopifyClient {
    pub(super) client: Client,
    /// Additional attempts after the first failure for retriable errors.
    pub(super) max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl ShopifyClient {
    /// Creates a `ShopifyClient` with configured timeout, `User-Agent`,
    /// and retry policy. Set `max_retries` to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches a single page of `products.json` and returns the raw
    /// records — the "standard" method, no pagination loop.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying page fetch.
    pub async fn fetch_standard(
        &self,
        store_url: &str,
        limit: u32,
    ) -> Result<Vec<RawProduct>, ScraperError> {
        let products = self.fetch_products_page(store_url, limit, 1).await?;
        Ok(products.into_iter().map(RawProduct::from).collect())
    }

    /// Fetches one page of the products feed.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — other non-2xx (5xx retried).
    /// - [`ScraperError::Http`] — network failure after all retries.
    /// - [`ScraperError::Deserialize`] — body is not valid products JSON.
    pub(super) async fn fetch_products_page(
        &self,
        store_url: &str,
        limit: u32,
        page: u32,
    ) -> Result<Vec<crate::types::ShopifyProduct>, ScraperError> {
        let url = Self::products_url(store_url, limit, page)?;
        let response: ShopifyProductsResponse = self
            .get_json(&url, &format!("products page {page} from {store_url}"))
            .await?;
        Ok(response.products)
    }

    /// Fetches the store's collection list.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_products_page`].
    pub async fn fetch_collections(
        &self,
        store_url: &str,
    ) -> Result<Vec<ShopifyCollection>, ScraperError> {
        let url = Self::endpoint_url(store_url, "collections.json")?;
        let response: ShopifyCollectionsResponse = self
            .get_json(&url, &format!("collections from {store_url}"))
            .await?;
        Ok(response.collections)
    }

    /// Fetches the product feed of one collection.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_products_page`].
    pub(super) async fn fetch_collection_products(
        &self,
        store_url: &str,
        handle: &str,
    ) -> Result<Vec<crate::types::ShopifyProduct>, ScraperError> {
        let url = Self::endpoint_url(store_url, &format!("collections/{handle}/products.json"))?;
        let response: ShopifyProductsResponse = self
            .get_json(&url, &format!("collection \"{handle}\" from {store_url}"))
            .await?;
        Ok(response.products)
    }

    /// Shared GET-and-decode with retry, status mapping, and typed
    /// deserialization errors. Every Shopify endpoint goes through here.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            let context = context.to_owned();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "application/json,text/html;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        domain: origin::extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                    context,
                    source: e,
                })
            }
        })
        .await
    }

    /// Builds the `products.json` URL for the given store, page size, and
    /// 1-based page number.
    fn products_url(store_url: &str, limit: u32, page: u32) -> Result<String, ScraperError> {
        let base = Self::endpoint_url(store_url, "products.json")?;
        let mut url =
            reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidStoreUrl {
                store_url: store_url.to_owned(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("page", &page.to_string());
        Ok(url.to_string())
    }

    /// Joins a path onto the normalized store origin, validating the
    /// result parses as a URL.
    fn endpoint_url(store_url: &str, path: &str) -> Result<String, ScraperError> {
        let origin = normalize_store_url(store_url);
        let joined = format!("{origin}/{path}");
        reqwest::Url::parse(&joined).map_err(|e| ScraperError::InvalidStoreUrl {
            store_url: store_url.to_owned(),
            reason: format!("\"{joined}\" is not a valid URL: {e}"),
        })?;
        Ok(joined)
    }
}
