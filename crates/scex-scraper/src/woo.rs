//! WooCommerce REST API adapter.
//!
//! Tries the store-facing `wp-json/wc/{v3,v2,v1}/products` endpoints
//! newest-first and takes the first one that answers with a JSON array.
//! Many WordPress stores expose these read-only without authentication;
//! those that don't simply yield no data for this method.
//!
//! Woo products carry less structure than Shopify's: there is no vendor,
//! variation details live behind separate authenticated endpoints, and
//! the weight unit is a store-wide setting the API doesn't echo. The
//! conversion therefore produces a degraded record with one synthesized
//! variant carrying the product-level price and stock fields.

use serde::Deserialize;

use scex_core::{RawImage, RawProduct, RawVariant};

use crate::client::{build_http_client, normalize_store_url};
use crate::error::ScraperError;

/// API versions tried in order.
const WC_API_VERSIONS: [&str; 3] = ["v3", "v2", "v1"];

/// `per_page` requested from the Woo products endpoint.
const WOO_PAGE_SIZE: u32 = 100;

/// One product from the WooCommerce REST API. Unknown fields are
/// ignored; everything here is optional except the id.
#[derive(Debug, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub regular_price: Option<String>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_modified: Option<String>,
    #[serde(default)]
    pub categories: Vec<WooTerm>,
    #[serde(default)]
    pub tags: Vec<WooTerm>,
    #[serde(default)]
    pub images: Vec<WooImage>,
}

/// A category or tag reference on a [`WooProduct`].
#[derive(Debug, Deserialize)]
pub struct WooTerm {
    #[serde(default)]
    pub name: String,
}

/// An image reference on a [`WooProduct`].
#[derive(Debug, Deserialize)]
pub struct WooImage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Client for the WooCommerce REST products endpoint.
pub struct WooClient {
    client: reqwest::Client,
}

impl WooClient {
    /// Creates a `WooClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
        })
    }

    /// Fetches products through the first API version that responds.
    ///
    /// Version fallback is the retry strategy here — each endpoint is
    /// tried once, and a version that 404s or returns non-JSON just
    /// moves the cascade along.
    ///
    /// # Errors
    ///
    /// Returns the last version's error when every version fails.
    pub async fn fetch_products(&self, store_url: &str) -> Result<Vec<RawProduct>, ScraperError> {
        let origin = normalize_store_url(store_url);
        let mut last_err: Option<ScraperError> = None;

        for version in WC_API_VERSIONS {
            let url = format!("{origin}/wp-json/wc/{version}/products?per_page={WOO_PAGE_SIZE}");
            match self.fetch_version(&url, version).await {
                Ok(products) => {
                    tracing::debug!(version, count = products.len(), "WooCommerce API answered");
                    return Ok(products.into_iter().map(RawProduct::from).collect());
                }
                Err(e) => {
                    tracing::debug!(version, error = %e, "WooCommerce API version failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or(ScraperError::NotFound {
            url: format!("{origin}/wp-json/wc/v3/products"),
        }))
    }

    async fn fetch_version(
        &self,
        url: &str,
        version: &str,
    ) -> Result<Vec<WooProduct>, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Vec<WooProduct>>(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("WooCommerce {version} products"),
            source: e,
        })
    }
}

impl From<WooProduct> for RawProduct {
    fn from(product: WooProduct) -> Self {
        let body_html = product
            .description
            .filter(|d| !d.is_empty())
            .or(product.short_description);

        let published_at = if product.status.as_deref() == Some("publish") {
            product.date_created.clone()
        } else {
            None
        };

        let images = product
            .images
            .into_iter()
            .enumerate()
            .map(|(index, image)| RawImage {
                id: image.id,
                src: image.src,
                alt: image.alt,
                position: i64::try_from(index + 1).unwrap_or(i64::MAX),
            })
            .collect();

        // Woo reports weight in the store's configured unit without
        // naming it; the value is passed through as-is.
        let grams = product
            .weight
            .as_deref()
            .and_then(|w| w.parse::<f64>().ok())
            .unwrap_or(0.0);

        let compare_at_price = match (&product.price, &product.regular_price) {
            (Some(price), Some(regular)) if !regular.is_empty() && regular != price => {
                Some(regular.clone())
            }
            _ => None,
        };

        let variant = RawVariant {
            id: None,
            sku: product.sku.unwrap_or_default(),
            grams,
            inventory_quantity: product.stock_quantity.unwrap_or(0),
            price: product.price.filter(|p| !p.is_empty()).unwrap_or_else(|| "0".to_owned()),
            compare_at_price,
            available: product.stock_status.as_deref() == Some("instock"),
            ..RawVariant::synthesized_default()
        };

        RawProduct {
            id: Some(product.id),
            handle: product.slug,
            title: product.name,
            // WooCommerce has no vendor concept.
            vendor: String::new(),
            product_type: product
                .categories
                .iter()
                .map(|c| c.name.as_str())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            tags: product
                .tags
                .into_iter()
                .map(|t| t.name)
                .filter(|n| !n.is_empty())
                .collect(),
            body_html,
            published_at,
            created_at: product.date_created.unwrap_or_default(),
            updated_at: product.date_modified.unwrap_or_default(),
            collection_name: None,
            variants: vec![variant],
            images,
        }
    }
}
