//! Multi-request fetch loops for `ShopifyClient`.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use scex_core::RawProduct;

use crate::error::ScraperError;

use super::ShopifyClient;

impl ShopifyClient {
    /// Fetches all products by walking `?limit=N&page=P` pages.
    ///
    /// Stops when a page returns fewer than `page_size` items (the last
    /// page) and never fetches more than `max_pages` pages — runaway
    /// pagination against a misbehaving or adversarial server ends with
    /// a warning and whatever was collected, not an infinite loop.
    /// `inter_request_delay_ms` is applied between pages (never before
    /// the first).
    ///
    /// **All-or-nothing on errors**: if any page fails, already-fetched
    /// pages are discarded and the error is returned; the pipeline
    /// treats the whole method as having produced no data.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying page fetch.
    pub async fn fetch_paginated(
        &self,
        store_url: &str,
        page_size: u32,
        max_pages: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<RawProduct>, ScraperError> {
        let mut all_products: Vec<RawProduct> = Vec::new();
        let mut page = 1u32;

        loop {
            if page > max_pages {
                tracing::warn!(
                    store_url,
                    max_pages,
                    collected = all_products.len(),
                    "reached pagination safety cap; stopping"
                );
                break;
            }

            if page > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let products = self.fetch_products_page(store_url, page_size, page).await?;
            let fetched = products.len();
            all_products.extend(products.into_iter().map(RawProduct::from));

            if fetched < page_size as usize {
                break;
            }
            page += 1;
        }

        Ok(all_products)
    }

    /// Fetches products collection-by-collection, attaching each
    /// collection's display name to its products and counting products
    /// per collection.
    ///
    /// A collection whose feed fails is skipped with a warning — one
    /// broken collection must not take down the method. Products
    /// appearing in several collections are kept once (first collection
    /// wins). The whole method fails only when the collection *list*
    /// cannot be fetched.
    ///
    /// # Errors
    ///
    /// Propagates errors from the `collections.json` fetch only.
    pub async fn fetch_by_collections(
        &self,
        store_url: &str,
        inter_request_delay_ms: u64,
    ) -> Result<(Vec<RawProduct>, BTreeMap<String, usize>), ScraperError> {
        let collections = self.fetch_collections(store_url).await?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut products: Vec<RawProduct> = Vec::new();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut is_first = true;

        for collection in collections {
            if !is_first && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            is_first = false;

            let batch = match self
                .fetch_collection_products(store_url, &collection.handle)
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(
                        collection = %collection.handle,
                        error = %e,
                        "skipping collection; feed fetch failed"
                    );
                    continue;
                }
            };

            let name = collection.display_name().to_owned();
            *counts.entry(name.clone()).or_insert(0) += batch.len();

            for wire in batch {
                let mut raw = RawProduct::from(wire);
                raw.collection_name = Some(name.clone());
                if seen.insert(raw.identity()) {
                    products.push(raw);
                }
            }
        }

        Ok((products, counts))
    }
}
