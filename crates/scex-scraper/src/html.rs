//! Best-effort HTML shop-page extraction for WordPress/WooCommerce
//! stores whose REST API is locked down.
//!
//! This path is fundamentally heuristic: it walks a cascade of common
//! WooCommerce CSS selectors and takes whatever resolves. Each record
//! carries a `confidence` score (the fraction of fields that resolved)
//! so callers can see how degraded a scrape was. The exact-contract
//! guarantees of the normalizer do not extend back into this module —
//! a record missing price or description is expected output here.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use scex_core::{RawImage, RawProduct, RawVariant};

/// Shop-page paths probed in order; the first page yielding products wins.
const SHOP_PATHS: [&str; 4] = ["/shop", "/products", "/store", "/product-category/all"];

/// Product container selectors, most specific first.
const CONTAINER_SELECTORS: [&str; 6] = [
    ".woocommerce ul.products li.product",
    ".products .product",
    ".wc-products .product",
    ".product-item",
    ".woocommerce-LoopProduct-link",
    "article.product",
];

const TITLE_SELECTORS: [&str; 6] = [
    ".woocommerce-loop-product__title",
    ".product-title",
    "h2 a",
    "h3 a",
    ".entry-title",
    r#"a[href*="product"]"#,
];

const PRICE_SELECTORS: [&str; 5] = [
    ".price .amount",
    ".woocommerce-Price-amount",
    ".price",
    ".product-price",
    ".cost",
];

const DESCRIPTION_SELECTORS: [&str; 4] = [
    ".woocommerce-product-details__short-description",
    ".product-excerpt",
    ".entry-summary",
    "p",
];

/// Cap on products taken from one shop page.
const MAX_HTML_PRODUCTS: usize = 50;

/// Fields scored into [`ExtractedProduct::confidence`].
const SCORED_FIELDS: f32 = 4.0;

/// A partially-extracted product from a shop page listing.
#[derive(Debug, Clone)]
pub struct ExtractedProduct {
    pub title: String,
    /// Numeric price text, e.g. `"19.99"`. Empty when no price resolved.
    pub price: String,
    pub product_url: String,
    pub image_url: String,
    pub description: String,
    /// Fraction of scored fields (title, price, image, description) that
    /// resolved; `1.0` is a fully-populated listing entry.
    pub confidence: f32,
}

/// Fetches and extracts products from the store's shop pages.
///
/// Best-effort by contract: every failure (network, non-2xx, no matching
/// selectors) degrades to an empty result with a debug log, never an
/// error.
pub async fn fetch_via_html(client: &reqwest::Client, store_url: &str) -> Vec<RawProduct> {
    let origin = crate::client::normalize_store_url(store_url);

    for path in SHOP_PATHS {
        let url = format!("{origin}{path}");
        let body = match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "failed reading shop page body");
                    continue;
                }
            },
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "shop page not available");
                continue;
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "shop page request failed");
                continue;
            }
        };

        let extracted = extract_products(&body, &origin);
        if !extracted.is_empty() {
            tracing::info!(url = %url, count = extracted.len(), "extracted products from HTML");
            return extracted.into_iter().map(RawProduct::from).collect();
        }
    }

    Vec::new()
}

/// Extracts product records from one shop page. Pure and synchronous so
/// the selector cascade is testable against static HTML.
#[must_use]
pub fn extract_products(html: &str, base_url: &str) -> Vec<ExtractedProduct> {
    let document = Html::parse_document(html);

    for selector_source in CONTAINER_SELECTORS {
        let Ok(selector) = Selector::parse(selector_source) else {
            continue;
        };
        let containers: Vec<ElementRef<'_>> = document.select(&selector).collect();
        if containers.is_empty() {
            continue;
        }

        return containers
            .into_iter()
            .take(MAX_HTML_PRODUCTS)
            .filter_map(|container| extract_one(container, base_url))
            .collect();
    }

    Vec::new()
}

/// Extracts a single product from its container element. Returns `None`
/// when no title resolves — a listing entry without a name is noise.
fn extract_one(container: ElementRef<'_>, base_url: &str) -> Option<ExtractedProduct> {
    let mut title = String::new();
    let mut product_url = String::new();

    for selector_source in TITLE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_source) else {
            continue;
        };
        if let Some(element) = container.select(&selector).next() {
            title = element.text().collect::<String>().trim().to_owned();
            if let Some(href) = element.value().attr("href") {
                product_url = absolutize(base_url, href);
            } else if let Ok(anchor) = Selector::parse("a") {
                // Title elements are often headings wrapping the link.
                if let Some(href) = container
                    .select(&anchor)
                    .find_map(|a| a.value().attr("href"))
                {
                    product_url = absolutize(base_url, href);
                }
            }
            if !title.is_empty() {
                break;
            }
        }
    }
    if title.is_empty() {
        return None;
    }

    let mut price = String::new();
    for selector_source in PRICE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_source) else {
            continue;
        };
        if let Some(element) = container.select(&selector).next() {
            let text = element.text().collect::<String>();
            price = extract_numeric_price(&text).unwrap_or_default();
            break;
        }
    }

    let mut image_url = String::new();
    if let Ok(selector) = Selector::parse("img") {
        if let Some(img) = container.select(&selector).next() {
            let src = img
                .value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
                .unwrap_or("");
            if !src.is_empty() {
                image_url = absolutize(base_url, src);
            }
        }
    }

    let mut description = String::new();
    for selector_source in DESCRIPTION_SELECTORS {
        let Ok(selector) = Selector::parse(selector_source) else {
            continue;
        };
        if let Some(element) = container.select(&selector).next() {
            description = element.text().collect::<String>().trim().to_owned();
            if !description.is_empty() {
                break;
            }
        }
    }

    let resolved = 1.0
        + f32::from(u8::from(!price.is_empty()))
        + f32::from(u8::from(!image_url.is_empty()))
        + f32::from(u8::from(!description.is_empty()));

    Some(ExtractedProduct {
        title,
        price,
        product_url,
        image_url,
        description,
        confidence: resolved / SCORED_FIELDS,
    })
}

/// Pulls the first numeric amount out of a price string like
/// `"$1,299.00 – $1,499.00"`.
fn extract_numeric_price(text: &str) -> Option<String> {
    let re = Regex::new(r"\d[\d,]*\.?\d*").expect("valid regex");
    re.find(text).map(|m| m.as_str().replace(',', ""))
}

/// Resolves possibly-relative hrefs against the page origin.
fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_owned();
    }
    match reqwest::Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_owned(),
    }
}

impl From<ExtractedProduct> for RawProduct {
    fn from(extracted: ExtractedProduct) -> Self {
        let images = if extracted.image_url.is_empty() {
            // No image means the normalizer will reject this product —
            // intentional, the import format requires one.
            Vec::new()
        } else {
            vec![RawImage {
                id: None,
                src: extracted.image_url,
                alt: None,
                position: 1,
            }]
        };

        let variant = RawVariant {
            price: if extracted.price.is_empty() {
                "0".to_owned()
            } else {
                extracted.price
            },
            ..RawVariant::synthesized_default()
        };

        RawProduct {
            id: None,
            handle: String::new(),
            title: extracted.title,
            vendor: String::new(),
            product_type: String::new(),
            tags: Vec::new(),
            body_html: if extracted.description.is_empty() {
                None
            } else {
                Some(extracted.description)
            },
            published_at: None,
            created_at: String::new(),
            updated_at: String::new(),
            collection_name: None,
            variants: vec![variant],
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP_PAGE: &str = r#"
        <html><body>
        <div class="woocommerce"><ul class="products">
            <li class="product">
                <h2 class="woocommerce-loop-product__title">
                    <a href="/product/garden-mug">Garden Mug</a>
                </h2>
                <span class="price"><span class="amount">$12.50</span></span>
                <img src="/wp-content/uploads/mug.jpg" />
                <p class="product-excerpt">A sturdy mug.</p>
            </li>
            <li class="product">
                <h2 class="woocommerce-loop-product__title">
                    <a href="https://wp.example.com/product/plain">Plain Thing</a>
                </h2>
            </li>
        </ul></div>
        </body></html>
    "#;

    #[test]
    fn extracts_products_from_woocommerce_markup() {
        let products = extract_products(SHOP_PAGE, "https://wp.example.com");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Garden Mug");
        assert_eq!(products[0].price, "12.50");
        assert_eq!(
            products[0].image_url,
            "https://wp.example.com/wp-content/uploads/mug.jpg"
        );
        assert_eq!(products[0].description, "A sturdy mug.");
        assert_eq!(
            products[0].product_url,
            "https://wp.example.com/product/garden-mug"
        );
    }

    #[test]
    fn confidence_reflects_resolved_fields() {
        let products = extract_products(SHOP_PAGE, "https://wp.example.com");
        assert!((products[0].confidence - 1.0).abs() < f32::EPSILON);
        // Title only: 1 of 4 fields.
        assert!((products[1].confidence - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn no_matching_containers_yields_empty() {
        let products = extract_products("<html><body><p>nothing</p></body></html>", "https://x");
        assert!(products.is_empty());
    }

    #[test]
    fn entries_without_title_are_dropped() {
        let html = r#"<ul class="products"><li class="product"><span class="price">$5</span></li></ul>"#;
        let products = extract_products(html, "https://x");
        assert!(products.is_empty());
    }

    #[test]
    fn numeric_price_extraction_strips_currency_and_commas() {
        assert_eq!(
            extract_numeric_price("$1,299.00 – $1,499.00").as_deref(),
            Some("1299.00")
        );
        assert_eq!(extract_numeric_price("from 9.99 EUR").as_deref(), Some("9.99"));
        assert!(extract_numeric_price("call for price").is_none());
    }

    #[test]
    fn titled_product_without_image_converts_to_imageless_record() {
        let products = extract_products(SHOP_PAGE, "https://wp.example.com");
        let raw = RawProduct::from(products[1].clone());
        assert!(raw.images.is_empty());
        assert_eq!(raw.variants.len(), 1);
        assert_eq!(raw.variants[0].price, "0");
        // Identity falls back to the title for HTML-scraped records.
        assert_eq!(raw.identity(), "Plain Thing");
    }

    #[test]
    fn relative_urls_are_absolutized() {
        assert_eq!(
            absolutize("https://wp.example.com", "/product/mug"),
            "https://wp.example.com/product/mug"
        );
        assert_eq!(
            absolutize("https://wp.example.com", "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
