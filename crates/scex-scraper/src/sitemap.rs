//! Product URL discovery through sitemap XML.
//!
//! Used as a diagnostic of last resort: when every product endpoint
//! comes back empty, the sitemap often still reveals whether the store
//! has product pages at all, which sharpens the "no products found"
//! report. Only `<loc>` entries containing `/products/` count.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Sitemap locations probed in order.
const SITEMAP_PATHS: [&str; 3] = ["/sitemap.xml", "/sitemap_products_1.xml", "/products.xml"];

/// Cap on collected product URLs.
const MAX_SITEMAP_URLS: usize = 100;

/// Fetches the first sitemap that yields product URLs. Best-effort:
/// failures degrade to an empty list.
pub async fn fetch_product_urls(client: &reqwest::Client, store_url: &str) -> Vec<String> {
    let origin = crate::client::normalize_store_url(store_url);

    for path in SITEMAP_PATHS {
        let url = format!("{origin}{path}");
        let body = match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => body,
                Err(_) => continue,
            },
            _ => continue,
        };

        let urls = extract_product_urls(&body);
        if !urls.is_empty() {
            tracing::debug!(url = %url, count = urls.len(), "sitemap lists product pages");
            return urls;
        }
    }

    Vec::new()
}

/// Collects `<loc>` values containing `/products/` from sitemap XML,
/// up to [`MAX_SITEMAP_URLS`]. Malformed XML yields whatever was
/// collected before the parse error.
#[must_use]
pub fn extract_product_urls(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut urls = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"loc" => {
                in_loc = true;
            }
            Ok(Event::End(element)) if element.local_name().as_ref() == b"loc" => {
                in_loc = false;
            }
            Ok(Event::Text(text)) if in_loc => {
                if let Ok(value) = text.unescape() {
                    let value = value.trim();
                    if value.contains("/products/") {
                        urls.push(value.to_owned());
                        if urls.len() >= MAX_SITEMAP_URLS {
                            return urls;
                        }
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    urls
}
