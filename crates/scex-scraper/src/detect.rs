//! Storefront platform detection by landing-page marker search.
//!
//! Heuristic and cheap: fetch the landing page once and look for
//! platform fingerprints in the raw HTML. Wrong guesses cost nothing —
//! the pipeline can always be forced onto a platform, or told to try
//! both.

/// Markers whose presence identifies a Shopify storefront.
const SHOPIFY_MARKERS: [&str; 2] = ["cdn.shopify.com", "shopify"];

/// Markers whose presence identifies a WordPress site.
const WORDPRESS_MARKERS: [&str; 5] = ["wp-content", "wordpress", "wp-json", "/wp-", "woocommerce"];

/// Storefront platform classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Shopify,
    WordPress,
    Unknown,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Shopify => write!(f, "shopify"),
            Platform::WordPress => write!(f, "wordpress"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

/// Fetches the landing page and classifies the platform. Fetch failures
/// degrade to [`Platform::Unknown`] — detection is advisory, never
/// fatal.
pub async fn detect_platform(client: &reqwest::Client, store_url: &str) -> Platform {
    let origin = crate::client::normalize_store_url(store_url);
    let body = match client.get(&origin).send().await {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(store_url, error = %e, "platform detection: body read failed");
                return Platform::Unknown;
            }
        },
        Err(e) => {
            tracing::debug!(store_url, error = %e, "platform detection: request failed");
            return Platform::Unknown;
        }
    };
    classify(&body)
}

/// Pure marker search over page content. Shopify markers are checked
/// first: a Shopify store embedding a WordPress blog is still Shopify.
#[must_use]
pub fn classify(content: &str) -> Platform {
    let lower = content.to_lowercase();
    if SHOPIFY_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Platform::Shopify;
    }
    if WORDPRESS_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return Platform::WordPress;
    }
    Platform::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_shopify_from_cdn_reference() {
        let html = r#"<link href="https://cdn.shopify.com/s/files/1/theme.css">"#;
        assert_eq!(classify(html), Platform::Shopify);
    }

    #[test]
    fn detects_wordpress_from_wp_content() {
        let html = r#"<img src="/wp-content/uploads/logo.png">"#;
        assert_eq!(classify(html), Platform::WordPress);
    }

    #[test]
    fn detects_wordpress_from_woocommerce_class() {
        let html = r#"<body class="woocommerce-page">"#;
        assert_eq!(classify(html), Platform::WordPress);
    }

    #[test]
    fn shopify_wins_when_both_marker_sets_appear() {
        let html = r#"<script src="https://cdn.shopify.com/x.js"></script>
                      <img src="/wp-content/y.png">"#;
        assert_eq!(classify(html), Platform::Shopify);
    }

    #[test]
    fn marker_search_is_case_insensitive() {
        assert_eq!(classify("Powered by Shopify"), Platform::Shopify);
        assert_eq!(classify("Powered by WordPress"), Platform::WordPress);
    }

    #[test]
    fn unrecognized_content_is_unknown() {
        assert_eq!(classify("<html><body>hello</body></html>"), Platform::Unknown);
    }

    #[test]
    fn platform_display_names() {
        assert_eq!(Platform::Shopify.to_string(), "shopify");
        assert_eq!(Platform::WordPress.to_string(), "wordpress");
        assert_eq!(Platform::Unknown.to_string(), "unknown");
    }
}
