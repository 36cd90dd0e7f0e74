//! Shopify wire types for the public storefront JSON endpoints, and
//! their conversion into the platform-agnostic raw records.
//!
//! ## Observed shape notes
//!
//! - `tags` comes back as a JSON array of strings from `products.json`
//!   (the legacy docs describe a comma-separated string; the endpoint
//!   returns an array). `#[serde(default)]` covers stores with no tags.
//! - `published_at` is `null` for unpublished products, not omitted.
//! - `compare_at_price` is explicitly `null` when the variant is not on
//!   sale; when present it is a decimal string like `"24.00"`.
//! - `available` may be absent on older stores; absence means available.
//! - Variant `image_id` references an entry of the product's `images`
//!   array; it is `null` for variants that share the product image.
//! - Some collection feeds omit `body_html` entirely.

use serde::Deserialize;

use scex_core::{RawImage, RawProduct, RawVariant, DEFAULT_VARIANT_TITLE};

/// Top-level response from `GET /products.json` and
/// `GET /collections/{handle}/products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    pub products: Vec<ShopifyProduct>,
}

/// Top-level response from `GET /collections.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyCollectionsResponse {
    pub collections: Vec<ShopifyCollection>,
}

/// One collection from `collections.json`. Only the handle (needed for
/// the per-collection products URL) and the display title are used.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyCollection {
    pub handle: String,
    #[serde(default)]
    pub title: String,
}

impl ShopifyCollection {
    /// Display name for count reporting: the title, or the handle for
    /// collections published without one.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.handle
        } else {
            &self.title
        }
    }
}

/// A single product from the storefront JSON API.
#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
    #[serde(default)]
    pub images: Vec<ShopifyImage>,
}

/// A purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub grams: Option<f64>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default = "default_true")]
    pub requires_shipping: bool,
    #[serde(default = "default_true")]
    pub taxable: bool,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub image_id: Option<i64>,
}

/// A product image from the storefront JSON API.
#[derive(Debug, Deserialize)]
pub struct ShopifyImage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

/// Default for boolean fields the endpoint omits on older stores; serde's
/// `default = "..."` attribute wants a function path, not a constant.
fn default_true() -> bool {
    true
}

impl From<ShopifyProduct> for RawProduct {
    fn from(product: ShopifyProduct) -> Self {
        let images = product
            .images
            .into_iter()
            .enumerate()
            .map(|(index, image)| RawImage {
                id: image.id,
                src: image.src,
                alt: image.alt,
                position: image
                    .position
                    .unwrap_or_else(|| i64::try_from(index + 1).unwrap_or(i64::MAX)),
            })
            .collect();

        RawProduct {
            id: Some(product.id),
            handle: product.handle,
            title: product.title,
            vendor: product.vendor.unwrap_or_default(),
            product_type: product.product_type.unwrap_or_default(),
            tags: product.tags,
            body_html: product.body_html,
            published_at: product.published_at,
            created_at: product.created_at.unwrap_or_default(),
            updated_at: product.updated_at.unwrap_or_default(),
            collection_name: None,
            variants: product.variants.into_iter().map(RawVariant::from).collect(),
            images,
        }
    }
}

impl From<ShopifyVariant> for RawVariant {
    fn from(variant: ShopifyVariant) -> Self {
        let title = match variant.title {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_VARIANT_TITLE.to_owned(),
        };
        let weight_unit = match variant.weight_unit {
            Some(unit) if !unit.is_empty() => unit,
            _ => "kg".to_owned(),
        };
        RawVariant {
            id: variant.id,
            title,
            option1: variant.option1,
            option2: variant.option2,
            option3: variant.option3,
            sku: variant.sku.unwrap_or_default(),
            grams: variant.grams.unwrap_or(0.0),
            inventory_quantity: variant.inventory_quantity.unwrap_or(0),
            price: variant.price.unwrap_or_else(|| "0".to_owned()),
            compare_at_price: variant.compare_at_price,
            requires_shipping: variant.requires_shipping,
            taxable: variant.taxable,
            weight_unit,
            available: variant.available,
            image_id: variant.image_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_product_deserializes_with_defaults() {
        let json = r#"{"id": 1, "title": "Widget", "handle": "widget"}"#;
        let product: ShopifyProduct = serde_json::from_str(json).expect("parse failed");
        assert!(product.tags.is_empty());
        assert!(product.variants.is_empty());
        assert!(product.images.is_empty());
        assert!(product.published_at.is_none());
    }

    #[test]
    fn variant_defaults_applied_on_conversion() {
        let json = r#"{"id": 10}"#;
        let wire: ShopifyVariant = serde_json::from_str(json).expect("parse failed");
        let raw = RawVariant::from(wire);
        assert_eq!(raw.title, DEFAULT_VARIANT_TITLE);
        assert_eq!(raw.price, "0");
        assert_eq!(raw.weight_unit, "kg");
        assert_eq!(raw.inventory_quantity, 0);
        assert!(raw.available);
        assert!(raw.requires_shipping);
        assert!(raw.taxable);
    }

    #[test]
    fn null_compare_at_price_stays_none() {
        let json = r#"{"id": 10, "price": "12.00", "compare_at_price": null}"#;
        let wire: ShopifyVariant = serde_json::from_str(json).expect("parse failed");
        let raw = RawVariant::from(wire);
        assert!(raw.compare_at_price.is_none());
    }

    #[test]
    fn image_position_falls_back_to_array_order() {
        let json = r#"{
            "id": 1, "title": "Widget", "handle": "widget",
            "images": [
                {"id": 11, "src": "https://cdn/a.jpg"},
                {"id": 12, "src": "https://cdn/b.jpg"}
            ]
        }"#;
        let product: ShopifyProduct = serde_json::from_str(json).expect("parse failed");
        let raw = RawProduct::from(product);
        assert_eq!(raw.images[0].position, 1);
        assert_eq!(raw.images[1].position, 2);
    }

    #[test]
    fn conversion_keeps_option_values_verbatim() {
        let json = r#"{
            "id": 1, "title": "Shirt", "handle": "shirt",
            "variants": [
                {"id": 2, "title": "Red", "option1": "Red", "price": "19.99", "image_id": 42}
            ]
        }"#;
        let product: ShopifyProduct = serde_json::from_str(json).expect("parse failed");
        let raw = RawProduct::from(product);
        assert_eq!(raw.variants[0].option1.as_deref(), Some("Red"));
        assert_eq!(raw.variants[0].image_id, Some(42));
        assert_eq!(raw.identity(), "1");
    }

    #[test]
    fn collection_display_name_prefers_title() {
        let with_title = ShopifyCollection {
            handle: "summer".to_owned(),
            title: "Summer Collection".to_owned(),
        };
        assert_eq!(with_title.display_name(), "Summer Collection");
        let without_title = ShopifyCollection {
            handle: "summer".to_owned(),
            title: String::new(),
        };
        assert_eq!(without_title.display_name(), "summer");
    }
}
