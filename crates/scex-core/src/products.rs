//! Platform-agnostic raw catalog records.
//!
//! Source adapters (Shopify JSON, WooCommerce REST, HTML scrape) convert
//! their wire shapes into these records; everything downstream — the
//! aggregator and the row normalizer — only ever sees this form. Records
//! are created once per fetch and treated as read-only afterward.
//!
//! ## Defaulting rules
//!
//! Upstream data is wildly uneven: HTML-scraped products have no numeric
//! id, WooCommerce has no vendor, older Shopify stores omit variant
//! availability. Missing fields are defaulted here (empty string, `0`,
//! `true` where the platform treats absence as "yes") rather than
//! rejected, so a partially-populated product still flows through the
//! pipeline field-by-field.

use serde::{Deserialize, Serialize};

/// The placeholder variant title Shopify assigns to products without real
/// option combinations. An option value equal to this literal is never
/// meaningful.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// A product as fetched from any supported storefront.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    /// Numeric product id. Absent for HTML-scraped records.
    pub id: Option<i64>,
    /// URL slug. May be empty for degraded records.
    pub handle: String,
    pub title: String,
    pub vendor: String,
    /// Free-text product type / category string from the source.
    pub product_type: String,
    pub tags: Vec<String>,
    /// Raw HTML description, exactly as the source returned it.
    pub body_html: Option<String>,
    /// Publication timestamp; `None` means unpublished.
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Collection title, attached by the per-collection fetch method.
    pub collection_name: Option<String>,
    /// May be empty; the normalizer synthesizes a default variant then.
    pub variants: Vec<RawVariant>,
    /// May be empty; the normalizer rejects imageless products.
    pub images: Vec<RawImage>,
}

impl RawProduct {
    /// Stable identity key used by the aggregator's seen-set.
    ///
    /// Prefers the numeric id; falls back to the handle; falls back to
    /// `title+handle` for sources that provide neither (HTML scrapes).
    #[must_use]
    pub fn identity(&self) -> String {
        if let Some(id) = self.id {
            return id.to_string();
        }
        if !self.handle.is_empty() {
            return self.handle.clone();
        }
        format!("{}{}", self.title, self.handle)
    }
}

/// A single purchasable variant of a [`RawProduct`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariant {
    pub id: Option<i64>,
    /// Defaults to `"Default Title"` when the source omits it.
    pub title: String,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub sku: String,
    /// Weight in grams.
    pub grams: f64,
    pub inventory_quantity: i64,
    /// Price as a decimal string, exactly as the source returned it.
    pub price: String,
    pub compare_at_price: Option<String>,
    pub requires_shipping: bool,
    pub taxable: bool,
    pub weight_unit: String,
    pub available: bool,
    /// Foreign key into the owning product's `images` by id.
    pub image_id: Option<i64>,
}

impl RawVariant {
    /// The variant synthesized for products whose source returned zero
    /// variants, guaranteeing every surviving product yields at least one
    /// row.
    #[must_use]
    pub fn synthesized_default() -> Self {
        Self {
            id: None,
            title: DEFAULT_VARIANT_TITLE.to_owned(),
            option1: None,
            option2: None,
            option3: None,
            sku: String::new(),
            grams: 0.0,
            inventory_quantity: 0,
            price: "0".to_owned(),
            compare_at_price: None,
            requires_shipping: true,
            taxable: true,
            weight_unit: "kg".to_owned(),
            available: true,
            image_id: None,
        }
    }
}

impl Default for RawVariant {
    fn default() -> Self {
        Self::synthesized_default()
    }
}

/// A product image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImage {
    pub id: Option<i64>,
    /// Canonical image URL.
    pub src: String,
    pub alt: Option<String>,
    /// 1-based ordinal within the product's gallery.
    pub position: i64,
}
