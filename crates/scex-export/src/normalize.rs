//! Product-to-row expansion for the flat import format.
//!
//! One [`RawProduct`] becomes an ordered group of [`OutputRow`]s: one row
//! per variant, then one image-only row per gallery image beyond the
//! first. The row group shares identical base fields; only variant- and
//! image-specific fields differ.
//!
//! ## The single/multi-variant rule
//!
//! Import systems reject files where single-variant products carry
//! populated option columns, so option fields are emitted only when the
//! product genuinely has something to disambiguate: more than one
//! distinct `(option1, option2, option3)` tuple among variants carrying
//! at least one meaningful option value. A product whose variants all
//! repeat the same non-trivial option value is still single-variant for
//! formatting purposes.

use std::collections::{HashMap, HashSet};

use scex_core::row::{fmt_bool, FULFILLMENT_SERVICE, INVENTORY_POLICY, INVENTORY_TRACKER};
use scex_core::{OutputRow, RawImage, RawProduct, RawVariant, DEFAULT_VARIANT_TITLE};

use crate::category::map_product_type;
use crate::sanitize::{clean_text, sanitize_text, strip_control_chars};

/// Fixed option-slot labels for slots 1/2/3, mirroring the storefront
/// convention for option naming.
const OPTION_LABELS: [&str; 3] = ["Title", "Color", "Size"];

/// An option value is meaningful when it is present, non-empty, and not
/// the `"Default Title"` placeholder.
fn meaningful(option: Option<&str>) -> Option<&str> {
    option.filter(|v| !v.is_empty() && *v != DEFAULT_VARIANT_TITLE)
}

/// Whether the product's variants carry real option combinations.
///
/// Collects the distinct raw option tuples across variants that have at
/// least one meaningful option; only a set with more than one member
/// counts. Cardinality, not mere presence, is the rule: a single
/// repeated non-trivial value leaves nothing to disambiguate.
fn has_real_options(variants: &[RawVariant]) -> bool {
    let distinct: HashSet<(Option<&str>, Option<&str>, Option<&str>)> = variants
        .iter()
        .map(|v| {
            (
                v.option1.as_deref(),
                v.option2.as_deref(),
                v.option3.as_deref(),
            )
        })
        .filter(|(o1, o2, o3)| {
            meaningful(*o1).is_some() || meaningful(*o2).is_some() || meaningful(*o3).is_some()
        })
        .collect();
    distinct.len() > 1
}

/// Grams are integral for almost every real product; keep `250` as
/// `"250"` rather than `"250.0"` while preserving fractional weights.
fn format_grams(grams: f64) -> String {
    if grams.fract().abs() < f64::EPSILON {
        format!("{grams:.0}")
    } else {
        grams.to_string()
    }
}

/// The base fields every row of a product's group shares.
fn base_row(product: &RawProduct) -> OutputRow {
    let body_html = product.body_html.as_deref().unwrap_or("");
    OutputRow {
        handle: clean_text(&product.handle),
        title: clean_text(&product.title),
        body_html: strip_control_chars(body_html),
        vendor: clean_text(&product.vendor),
        product_category: map_product_type(&product.product_type),
        product_type: clean_text(&product.product_type),
        tags: clean_text(&product.tags.join(", ")),
        published: fmt_bool(product.published_at.is_some()).to_owned(),
        collection: clean_text(product.collection_name.as_deref().unwrap_or("")),
        created_at: product.created_at.clone(),
        updated_at: product.updated_at.clone(),
        description: sanitize_text(body_html),
        ..OutputRow::default()
    }
}

/// Expands one product into its ordered row group.
///
/// Products with zero images are rejected (empty result): the import
/// format requires at least one image per product. Products with zero
/// variants get a single synthesized default variant, so every surviving
/// product yields at least one row.
#[must_use]
pub fn product_to_rows(product: &RawProduct) -> Vec<OutputRow> {
    if product.images.is_empty() {
        tracing::debug!(
            identity = %product.identity(),
            title = %product.title,
            "dropping product with no images"
        );
        return Vec::new();
    }

    let synthesized;
    let variants: &[RawVariant] = if product.variants.is_empty() {
        synthesized = [RawVariant::synthesized_default()];
        &synthesized
    } else {
        &product.variants
    };

    let real_options = has_real_options(variants);

    let image_by_id: HashMap<i64, &RawImage> = product
        .images
        .iter()
        .filter_map(|image| image.id.map(|id| (id, image)))
        .collect();
    let main_image = &product.images[0];

    let base = base_row(product);
    let mut rows = Vec::with_capacity(variants.len() + product.images.len() - 1);

    for (index, variant) in variants.iter().enumerate() {
        let mut row = base.clone();

        if real_options {
            if let Some(value) = meaningful(variant.option1.as_deref()) {
                row.option1_name = OPTION_LABELS[0].to_owned();
                row.option1_value = value.to_owned();
            }
            if let Some(value) = meaningful(variant.option2.as_deref()) {
                row.option2_name = OPTION_LABELS[1].to_owned();
                row.option2_value = value.to_owned();
            }
            if let Some(value) = meaningful(variant.option3.as_deref()) {
                row.option3_name = OPTION_LABELS[2].to_owned();
                row.option3_value = value.to_owned();
            }
        }

        row.variant_sku = clean_text(&variant.sku);
        row.variant_grams = format_grams(variant.grams);
        row.variant_inventory_tracker = INVENTORY_TRACKER.to_owned();
        row.variant_inventory_qty = variant.inventory_quantity.to_string();
        row.variant_inventory_policy = INVENTORY_POLICY.to_owned();
        row.variant_fulfillment_service = FULFILLMENT_SERVICE.to_owned();
        row.variant_price = variant.price.clone();
        row.variant_compare_at_price = variant.compare_at_price.clone().unwrap_or_default();
        row.variant_requires_shipping = fmt_bool(variant.requires_shipping).to_owned();
        row.variant_taxable = fmt_bool(variant.taxable).to_owned();
        row.variant_weight_unit = variant.weight_unit.clone();
        row.available = fmt_bool(variant.available).to_owned();
        row.variants_count = variants.len().to_string();
        row.variant_title = clean_text(&variant.title);

        let mapped_image = variant
            .image_id
            .and_then(|id| image_by_id.get(&id))
            .map(|image| image.src.clone());

        if index == 0 {
            // Only the first variant row declares the shared main image.
            row.image_src = main_image.src.clone();
            row.image_position = "1".to_owned();
            row.image_alt_text = clean_text(main_image.alt.as_deref().unwrap_or(""));
            row.variant_image = mapped_image.unwrap_or_else(|| main_image.src.clone());
        } else {
            row.variant_image = mapped_image.unwrap_or_default();
        }

        rows.push(row);
    }

    // Gallery images beyond the first become image-only rows: base fields
    // plus image fields, everything variant-shaped left empty so they are
    // not mistaken for purchasable variants.
    for (index, image) in product.images.iter().enumerate().skip(1) {
        let mut row = base.clone();
        row.image_src = image.src.clone();
        row.image_position = (index + 1).to_string();
        row.image_alt_text = clean_text(image.alt.as_deref().unwrap_or(""));
        rows.push(row);
    }

    rows
}

/// Expands a product list into a flat row collection, logging how many
/// imageless products were excluded.
#[must_use]
pub fn products_to_rows(products: &[RawProduct]) -> Vec<OutputRow> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for product in products {
        let group = product_to_rows(product);
        if group.is_empty() {
            skipped += 1;
        }
        rows.extend(group);
    }
    if skipped > 0 {
        tracing::info!(skipped, "excluded products with no images from export");
    }
    rows
}
