//! The flat output row shared by the CSV and JSON export formats.
//!
//! One `OutputRow` is either a **variant row** (option and variant fields
//! populated) or an **image-only row** (only image fields populated, used
//! to declare gallery images beyond the first). Rows belonging to the
//! same product share identical base fields.
//!
//! Every field is a `String` on purpose: the downstream import format
//! wants `"TRUE"`/`"FALSE"` literals rather than native booleans, and
//! keeping a single string-typed in-memory shape makes it impossible for
//! the CSV and JSON renditions to diverge.

use serde::{Deserialize, Serialize};

/// Constant for `Variant Inventory Tracker` on variant rows.
pub const INVENTORY_TRACKER: &str = "shopify";
/// Constant for `Variant Inventory Policy` on variant rows.
pub const INVENTORY_POLICY: &str = "deny";
/// Constant for `Variant Fulfillment Service` on variant rows.
pub const FULFILLMENT_SERVICE: &str = "manual";

/// Column titles in export order. Order is significant for CSV
/// compatibility and must match the field order of [`OutputRow`].
pub const COLUMNS: [&str; 36] = [
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Product Category",
    "Type",
    "Tags",
    "Published",
    "Collection",
    "Created At",
    "Updated At",
    "Option1 Name",
    "Option1 Value",
    "Option2 Name",
    "Option2 Value",
    "Option3 Name",
    "Option3 Value",
    "Variant SKU",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Qty",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Price",
    "Variant Compare At Price",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Weight Unit",
    "Available",
    "Variants Count",
    "Variant Title",
    "Image Src",
    "Image Position",
    "Image Alt Text",
    "Variant Image",
    "Description",
];

/// One flat export row. Field order mirrors [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Body (HTML)")]
    pub body_html: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Type")]
    pub product_type: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Published")]
    pub published: String,
    #[serde(rename = "Collection")]
    pub collection: String,
    #[serde(rename = "Created At")]
    pub created_at: String,
    #[serde(rename = "Updated At")]
    pub updated_at: String,
    #[serde(rename = "Option1 Name")]
    pub option1_name: String,
    #[serde(rename = "Option1 Value")]
    pub option1_value: String,
    #[serde(rename = "Option2 Name")]
    pub option2_name: String,
    #[serde(rename = "Option2 Value")]
    pub option2_value: String,
    #[serde(rename = "Option3 Name")]
    pub option3_name: String,
    #[serde(rename = "Option3 Value")]
    pub option3_value: String,
    #[serde(rename = "Variant SKU")]
    pub variant_sku: String,
    #[serde(rename = "Variant Grams")]
    pub variant_grams: String,
    #[serde(rename = "Variant Inventory Tracker")]
    pub variant_inventory_tracker: String,
    #[serde(rename = "Variant Inventory Qty")]
    pub variant_inventory_qty: String,
    #[serde(rename = "Variant Inventory Policy")]
    pub variant_inventory_policy: String,
    #[serde(rename = "Variant Fulfillment Service")]
    pub variant_fulfillment_service: String,
    #[serde(rename = "Variant Price")]
    pub variant_price: String,
    #[serde(rename = "Variant Compare At Price")]
    pub variant_compare_at_price: String,
    #[serde(rename = "Variant Requires Shipping")]
    pub variant_requires_shipping: String,
    #[serde(rename = "Variant Taxable")]
    pub variant_taxable: String,
    #[serde(rename = "Variant Weight Unit")]
    pub variant_weight_unit: String,
    #[serde(rename = "Available")]
    pub available: String,
    #[serde(rename = "Variants Count")]
    pub variants_count: String,
    #[serde(rename = "Variant Title")]
    pub variant_title: String,
    #[serde(rename = "Image Src")]
    pub image_src: String,
    #[serde(rename = "Image Position")]
    pub image_position: String,
    #[serde(rename = "Image Alt Text")]
    pub image_alt_text: String,
    #[serde(rename = "Variant Image")]
    pub variant_image: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl OutputRow {
    /// Field values in [`COLUMNS`] order, for positional writers (CSV).
    #[must_use]
    pub fn as_record(&self) -> [&str; 36] {
        [
            &self.handle,
            &self.title,
            &self.body_html,
            &self.vendor,
            &self.product_category,
            &self.product_type,
            &self.tags,
            &self.published,
            &self.collection,
            &self.created_at,
            &self.updated_at,
            &self.option1_name,
            &self.option1_value,
            &self.option2_name,
            &self.option2_value,
            &self.option3_name,
            &self.option3_value,
            &self.variant_sku,
            &self.variant_grams,
            &self.variant_inventory_tracker,
            &self.variant_inventory_qty,
            &self.variant_inventory_policy,
            &self.variant_fulfillment_service,
            &self.variant_price,
            &self.variant_compare_at_price,
            &self.variant_requires_shipping,
            &self.variant_taxable,
            &self.variant_weight_unit,
            &self.available,
            &self.variants_count,
            &self.variant_title,
            &self.image_src,
            &self.image_position,
            &self.image_alt_text,
            &self.variant_image,
            &self.description,
        ]
    }
}

/// Serializes a boolean the way the import format wants it.
#[must_use]
pub fn fmt_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_bool_uses_uppercase_literals() {
        assert_eq!(fmt_bool(true), "TRUE");
        assert_eq!(fmt_bool(false), "FALSE");
    }

    #[test]
    fn record_length_matches_column_count() {
        let row = OutputRow::default();
        assert_eq!(row.as_record().len(), COLUMNS.len());
    }

    #[test]
    fn record_order_matches_columns() {
        let row = OutputRow {
            handle: "h".to_owned(),
            variant_price: "9.99".to_owned(),
            description: "d".to_owned(),
            ..OutputRow::default()
        };
        let record = row.as_record();
        assert_eq!(record[0], "h");
        assert_eq!(
            record[COLUMNS.iter().position(|c| *c == "Variant Price").unwrap()],
            "9.99"
        );
        assert_eq!(record[34], "d");
    }

    #[test]
    fn json_keys_are_column_titles() {
        let row = OutputRow::default();
        let json = serde_json::to_value(&row).expect("serialization failed");
        let object = json.as_object().expect("expected a JSON object");
        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing key {column}");
        }
    }
}
