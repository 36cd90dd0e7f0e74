//! Operator-facing row filters applied between normalization and export.

use scex_core::OutputRow;

/// Keeps rows matching the given vendor and/or product type
/// (case-insensitive exact match). `None` means "don't filter on this
/// column". Filtering happens on rows rather than products so image-only
/// rows follow their product's fate automatically — they share the same
/// base fields.
#[must_use]
pub fn filter_rows(
    rows: Vec<OutputRow>,
    vendor: Option<&str>,
    product_type: Option<&str>,
) -> Vec<OutputRow> {
    if vendor.is_none() && product_type.is_none() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            vendor.is_none_or(|v| row.vendor.eq_ignore_ascii_case(v))
                && product_type.is_none_or(|t| row.product_type.eq_ignore_ascii_case(t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(vendor: &str, product_type: &str) -> OutputRow {
        OutputRow {
            vendor: vendor.to_owned(),
            product_type: product_type.to_owned(),
            ..OutputRow::default()
        }
    }

    #[test]
    fn no_filters_returns_everything() {
        let rows = vec![row("Acme", "Shirts"), row("Other", "Mugs")];
        assert_eq!(filter_rows(rows, None, None).len(), 2);
    }

    #[test]
    fn vendor_filter_is_case_insensitive() {
        let rows = vec![row("Acme", "Shirts"), row("Other", "Mugs")];
        let filtered = filter_rows(rows, Some("acme"), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].vendor, "Acme");
    }

    #[test]
    fn both_filters_must_match() {
        let rows = vec![
            row("Acme", "Shirts"),
            row("Acme", "Mugs"),
            row("Other", "Shirts"),
        ];
        let filtered = filter_rows(rows, Some("Acme"), Some("Shirts"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn unmatched_filter_yields_empty() {
        let rows = vec![row("Acme", "Shirts")];
        assert!(filter_rows(rows, Some("Nobody"), None).is_empty());
    }
}
