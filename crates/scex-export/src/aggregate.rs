//! Cross-method result merging.
//!
//! Fetch methods run in a fixed priority order and may return overlapping
//! product sets (the paginated fetch re-reads what the standard fetch
//! saw; collections re-read both). The aggregator keeps the first
//! occurrence of every identity and ignores the rest — an idempotent
//! union, never a replace. The whole structure is owned by the single
//! pipeline thread; no locking.

use std::collections::{BTreeMap, HashSet};

use scex_core::RawProduct;

/// Running union of products and collection counts across fetch methods.
#[derive(Debug, Default)]
pub struct Aggregate {
    seen: HashSet<String>,
    products: Vec<RawProduct>,
    collection_counts: BTreeMap<String, usize>,
}

impl Aggregate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends products whose identity has not been seen yet, preserving
    /// input order. Returns how many were actually new.
    pub fn push(&mut self, products: Vec<RawProduct>) -> usize {
        let mut added = 0usize;
        for product in products {
            if self.seen.insert(product.identity()) {
                self.products.push(product);
                added += 1;
            }
        }
        added
    }

    /// Merges a collection-name-to-count map into the running totals.
    /// Colliding keys are summed; new keys are unioned in.
    pub fn push_collection_counts(&mut self, counts: BTreeMap<String, usize>) {
        for (name, count) in counts {
            *self.collection_counts.entry(name).or_insert(0) += count;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn products(&self) -> &[RawProduct] {
        &self.products
    }

    #[must_use]
    pub fn collection_counts(&self) -> &BTreeMap<String, usize> {
        &self.collection_counts
    }

    /// Consumes the aggregate, yielding the merged product list and the
    /// merged collection counts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<RawProduct>, BTreeMap<String, usize>) {
        (self.products, self.collection_counts)
    }
}
