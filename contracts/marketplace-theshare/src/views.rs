//! Enumeration views. All return materialised snapshots, so callers
//! iterating across blocks never observe a half-updated store.

use crate::*;

#[near]
impl Contract {
    pub fn get_listing(&self, fingerprint: String) -> Option<Listing> {
        self.listings.get(&fingerprint).cloned()
    }

    pub fn get_listings_total(&self) -> u64 {
        self.listings.len() as u64
    }

    pub fn get_listings(&self, from_index: Option<u64>, limit: Option<u64>) -> Vec<Listing> {
        let start = from_index.unwrap_or(0) as usize;
        let limit = limit.unwrap_or(DEFAULT_VIEW_LIMIT) as usize;
        self.listings
            .values()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_listings_by_seller(
        &self,
        seller: AccountId,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Vec<Listing> {
        let start = from_index.unwrap_or(0) as usize;
        let limit = limit.unwrap_or(DEFAULT_VIEW_LIMIT) as usize;
        let Some(fingerprints) = self.by_seller.get(&seller) else {
            return Vec::new();
        };
        fingerprints
            .iter()
            .skip(start)
            .take(limit)
            .filter_map(|fp| self.listings.get(fp).cloned())
            .collect()
    }
}
