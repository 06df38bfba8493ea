// Internal helper functions for the marketplace

use crate::*;

impl Contract {
    /// Insert a listing, maintaining the per-seller index.
    /// Fails when a listing with the same fingerprint is already active.
    pub(crate) fn internal_add_listing(&mut self, listing: Listing) -> Result<(), MarketError> {
        if self.listings.contains_key(&listing.fingerprint) {
            return Err(MarketError::AlreadyListed(
                "An active listing with this fingerprint already exists".into(),
            ));
        }

        let fingerprint = listing.fingerprint.clone();
        let seller = listing.seller.clone();
        self.listings.insert(fingerprint.clone(), listing);

        // Add to seller's set by removing, modifying, and reinserting.
        let mut seller_set = self.by_seller.remove(&seller).unwrap_or_else(|| {
            IterableSet::new(StorageKey::BySellerInner {
                account_id_hash: hash_account_id(&seller),
            })
        });
        seller_set.insert(fingerprint);
        self.by_seller.insert(seller, seller_set);
        Ok(())
    }

    /// Remove a listing, returning the removed record. Shared by the
    /// cancellation and purchase paths.
    pub(crate) fn internal_remove_listing(
        &mut self,
        fingerprint: &str,
    ) -> Result<Listing, MarketError> {
        let listing = self
            .listings
            .remove(fingerprint)
            .ok_or_else(MarketError::not_listed)?;

        if let Some(mut seller_set) = self.by_seller.remove(&listing.seller) {
            seller_set.remove(fingerprint);
            if !seller_set.is_empty() {
                self.by_seller.insert(listing.seller.clone(), seller_set);
            }
        }

        Ok(listing)
    }

    pub(crate) fn check_operator(&self, caller: &AccountId) -> Result<(), MarketError> {
        if caller != &self.operator_id {
            return Err(MarketError::only_operator());
        }
        Ok(())
    }
}

// ── Composite ledger keys ────────────────────────────────────────────────────

/// Key for the single-owner ledger: `{asset_contract}:{token_id}`.
pub(crate) fn asset_key(asset_contract: &AccountId, token_id: u64) -> String {
    format!("{}{}{}", asset_contract, DELIMITER, token_id)
}

/// Key for the multi-supply ledger: `{asset_contract}:{token_id}:{holder}`.
pub(crate) fn holder_key(asset_contract: &AccountId, token_id: u64, holder: &AccountId) -> String {
    format!(
        "{}{}{}{}{}",
        asset_contract, DELIMITER, token_id, DELIMITER, holder
    )
}

/// Key for the settlement-approval ledger: `{asset_contract}:{holder}`.
pub(crate) fn approval_key(asset_contract: &AccountId, holder: &AccountId) -> String {
    format!("{}{}{}", asset_contract, DELIMITER, holder)
}

/// Key for the fungible-token deposit/allowance ledgers: `{token}:{account}`.
pub(crate) fn rail_key(token: &AccountId, account: &AccountId) -> String {
    format!("{}{}{}", token, DELIMITER, account)
}

/// Hash an account ID for use in storage keys
pub(crate) fn hash_account_id(account_id: &AccountId) -> Vec<u8> {
    env::sha256(account_id.as_bytes())
}

/// Check exactly one yoctoNEAR is attached (security measure)
pub(crate) fn check_one_yocto() -> Result<(), MarketError> {
    if env::attached_deposit().as_yoctonear() != ONE_YOCTO.as_yoctonear() {
        return Err(MarketError::InvalidInput(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}
