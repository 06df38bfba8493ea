//! Listing creation, cancellation, and purchase settlement.

use crate::identity::listing_fingerprint;
use crate::internal::{asset_key, check_one_yocto};
use crate::*;

#[near]
impl Contract {
    /// List an asset for sale. The asset stays with the seller; the
    /// marketplace only records the terms and re-validates them at
    /// settlement. Returns the listing's fingerprint.
    ///
    /// Native-rail creations must attach exactly the listing fee;
    /// token-rail creations attach 1 yoctoNEAR and the fee is pulled from
    /// the caller's deposited balance.
    #[payable]
    #[handle_result]
    pub fn create_listing(
        &mut self,
        is_single_owner: bool,
        asset_contract: AccountId,
        token_id: u64,
        unit_price: U128,
        quantity: U128,
        payment_token: Option<AccountId>,
    ) -> Result<String, MarketError> {
        if unit_price.0 == 0 {
            return Err(MarketError::InvalidInput(
                "Unit price must be greater than 0".into(),
            ));
        }
        let asset_kind = AssetKind::from_flag(is_single_owner);
        match asset_kind {
            AssetKind::SingleOwner if quantity.0 != 0 => {
                return Err(MarketError::InvalidInput(
                    "Single-owner listings use quantity 0 (one indivisible unit)".into(),
                ));
            }
            AssetKind::MultiSupply if quantity.0 == 0 => {
                return Err(MarketError::InvalidInput(
                    "Multi-supply listings require a quantity of at least 1".into(),
                ));
            }
            _ => {}
        }

        let seller = env::predecessor_account_id();
        let units = if asset_kind.is_single_owner() {
            1
        } else {
            quantity.0
        };
        self.internal_check_listable(&asset_kind, &asset_contract, token_id, &seller, units)?;
        self.validate_floor(&asset_kind, unit_price.0)?;

        let fingerprint = listing_fingerprint(
            &asset_contract,
            token_id,
            unit_price.0,
            quantity.0,
            payment_token.as_ref(),
        );
        if self.listings.contains_key(&fingerprint) {
            return Err(MarketError::AlreadyListed(
                "An active listing with this fingerprint already exists".into(),
            ));
        }

        self.internal_collect_listing_fee(payment_token.as_ref(), &seller)?;

        let listing = Listing {
            fingerprint: fingerprint.clone(),
            asset_kind,
            asset_contract,
            token_id,
            unit_price,
            quantity,
            payment_token,
            seller,
        };
        self.internal_add_listing(listing.clone())?;
        events::emit_listing_created(&listing);

        Ok(fingerprint)
    }

    /// Remove a listing without settlement. Caller must be the seller or
    /// the marketplace operator, and the seller must still hold the asset.
    /// Panics if attached deposit != 1 yoctoNEAR.
    #[payable]
    #[handle_result]
    pub fn cancel_listing(&mut self, fingerprint: String) -> Result<(), MarketError> {
        check_one_yocto()?;

        let listing = self
            .listings
            .get(&fingerprint)
            .ok_or_else(MarketError::not_listed)?;

        let caller = env::predecessor_account_id();
        if caller != listing.seller && caller != self.operator_id {
            return Err(MarketError::NotSellerOrOperator(
                "Only the seller or the marketplace operator can cancel a listing".into(),
            ));
        }

        let units = if listing.asset_kind.is_single_owner() {
            1
        } else {
            listing.quantity.0
        };
        if !self.internal_holds(
            &listing.asset_kind,
            &listing.asset_contract,
            listing.token_id,
            &listing.seller,
            units,
        ) {
            return Err(MarketError::NotCurrentOwner(
                "Seller no longer holds the listed asset".into(),
            ));
        }

        self.internal_remove_listing(&fingerprint)?;
        events::emit_listing_cancelled(&fingerprint);
        Ok(())
    }

    /// Settle a listing atomically: re-validate the seller's live
    /// holding and approval, collect payment on the listing's rail,
    /// move the asset, and retire the record. Any failure leaves every
    /// ledger untouched.
    ///
    /// `quantity` must be 0 for single-owner listings (one indivisible
    /// unit) and 1..=listed quantity for multi-supply listings. The
    /// record is consumed whole either way; a remainder must be
    /// re-listed by the seller.
    #[payable]
    #[handle_result]
    pub fn purchase(&mut self, fingerprint: String, quantity: U128) -> Result<(), MarketError> {
        let listing = self
            .listings
            .get(&fingerprint)
            .ok_or_else(MarketError::not_listed)?
            .clone();

        let buyer = env::predecessor_account_id();
        if buyer == listing.seller {
            return Err(MarketError::InvalidInput(
                "Cannot purchase your own listing".into(),
            ));
        }

        let units = match listing.asset_kind {
            AssetKind::SingleOwner => {
                if quantity.0 != 0 {
                    return Err(MarketError::InvalidInput(
                        "Single-owner purchases use quantity 0 (one indivisible unit)".into(),
                    ));
                }
                1
            }
            AssetKind::MultiSupply => {
                if quantity.0 == 0 {
                    return Err(MarketError::InvalidInput(
                        "Multi-supply purchases require a quantity of at least 1".into(),
                    ));
                }
                if quantity.0 > listing.quantity.0 {
                    return Err(MarketError::QuantityExceedsListing(format!(
                        "Requested {} units, listing offers {}",
                        quantity.0, listing.quantity.0
                    )));
                }
                quantity.0
            }
        };

        // The stored terms are stale by design; only the seller's live
        // holding and approval decide whether settlement may proceed.
        self.internal_check_settleable(
            &listing.asset_kind,
            &listing.asset_contract,
            listing.token_id,
            &listing.seller,
            units,
        )?;

        // Royalty applies to multi-supply settlements; recipient and bps
        // are read at settlement time, not listing time.
        let royalty = match listing.asset_kind {
            AssetKind::MultiSupply => self
                .royalties
                .get(&asset_key(&listing.asset_contract, listing.token_id))
                .cloned(),
            AssetKind::SingleOwner => None,
        };
        let royalty_bps = royalty.as_ref().map_or(0, |r| r.royalty_bps);

        // Charged from the stored unit price only; a buyer can never be
        // quoted one price and settled at another.
        let charge = self.compute_purchase_charge(listing.unit_price.0, units, royalty_bps)?;

        self.internal_collect_payment(listing.payment_token.as_ref(), &buyer, charge.total)?;

        self.internal_asset_transfer(
            &listing.asset_kind,
            &listing.asset_contract,
            listing.token_id,
            &listing.seller,
            &buyer,
            units,
        )?;

        // The record is consumed whole, even for a partial-quantity fill.
        self.internal_remove_listing(&fingerprint)?;

        let rail = listing.payment_token.as_ref();
        let fee_recipient = self.fee_recipient.clone();
        self.internal_payout(rail, &listing.seller, charge.seller_proceeds)?;
        self.internal_payout(rail, &fee_recipient, charge.market_fee)?;
        if let Some(royalty) = &royalty {
            self.internal_payout(rail, &royalty.recipient, charge.royalty)?;
        }

        events::emit_listing_purchased(&fingerprint, &buyer, units, charge.total);
        Ok(())
    }
}

// ── Listing-fee collection ───────────────────────────────────────────────────

impl Contract {
    /// Collect the flat creation fee on the listing's rail and route it to
    /// the fee recipient immediately.
    pub(crate) fn internal_collect_listing_fee(
        &mut self,
        payment_token: Option<&AccountId>,
        payer: &AccountId,
    ) -> Result<(), MarketError> {
        let fee = self.compute_listing_charge();
        match payment_token {
            None => self.internal_check_exact_tender(fee)?,
            Some(token) => {
                check_one_yocto()?;
                if fee > 0 {
                    self.internal_ft_pull(token, payer, fee)?;
                }
            }
        }
        if fee > 0 {
            let fee_recipient = self.fee_recipient.clone();
            self.internal_payout(payment_token, &fee_recipient, fee)?;
        }
        Ok(())
    }
}
