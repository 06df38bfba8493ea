//! Fee policy: listing fee, floor price, and purchase settlement split.

use primitive_types::U256;

use crate::*;

impl Contract {
    /// Flat creation fee, charged once per listing regardless of quantity.
    pub(crate) fn compute_listing_charge(&self) -> u128 {
        self.fee_config.listing_fee.0
    }

    /// Split a purchase into total / market fee / royalty / seller proceeds.
    ///
    /// `total = unit_price * units` with a U256 intermediate; bps shares
    /// round down, the seller absorbs the rounding dust. Fails if the total
    /// does not fit u128.
    pub(crate) fn compute_purchase_charge(
        &self,
        unit_price: u128,
        units: u128,
        royalty_bps: u16,
    ) -> Result<PurchaseCharge, MarketError> {
        let total_wide = U256::from(unit_price) * U256::from(units);
        if total_wide > U256::from(u128::MAX) {
            return Err(MarketError::InvalidInput(
                "Purchase total overflows u128".into(),
            ));
        }
        let total = total_wide.as_u128();

        let market_fee = bps_share(total, self.fee_config.market_fee_bps);
        let royalty = bps_share(total, royalty_bps);

        // Caps on both bps values keep fee + royalty strictly below total.
        let seller_proceeds = total - market_fee - royalty;

        Ok(PurchaseCharge {
            total,
            market_fee,
            royalty,
            seller_proceeds,
        })
    }

    /// Floor applies to single-owner listings only, and only while
    /// `floor_price > 0`.
    pub(crate) fn validate_floor(
        &self,
        asset_kind: &AssetKind,
        unit_price: u128,
    ) -> Result<(), MarketError> {
        let floor = self.fee_config.floor_price.0;
        if asset_kind.is_single_owner() && floor > 0 && unit_price < floor {
            return Err(MarketError::TooLow(format!(
                "Unit price {} is below the floor price {}",
                unit_price, floor
            )));
        }
        Ok(())
    }

    pub(crate) fn internal_update_fee_config(
        &mut self,
        market_fee_bps: Option<u16>,
        listing_fee: Option<U128>,
        floor_price: Option<U128>,
    ) -> Result<(), MarketError> {
        if let Some(bps) = market_fee_bps {
            if bps > MAX_MARKET_FEE_BPS {
                return Err(MarketError::InvalidInput(
                    "Market fee cannot exceed 10%".into(),
                ));
            }
            self.fee_config.market_fee_bps = bps;
        }
        if let Some(fee) = listing_fee {
            self.fee_config.listing_fee = fee;
        }
        if let Some(floor) = floor_price {
            self.fee_config.floor_price = floor;
        }
        Ok(())
    }
}

/// `amount * bps / 10_000`, rounding down. U256 intermediate so the
/// multiply cannot overflow for any u128 amount.
pub(crate) fn bps_share(amount: u128, bps: u16) -> u128 {
    ((U256::from(amount) * U256::from(bps)) / U256::from(BASIS_POINTS)).as_u128()
}
