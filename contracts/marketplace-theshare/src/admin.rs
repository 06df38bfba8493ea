use crate::internal::check_one_yocto;
use crate::*;

#[near]
impl Contract {
    // --- Init ---

    #[init]
    pub fn new(
        operator_id: AccountId,
        fee_recipient: AccountId,
        listing_fee: Option<U128>,
        market_fee_bps: Option<u16>,
        floor_price: Option<U128>,
    ) -> Self {
        let mut fee_config = FeeConfig::default();
        if let Some(fee) = listing_fee {
            fee_config.listing_fee = fee;
        }
        if let Some(bps) = market_fee_bps {
            fee_config.market_fee_bps = bps.min(MAX_MARKET_FEE_BPS);
        }
        if let Some(floor) = floor_price {
            fee_config.floor_price = floor;
        }

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            operator_id,
            fee_recipient,
            fee_config,
            listings: IterableMap::new(StorageKey::Listings),
            by_seller: LookupMap::new(StorageKey::BySeller),
            owners: LookupMap::new(StorageKey::Owners),
            balances: LookupMap::new(StorageKey::Balances),
            market_approvals: LookupSet::new(StorageKey::MarketApprovals),
            royalties: LookupMap::new(StorageKey::Royalties),
            ft_deposits: LookupMap::new(StorageKey::FtDeposits),
            ft_allowances: LookupMap::new(StorageKey::FtAllowances),
        }
    }

    // --- Admin ---

    /// Operator only.
    #[payable]
    #[handle_result]
    pub fn transfer_operator(&mut self, new_operator: AccountId) -> Result<(), MarketError> {
        check_one_yocto()?;
        self.check_operator(&env::predecessor_account_id())?;
        if new_operator == self.operator_id {
            return Err(MarketError::InvalidInput(
                "New operator must differ from current operator".to_string(),
            ));
        }
        let old_operator = self.operator_id.clone();
        self.operator_id = new_operator;
        events::emit_operator_transferred(&old_operator, &self.operator_id);
        Ok(())
    }

    /// Operator only.
    #[payable]
    #[handle_result]
    pub fn set_fee_recipient(&mut self, fee_recipient: AccountId) -> Result<(), MarketError> {
        check_one_yocto()?;
        self.check_operator(&env::predecessor_account_id())?;
        let old_recipient = self.fee_recipient.clone();
        self.fee_recipient = fee_recipient;
        events::emit_fee_recipient_changed(&self.operator_id, &old_recipient, &self.fee_recipient);
        Ok(())
    }

    /// Operator only. Omitted fields keep their current value. Takes
    /// effect for every subsequent create and purchase; active listings
    /// keep their stored prices.
    #[payable]
    #[handle_result]
    pub fn set_fee_config(
        &mut self,
        market_fee_bps: Option<u16>,
        listing_fee: Option<U128>,
        floor_price: Option<U128>,
    ) -> Result<(), MarketError> {
        check_one_yocto()?;
        self.check_operator(&env::predecessor_account_id())?;
        self.internal_update_fee_config(market_fee_bps, listing_fee, floor_price)?;
        events::emit_fee_config_changed(
            &self.operator_id,
            self.fee_config.market_fee_bps,
            self.fee_config.listing_fee.0,
            self.fee_config.floor_price.0,
        );
        Ok(())
    }

    // --- Views ---

    pub fn get_operator(&self) -> &AccountId {
        &self.operator_id
    }

    pub fn get_fee_recipient(&self) -> AccountId {
        self.fee_recipient.clone()
    }

    pub fn get_fee_config(&self) -> &FeeConfig {
        &self.fee_config
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}
