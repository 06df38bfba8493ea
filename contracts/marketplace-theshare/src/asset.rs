//! Asset gateway: the token ledgers the marketplace settles against.
//!
//! Issuers mint into sub-ledgers namespaced by their own account id (the
//! `asset_contract` of a listing). Two shapes exist under one gateway:
//! single-owner tokens (one current owner per token id) and multi-supply
//! tokens (per-holder balances per token id). Holders move tokens and
//! grant the marketplace settlement rights directly against these
//! ledgers, which keeps every settlement check synchronous.
//!
//! Listings never escrow: a holder may transfer away or revoke approval
//! while listed, and the engine must re-validate at purchase time.

use crate::internal::{approval_key, asset_key, check_one_yocto, holder_key};
use crate::*;

#[near]
impl Contract {
    // --- Issuer hooks (predecessor must be the asset namespace) ---

    /// Record a freshly issued single-owner token. Caller is the issuer;
    /// the token lands in `owner_id`'s hands.
    #[handle_result]
    pub fn asset_on_mint(&mut self, token_id: u64, owner_id: AccountId) -> Result<(), MarketError> {
        let issuer = env::predecessor_account_id();
        let key = asset_key(&issuer, token_id);
        if self.owners.contains_key(&key) {
            return Err(MarketError::InvalidInput(
                "Token id already minted under this issuer".into(),
            ));
        }
        self.owners.insert(key, owner_id.clone());
        events::emit_asset_minted(&issuer, token_id, &owner_id, 1);
        Ok(())
    }

    /// Record issued supply of a multi-supply token. Repeated mints of the
    /// same token id add to the holder's balance.
    #[handle_result]
    pub fn asset_on_mint_supply(
        &mut self,
        token_id: u64,
        owner_id: AccountId,
        amount: U128,
    ) -> Result<(), MarketError> {
        if amount.0 == 0 {
            return Err(MarketError::InvalidInput(
                "Mint amount must be greater than 0".into(),
            ));
        }
        let issuer = env::predecessor_account_id();
        if self.owners.contains_key(&asset_key(&issuer, token_id)) {
            return Err(MarketError::InvalidInput(
                "Token id is already a single-owner token under this issuer".into(),
            ));
        }
        let key = holder_key(&issuer, token_id, &owner_id);
        let balance = self.balances.get(&key).copied().unwrap_or(0);
        let new_balance = balance
            .checked_add(amount.0)
            .ok_or_else(|| MarketError::InvalidInput("Supply overflow".into()))?;
        self.balances.insert(key, new_balance);
        events::emit_asset_minted(&issuer, token_id, &owner_id, amount.0);
        Ok(())
    }

    /// Set or update the royalty record for one of the issuer's tokens.
    /// Applied on multi-supply settlements.
    #[handle_result]
    pub fn asset_on_royalty(
        &mut self,
        token_id: u64,
        recipient: AccountId,
        royalty_bps: u16,
    ) -> Result<(), MarketError> {
        if royalty_bps > MAX_ROYALTY_BPS {
            return Err(MarketError::InvalidInput(format!(
                "Royalty cannot exceed {} bps",
                MAX_ROYALTY_BPS
            )));
        }
        let issuer = env::predecessor_account_id();
        let key = asset_key(&issuer, token_id);
        self.royalties.insert(
            key,
            RoyaltyInfo {
                recipient: recipient.clone(),
                royalty_bps,
            },
        );
        events::emit_royalty_set(&issuer, token_id, &recipient, royalty_bps);
        Ok(())
    }

    // --- Holder operations ---

    /// Grant or revoke the marketplace's right to settle the caller's
    /// tokens of the given issuer. Revocable at any time, including while
    /// a listing is active.
    #[payable]
    #[handle_result]
    pub fn asset_set_approval(
        &mut self,
        asset_contract: AccountId,
        approved: bool,
    ) -> Result<(), MarketError> {
        check_one_yocto()?;
        let holder = env::predecessor_account_id();
        let key = approval_key(&asset_contract, &holder);
        if approved {
            self.market_approvals.insert(key);
        } else {
            self.market_approvals.remove(&key);
        }
        events::emit_approval_changed(&asset_contract, &holder, approved);
        Ok(())
    }

    /// Off-market transfer by the current owner/holder. `amount` is
    /// required for multi-supply tokens and must be absent for
    /// single-owner tokens.
    #[payable]
    #[handle_result]
    pub fn asset_transfer(
        &mut self,
        asset_contract: AccountId,
        token_id: u64,
        receiver_id: AccountId,
        amount: Option<U128>,
    ) -> Result<(), MarketError> {
        check_one_yocto()?;
        let sender = env::predecessor_account_id();
        if receiver_id == sender {
            return Err(MarketError::InvalidInput(
                "Sender and receiver must differ".into(),
            ));
        }

        if self.owners.contains_key(&asset_key(&asset_contract, token_id)) {
            if amount.is_some() {
                return Err(MarketError::InvalidInput(
                    "Single-owner tokens transfer whole; omit amount".into(),
                ));
            }
            self.internal_transfer_single(&asset_contract, token_id, &sender, &receiver_id)?;
            events::emit_asset_transferred(&asset_contract, token_id, &sender, &receiver_id, 1);
        } else {
            let units = amount
                .ok_or_else(|| {
                    MarketError::InvalidInput("Multi-supply transfers require an amount".into())
                })?
                .0;
            if units == 0 {
                return Err(MarketError::InvalidInput(
                    "Transfer amount must be greater than 0".into(),
                ));
            }
            self.internal_transfer_supply(&asset_contract, token_id, &sender, &receiver_id, units)?;
            events::emit_asset_transferred(&asset_contract, token_id, &sender, &receiver_id, units);
        }
        Ok(())
    }

    // --- Views ---

    pub fn asset_owner_of(&self, asset_contract: AccountId, token_id: u64) -> Option<&AccountId> {
        self.owners.get(&asset_key(&asset_contract, token_id))
    }

    pub fn asset_balance_of(
        &self,
        asset_contract: AccountId,
        token_id: u64,
        account_id: AccountId,
    ) -> U128 {
        U128(
            self.balances
                .get(&holder_key(&asset_contract, token_id, &account_id))
                .copied()
                .unwrap_or(0),
        )
    }

    pub fn asset_is_approved(&self, asset_contract: AccountId, account_id: AccountId) -> bool {
        self.market_approvals
            .contains(&approval_key(&asset_contract, &account_id))
    }

    pub fn asset_royalty_of(
        &self,
        asset_contract: AccountId,
        token_id: u64,
    ) -> Option<&RoyaltyInfo> {
        self.royalties.get(&asset_key(&asset_contract, token_id))
    }
}

// ── Internal gateway checks and moves ────────────────────────────────────────

impl Contract {
    /// Listing-time check. Both the holding and the marketplace approval
    /// must be in place; either failure reads as `TokenNotApproved`.
    pub(crate) fn internal_check_listable(
        &self,
        asset_kind: &AssetKind,
        asset_contract: &AccountId,
        token_id: u64,
        seller: &AccountId,
        units: u128,
    ) -> Result<(), MarketError> {
        if !self.internal_holds(asset_kind, asset_contract, token_id, seller, units)
            || !self
                .market_approvals
                .contains(&approval_key(asset_contract, seller))
        {
            return Err(MarketError::token_not_approved());
        }
        Ok(())
    }

    /// Purchase-time re-check against live state. Distinguishes a short
    /// supply balance from lost ownership/approval.
    pub(crate) fn internal_check_settleable(
        &self,
        asset_kind: &AssetKind,
        asset_contract: &AccountId,
        token_id: u64,
        seller: &AccountId,
        units: u128,
    ) -> Result<(), MarketError> {
        if !self
            .market_approvals
            .contains(&approval_key(asset_contract, seller))
        {
            return Err(MarketError::NotOwnedOrApproved(
                "Seller has revoked the marketplace's settlement rights".into(),
            ));
        }
        match asset_kind {
            AssetKind::SingleOwner => {
                let current = self.owners.get(&asset_key(asset_contract, token_id));
                if current != Some(seller) {
                    return Err(MarketError::NotOwnedOrApproved(
                        "Token ownership changed since listing".into(),
                    ));
                }
            }
            AssetKind::MultiSupply => {
                let balance = self
                    .balances
                    .get(&holder_key(asset_contract, token_id, seller))
                    .copied()
                    .unwrap_or(0);
                if balance < units {
                    return Err(MarketError::InsufficientBalance(format!(
                        "Seller holds {} units, settlement requires {}",
                        balance, units
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn internal_holds(
        &self,
        asset_kind: &AssetKind,
        asset_contract: &AccountId,
        token_id: u64,
        holder: &AccountId,
        units: u128,
    ) -> bool {
        match asset_kind {
            AssetKind::SingleOwner => {
                self.owners.get(&asset_key(asset_contract, token_id)) == Some(holder)
            }
            AssetKind::MultiSupply => {
                self.balances
                    .get(&holder_key(asset_contract, token_id, holder))
                    .copied()
                    .unwrap_or(0)
                    >= units
            }
        }
    }

    /// Settlement move, seller -> buyer. Callers have already re-checked
    /// ownership and approval.
    pub(crate) fn internal_asset_transfer(
        &mut self,
        asset_kind: &AssetKind,
        asset_contract: &AccountId,
        token_id: u64,
        from: &AccountId,
        to: &AccountId,
        units: u128,
    ) -> Result<(), MarketError> {
        match asset_kind {
            AssetKind::SingleOwner => {
                self.internal_transfer_single(asset_contract, token_id, from, to)
            }
            AssetKind::MultiSupply => {
                self.internal_transfer_supply(asset_contract, token_id, from, to, units)
            }
        }
    }

    fn internal_transfer_single(
        &mut self,
        asset_contract: &AccountId,
        token_id: u64,
        from: &AccountId,
        to: &AccountId,
    ) -> Result<(), MarketError> {
        let key = asset_key(asset_contract, token_id);
        let current = self
            .owners
            .get(&key)
            .ok_or_else(|| MarketError::InvalidInput("Token not found".into()))?;
        if current != from {
            return Err(MarketError::NotCurrentOwner(
                "Sender is not the current owner of this token".into(),
            ));
        }
        self.owners.insert(key, to.clone());
        Ok(())
    }

    fn internal_transfer_supply(
        &mut self,
        asset_contract: &AccountId,
        token_id: u64,
        from: &AccountId,
        to: &AccountId,
        units: u128,
    ) -> Result<(), MarketError> {
        let from_key = holder_key(asset_contract, token_id, from);
        let from_balance = self.balances.get(&from_key).copied().unwrap_or(0);
        if from_balance < units {
            return Err(MarketError::InsufficientBalance(format!(
                "Balance {} is below transfer amount {}",
                from_balance, units
            )));
        }
        let to_key = holder_key(asset_contract, token_id, to);
        let to_balance = self.balances.get(&to_key).copied().unwrap_or(0);
        let to_new = to_balance
            .checked_add(units)
            .ok_or_else(|| MarketError::InternalError("Receiver balance overflow".into()))?;

        if from_balance == units {
            self.balances.remove(&from_key);
        } else {
            self.balances.insert(from_key, from_balance - units);
        }
        self.balances.insert(to_key, to_new);
        Ok(())
    }
}
