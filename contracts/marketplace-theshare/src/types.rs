use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

use crate::constants::*;

// --- Enums ---

/// Which ledger a listing settles against.
#[near(serializers = [borsh, json])]
#[serde(rename_all = "snake_case")]
#[derive(Clone, Debug, PartialEq)]
pub enum AssetKind {
    /// One indivisible token, one current owner.
    SingleOwner,
    /// Fungible supply of a token id, per-holder balances.
    MultiSupply,
}

impl AssetKind {
    pub fn from_flag(is_single_owner: bool) -> Self {
        if is_single_owner {
            Self::SingleOwner
        } else {
            Self::MultiSupply
        }
    }

    pub fn is_single_owner(&self) -> bool {
        matches!(self, Self::SingleOwner)
    }
}

// --- Structs ---

/// An active, non-escrowed listing. `active` is represented by record
/// presence: terminal states (purchased, cancelled) remove the record.
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct Listing {
    /// Keccak digest of the economic tuple, hex-encoded; primary key.
    pub fingerprint: String,
    pub asset_kind: AssetKind,
    pub asset_contract: AccountId,
    pub token_id: u64,
    /// Smallest unit of the payment rail.
    pub unit_price: U128,
    /// 0 = single indivisible unit (single-owner listings only).
    pub quantity: U128,
    /// None = native rail.
    pub payment_token: Option<AccountId>,
    pub seller: AccountId,
}

/// Per-token royalty record, set by the issuer. Applied on multi-supply
/// settlements only.
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct RoyaltyInfo {
    pub recipient: AccountId,
    /// Capped at `MAX_ROYALTY_BPS`.
    pub royalty_bps: u16,
}

#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct FeeConfig {
    /// 250 = 2.5%. Carved out of the purchase total.
    pub market_fee_bps: u16,
    /// Flat fee charged once per listing creation, in the listing's rail.
    pub listing_fee: U128,
    /// Minimum unit price for single-owner listings. 0 disables the floor.
    pub floor_price: U128,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            market_fee_bps: DEFAULT_MARKET_FEE_BPS,
            listing_fee: U128(0),
            floor_price: U128(0),
        }
    }
}

/// Settlement split for one purchase. All amounts in the rail's smallest
/// unit; `seller_proceeds = total - market_fee - royalty`.
#[derive(Debug)]
pub(crate) struct PurchaseCharge {
    pub total: u128,
    pub market_fee: u128,
    pub royalty: u128,
    pub seller_proceeds: u128,
}
