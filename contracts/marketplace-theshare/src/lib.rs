//! TheShare Marketplace — non-escrowed listings over single-owner and
//! multi-supply token ledgers, native or fungible-token settlement,
//! borsh-encoded events.

use near_sdk::json_types::U128;
use near_sdk::store::{IterableMap, IterableSet, LookupMap, LookupSet};
use near_sdk::{
    env, near, AccountId, BorshStorageKey, Gas, NearToken, PanicOnDefault, Promise,
};

// --- Modules ---

mod admin;
mod asset;
pub mod constants;
mod errors;
mod events;
mod fees;
pub mod identity;
mod internal;
mod market;
mod payment;
pub mod types;
mod views;


pub use constants::*;
pub use errors::MarketError;
pub use types::*;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    Listings,
    BySeller,
    BySellerInner { account_id_hash: Vec<u8> },
    Owners,
    Balances,
    MarketApprovals,
    Royalties,
    FtDeposits,
    FtAllowances,
}

// --- Contract State ---

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// From Cargo.toml; updated on each migration.
    pub version: String,

    /// May cancel any listing and mutate the fee config.
    pub operator_id: AccountId,
    pub fee_recipient: AccountId,
    pub fee_config: FeeConfig,

    /// Active listings, keyed by fingerprint hex.
    pub listings: IterableMap<String, Listing>,
    pub by_seller: LookupMap<AccountId, IterableSet<String>>,

    /// Single-owner ledger; key = "{asset_contract}:{token_id}".
    pub owners: LookupMap<String, AccountId>,
    /// Multi-supply ledger; key = "{asset_contract}:{token_id}:{holder}".
    pub balances: LookupMap<String, u128>,
    /// Settlement rights granted to the marketplace; key = "{asset_contract}:{holder}".
    pub market_approvals: LookupSet<String>,
    /// Issuer-set royalty records; key = "{asset_contract}:{token_id}".
    pub royalties: LookupMap<String, RoyaltyInfo>,

    /// Fungible-token deposit ledger; key = "{token}:{account}".
    pub ft_deposits: LookupMap<String, u128>,
    /// Engine pull allowances; key = "{token}:{account}".
    pub ft_allowances: LookupMap<String, u128>,
}
