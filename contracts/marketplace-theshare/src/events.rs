// Borsh-encoded Events for Substreams Indexing
// Provides efficient event emission with binary serialization

use near_sdk::{
    base64::Engine,
    borsh::{BorshDeserialize, BorshSerialize},
    env, AccountId,
};
use near_sdk_macros::NearSchema;
use std::cell::Cell;

use crate::types::Listing;

// --- Constants ---

const EVENT_STANDARD: &str = "theshare";
const EVENT_VERSION: &str = "1.0.0";
const EVENT_PREFIX: &str = "EVENT:";

// --- Thread-local log index for unique event IDs within a transaction ---
thread_local! {
    static LOG_INDEX: Cell<u32> = const { Cell::new(0) };
}

fn get_next_log_index() -> u32 {
    LOG_INDEX.with(|idx| {
        let current = idx.get();
        idx.set(current + 1);
        current
    })
}

// --- Event Data Structures ---

/// Marketplace event data variants for different operations
#[derive(
    NearSchema, serde::Serialize, serde::Deserialize, Clone, BorshSerialize, BorshDeserialize,
)]
#[abi(json, borsh)]
pub enum MarketEventData {
    ListingCreated {
        fingerprint: String,
        is_single_owner: bool,
        asset_contract: String,
        token_id: u64,
        payment_token: Option<String>,
        quantity: String, // u128 amounts as strings for consistency
        unit_price: String,
        seller: String,
    },
    ListingCancelled {
        fingerprint: String,
    },
    ListingPurchased {
        fingerprint: String,
        buyer: String,
        quantity: String,
        amount_paid: String,
    },
    AssetMinted {
        asset_contract: String,
        token_id: u64,
        owner_id: String,
        amount: String,
    },
    AssetTransferred {
        asset_contract: String,
        token_id: u64,
        sender_id: String,
        receiver_id: String,
        amount: String,
    },
    ApprovalChanged {
        asset_contract: String,
        holder_id: String,
        approved: bool,
    },
    RoyaltySet {
        asset_contract: String,
        token_id: u64,
        recipient: String,
        royalty_bps: u16,
    },
    FtDeposited {
        token: String,
        account_id: String,
        amount: String,
        new_balance: String,
    },
    FtWithdrawn {
        token: String,
        account_id: String,
        amount: String,
        new_balance: String,
    },
    FtApproved {
        token: String,
        account_id: String,
        allowance: String,
    },
    FeeConfigChanged {
        operator_id: String,
        market_fee_bps: u16,
        listing_fee: String,
        floor_price: String,
    },
    FeeRecipientChanged {
        operator_id: String,
        old_recipient: String,
        new_recipient: String,
    },
    OperatorTransferred {
        old_operator: String,
        new_operator: String,
    },
}

/// Main marketplace event structure
#[derive(
    NearSchema, serde::Serialize, serde::Deserialize, Clone, BorshSerialize, BorshDeserialize,
)]
#[abi(json, borsh)]
pub struct MarketEvent {
    pub evt_standard: String,
    pub version: String,
    pub evt_type: String,
    pub evt_id: String,
    pub log_index: u32,
    pub block_height: u64,
    pub timestamp: u64,
    pub data: MarketEventData,
}

// --- Helper Functions ---

/// Generate a unique event ID for Substreams tracking
/// Format: {event_type}-{account}-{block_height}-{timestamp}-{log_index}
fn generate_event_id(event_type: &str, account_id: &AccountId, log_index: u32) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        event_type,
        account_id,
        env::block_height(),
        env::block_timestamp(),
        log_index
    )
}

fn emit(evt_type: &str, account_id: &AccountId, data: MarketEventData) {
    let log_index = get_next_log_index();
    let event = MarketEvent {
        evt_standard: EVENT_STANDARD.to_string(),
        version: EVENT_VERSION.to_string(),
        evt_type: evt_type.to_string(),
        evt_id: generate_event_id(evt_type, account_id, log_index),
        log_index,
        block_height: env::block_height(),
        timestamp: env::block_timestamp(),
        data,
    };
    emit_borsh_event(event);
}

// --- Listing lifecycle ---

pub fn emit_listing_created(listing: &Listing) {
    emit(
        "listing_created",
        &listing.seller,
        MarketEventData::ListingCreated {
            fingerprint: listing.fingerprint.clone(),
            is_single_owner: listing.asset_kind.is_single_owner(),
            asset_contract: listing.asset_contract.to_string(),
            token_id: listing.token_id,
            payment_token: listing.payment_token.as_ref().map(|t| t.to_string()),
            quantity: listing.quantity.0.to_string(),
            unit_price: listing.unit_price.0.to_string(),
            seller: listing.seller.to_string(),
        },
    );
}

pub fn emit_listing_cancelled(fingerprint: &str) {
    emit(
        "listing_cancelled",
        &env::predecessor_account_id(),
        MarketEventData::ListingCancelled {
            fingerprint: fingerprint.to_string(),
        },
    );
}

pub fn emit_listing_purchased(fingerprint: &str, buyer: &AccountId, units: u128, amount_paid: u128) {
    emit(
        "listing_purchased",
        buyer,
        MarketEventData::ListingPurchased {
            fingerprint: fingerprint.to_string(),
            buyer: buyer.to_string(),
            quantity: units.to_string(),
            amount_paid: amount_paid.to_string(),
        },
    );
}

// --- Asset ledger ---

pub fn emit_asset_minted(asset_contract: &AccountId, token_id: u64, owner_id: &AccountId, amount: u128) {
    emit(
        "asset_minted",
        owner_id,
        MarketEventData::AssetMinted {
            asset_contract: asset_contract.to_string(),
            token_id,
            owner_id: owner_id.to_string(),
            amount: amount.to_string(),
        },
    );
}

pub fn emit_asset_transferred(
    asset_contract: &AccountId,
    token_id: u64,
    sender_id: &AccountId,
    receiver_id: &AccountId,
    amount: u128,
) {
    emit(
        "asset_transferred",
        sender_id,
        MarketEventData::AssetTransferred {
            asset_contract: asset_contract.to_string(),
            token_id,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            amount: amount.to_string(),
        },
    );
}

pub fn emit_approval_changed(asset_contract: &AccountId, holder_id: &AccountId, approved: bool) {
    emit(
        "approval_changed",
        holder_id,
        MarketEventData::ApprovalChanged {
            asset_contract: asset_contract.to_string(),
            holder_id: holder_id.to_string(),
            approved,
        },
    );
}

pub fn emit_royalty_set(
    asset_contract: &AccountId,
    token_id: u64,
    recipient: &AccountId,
    royalty_bps: u16,
) {
    emit(
        "royalty_set",
        asset_contract,
        MarketEventData::RoyaltySet {
            asset_contract: asset_contract.to_string(),
            token_id,
            recipient: recipient.to_string(),
            royalty_bps,
        },
    );
}

// --- Fungible-token rail ---

pub fn emit_ft_deposited(token: &AccountId, account_id: &AccountId, amount: u128, new_balance: u128) {
    emit(
        "ft_deposited",
        account_id,
        MarketEventData::FtDeposited {
            token: token.to_string(),
            account_id: account_id.to_string(),
            amount: amount.to_string(),
            new_balance: new_balance.to_string(),
        },
    );
}

pub fn emit_ft_withdrawn(token: &AccountId, account_id: &AccountId, amount: u128, new_balance: u128) {
    emit(
        "ft_withdrawn",
        account_id,
        MarketEventData::FtWithdrawn {
            token: token.to_string(),
            account_id: account_id.to_string(),
            amount: amount.to_string(),
            new_balance: new_balance.to_string(),
        },
    );
}

pub fn emit_ft_approved(token: &AccountId, account_id: &AccountId, allowance: u128) {
    emit(
        "ft_approved",
        account_id,
        MarketEventData::FtApproved {
            token: token.to_string(),
            account_id: account_id.to_string(),
            allowance: allowance.to_string(),
        },
    );
}

// --- Admin ---

pub fn emit_fee_config_changed(
    operator_id: &AccountId,
    market_fee_bps: u16,
    listing_fee: u128,
    floor_price: u128,
) {
    emit(
        "fee_config_changed",
        operator_id,
        MarketEventData::FeeConfigChanged {
            operator_id: operator_id.to_string(),
            market_fee_bps,
            listing_fee: listing_fee.to_string(),
            floor_price: floor_price.to_string(),
        },
    );
}

pub fn emit_fee_recipient_changed(
    operator_id: &AccountId,
    old_recipient: &AccountId,
    new_recipient: &AccountId,
) {
    emit(
        "fee_recipient_changed",
        operator_id,
        MarketEventData::FeeRecipientChanged {
            operator_id: operator_id.to_string(),
            old_recipient: old_recipient.to_string(),
            new_recipient: new_recipient.to_string(),
        },
    );
}

pub fn emit_operator_transferred(old_operator: &AccountId, new_operator: &AccountId) {
    emit(
        "operator_transferred",
        old_operator,
        MarketEventData::OperatorTransferred {
            old_operator: old_operator.to_string(),
            new_operator: new_operator.to_string(),
        },
    );
}

/// Internal helper to emit Borsh-encoded events with base64 encoding
fn emit_borsh_event(event: MarketEvent) {
    // Serialize to Borsh format
    let mut buffer = Vec::new();
    event
        .serialize(&mut buffer)
        .expect("Failed to serialize event");

    // Calculate capacity for base64 encoding
    let encoded_len = buffer.len().div_ceil(3) * 4;
    let mut log_str = String::with_capacity(EVENT_PREFIX.len() + encoded_len);

    // Add prefix and base64-encode the Borsh data
    log_str.push_str(EVENT_PREFIX);
    near_sdk::base64::engine::general_purpose::STANDARD.encode_string(&buffer, &mut log_str);

    // Emit the log
    env::log_str(&log_str);
}
