//! Deterministic listing fingerprints.
//!
//! A listing is identified by the keccak256 digest of its economic tuple:
//! `(asset_contract, token_id, unit_price, quantity, payment_token)`.
//! The seller is deliberately not part of the tuple, so two sellers offering
//! identical terms collide — the second create surfaces as `AlreadyListed`.

use near_sdk::{env, AccountId};

/// Fixed-width canonical encoding, hashed with keccak256 and hex-encoded
/// for use as a map key. Account ids are pre-hashed to 32 bytes so no
/// field can bleed into its neighbour regardless of account-id length.
pub fn listing_fingerprint(
    asset_contract: &AccountId,
    token_id: u64,
    unit_price: u128,
    quantity: u128,
    payment_token: Option<&AccountId>,
) -> String {
    let mut buf = Vec::with_capacity(104);
    buf.extend_from_slice(&env::sha256(asset_contract.as_bytes()));
    buf.extend_from_slice(&token_id.to_be_bytes());
    buf.extend_from_slice(&unit_price.to_be_bytes());
    buf.extend_from_slice(&quantity.to_be_bytes());
    match payment_token {
        Some(token) => buf.extend_from_slice(&env::sha256(token.as_bytes())),
        // Native rail sentinel: all-zero word, unreachable from sha256 output.
        None => buf.extend_from_slice(&[0u8; 32]),
    }
    hex::encode(env::keccak256(&buf))
}
