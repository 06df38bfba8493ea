//! Typed error handling for the marketplace contract.
//!
//! Uses `#[derive(near_sdk::FunctionError)]` from the NEAR SDK to enable
//! `#[handle_result]` on public methods. When a method returns
//! `Err(MarketError::Xxx)`, the SDK calls `env::panic_str()` with the
//! Display message — same on-wire behaviour as raw panics, but with
//! structured, testable codes. Display prints the variant name first so
//! indexers and clients can branch on it.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum MarketError {
    /// An active listing with the same fingerprint already exists.
    AlreadyListed(String),
    /// No active listing under the given fingerprint.
    NotListed(String),
    /// Listing-time check failed: seller does not hold the token or has not
    /// granted the marketplace settlement rights.
    TokenNotApproved(String),
    /// Purchase-time check failed: seller no longer holds the token or has
    /// revoked the marketplace's settlement rights.
    NotOwnedOrApproved(String),
    /// Cancellation check failed: seller no longer holds the listed asset.
    NotCurrentOwner(String),
    /// Caller is neither the listing's seller nor the marketplace operator.
    NotSellerOrOperator(String),
    /// Seller's live supply balance is below what settlement requires.
    InsufficientBalance(String),
    /// Requested quantity exceeds the listed quantity.
    QuantityExceedsListing(String),
    /// Unit price is below the configured floor.
    TooLow(String),
    /// Attached native deposit does not match the required amount exactly.
    WrongPaymentAmount(String),
    /// Fungible-token collection failed (allowance or deposit too low).
    PaymentTransferFailed(String),
    /// Invalid parameters, IDs, or data from the caller.
    InvalidInput(String),
    /// Caller lacks permission (wrong operator, wrong issuer, etc.)
    Unauthorized(String),
    /// Internal invariant violation (should never happen).
    InternalError(String),
}

impl std::fmt::Display for MarketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyListed(msg) => write!(f, "AlreadyListed: {}", msg),
            Self::NotListed(msg) => write!(f, "NotListed: {}", msg),
            Self::TokenNotApproved(msg) => write!(f, "TokenNotApproved: {}", msg),
            Self::NotOwnedOrApproved(msg) => write!(f, "NotOwnedOrApproved: {}", msg),
            Self::NotCurrentOwner(msg) => write!(f, "NotCurrentOwner: {}", msg),
            Self::NotSellerOrOperator(msg) => write!(f, "NotSellerOrOperator: {}", msg),
            Self::InsufficientBalance(msg) => write!(f, "InsufficientBalance: {}", msg),
            Self::QuantityExceedsListing(msg) => write!(f, "QuantityExceedsListing: {}", msg),
            Self::TooLow(msg) => write!(f, "TooLow: {}", msg),
            Self::WrongPaymentAmount(msg) => write!(f, "WrongPaymentAmount: {}", msg),
            Self::PaymentTransferFailed(msg) => write!(f, "PaymentTransferFailed: {}", msg),
            Self::InvalidInput(msg) => write!(f, "InvalidInput: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InternalError(msg) => write!(f, "InternalError: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl MarketError {
    pub fn not_listed() -> Self {
        Self::NotListed("No listing found for this fingerprint".into())
    }
    pub fn only_operator() -> Self {
        Self::Unauthorized("Only the marketplace operator can perform this action".into())
    }
    pub fn token_not_approved() -> Self {
        Self::TokenNotApproved("Token is not approved nor owned by the caller".into())
    }
}
