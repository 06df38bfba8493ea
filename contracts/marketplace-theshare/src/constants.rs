//! Marketplace-wide constants.

use near_sdk::NearToken;

/// Basis points denominator (10,000 = 100%)
pub const BASIS_POINTS: u16 = 10_000;

/// Default marketplace fee in basis points (250 = 2.5%).
pub const DEFAULT_MARKET_FEE_BPS: u16 = 250;

/// Hard cap on the marketplace fee (1000 = 10%).
pub const MAX_MARKET_FEE_BPS: u16 = 1_000;

/// Maximum per-token royalty (5000 = 50%)
pub const MAX_ROYALTY_BPS: u16 = 5_000;

/// Delimiter for composite ledger keys.
/// ":" is not a valid character in NEAR account IDs, preventing key collisions.
pub const DELIMITER: &str = ":";

/// No deposit / 1 yocto
pub const NO_DEPOSIT: NearToken = NearToken::from_yoctonear(0);
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

/// Default page size for enumeration views.
pub const DEFAULT_VIEW_LIMIT: u64 = 50;

// Gas constants (TGas)
pub const GAS_FT_TRANSFER: u64 = 30;
pub const GAS_FT_RESOLVE: u64 = 15;
