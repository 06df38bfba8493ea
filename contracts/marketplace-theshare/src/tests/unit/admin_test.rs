use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

// --- transfer_operator ---

#[test]
fn transfer_operator_happy() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(operator(), 1).build());

    contract.transfer_operator(buyer()).unwrap();
    assert_eq!(contract.operator_id, buyer());
}

#[test]
fn transfer_operator_same_account_fails() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(operator(), 1).build());

    let err = contract.transfer_operator(operator()).unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn transfer_operator_no_deposit_fails() {
    let mut contract = new_contract();
    testing_env!(context(operator()).build());

    let err = contract.transfer_operator(buyer()).unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn transfer_operator_non_operator_fails() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(buyer(), 1).build());

    let err = contract.transfer_operator(seller()).unwrap_err();
    assert!(matches!(err, MarketError::Unauthorized(_)));
}

// --- set_fee_recipient ---

#[test]
fn set_fee_recipient_happy() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(operator(), 1).build());

    contract.set_fee_recipient(buyer()).unwrap();
    assert_eq!(contract.get_fee_recipient(), buyer());
}

#[test]
fn set_fee_recipient_non_operator_fails() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(buyer(), 1).build());

    let err = contract.set_fee_recipient(seller()).unwrap_err();
    assert!(matches!(err, MarketError::Unauthorized(_)));
}

// --- set_fee_config ---

#[test]
fn set_fee_config_updates_only_given_fields() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(operator(), 1).build());

    contract
        .set_fee_config(None, Some(U128(1_000)), None)
        .unwrap();

    let config = contract.get_fee_config();
    assert_eq!(config.market_fee_bps, DEFAULT_MARKET_FEE_BPS);
    assert_eq!(config.listing_fee.0, 1_000);
    assert_eq!(config.floor_price.0, 0);
}

#[test]
fn set_fee_config_rejects_excessive_bps() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(operator(), 1).build());

    let err = contract
        .set_fee_config(Some(MAX_MARKET_FEE_BPS + 1), None, None)
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn set_fee_config_non_operator_fails() {
    let mut contract = new_contract();
    testing_env!(context_with_deposit(seller(), 1).build());

    let err = contract.set_fee_config(Some(100), None, None).unwrap_err();
    assert!(matches!(err, MarketError::Unauthorized(_)));
}

// --- init and views ---

#[test]
fn init_applies_overrides_and_caps_bps() {
    testing_env!(context(operator()).build());
    let contract = Contract::new(
        operator(),
        fee_collector(),
        Some(U128(25)),
        Some(u16::MAX),
        Some(U128(500)),
    );

    let config = contract.get_fee_config();
    assert_eq!(config.listing_fee.0, 25);
    assert_eq!(config.market_fee_bps, MAX_MARKET_FEE_BPS);
    assert_eq!(config.floor_price.0, 500);
    assert_eq!(contract.get_operator(), &operator());
    assert!(!contract.get_version().is_empty());
}
