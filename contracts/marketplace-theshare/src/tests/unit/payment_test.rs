use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

// --- Deposits ---

#[test]
fn ft_on_transfer_credits_the_sender() {
    let mut contract = new_contract();

    deposit_ft(&mut contract, &buyer(), 500);
    deposit_ft(&mut contract, &buyer(), 250);

    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 750);
}

#[test]
fn deposits_are_scoped_per_token_contract() {
    let mut contract = new_contract();
    deposit_ft(&mut contract, &buyer(), 500);

    // Same sender through a different token contract is a separate balance.
    testing_env!(context(fee_collector()).build());
    contract
        .ft_on_transfer(buyer(), U128(111), String::new())
        .unwrap();

    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 500);
    assert_eq!(contract.ft_balance_of(fee_collector(), buyer()).0, 111);
}

#[test]
fn msg_routes_the_credit_to_a_beneficiary() {
    let mut contract = new_contract();

    testing_env!(context(ft_token()).build());
    contract
        .ft_on_transfer(buyer(), U128(500), seller().to_string())
        .unwrap();

    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 0);
    assert_eq!(contract.ft_balance_of(ft_token(), seller()).0, 500);
}

#[test]
fn garbage_msg_is_rejected() {
    let mut contract = new_contract();

    testing_env!(context(ft_token()).build());
    let err = contract
        .ft_on_transfer(buyer(), U128(500), "not a!!account".to_string())
        .err()
        .unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn zero_deposit_is_rejected() {
    let mut contract = new_contract();

    testing_env!(context(ft_token()).build());
    let err = contract
        .ft_on_transfer(buyer(), U128(0), String::new())
        .err()
        .unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

// --- Allowances ---

#[test]
fn approve_overwrites_and_zero_clears() {
    let mut contract = new_contract();

    approve_ft(&mut contract, &buyer(), 1_000);
    assert_eq!(contract.ft_allowance(ft_token(), buyer()).0, 1_000);

    approve_ft(&mut contract, &buyer(), 400);
    assert_eq!(contract.ft_allowance(ft_token(), buyer()).0, 400);

    approve_ft(&mut contract, &buyer(), 0);
    assert_eq!(contract.ft_allowance(ft_token(), buyer()).0, 0);
}

#[test]
fn approve_requires_one_yocto() {
    let mut contract = new_contract();

    testing_env!(context(buyer()).build());
    let err = contract.ft_approve(ft_token(), U128(1_000)).unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn allowance_is_consumed_by_engine_pulls() {
    let mut contract = new_contract();
    let fingerprint = list_single_ft(&mut contract, 1, 600);

    deposit_ft(&mut contract, &buyer(), 1_000);
    approve_ft(&mut contract, &buyer(), 700);

    testing_env!(context_with_deposit(buyer(), 1).build());
    contract.purchase(fingerprint, U128(0)).unwrap();

    assert_eq!(contract.ft_allowance(ft_token(), buyer()).0, 100);
    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 400);
}

// --- Withdrawals ---

#[test]
fn withdraw_debits_the_ledger_up_front() {
    let mut contract = new_contract();
    deposit_ft(&mut contract, &buyer(), 1_000);

    testing_env!(context_with_deposit(buyer(), 1).build());
    contract.ft_withdraw(ft_token(), U128(600)).unwrap();

    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 400);
}

#[test]
fn withdraw_beyond_balance_fails() {
    let mut contract = new_contract();
    deposit_ft(&mut contract, &buyer(), 1_000);

    testing_env!(context_with_deposit(buyer(), 1).build());
    let err = contract.ft_withdraw(ft_token(), U128(1_001)).err().unwrap();
    assert!(matches!(err, MarketError::InsufficientBalance(_)));
    assert_eq!(contract.ft_balance_of(ft_token(), buyer()).0, 1_000);
}

#[test]
fn zero_withdraw_fails() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(buyer(), 1).build());
    let err = contract.ft_withdraw(ft_token(), U128(0)).err().unwrap();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}
