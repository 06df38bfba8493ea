use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

#[test]
fn purchase_charge_carves_fee_out_of_total() {
    let contract = new_contract();

    // 250 bps on 1_000_000: fee 25_000, seller keeps 975_000.
    let charge = contract.compute_purchase_charge(1_000_000, 1, 0).unwrap();
    assert_eq!(charge.total, 1_000_000);
    assert_eq!(charge.market_fee, 25_000);
    assert_eq!(charge.royalty, 0);
    assert_eq!(charge.seller_proceeds, 975_000);
}

#[test]
fn purchase_charge_scales_with_units() {
    let contract = new_contract();

    let charge = contract.compute_purchase_charge(1_000, 7, 0).unwrap();
    assert_eq!(charge.total, 7_000);
    assert_eq!(charge.market_fee, 175);
    assert_eq!(charge.seller_proceeds, 6_825);
}

#[test]
fn royalty_is_carved_alongside_the_fee() {
    let contract = new_contract();

    // 10% royalty on top of the 2.5% fee.
    let charge = contract
        .compute_purchase_charge(1_000_000, 1, 1_000)
        .unwrap();
    assert_eq!(charge.market_fee, 25_000);
    assert_eq!(charge.royalty, 100_000);
    assert_eq!(charge.seller_proceeds, 875_000);
    assert_eq!(
        charge.market_fee + charge.royalty + charge.seller_proceeds,
        charge.total
    );
}

#[test]
fn bps_shares_round_down_and_seller_absorbs_dust() {
    let contract = new_contract();

    // 999 * 250 / 10_000 = 24.975 -> 24.
    let charge = contract.compute_purchase_charge(999, 1, 0).unwrap();
    assert_eq!(charge.market_fee, 24);
    assert_eq!(charge.seller_proceeds, 975);
}

#[test]
fn total_overflow_is_rejected() {
    let contract = new_contract();

    let err = contract
        .compute_purchase_charge(u128::MAX, 2, 0)
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));
}

#[test]
fn floor_applies_to_single_owner_only() {
    testing_env!(context(operator()).build());
    let contract = Contract::new(
        operator(),
        fee_collector(),
        None,
        None,
        Some(U128(500_000)),
    );

    let err = contract
        .validate_floor(&AssetKind::SingleOwner, 499_999)
        .unwrap_err();
    assert!(matches!(err, MarketError::TooLow(_)));

    contract
        .validate_floor(&AssetKind::SingleOwner, 500_000)
        .unwrap();
    contract.validate_floor(&AssetKind::MultiSupply, 1).unwrap();
}

#[test]
fn zero_floor_disables_the_check() {
    let contract = new_contract();
    contract.validate_floor(&AssetKind::SingleOwner, 1).unwrap();
}

#[test]
fn fee_config_update_caps_market_fee() {
    let mut contract = new_contract();

    let err = contract
        .internal_update_fee_config(Some(MAX_MARKET_FEE_BPS + 1), None, None)
        .unwrap_err();
    assert!(matches!(err, MarketError::InvalidInput(_)));

    contract
        .internal_update_fee_config(Some(MAX_MARKET_FEE_BPS), Some(U128(42)), Some(U128(7)))
        .unwrap();
    assert_eq!(contract.fee_config.market_fee_bps, MAX_MARKET_FEE_BPS);
    assert_eq!(contract.fee_config.listing_fee.0, 42);
    assert_eq!(contract.fee_config.floor_price.0, 7);
}
