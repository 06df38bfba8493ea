use crate::tests::test_utils::*;
use crate::*;
use near_sdk::testing_env;

fn three_listings(contract: &mut Contract) -> Vec<String> {
    (1..=3)
        .map(|token_id| list_single(contract, token_id, 1_000 * token_id as u128))
        .collect()
}

#[test]
fn get_listings_pages_through_the_store() {
    let mut contract = new_contract();
    three_listings(&mut contract);

    assert_eq!(contract.get_listings_total(), 3);
    assert_eq!(contract.get_listings(None, None).len(), 3);
    assert_eq!(contract.get_listings(None, Some(2)).len(), 2);
    assert_eq!(contract.get_listings(Some(2), Some(2)).len(), 1);
    assert!(contract.get_listings(Some(3), None).is_empty());
}

#[test]
fn by_seller_only_returns_that_sellers_listings() {
    let mut contract = new_contract();
    three_listings(&mut contract);

    // One more listing from a different seller.
    mint_single(&mut contract, 10, &buyer());
    grant_approval(&mut contract, &buyer());
    testing_env!(context(buyer()).build());
    contract
        .create_listing(true, issuer(), 10, U128(5_000), U128(0), None)
        .unwrap();

    let mine = contract.get_listings_by_seller(seller(), None, None);
    assert_eq!(mine.len(), 3);
    assert!(mine.iter().all(|l| l.seller == seller()));

    let theirs = contract.get_listings_by_seller(buyer(), None, None);
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].token_id, 10);

    assert!(contract
        .get_listings_by_seller(operator(), None, None)
        .is_empty());
}

#[test]
fn retired_listings_leave_the_views() {
    let mut contract = new_contract();
    let fingerprints = three_listings(&mut contract);

    testing_env!(context_with_deposit(seller(), 1).build());
    contract.cancel_listing(fingerprints[0].clone()).unwrap();

    testing_env!(context_with_deposit(buyer(), 2_000).build());
    contract.purchase(fingerprints[1].clone(), U128(0)).unwrap();

    assert_eq!(contract.get_listings_total(), 1);
    let remaining = contract.get_listings(None, None);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].fingerprint, fingerprints[2]);
    assert_eq!(contract.get_listings_by_seller(seller(), None, None).len(), 1);
}
