#![cfg(test)]

use super::*;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Bytes, BytesN, Env, String, Vec};

struct Setup<'a> {
    env: Env,
    admin: Address,
    minter: Address,
    registry: CertificateRegistryClient<'a>,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);
    let minter = Address::generate(&env);
    let registry = CertificateRegistryClient::new(&env, &env.register(CertificateRegistry, ()));

    registry.initialize(&admin);
    registry.set_minter(&admin, &minter);

    Setup {
        env,
        admin,
        minter,
        registry,
    }
}

fn hash(env: &Env, byte: u8) -> BytesN<32> {
    BytesN::from_array(env, &[byte; 32])
}

fn mint(s: &Setup, donor: &Address, amount: i128, campaign_id: u64) -> u64 {
    s.registry.mint(
        &s.minter,
        donor,
        &amount,
        &campaign_id,
        &String::from_str(&s.env, "Clean Water"),
        &hash(&s.env, 7),
    )
}

#[test]
fn test_mint_records_provenance_and_ownership() {
    let s = setup();
    let donor = Address::generate(&s.env);

    let first = mint(&s, &donor, UNIT / 50, 1);
    let second = mint(&s, &donor, UNIT * 2, 3);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(s.registry.total_supply(), 2);
    assert_eq!(s.registry.owner_of(&first), donor);
    assert_eq!(s.registry.balance_of(&donor), 2);
    assert_eq!(
        s.registry.get_tokens_by_donor(&donor),
        Vec::from_array(&s.env, [1u64, 2u64])
    );

    let detail = s.registry.get_donation_detail(&second);
    assert_eq!(detail.token_id, 2);
    assert_eq!(detail.donor, donor);
    assert_eq!(detail.amount, UNIT * 2);
    assert_eq!(detail.campaign_id, 3);
    assert_eq!(detail.campaign_title, String::from_str(&s.env, "Clean Water"));
    assert_eq!(detail.timestamp, 1_700_000_000);
    assert_eq!(detail.provenance_hash, hash(&s.env, 7));
}

#[test]
fn test_mint_tier_follows_roll_and_nonce() {
    let s = setup();
    let donor = Address::generate(&s.env);

    let first = mint(&s, &donor, UNIT / 50, 1);
    let second = mint(&s, &donor, UNIT / 50, 1);

    // same ledger, same donor: only the token id and the nonce move the roll
    let expected_first = tier::tier_for(tier::roll(&s.env, &donor, 1, 0), UNIT / 50);
    let expected_second = tier::tier_for(tier::roll(&s.env, &donor, 2, 1), UNIT / 50);

    assert_eq!(s.registry.get_donation_detail(&first).tier, expected_first);
    assert_eq!(s.registry.get_donation_detail(&second).tier, expected_second);
}

#[test]
fn test_roll_in_range_and_deterministic() {
    let env = Env::default();
    let donor = Address::generate(&env);

    for nonce in 0..32u64 {
        let roll = tier::roll(&env, &donor, nonce + 1, nonce);
        assert!((roll as u64) < storage_types::ROLL_RANGE);
        assert_eq!(roll, tier::roll(&env, &donor, nonce + 1, nonce));
    }
}

#[test]
fn test_tier_thresholds() {
    let ordinary = SPECIAL_ROLL_THRESHOLD;

    assert_eq!(tier::tier_for(ordinary, 1), Tier::Bronze);
    assert_eq!(tier::tier_for(ordinary, SILVER_THRESHOLD - 1), Tier::Bronze);
    assert_eq!(tier::tier_for(ordinary, SILVER_THRESHOLD), Tier::Silver);
    assert_eq!(tier::tier_for(ordinary, GOLD_THRESHOLD - 1), Tier::Silver);
    assert_eq!(tier::tier_for(ordinary, GOLD_THRESHOLD), Tier::Gold);
    assert_eq!(tier::tier_for(9_999, GOLD_THRESHOLD * 50), Tier::Gold);

    // Special ignores the amount entirely
    assert_eq!(tier::tier_for(0, 1), Tier::Special);
    assert_eq!(tier::tier_for(SPECIAL_ROLL_THRESHOLD - 1, GOLD_THRESHOLD), Tier::Special);
}

#[test]
fn test_mint_rejects_non_minter() {
    let s = setup();
    let intruder = Address::generate(&s.env);
    let donor = Address::generate(&s.env);

    let result = s.registry.try_mint(
        &intruder,
        &donor,
        &UNIT,
        &1,
        &String::from_str(&s.env, "Clean Water"),
        &hash(&s.env, 1),
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(s.registry.total_supply(), 0);
}

#[test]
fn test_mint_without_minter_configured() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let caller = Address::generate(&env);
    let registry = CertificateRegistryClient::new(&env, &env.register(CertificateRegistry, ()));
    registry.initialize(&admin);

    let result = registry.try_mint(
        &caller,
        &caller,
        &UNIT,
        &1,
        &String::from_str(&env, "Clean Water"),
        &hash(&env, 1),
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_mint_rejects_bad_input() {
    let s = setup();
    let donor = Address::generate(&s.env);
    let long_title = String::from_bytes(&s.env, &[b'x'; 101]);

    assert_eq!(
        s.registry.try_mint(
            &s.minter,
            &donor,
            &0,
            &1,
            &String::from_str(&s.env, "Clean Water"),
            &hash(&s.env, 1),
        ),
        Err(Ok(Error::InvalidInput))
    );
    assert_eq!(
        s.registry
            .try_mint(&s.minter, &donor, &UNIT, &1, &long_title, &hash(&s.env, 1)),
        Err(Ok(Error::InvalidInput))
    );
}

#[test]
fn test_only_admin_sets_minter() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.registry.try_set_minter(&stranger, &stranger),
        Err(Ok(Error::Unauthorized))
    );

    let ledger = Address::generate(&s.env);
    s.registry.set_minter(&s.admin, &ledger);
    assert_eq!(s.registry.get_minter(), Some(ledger));
}

#[test]
fn test_unminted_lookups_not_found() {
    let s = setup();

    assert_eq!(s.registry.try_owner_of(&1), Err(Ok(Error::NotFound)));
    assert_eq!(s.registry.try_get_donation_detail(&1), Err(Ok(Error::NotFound)));
    assert_eq!(s.registry.try_token_uri(&1), Err(Ok(Error::NotFound)));
}

#[test]
fn test_transfer_keeps_provenance() {
    let s = setup();
    let donor = Address::generate(&s.env);
    let friend = Address::generate(&s.env);
    let token_id = mint(&s, &donor, UNIT, 1);

    s.registry.transfer(&donor, &friend, &token_id);

    assert_eq!(s.registry.owner_of(&token_id), friend);
    assert_eq!(s.registry.get_donation_detail(&token_id).donor, donor);
    assert_eq!(s.registry.balance_of(&donor), 0);
    assert_eq!(
        s.registry.get_tokens_by_donor(&friend),
        Vec::from_array(&s.env, [token_id])
    );

    // the previous owner no longer controls it
    assert_eq!(
        s.registry.try_transfer(&donor, &friend, &token_id),
        Err(Ok(Error::NotOwner))
    );
}

#[test]
fn test_second_initialize_rejected() {
    let s = setup();
    assert_eq!(
        s.registry.try_initialize(&s.admin),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_token_uri_rendering() {
    let env = Env::default();
    let donor = Address::generate(&env);
    let detail = DonationDetail {
        token_id: 12,
        donor,
        amount: UNIT + UNIT / 2,
        campaign_id: 4,
        campaign_title: String::from_str(&env, "School \"Roof\""),
        timestamp: 1_700_000_000,
        provenance_hash: hash(&env, 3),
        tier: Tier::Gold,
    };

    let expected = String::from_str(
        &env,
        "data:application/json,{\"name\":\"Donation Certificate #12\",\
\"description\":\"Proof of a donation recorded on the transparent donation ledger\",\
\"attributes\":[{\"trait_type\":\"Tier\",\"value\":\"Gold\"},\
{\"trait_type\":\"Campaign\",\"value\":\"School \\\"Roof\\\"\"},\
{\"trait_type\":\"Amount\",\"value\":\"1.5\"},\
{\"trait_type\":\"Campaign ID\",\"value\":4},\
{\"trait_type\":\"Timestamp\",\"value\":1700000000}]}",
    );
    assert_eq!(metadata::token_uri(&env, &detail), expected);
}

#[test]
fn test_amount_formatting() {
    let env = Env::default();
    let render = |amount: i128| {
        let mut out = Bytes::new(&env);
        metadata::push_amount(&mut out, amount);
        out
    };

    assert_eq!(render(UNIT / 50), Bytes::from_slice(&env, b"0.02"));
    assert_eq!(render(UNIT), Bytes::from_slice(&env, b"1"));
    assert_eq!(render(UNIT * 25 + UNIT / 4), Bytes::from_slice(&env, b"25.25"));
    assert_eq!(render(1), Bytes::from_slice(&env, b"0.000000000000000001"));
    assert_eq!(render(0), Bytes::from_slice(&env, b"0"));
}
