use donation_common::Tier;
use soroban_sdk::{xdr::ToXdr, Address, Bytes, Env};

use crate::storage_types::*;

/// Pseudo-random roll in `[0, ROLL_RANGE)` for a freshly allocated token.
///
/// Mixes ledger timestamp, ledger sequence, network id, the donor, the token
/// id and the registry's draw nonce through sha256. Every input is visible to
/// whoever submits the transaction, so the roll is only fit for a cosmetic
/// bonus tier. It is deterministic for identical inputs, which tests rely on.
pub fn roll(env: &Env, donor: &Address, token_id: u64, nonce: u64) -> u32 {
    let mut material = Bytes::new(env);
    material.extend_from_array(&env.ledger().timestamp().to_be_bytes());
    material.extend_from_array(&env.ledger().sequence().to_be_bytes());
    let beacon: Bytes = env.ledger().network_id().into();
    material.append(&beacon);
    material.append(&donor.clone().to_xdr(env));
    material.extend_from_array(&token_id.to_be_bytes());
    material.extend_from_array(&nonce.to_be_bytes());

    let digest = env.crypto().sha256(&material).to_array();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(head) % ROLL_RANGE) as u32
}

/// Special is checked first and layered on top of the amount tiers; below
/// the roll threshold the amount does not matter.
pub fn tier_for(roll: u32, amount: i128) -> Tier {
    if roll < SPECIAL_ROLL_THRESHOLD {
        Tier::Special
    } else if amount >= GOLD_THRESHOLD {
        Tier::Gold
    } else if amount >= SILVER_THRESHOLD {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}
