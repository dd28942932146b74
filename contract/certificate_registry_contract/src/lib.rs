#![no_std]

mod events;
pub mod metadata;
mod storage_types;
pub mod tier;

#[cfg(test)]
mod test;

use donation_common::{
    extend_instance, AccessGuard, CertificateInterface, DonationDetail, Error, MAX_TITLE_LEN,
    TTL_PERSISTENT,
};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
use storage_types::*;

pub use donation_common::Tier;
pub use storage_types::{GOLD_THRESHOLD, SILVER_THRESHOLD, SPECIAL_ROLL_THRESHOLD, UNIT};

#[contract]
pub struct CertificateRegistry;

#[contractimpl]
impl CertificateRegistry {
    /// Initialize the registry with its administrator. The minter is set
    /// separately once the ledger contract address is known.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        AccessGuard::init(&env, &admin)?;

        env.storage().instance().set(&DataKey::NextTokenId, &1u64);
        env.storage().instance().set(&DataKey::RollNonce, &0u64);
        extend_instance(&env);
        Ok(())
    }

    /// Point the registry at the contract allowed to mint (the campaign ledger).
    pub fn set_minter(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        AccessGuard::require_admin(&env, &caller)?;

        env.storage().instance().set(&DataKey::Minter, &minter);
        extend_instance(&env);

        events::emit_minter_updated(&env, events::MinterUpdatedEvent { minter });
        Ok(())
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        AccessGuard::transfer(&env, &caller, &new_admin)
    }

    /// Move a certificate to a new owner. Provenance (including the original
    /// donor) stays as minted.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();

        let owner = load_owner(&env, token_id)?;
        if owner != from {
            return Err(Error::NotOwner);
        }
        if from == to {
            return Err(Error::InvalidInput);
        }

        let mut from_tokens = owned_tokens(&env, &from);
        if let Some(index) = from_tokens.iter().position(|id| id == token_id) {
            from_tokens.remove(index as u32);
        }
        store_owned_tokens(&env, &from, &from_tokens);

        let mut to_tokens = owned_tokens(&env, &to);
        to_tokens.push_back(token_id);
        store_owned_tokens(&env, &to, &to_tokens);

        let key = DataKey::Owner(token_id);
        env.storage().persistent().set(&key, &to);
        extend_persistent(&env, &key);

        events::emit_certificate_transferred(
            &env,
            events::CertificateTransferredEvent { token_id, from, to },
        );
        Ok(())
    }

    pub fn token_uri(env: Env, token_id: u64) -> Result<String, Error> {
        let detail = load_detail(&env, token_id)?;
        Ok(metadata::token_uri(&env, &detail))
    }

    /// Token ids currently owned by `owner`, in acquisition order.
    pub fn get_tokens_by_donor(env: Env, owner: Address) -> Vec<u64> {
        owned_tokens(&env, &owner)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        owned_tokens(&env, &owner).len()
    }

    pub fn total_supply(env: Env) -> u64 {
        let next: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .unwrap_or(1);
        next - 1
    }

    pub fn get_minter(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Minter)
    }

    pub fn admin(env: Env) -> Option<Address> {
        AccessGuard::admin(&env)
    }
}

#[contractimpl]
impl CertificateInterface for CertificateRegistry {
    fn mint(
        env: Env,
        caller: Address,
        donor: Address,
        amount: i128,
        campaign_id: u64,
        campaign_title: String,
        provenance_hash: BytesN<32>,
    ) -> Result<u64, Error> {
        caller.require_auth();
        let minter: Option<Address> = env.storage().instance().get(&DataKey::Minter);
        if minter.as_ref() != Some(&caller) {
            return Err(Error::Unauthorized);
        }
        if amount <= 0 || campaign_title.is_empty() || campaign_title.len() > MAX_TITLE_LEN {
            return Err(Error::InvalidInput);
        }

        let token_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .ok_or(Error::NotInitialized)?;
        let nonce: u64 = env
            .storage()
            .instance()
            .get(&DataKey::RollNonce)
            .ok_or(Error::NotInitialized)?;

        let roll = tier::roll(&env, &donor, token_id, nonce);
        let tier = tier::tier_for(roll, amount);

        let detail = DonationDetail {
            token_id,
            donor: donor.clone(),
            amount,
            campaign_id,
            campaign_title,
            timestamp: env.ledger().timestamp(),
            provenance_hash,
            tier,
        };

        let certificate_key = DataKey::Certificate(token_id);
        let owner_key = DataKey::Owner(token_id);
        env.storage().persistent().set(&certificate_key, &detail);
        env.storage().persistent().set(&owner_key, &donor);
        extend_persistent(&env, &certificate_key);
        extend_persistent(&env, &owner_key);

        let mut tokens = owned_tokens(&env, &donor);
        tokens.push_back(token_id);
        store_owned_tokens(&env, &donor, &tokens);

        env.storage().instance().set(&DataKey::NextTokenId, &(token_id + 1));
        env.storage().instance().set(&DataKey::RollNonce, &(nonce + 1));
        extend_instance(&env);

        log!(&env, "certificate minted", token_id, roll, tier);
        events::emit_certificate_minted(
            &env,
            events::CertificateMintedEvent {
                token_id,
                donor,
                campaign_id,
                amount,
                tier,
            },
        );

        Ok(token_id)
    }

    fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        load_owner(&env, token_id)
    }

    fn get_donation_detail(env: Env, token_id: u64) -> Result<DonationDetail, Error> {
        load_detail(&env, token_id)
    }
}

// Helper functions
fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn load_detail(env: &Env, token_id: u64) -> Result<DonationDetail, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Certificate(token_id))
        .ok_or(Error::NotFound)
}

fn load_owner(env: &Env, token_id: u64) -> Result<Address, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Owner(token_id))
        .ok_or(Error::NotFound)
}

fn owned_tokens(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnedTokens(owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

fn store_owned_tokens(env: &Env, owner: &Address, tokens: &Vec<u64>) {
    let key = DataKey::OwnedTokens(owner.clone());
    env.storage().persistent().set(&key, tokens);
    extend_persistent(env, &key);
}
