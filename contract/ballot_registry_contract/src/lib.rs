#![no_std]

use donation_common::{
    extend_instance, AccessGuard, CertificateClient, Error, ReentrancyLock, TTL_PERSISTENT,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

mod storage;
pub use storage::Ballot;
use storage::DataKey;

/// Campaign voting where each donation certificate carries exactly one vote,
/// usable only for the campaign it was minted for.
#[contract]
pub struct BallotRegistry;

#[contractimpl]
impl BallotRegistry {
    /// Bind the ballot to the registry whose certificates carry votes. The
    /// binding is fixed once made, so `admin` must authorize it.
    pub fn initialize(
        env: Env,
        admin: Address,
        certificate_registry: Address,
    ) -> Result<(), Error> {
        admin.require_auth();
        AccessGuard::init(&env, &admin)?;

        env.storage()
            .instance()
            .set(&DataKey::CertificateRegistry, &certificate_registry);
        extend_instance(&env);
        Ok(())
    }

    /// Cast the vote carried by certificate `token_id` for `campaign_id`.
    pub fn vote(env: Env, voter: Address, campaign_id: u64, token_id: u64) -> Result<(), Error> {
        voter.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;

        let registry: Address = env
            .storage()
            .instance()
            .get(&DataKey::CertificateRegistry)
            .ok_or(Error::NotInitialized)?;
        let certificates = CertificateClient::new(&env, &registry);

        let owner = match certificates.try_owner_of(&token_id) {
            Ok(Ok(owner)) => owner,
            Err(Ok(error)) => return Err(error),
            _ => return Err(Error::RegistryUnavailable),
        };
        if owner != voter {
            return Err(Error::NotOwner);
        }

        let ballot_key = DataKey::Ballot(token_id);
        if env.storage().persistent().has(&ballot_key) {
            return Err(Error::AlreadyUsed);
        }

        let detail = match certificates.try_get_donation_detail(&token_id) {
            Ok(Ok(detail)) => detail,
            Err(Ok(error)) => return Err(error),
            _ => return Err(Error::RegistryUnavailable),
        };
        if detail.campaign_id != campaign_id {
            return Err(Error::CampaignMismatch);
        }

        let ballot = Ballot {
            token_id,
            campaign_id,
            voter: voter.clone(),
            cast_at: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&ballot_key, &ballot);
        env.storage()
            .persistent()
            .extend_ttl(&ballot_key, TTL_PERSISTENT, TTL_PERSISTENT);

        let tally_key = DataKey::Tally(campaign_id);
        let votes = Self::get_votes(env.clone(), campaign_id) + 1;
        env.storage().persistent().set(&tally_key, &votes);
        env.storage()
            .persistent()
            .extend_ttl(&tally_key, TTL_PERSISTENT, TTL_PERSISTENT);
        extend_instance(&env);

        log!(&env, "vote cast", campaign_id, token_id, votes);
        env.events().publish(
            (Symbol::new(&env, "vote_cast"), campaign_id, token_id),
            voter,
        );
        Ok(())
    }

    pub fn has_voted(env: Env, token_id: u64) -> bool {
        env.storage().persistent().has(&DataKey::Ballot(token_id))
    }

    pub fn get_votes(env: Env, campaign_id: u64) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Tally(campaign_id))
            .unwrap_or(0)
    }

    pub fn get_ballot(env: Env, token_id: u64) -> Option<Ballot> {
        env.storage().persistent().get(&DataKey::Ballot(token_id))
    }

    pub fn get_certificate_registry(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::CertificateRegistry)
    }

    pub fn admin(env: Env) -> Option<Address> {
        AccessGuard::admin(&env)
    }
}
