use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env, String};

use crate::error::Error;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Special,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Special => "Special",
        }
    }
}

/// Provenance of one certificate. Written once at mint and never modified;
/// the current owner is tracked separately by the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationDetail {
    pub token_id: u64,
    pub donor: Address,
    pub amount: i128,
    pub campaign_id: u64,
    pub campaign_title: String,
    pub timestamp: u64,
    pub provenance_hash: BytesN<32>,
    pub tier: Tier,
}

/// What the ledger and the ballot registry need from the certificate registry.
#[contractclient(name = "CertificateClient")]
pub trait CertificateInterface {
    /// Mint a certificate for a qualifying donation. Only the configured
    /// minter may call this.
    fn mint(
        env: Env,
        caller: Address,
        donor: Address,
        amount: i128,
        campaign_id: u64,
        campaign_title: String,
        provenance_hash: BytesN<32>,
    ) -> Result<u64, Error>;

    fn owner_of(env: Env, token_id: u64) -> Result<Address, Error>;

    fn get_donation_detail(env: Env, token_id: u64) -> Result<DonationDetail, Error>;
}
