use soroban_sdk::{contracttype, Address};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    CertificateRegistry,
    Ballot(u64), // certificate token id -> Ballot
    Tally(u64),  // campaign id -> votes cast
}

/// A certificate's one vote. Its presence marks the certificate as used.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Ballot {
    pub token_id: u64,
    pub campaign_id: u64,
    pub voter: Address,
    pub cast_at: u64,
}
