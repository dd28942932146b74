use donation_common::Tier;
use soroban_sdk::{contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct CertificateMintedEvent {
    pub token_id: u64,
    pub donor: Address,
    pub campaign_id: u64,
    pub amount: i128,
    pub tier: Tier,
}

#[contracttype]
#[derive(Clone)]
pub struct CertificateTransferredEvent {
    pub token_id: u64,
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct MinterUpdatedEvent {
    pub minter: Address,
}

pub fn emit_certificate_minted(env: &Env, event: CertificateMintedEvent) {
    env.events().publish(
        (
            Symbol::new(env, "certificate_minted"),
            event.token_id,
            event.donor.clone(),
        ),
        event,
    );
}

pub fn emit_certificate_transferred(env: &Env, event: CertificateTransferredEvent) {
    env.events().publish(
        (Symbol::new(env, "certificate_transferred"), event.token_id),
        event,
    );
}

pub fn emit_minter_updated(env: &Env, event: MinterUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "minter_updated"),), event);
}
