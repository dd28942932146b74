use soroban_sdk::{contracttype, Address, Env, String, Symbol};

use crate::storage_types::{CampaignId, DonationId, ExpenseId};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub creator: Address,
    pub title: String,
    pub target: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignUpdatedEvent {
    pub campaign_id: CampaignId,
    pub active: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct DonationReceivedEvent {
    pub donation_id: DonationId,
    pub campaign_id: CampaignId,
    pub donor: Address,
    pub amount: i128,
    pub certificate_id: Option<u64>,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsWithdrawnEvent {
    pub expense_id: ExpenseId,
    pub campaign_id: CampaignId,
    pub recipient: Address,
    pub amount: i128,
    pub description: String,
}

#[contracttype]
#[derive(Clone)]
pub struct RegistryUpdatedEvent {
    pub registry: Address,
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreatedEvent) {
    env.events().publish(
        (
            Symbol::new(env, "campaign_created"),
            event.campaign_id,
            event.creator.clone(),
        ),
        event,
    );
}

pub fn emit_campaign_updated(env: &Env, event: CampaignUpdatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_updated"), event.campaign_id),
        event,
    );
}

pub fn emit_donation_received(env: &Env, event: DonationReceivedEvent) {
    env.events().publish(
        (
            Symbol::new(env, "donation_received"),
            event.campaign_id,
            event.donor.clone(),
        ),
        event,
    );
}

pub fn emit_funds_withdrawn(env: &Env, event: FundsWithdrawnEvent) {
    env.events().publish(
        (
            Symbol::new(env, "funds_withdrawn"),
            event.expense_id,
            event.recipient.clone(),
        ),
        event,
    );
}

pub fn emit_registry_updated(env: &Env, event: RegistryUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "registry_updated"),), event);
}
