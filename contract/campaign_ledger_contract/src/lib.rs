#![no_std]


mod events;
mod leaderboard;
mod storage_types;

pub use storage_types::{
    Campaign, CampaignId, Donation, DonationId, Expense, ExpenseId, LeaderboardEntry, LedgerStats,
    GENERAL_FUND, LEADERBOARD_SIZE, MIN_CERTIFICATE_AMOUNT,
};
use storage_types::{DataKey, PersistentKey};

use donation_common::{
    extend_instance, provenance_hash, AccessGuard, CertificateClient, Error, ReentrancyLock,
    MAX_TITLE_LEN, TTL_PERSISTENT,
};
use soroban_sdk::{contract, contractimpl, log, token, Address, BytesN, Env, String, Vec};

#[contract]
pub struct CampaignLedger;

#[contractimpl]
impl CampaignLedger {
    /// Initialize the ledger with its administrator and the payment token
    /// donations are made in.
    pub fn initialize(e: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin.require_auth();
        AccessGuard::init(&e, &admin)?;

        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::NextCampaignId, &1u64);
        e.storage().instance().set(&DataKey::NextDonationId, &1u64);
        e.storage().instance().set(&DataKey::NextExpenseId, &1u64);
        e.storage().instance().set(&DataKey::TotalRaised, &0i128);
        e.storage().instance().set(&DataKey::TotalSpent, &0i128);
        e.storage().instance().set(&DataKey::CertificatesMinted, &0u64);

        extend_instance(&e);
        Ok(())
    }

    /// Configure (or repoint) the certificate registry that mints for
    /// qualifying donations.
    pub fn set_certificate_registry(e: Env, caller: Address, registry: Address) -> Result<(), Error> {
        AccessGuard::require_admin(&e, &caller)?;

        e.storage().instance().set(&DataKey::CertificateRegistry, &registry);
        extend_instance(&e);

        events::emit_registry_updated(&e, events::RegistryUpdatedEvent { registry });
        Ok(())
    }

    pub fn transfer_admin(e: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        AccessGuard::transfer(&e, &caller, &new_admin)
    }

    /// Create a new fundraising campaign
    pub fn create_campaign(
        e: Env,
        caller: Address,
        title: String,
        description: String,
        image_ref: String,
        target: i128,
        deadline: u64,
    ) -> Result<CampaignId, Error> {
        AccessGuard::require_admin(&e, &caller)?;

        if title.is_empty() || title.len() > MAX_TITLE_LEN || description.is_empty() {
            return Err(Error::InvalidInput);
        }
        if target <= 0 {
            return Err(Error::InvalidInput);
        }
        let now = e.ledger().timestamp();
        if deadline <= now {
            return Err(Error::InvalidInput);
        }

        let campaign_id = next_id(&e, &DataKey::NextCampaignId)?;
        let campaign = Campaign {
            id: campaign_id,
            title: title.clone(),
            description,
            image_ref,
            target,
            raised: 0,
            active: true,
            created_at: now,
            deadline,
            creator: caller.clone(),
        };
        save_campaign(&e, &campaign);
        extend_instance(&e);

        log!(&e, "campaign created", campaign_id, target, deadline);
        events::emit_campaign_created(
            &e,
            events::CampaignCreatedEvent {
                campaign_id,
                creator: caller,
                title,
                target,
                deadline,
            },
        );

        Ok(campaign_id)
    }

    /// Open or close a campaign for donations
    pub fn update_campaign_status(
        e: Env,
        caller: Address,
        campaign_id: CampaignId,
        active: bool,
    ) -> Result<(), Error> {
        AccessGuard::require_admin(&e, &caller)?;

        let mut campaign = load_campaign(&e, campaign_id)?;
        campaign.active = active;
        save_campaign(&e, &campaign);

        events::emit_campaign_updated(&e, events::CampaignUpdatedEvent { campaign_id, active });
        Ok(())
    }

    /// Donate `amount` of the payment token to a campaign. Donations of at
    /// least `MIN_CERTIFICATE_AMOUNT` also mint a certificate when a registry
    /// is configured.
    pub fn donate(
        e: Env,
        donor: Address,
        campaign_id: CampaignId,
        amount: i128,
    ) -> Result<DonationId, Error> {
        donor.require_auth();
        let _lock = ReentrancyLock::acquire(&e)?;

        if amount <= 0 {
            return Err(Error::InvalidInput);
        }
        let mut campaign = load_campaign(&e, campaign_id)?;
        if !campaign.active {
            return Err(Error::CampaignInactive);
        }
        if e.ledger().timestamp() > campaign.deadline {
            return Err(Error::DeadlinePassed);
        }

        let token_client = token::Client::new(&e, &token_address(&e)?);
        token_client.transfer(&donor, &e.current_contract_address(), &amount);

        let donation_id = next_id(&e, &DataKey::NextDonationId)?;
        let provenance = provenance_hash(&e, b"donation", &donor, donation_id);

        campaign.raised += amount;
        save_campaign(&e, &campaign);
        add_to_total(&e, &DataKey::TotalRaised, amount)?;
        leaderboard::record(&e, &donor, amount);
        append_id(&e, &PersistentKey::CampaignDonations(campaign_id), donation_id);
        append_id(&e, &PersistentKey::DonorDonations(donor.clone()), donation_id);

        let certificate_id = match Self::certificate_registry(e.clone()) {
            Some(registry) if amount >= MIN_CERTIFICATE_AMOUNT => Some(Self::mint_certificate(
                &e,
                &registry,
                &donor,
                amount,
                &campaign,
                &provenance,
            )?),
            _ => None,
        };

        let donation = Donation {
            id: donation_id,
            donor: donor.clone(),
            campaign_id,
            amount,
            timestamp: e.ledger().timestamp(),
            provenance_hash: provenance,
            certificate_minted: certificate_id.is_some(),
            certificate_id,
        };
        let key = PersistentKey::Donation(donation_id);
        e.storage().persistent().set(&key, &donation);
        extend_persistent(&e, &key);
        extend_instance(&e);

        log!(&e, "donation received", donation_id, campaign_id, amount);
        events::emit_donation_received(
            &e,
            events::DonationReceivedEvent {
                donation_id,
                campaign_id,
                donor,
                amount,
                certificate_id,
            },
        );

        Ok(donation_id)
    }

    /// Withdraw funds to `recipient`, logging the expense before the funds
    /// leave the ledger.
    pub fn withdraw_with_log(
        e: Env,
        caller: Address,
        description: String,
        recipient: Address,
        amount: i128,
        campaign_id: CampaignId,
    ) -> Result<ExpenseId, Error> {
        AccessGuard::require_admin(&e, &caller)?;
        let _lock = ReentrancyLock::acquire(&e)?;

        if description.is_empty() || amount <= 0 {
            return Err(Error::InvalidInput);
        }
        // the ledger's own address stands in for the null account
        if recipient == e.current_contract_address() {
            return Err(Error::InvalidInput);
        }
        if campaign_id != GENERAL_FUND {
            load_campaign(&e, campaign_id)?;
        }
        if amount > ledger_balance(&e) {
            return Err(Error::InsufficientBalance);
        }

        let expense_id = next_id(&e, &DataKey::NextExpenseId)?;
        let expense = Expense {
            id: expense_id,
            description: description.clone(),
            amount,
            recipient: recipient.clone(),
            timestamp: e.ledger().timestamp(),
            provenance_hash: provenance_hash(&e, b"expense", &recipient, expense_id),
            campaign_id,
        };
        let key = PersistentKey::Expense(expense_id);
        e.storage().persistent().set(&key, &expense);
        extend_persistent(&e, &key);
        add_to_total(&e, &DataKey::TotalSpent, amount)?;
        extend_instance(&e);

        // The audit record is already in place when the transfer runs.
        let token_client = token::Client::new(&e, &token_address(&e)?);
        token_client.transfer(&e.current_contract_address(), &recipient, &amount);

        log!(&e, "funds withdrawn", expense_id, amount);
        events::emit_funds_withdrawn(
            &e,
            events::FundsWithdrawnEvent {
                expense_id,
                campaign_id,
                recipient,
                amount,
                description,
            },
        );

        Ok(expense_id)
    }

    /// View functions
    pub fn get_campaign(e: Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
        load_campaign(&e, campaign_id)
    }

    pub fn get_all_campaigns(e: Env) -> Vec<Campaign> {
        let mut campaigns = Vec::new(&e);
        for id in 1..counter(&e, &DataKey::NextCampaignId) {
            if let Ok(campaign) = load_campaign(&e, id) {
                campaigns.push_back(campaign);
            }
        }
        campaigns
    }

    /// Campaigns currently accepting donations.
    pub fn get_active_campaigns(e: Env) -> Vec<Campaign> {
        let now = e.ledger().timestamp();
        let mut active = Vec::new(&e);
        for campaign in Self::get_all_campaigns(e.clone()).iter() {
            if campaign.active && now <= campaign.deadline {
                active.push_back(campaign);
            }
        }
        active
    }

    pub fn get_donations_for_campaign(e: Env, campaign_id: CampaignId) -> Result<Vec<Donation>, Error> {
        load_campaign(&e, campaign_id)?;
        Ok(load_donations(&e, &PersistentKey::CampaignDonations(campaign_id)))
    }

    pub fn get_donations_by_donor(e: Env, donor: Address) -> Vec<Donation> {
        load_donations(&e, &PersistentKey::DonorDonations(donor))
    }

    pub fn get_donation(e: Env, donation_id: DonationId) -> Result<Donation, Error> {
        e.storage()
            .persistent()
            .get(&PersistentKey::Donation(donation_id))
            .ok_or(Error::NotFound)
    }

    pub fn get_expense(e: Env, expense_id: ExpenseId) -> Result<Expense, Error> {
        e.storage()
            .persistent()
            .get(&PersistentKey::Expense(expense_id))
            .ok_or(Error::NotFound)
    }

    pub fn get_expenses(e: Env) -> Vec<Expense> {
        let mut expenses = Vec::new(&e);
        for id in 1..counter(&e, &DataKey::NextExpenseId) {
            let key = PersistentKey::Expense(id);
            if let Some(expense) = e.storage().persistent().get::<_, Expense>(&key) {
                expenses.push_back(expense);
            }
        }
        expenses
    }

    pub fn get_donor_total(e: Env, donor: Address) -> i128 {
        leaderboard::donor_total(&e, &donor)
    }

    /// Top `limit` donors by total donated, at most `LEADERBOARD_SIZE`.
    pub fn get_leaderboard(e: Env, limit: u32) -> Vec<LeaderboardEntry> {
        leaderboard::top(&e, limit)
    }

    pub fn get_stats(e: Env) -> LedgerStats {
        let total_raised = total(&e, &DataKey::TotalRaised);
        let total_spent = total(&e, &DataKey::TotalSpent);
        LedgerStats {
            campaign_count: counter(&e, &DataKey::NextCampaignId) - 1,
            donation_count: counter(&e, &DataKey::NextDonationId) - 1,
            expense_count: counter(&e, &DataKey::NextExpenseId) - 1,
            unique_donors: leaderboard::donor_count(&e),
            total_raised,
            total_spent,
            balance: total_raised - total_spent,
            certificates_minted: e
                .storage()
                .instance()
                .get(&DataKey::CertificatesMinted)
                .unwrap_or(0),
        }
    }

    pub fn get_certificate_registry(e: Env) -> Option<Address> {
        Self::certificate_registry(e)
    }

    pub fn get_token(e: Env) -> Result<Address, Error> {
        token_address(&e)
    }

    pub fn admin(e: Env) -> Option<Address> {
        AccessGuard::admin(&e)
    }
}

// Helper functions
fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn token_address(e: &Env) -> Result<Address, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

fn counter(e: &Env, key: &DataKey) -> u64 {
    e.storage().instance().get(key).unwrap_or(1)
}

fn next_id(e: &Env, key: &DataKey) -> Result<u64, Error> {
    let id: u64 = e.storage().instance().get(key).ok_or(Error::NotInitialized)?;
    e.storage().instance().set(key, &(id + 1));
    Ok(id)
}

fn total(e: &Env, key: &DataKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn add_to_total(e: &Env, key: &DataKey, amount: i128) -> Result<(), Error> {
    let current: i128 = e.storage().instance().get(key).ok_or(Error::NotInitialized)?;
    e.storage().instance().set(key, &(current + amount));
    Ok(())
}

/// Cumulative donations minus cumulative withdrawals.
fn ledger_balance(e: &Env) -> i128 {
    total(e, &DataKey::TotalRaised) - total(e, &DataKey::TotalSpent)
}

fn load_campaign(e: &Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(Error::NotFound)
}

fn save_campaign(e: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

fn append_id(e: &Env, key: &PersistentKey, id: u64) {
    let mut ids: Vec<u64> = e
        .storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| Vec::new(e));
    ids.push_back(id);
    e.storage().persistent().set(key, &ids);
    extend_persistent(e, key);
}

fn load_donations(e: &Env, index_key: &PersistentKey) -> Vec<Donation> {
    let ids: Vec<u64> = e
        .storage()
        .persistent()
        .get(index_key)
        .unwrap_or_else(|| Vec::new(e));
    let mut donations = Vec::new(e);
    for id in ids.iter() {
        let key = PersistentKey::Donation(id);
        if let Some(donation) = e.storage().persistent().get::<_, Donation>(&key) {
            donations.push_back(donation);
        }
    }
    donations
}

impl CampaignLedger {
    fn certificate_registry(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::CertificateRegistry)
    }

    fn mint_certificate(
        e: &Env,
        registry: &Address,
        donor: &Address,
        amount: i128,
        campaign: &Campaign,
        provenance: &BytesN<32>,
    ) -> Result<u64, Error> {
        let client = CertificateClient::new(e, registry);
        let token_id = match client.try_mint(
            &e.current_contract_address(),
            donor,
            &amount,
            &campaign.id,
            &campaign.title,
            provenance,
        ) {
            Ok(Ok(token_id)) => token_id,
            Err(Ok(error)) => return Err(error),
            _ => return Err(Error::MintFailed),
        };

        let minted: u64 = e
            .storage()
            .instance()
            .get(&DataKey::CertificatesMinted)
            .unwrap_or(0);
        e.storage()
            .instance()
            .set(&DataKey::CertificatesMinted, &(minted + 1));

        Ok(token_id)
    }
}
