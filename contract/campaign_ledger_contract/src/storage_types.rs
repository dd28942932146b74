use soroban_sdk::{contracttype, Address, BytesN, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    CertificateRegistry,
    NextCampaignId,
    NextDonationId,
    NextExpenseId,
    TotalRaised,
    TotalSpent,
    CertificatesMinted,
    DonorCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Donation(DonationId),
    Expense(ExpenseId),
    CampaignDonations(CampaignId),
    DonorDonations(Address),
    DonorTotal(Address),
    DonorIndex(Address), // position in first-donation order
    Leaderboard,
}

pub type CampaignId = u64;
pub type DonationId = u64;
pub type ExpenseId = u64;

/// Campaign id recorded on expenses drawn from the general fund.
pub const GENERAL_FUND: CampaignId = 0;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub image_ref: String,   // off-chain media reference
    pub target: i128,
    pub raised: i128,
    pub active: bool,
    pub created_at: u64,
    pub deadline: u64,
    pub creator: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Donation {
    pub id: DonationId,
    pub donor: Address,
    pub campaign_id: CampaignId,
    pub amount: i128,
    pub timestamp: u64,
    pub provenance_hash: BytesN<32>,
    pub certificate_minted: bool,
    pub certificate_id: Option<u64>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
    pub provenance_hash: BytesN<32>,
    pub campaign_id: CampaignId, // GENERAL_FUND when not tied to a campaign
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LeaderboardEntry {
    pub donor: Address,
    pub total: i128,
}

/// Stored leaderboard row. `joined` is the donor's first-donation position
/// and breaks ties between equal totals.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RankedDonor {
    pub donor: Address,
    pub total: i128,
    pub joined: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LedgerStats {
    pub campaign_count: u64,
    pub donation_count: u64,
    pub expense_count: u64,
    pub unique_donors: u32,
    pub total_raised: i128,
    pub total_spent: i128,
    pub balance: i128,
    pub certificates_minted: u64,
}

// Constants
pub const MIN_CERTIFICATE_AMOUNT: i128 = 10_000_000_000_000_000; // 0.01 units at 18 decimals
pub const LEADERBOARD_SIZE: u32 = 100;
