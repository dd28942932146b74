use soroban_sdk::contracterror;

/// Failure kinds surfaced by every donation contract.
///
/// Returning any of these from a contract entry point aborts the invocation
/// and discards all of its storage writes, transfers and events.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller lacks the required capability.
    Unauthorized = 1,
    /// Unknown campaign, donation, expense or certificate.
    NotFound = 2,
    /// Empty string, zero amount, deadline not in the future and similar.
    InvalidInput = 3,
    CampaignInactive = 4,
    DeadlinePassed = 5,
    InsufficientBalance = 6,
    NotOwner = 7,
    AlreadyUsed = 8,
    CampaignMismatch = 9,
    Reentrant = 10,

    AlreadyInitialized = 11,
    NotInitialized = 12,
    /// The certificate registry rejected a mint for a reason outside this taxonomy.
    MintFailed = 13,
    /// A certificate lookup failed without a taxonomy error, e.g. the
    /// configured registry is not a certificate registry.
    RegistryUnavailable = 14,
}
