use soroban_sdk::{contracttype, Env};

// Keys owned by the shared capabilities. They live in the instance storage of
// whichever contract composes them, next to that contract's own keys.
#[contracttype]
#[derive(Clone)]
pub enum GuardKey {
    Administrator,
    EntryLatch,
}

pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

/// Longest accepted campaign title, in bytes.
pub const MAX_TITLE_LEN: u32 = 100;

pub fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}
