use soroban_sdk::Env;

use crate::error::Error;
use crate::storage::GuardKey;

/// Busy flag guarding value-moving entry points against nested entry.
///
/// ```ignore
/// let _lock = ReentrancyLock::acquire(&env)?;
/// // ... body; the latch is released when `_lock` goes out of scope
/// ```
pub struct ReentrancyLock;

impl ReentrancyLock {
    pub fn acquire(env: &Env) -> Result<LockGuard, Error> {
        if Self::is_held(env) {
            return Err(Error::Reentrant);
        }
        env.storage().instance().set(&GuardKey::EntryLatch, &true);
        Ok(LockGuard { env: env.clone() })
    }

    pub fn is_held(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&GuardKey::EntryLatch)
            .unwrap_or(false)
    }
}

/// Releases the latch on drop, so every return path out of the guarded scope
/// clears it. A failed invocation is rolled back by the host regardless.
pub struct LockGuard {
    env: Env,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&GuardKey::EntryLatch);
    }
}
