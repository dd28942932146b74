use soroban_sdk::{Address, Env, Symbol};

use crate::error::Error;
use crate::storage::{extend_instance, GuardKey};

/// Single-administrator capability.
///
/// A contract calls [`AccessGuard::require_admin`] at the top of every
/// privileged entry point. The check authenticates `caller` first and only
/// then compares it with the stored administrator, so a forged caller fails
/// authentication while a genuine non-admin gets [`Error::Unauthorized`].
pub struct AccessGuard;

impl AccessGuard {
    pub fn init(env: &Env, admin: &Address) -> Result<(), Error> {
        if env.storage().instance().has(&GuardKey::Administrator) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&GuardKey::Administrator, admin);
        extend_instance(env);
        Ok(())
    }

    pub fn admin(env: &Env) -> Option<Address> {
        env.storage().instance().get(&GuardKey::Administrator)
    }

    pub fn require_admin(env: &Env, caller: &Address) -> Result<Address, Error> {
        caller.require_auth();
        let admin = Self::admin(env).ok_or(Error::NotInitialized)?;
        if *caller != admin {
            return Err(Error::Unauthorized);
        }
        Ok(admin)
    }

    /// Hand the administrator role to `new_admin`. Only the current
    /// administrator may do this.
    pub fn transfer(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), Error> {
        let previous = Self::require_admin(env, caller)?;
        env.storage().instance().set(&GuardKey::Administrator, new_admin);
        extend_instance(env);

        env.events().publish(
            (Symbol::new(env, "admin_transferred"), previous),
            new_admin.clone(),
        );
        Ok(())
    }
}
