#![no_std]
//! Building blocks shared by the campaign ledger, certificate registry and
//! ballot registry contracts.
//!
//! Nothing here is a contract on its own. Each contract composes the
//! capabilities it needs:
//!
//! - [`AccessGuard`] keeps the single administrator account.
//! - [`ReentrancyLock`] rejects nested entry into a value-moving operation.
//! - [`CertificateInterface`] is the narrow surface the ledger and the ballot
//!   registry call on the certificate registry; [`CertificateClient`] is the
//!   generated cross-contract client for it.

mod access;
mod certificate;
mod error;
mod provenance;
mod reentrancy;
mod storage;


pub use access::AccessGuard;
pub use certificate::{CertificateClient, CertificateInterface, DonationDetail, Tier};
pub use error::Error;
pub use provenance::provenance_hash;
pub use reentrancy::{LockGuard, ReentrancyLock};
pub use storage::{extend_instance, MAX_TITLE_LEN, TTL_INSTANCE, TTL_PERSISTENT};
