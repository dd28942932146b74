use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Correlation hash tying a ledger record to the invocation that produced it.
///
/// `sha256(tag ‖ ledger sequence ‖ timestamp ‖ actor XDR ‖ record id)`.
/// Distinct tags keep donation and expense hashes apart even when the other
/// inputs coincide.
pub fn provenance_hash(env: &Env, tag: &[u8], actor: &Address, record_id: u64) -> BytesN<32> {
    let mut material = Bytes::from_slice(env, tag);
    material.extend_from_array(&env.ledger().sequence().to_be_bytes());
    material.extend_from_array(&env.ledger().timestamp().to_be_bytes());
    material.append(&actor.clone().to_xdr(env));
    material.extend_from_array(&record_id.to_be_bytes());
    env.crypto().sha256(&material).to_bytes()
}
