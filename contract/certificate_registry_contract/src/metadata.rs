use donation_common::{DonationDetail, MAX_TITLE_LEN};
use soroban_sdk::{Bytes, Env, String};

use crate::storage_types::{AMOUNT_DECIMALS, UNIT};

// Upper bound on a rendered URI: fixed text, a fully escaped title and the
// widest numbers all fit well inside this.
const METADATA_CAPACITY: usize = 1024;

/// Render the certificate as a `data:` URI carrying its JSON metadata.
///
/// Depends only on the stored certificate fields.
pub fn token_uri(env: &Env, detail: &DonationDetail) -> String {
    let mut out = Bytes::from_slice(env, b"data:application/json,");
    out.extend_from_slice(b"{\"name\":\"Donation Certificate #");
    push_u128(&mut out, detail.token_id as u128);
    out.extend_from_slice(b"\",\"description\":\"Proof of a donation recorded on the transparent donation ledger\"");
    out.extend_from_slice(b",\"attributes\":[{\"trait_type\":\"Tier\",\"value\":\"");
    out.extend_from_slice(detail.tier.name().as_bytes());
    out.extend_from_slice(b"\"},{\"trait_type\":\"Campaign\",\"value\":\"");
    push_escaped(&mut out, &detail.campaign_title);
    out.extend_from_slice(b"\"},{\"trait_type\":\"Amount\",\"value\":\"");
    push_amount(&mut out, detail.amount);
    out.extend_from_slice(b"\"},{\"trait_type\":\"Campaign ID\",\"value\":");
    push_u128(&mut out, detail.campaign_id as u128);
    out.extend_from_slice(b"},{\"trait_type\":\"Timestamp\",\"value\":");
    push_u128(&mut out, detail.timestamp as u128);
    out.extend_from_slice(b"}]}");

    let mut buf = [0u8; METADATA_CAPACITY];
    let len = (out.len() as usize).min(METADATA_CAPACITY);
    out.slice(..len as u32).copy_into_slice(&mut buf[..len]);
    String::from_bytes(env, &buf[..len])
}

pub(crate) fn push_u128(out: &mut Bytes, mut value: u128) {
    let mut digits = [0u8; 39];
    let mut i = digits.len();
    loop {
        i -= 1;
        digits[i] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    out.extend_from_slice(&digits[i..]);
}

/// Fixed-point rendering with trailing fractional zeros trimmed:
/// `20_000_000_000_000_000` becomes `0.02`, `UNIT` becomes `1`.
pub(crate) fn push_amount(out: &mut Bytes, amount: i128) {
    let magnitude = amount.unsigned_abs();
    if amount < 0 {
        out.push_back(b'-');
    }
    let unit = UNIT as u128;
    push_u128(out, magnitude / unit);

    let mut frac = magnitude % unit;
    if frac == 0 {
        return;
    }
    let mut digits = [b'0'; AMOUNT_DECIMALS];
    for slot in digits.iter_mut().rev() {
        *slot = b'0' + (frac % 10) as u8;
        frac /= 10;
    }
    let mut end = AMOUNT_DECIMALS;
    while end > 0 && digits[end - 1] == b'0' {
        end -= 1;
    }
    out.push_back(b'.');
    out.extend_from_slice(&digits[..end]);
}

// JSON string escaping for the title: quote and backslash are escaped,
// control characters become spaces.
fn push_escaped(out: &mut Bytes, text: &String) {
    let mut buf = [0u8; MAX_TITLE_LEN as usize];
    let len = text.len() as usize;
    if len > buf.len() {
        // titles are length-checked at mint
        out.extend_from_slice(b"...");
        return;
    }
    text.copy_into_slice(&mut buf[..len]);
    for &byte in &buf[..len] {
        match byte {
            b'"' | b'\\' => {
                out.push_back(b'\\');
                out.push_back(byte);
            }
            0..=0x1f => out.push_back(b' '),
            _ => out.push_back(byte),
        }
    }
}
