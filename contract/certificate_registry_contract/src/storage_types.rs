use soroban_sdk::{contracttype, Address};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Minter,
    NextTokenId,
    RollNonce,
    Certificate(u64),
    Owner(u64),
    OwnedTokens(Address),
}

/// One whole currency unit in the smallest indivisible unit.
pub const UNIT: i128 = 1_000_000_000_000_000_000;
/// Decimal places used when rendering amounts in metadata.
pub const AMOUNT_DECIMALS: usize = 18;

pub const SILVER_THRESHOLD: i128 = UNIT / 10; // 0.1
pub const GOLD_THRESHOLD: i128 = UNIT; // 1.0

/// Rolls fall in `[0, ROLL_RANGE)`; anything below the Special threshold
/// (5%) upgrades the certificate to Special.
pub const ROLL_RANGE: u64 = 10_000;
pub const SPECIAL_ROLL_THRESHOLD: u32 = 500;
