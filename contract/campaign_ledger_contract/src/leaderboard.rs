use soroban_sdk::{Address, Env, Vec};

use crate::extend_persistent;
use crate::storage_types::{
    DataKey, LeaderboardEntry, PersistentKey, RankedDonor, LEADERBOARD_SIZE,
};

pub fn donor_total(env: &Env, donor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::DonorTotal(donor.clone()))
        .unwrap_or(0)
}

pub fn donor_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::DonorCount).unwrap_or(0)
}

/// Add `amount` to the donor's running total and move them up the board.
///
/// Totals only grow, so keeping the best `LEADERBOARD_SIZE` rows current on
/// every donation gives the exact top of the full ranking.
pub fn record(env: &Env, donor: &Address, amount: i128) {
    let total_key = PersistentKey::DonorTotal(donor.clone());
    let total = donor_total(env, donor) + amount;
    env.storage().persistent().set(&total_key, &total);
    extend_persistent(env, &total_key);

    let index_key = PersistentKey::DonorIndex(donor.clone());
    let joined = match env.storage().persistent().get::<_, u32>(&index_key) {
        Some(joined) => joined,
        None => {
            let joined = donor_count(env);
            env.storage().persistent().set(&index_key, &joined);
            env.storage().instance().set(&DataKey::DonorCount, &(joined + 1));
            joined
        }
    };
    extend_persistent(env, &index_key);

    promote(
        env,
        RankedDonor {
            donor: donor.clone(),
            total,
            joined,
        },
    );
}

/// Donors ranked by total donated, highest first; equal totals keep
/// first-donation order. At most `limit` rows, capped at `LEADERBOARD_SIZE`.
pub fn top(env: &Env, limit: u32) -> Vec<LeaderboardEntry> {
    let mut entries = Vec::new(env);
    for row in board(env).iter().take(limit as usize) {
        entries.push_back(LeaderboardEntry {
            donor: row.donor,
            total: row.total,
        });
    }
    entries
}

fn board(env: &Env) -> Vec<RankedDonor> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Leaderboard)
        .unwrap_or_else(|| Vec::new(env))
}

fn outranks(a: &RankedDonor, b: &RankedDonor) -> bool {
    a.total > b.total || (a.total == b.total && a.joined < b.joined)
}

fn promote(env: &Env, entry: RankedDonor) {
    let mut rows = board(env);
    let mut changed = false;
    if let Some(position) = rows.iter().position(|row| row.donor == entry.donor) {
        rows.remove(position as u32);
        changed = true;
    }

    let mut index = rows.len();
    while index > 0 && outranks(&entry, &rows.get_unchecked(index - 1)) {
        index -= 1;
    }
    if index < LEADERBOARD_SIZE {
        rows.insert(index, entry);
        if rows.len() > LEADERBOARD_SIZE {
            rows.pop_back();
        }
        changed = true;
    }

    if changed {
        env.storage().persistent().set(&PersistentKey::Leaderboard, &rows);
        extend_persistent(env, &PersistentKey::Leaderboard);
    }
}
