use distribution_shared::{mul_div, ACC_SCALE, BASIS_POINTS};
use soroban_sdk::{contracttype, Map};

/// Lazily refreshed dividends-per-share accumulator for one asset.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accumulator {
    /// Cumulative amount per basis point, scaled by `ACC_SCALE`
    pub acc_per_share: i128,
    /// Contract balance at the last refresh or claim
    pub last_recorded_balance: i128,
}

impl Accumulator {
    /// Fold every deposit received since the last refresh into the accumulator
    ///
    /// Formula: acc_per_share += (balance - last_recorded_balance) × ACC_SCALE / 10000
    ///
    /// Example:
    /// - 4.4 deposited into an empty distributor
    /// - acc_per_share: 4.4 × 10^18 / 10000 per basis point
    ///
    /// A balance that shrank without a claim adds nothing.
    pub fn refreshed(&self, balance: i128) -> Option<Accumulator> {
        let delta = balance.checked_sub(self.last_recorded_balance)?.max(0);
        let increment = mul_div(delta, ACC_SCALE, BASIS_POINTS as i128)?;

        Some(Accumulator {
            acc_per_share: self.acc_per_share.checked_add(increment)?,
            last_recorded_balance: balance,
        })
    }
}

/// Amount owed to a ticket holding `shares` basis points
///
/// Formula: claimable = shares × (acc_per_share - snapshot) / ACC_SCALE
///
/// Example:
/// - shares: 1000 (10%), 4.4 deposited since snapshot
/// - claimable: 0.44
pub fn claimable(shares: u32, acc_per_share: i128, snapshot: i128) -> Option<i128> {
    let accrued = acc_per_share.checked_sub(snapshot)?.max(0);
    mul_div(shares as i128, accrued, ACC_SCALE)
}

/// True when no entry exceeds 100% and all entries add up to exactly 100%.
pub fn is_complete_share_table(table: &Map<u64, u32>) -> bool {
    let mut total: u64 = 0;
    for (_, shares) in table.iter() {
        if shares > BASIS_POINTS {
            return false;
        }
        total += shares as u64;
    }
    total == BASIS_POINTS as u64
}
