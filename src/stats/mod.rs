//! Derived user statistics over bet and payout event streams

use crate::models::{BetEvent, PayoutEvent, PoolStatus};
use serde::Serialize;
use tracing::warn;

/// Aggregated betting statistics for one user.
///
/// Accumulated values stay unrounded; rounding happens only in the display
/// helpers so intermediate error never compounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserStats {
    pub total_bets: usize,
    pub won_bets: usize,
    pub lost_bets: usize,
    pub pending_bets: usize,
    pub total_volume: f64,
    pub active_volume: f64,
    pub win_rate: f64,
    pub avg_bet_size: f64,
}

impl UserStats {
    /// Win rate for display, one decimal place.
    pub fn win_rate_display(&self) -> String {
        format!("{:.1}", self.win_rate)
    }

    /// Average bet size for display, whole tokens.
    pub fn avg_bet_size_display(&self) -> String {
        format!("{:.0}", self.avg_bet_size)
    }
}

/// Fold bet and payout events into user statistics. Pure and stateless; the
/// caller assembles the full event set (across however many pages) before
/// calling, so nothing is ever double-counted.
///
/// Amounts arrive as strings from the indexer. Entries that fail numeric
/// parsing are skipped from the volume sums with a warning but still count
/// toward `total_bets`. Empty inputs yield all-zero stats, never an error.
pub fn aggregate(bets: &[BetEvent], payouts: &[PayoutEvent]) -> UserStats {
    let total_bets = bets.len();
    let won_bets = payouts.len();

    let mut lost_bets = 0;
    let mut pending_bets = 0;
    let mut total_volume = 0.0;
    let mut active_volume = 0.0;

    for bet in bets {
        match bet.pool.status {
            PoolStatus::Graded if !bet.is_withdrawn => lost_bets += 1,
            PoolStatus::Pending => pending_bets += 1,
            _ => {}
        }

        match parse_amount(&bet.amount) {
            Some(amount) => {
                total_volume += amount;
                if bet.pool.status == PoolStatus::Pending {
                    active_volume += amount;
                }
            }
            None => {
                warn!(bet_id = %bet.id, amount = %bet.amount, "skipping bet with unparsable amount")
            }
        }
    }

    let win_rate = if total_bets > 0 {
        won_bets as f64 / total_bets as f64 * 100.0
    } else {
        0.0
    };
    let avg_bet_size = if total_bets > 0 {
        total_volume / total_bets as f64
    } else {
        0.0
    };

    UserStats {
        total_bets,
        won_bets,
        lost_bets,
        pending_bets,
        total_volume,
        active_volume,
        win_rate,
        avg_bet_size,
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_handles_loose_inputs() {
        assert_eq!(parse_amount("10"), Some(10.0));
        assert_eq!(parse_amount(" 2.5 "), Some(2.5));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount("bad"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
