//! Pool, bet, and payout event models
//!
//! All of these are read-only views over the blockchain indexer's responses
//! and immutable once fetched. Amounts arrive as decimal strings; parsing is
//! deferred to the aggregation layer so one malformed record never poisons a
//! whole response.

use super::Address;
use serde::{Deserialize, Serialize};

/// Grading lifecycle of a betting pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoolStatus {
    #[default]
    None,
    Pending,
    Graded,
    Regraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Usdc,
    Points,
}

/// Pool fields embedded in bet and payout records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRef {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub status: PoolStatus,
}

/// A bet-placed event from the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetEvent {
    pub id: String,
    pub user: Address,
    pub amount: String,
    #[serde(default)]
    pub token_type: Option<TokenType>,
    #[serde(default)]
    pub is_withdrawn: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    pub pool: PoolRef,
}

/// A raw bet-placed event; drives the pool activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetPlacedEvent {
    pub id: String,
    pub bet_id: String,
    pub pool_id: String,
    pub user: Address,
    #[serde(default)]
    pub option_index: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub token_type: Option<TokenType>,
    #[serde(default)]
    pub block_timestamp: Option<String>,
}

/// A bet-withdrawal event; drives the profile's recent-withdrawals feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetWithdrawalEvent {
    pub id: String,
    pub bet_id: String,
    pub user: Address,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub block_timestamp: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// The bet a payout settles; its pool reference may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutBetRef {
    pub id: String,
    pub amount: String,
    #[serde(default)]
    pub pool: Option<PoolRef>,
}

/// A payout-claimed event. The pool is reachable both through the settled
/// bet and directly; consumers must check both paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutEvent {
    pub id: String,
    pub user: Address,
    pub amount: String,
    #[serde(default)]
    pub bet: Option<PayoutBetRef>,
    #[serde(default)]
    pub pool: Option<PoolRef>,
}

/// Bet fields embedded in a pool listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolBetSummary {
    pub id: String,
    pub user: Address,
    pub amount: String,
    #[serde(default)]
    pub token_type: Option<TokenType>,
}

/// Read-only aggregate root for a single betting market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub status: PoolStatus,
    #[serde(default)]
    pub bets: Vec<PoolBetSummary>,
    #[serde(default)]
    pub usdc_bet_totals: Option<String>,
    #[serde(default)]
    pub points_bet_totals: Option<String>,
    #[serde(default)]
    pub bets_close_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bet_event_deserializes_from_indexer_shape() {
        let raw = json!({
            "id": "bet-1",
            "user": "0xABCDEF0000000000000000000000000000000001",
            "amount": "150",
            "tokenType": "POINTS",
            "isWithdrawn": false,
            "createdAt": "1714000000",
            "pool": {
                "id": "pool-1",
                "question": "Will Tariffs increase?",
                "options": ["Yes", "No"],
                "status": "PENDING"
            }
        });
        let bet: BetEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(bet.pool.status, PoolStatus::Pending);
        assert_eq!(bet.token_type, Some(TokenType::Points));
        // addresses normalize to lowercase on the way in
        assert_eq!(bet.user.as_str(), "0xabcdef0000000000000000000000000000000001");
    }

    #[test]
    fn payout_event_tolerates_missing_pool_paths() {
        let raw = json!({
            "id": "payout-1",
            "user": "0xabcdef0000000000000000000000000000000001",
            "amount": "90"
        });
        let payout: PayoutEvent = serde_json::from_value(raw).unwrap();
        assert!(payout.bet.is_none());
        assert!(payout.pool.is_none());
    }
}
