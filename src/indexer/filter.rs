//! Query configuration and client-side text filtering
//!
//! Each listing tab maps to a server-side where/order configuration; the
//! free-text search is applied on top of fetched results.

use crate::models::{Address, BetEvent, PayoutEvent, Pool, PoolStatus, TokenType};
use serde_json::{json, Value};

/// Listing tab driving the server-side query configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BetListFilter {
    #[default]
    Active,
    Won,
    Lost,
    All,
}

impl BetListFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "won" => Some(Self::Won),
            "lost" => Some(Self::Lost),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::All => "all",
        }
    }

    /// Won bets come from payout-claimed records rather than the bets table.
    pub fn uses_payouts(&self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Server-side query configuration for a bet or payout listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub order_by: &'static str,
    pub order_direction: &'static str,
    pub where_clause: Value,
}

pub fn filter_config(filter: BetListFilter, user: &Address) -> FilterConfig {
    match filter {
        BetListFilter::Active => FilterConfig {
            order_by: "createdAt",
            order_direction: "desc",
            where_clause: json!({
                "user": user.as_str(),
                "pool_": { "status": "PENDING" },
            }),
        },
        BetListFilter::Won => FilterConfig {
            order_by: "amount",
            order_direction: "desc",
            where_clause: json!({ "user": user.as_str() }),
        },
        BetListFilter::Lost => FilterConfig {
            order_by: "createdAt",
            order_direction: "desc",
            where_clause: json!({
                "user": user.as_str(),
                "pool_": { "status": "GRADED" },
                "isWithdrawn": false,
            }),
        },
        BetListFilter::All => FilterConfig {
            order_by: "createdAt",
            order_direction: "desc",
            where_clause: json!({ "user": user.as_str() }),
        },
    }
}

/// Activity feed for one pool: raw bet-placed events, newest first.
pub fn pool_activity_filter_config(pool_id: &str) -> FilterConfig {
    FilterConfig {
        order_by: "blockTimestamp",
        order_direction: "desc",
        where_clause: json!({ "poolId": pool_id }),
    }
}

/// A user's withdrawal history, newest first.
pub fn withdrawal_filter_config(user: &Address) -> FilterConfig {
    FilterConfig {
        order_by: "blockTimestamp",
        order_direction: "desc",
        where_clause: json!({ "user": user.as_str() }),
    }
}

/// Pools listing filter; defaults to open pending pools ordered by the
/// selected token's bet totals.
#[derive(Debug, Clone)]
pub struct PoolFilterOpts {
    pub status: PoolStatus,
    pub token_type: TokenType,
    /// Unix-seconds cutoff; only pools still open for betting after this
    /// instant are returned.
    pub bets_close_after: Option<i64>,
}

impl Default for PoolFilterOpts {
    fn default() -> Self {
        Self {
            status: PoolStatus::Pending,
            token_type: TokenType::Points,
            bets_close_after: None,
        }
    }
}

impl PoolFilterOpts {
    pub fn where_clause(&self) -> Value {
        let mut clause = json!({ "status": self.status });
        if let Some(cutoff) = self.bets_close_after {
            clause["betsCloseAt_gt"] = json!(cutoff);
        }
        clause
    }

    pub fn order_by(&self) -> &'static str {
        match self.token_type {
            TokenType::Usdc => "usdcBetTotals",
            TokenType::Points => "pointsBetTotals",
        }
    }
}

fn matches_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Case-insensitive free-text filter over pool question and options. A blank
/// query passes everything through.
pub fn filter_pools<'a>(pools: &'a [Pool], query: &str) -> Vec<&'a Pool> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return pools.iter().collect();
    }
    pools
        .iter()
        .filter(|pool| {
            matches_ci(&pool.question, &query)
                || pool.options.iter().any(|option| matches_ci(option, &query))
        })
        .collect()
}

/// Case-insensitive free-text filter over the bet's pool question.
pub fn filter_bets<'a>(bets: &'a [BetEvent], query: &str) -> Vec<&'a BetEvent> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return bets.iter().collect();
    }
    bets.iter()
        .filter(|bet| matches_ci(&bet.pool.question, &query))
        .collect()
}

/// Free-text filter for payouts. A payout may reach its pool through the
/// settled bet or directly; both paths are checked.
pub fn filter_payouts<'a>(payouts: &'a [PayoutEvent], query: &str) -> Vec<&'a PayoutEvent> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return payouts.iter().collect();
    }
    payouts
        .iter()
        .filter(|payout| {
            let via_bet = payout
                .bet
                .as_ref()
                .and_then(|bet| bet.pool.as_ref())
                .map(|pool| matches_ci(&pool.question, &query))
                .unwrap_or(false);
            let direct = payout
                .pool
                .as_ref()
                .map(|pool| matches_ci(&pool.question, &query))
                .unwrap_or(false);
            via_bet || direct
        })
        .collect()
}
