//! Read-only access to the blockchain indexer's GraphQL API

mod client;
mod filter;
mod pager;
pub mod queries;

pub use client::{GraphQlTransport, HttpTransport, IndexerClient, PageRequest};
pub use filter::{
    filter_bets, filter_config, filter_payouts, filter_pools, pool_activity_filter_config,
    withdrawal_filter_config, BetListFilter, FilterConfig, PoolFilterOpts,
};
pub use pager::{
    bet_pager, bet_placed_pager, payout_pager, pool_pager, withdrawal_pager, BetPlacedSource,
    BetSource, Page, PageSource, PayoutSource, PoolSource, QueryPager, WithdrawalSource,
};
