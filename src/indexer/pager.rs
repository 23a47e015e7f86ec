//! Explicit, restartable paging over indexer queries
//!
//! The caller drives paging one window at a time; there is no background
//! prefetch and no infinite generator.

use super::client::{IndexerClient, PageRequest};
use super::filter::{FilterConfig, PoolFilterOpts};
use crate::error::CoreResult;
use crate::models::{BetEvent, BetPlacedEvent, BetWithdrawalEvent, PayoutEvent, Pool};
use async_trait::async_trait;

/// One fetched page plus whether another fetch may yield more.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// A paged indexer query; [`QueryPager`] drives it window by window.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<Self::Item>>;
}

/// Caller-driven pager. Each `next_page` call fetches exactly one window; a
/// failed fetch leaves the cursor unchanged so the caller can retry the same
/// window once per attempt.
pub struct QueryPager<S: PageSource> {
    source: S,
    page_size: usize,
    skip: usize,
    exhausted: bool,
}

impl<S: PageSource> QueryPager<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        Self {
            source,
            // a zero window would never see a short page and spin forever
            page_size: page_size.max(1),
            skip: 0,
            exhausted: false,
        }
    }

    pub async fn next_page(&mut self) -> CoreResult<Page<S::Item>> {
        if self.exhausted {
            return Ok(Page {
                items: Vec::new(),
                has_more: false,
            });
        }

        let items = self
            .source
            .fetch(PageRequest {
                skip: self.skip,
                first: self.page_size,
            })
            .await?;

        self.skip += items.len();
        if items.len() < self.page_size {
            self.exhausted = true;
        }

        Ok(Page {
            has_more: !self.exhausted,
            items,
        })
    }

    /// Restart paging from the first window.
    pub fn reset(&mut self) {
        self.skip = 0;
        self.exhausted = false;
    }

    /// Drain every remaining page into one sequence. Each record is fetched
    /// exactly once, so downstream aggregation never double-counts.
    pub async fn collect_all(&mut self) -> CoreResult<Vec<S::Item>> {
        let mut all = Vec::new();
        loop {
            let page = self.next_page().await?;
            all.extend(page.items);
            if !page.has_more {
                break;
            }
        }
        Ok(all)
    }
}

/// Bets listing as a page source.
pub struct BetSource {
    client: IndexerClient,
    config: FilterConfig,
}

#[async_trait]
impl PageSource for BetSource {
    type Item = BetEvent;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<BetEvent>> {
        self.client.bets(&self.config, page).await
    }
}

/// Payout-claimed listing as a page source.
pub struct PayoutSource {
    client: IndexerClient,
    config: FilterConfig,
}

#[async_trait]
impl PageSource for PayoutSource {
    type Item = PayoutEvent;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<PayoutEvent>> {
        self.client.payouts(&self.config, page).await
    }
}

/// Pool activity feed (raw bet-placed events) as a page source.
pub struct BetPlacedSource {
    client: IndexerClient,
    config: FilterConfig,
}

#[async_trait]
impl PageSource for BetPlacedSource {
    type Item = BetPlacedEvent;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<BetPlacedEvent>> {
        self.client.bet_placed(&self.config, page).await
    }
}

/// Withdrawal history as a page source.
pub struct WithdrawalSource {
    client: IndexerClient,
    config: FilterConfig,
}

#[async_trait]
impl PageSource for WithdrawalSource {
    type Item = BetWithdrawalEvent;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<BetWithdrawalEvent>> {
        self.client.bet_withdrawals(&self.config, page).await
    }
}

/// Pools listing as a page source.
pub struct PoolSource {
    client: IndexerClient,
    opts: PoolFilterOpts,
}

#[async_trait]
impl PageSource for PoolSource {
    type Item = Pool;

    async fn fetch(&self, page: PageRequest) -> CoreResult<Vec<Pool>> {
        self.client.pools(&self.opts, page).await
    }
}

pub fn bet_pager(
    client: &IndexerClient,
    config: FilterConfig,
    page_size: usize,
) -> QueryPager<BetSource> {
    QueryPager::new(
        BetSource {
            client: client.clone(),
            config,
        },
        page_size,
    )
}

pub fn payout_pager(
    client: &IndexerClient,
    config: FilterConfig,
    page_size: usize,
) -> QueryPager<PayoutSource> {
    QueryPager::new(
        PayoutSource {
            client: client.clone(),
            config,
        },
        page_size,
    )
}

pub fn bet_placed_pager(
    client: &IndexerClient,
    config: FilterConfig,
    page_size: usize,
) -> QueryPager<BetPlacedSource> {
    QueryPager::new(
        BetPlacedSource {
            client: client.clone(),
            config,
        },
        page_size,
    )
}

pub fn withdrawal_pager(
    client: &IndexerClient,
    config: FilterConfig,
    page_size: usize,
) -> QueryPager<WithdrawalSource> {
    QueryPager::new(
        WithdrawalSource {
            client: client.clone(),
            config,
        },
        page_size,
    )
}

pub fn pool_pager(
    client: &IndexerClient,
    opts: PoolFilterOpts,
    page_size: usize,
) -> QueryPager<PoolSource> {
    QueryPager::new(
        PoolSource {
            client: client.clone(),
            opts,
        },
        page_size,
    )
}
