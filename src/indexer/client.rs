//! GraphQL client for the indexer endpoint

use super::filter::{FilterConfig, PoolFilterOpts};
use super::queries;
use crate::error::{CoreError, CoreResult};
use crate::models::{BetEvent, BetPlacedEvent, BetWithdrawalEvent, PayoutEvent, Pool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One `skip`/`first` window of an indexer query.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub skip: usize,
    pub first: usize,
}

/// Transport seam for GraphQL execution; swapped for a mock in tests.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Execute a query and return the `data` payload.
    async fn execute(&self, query: &str, variables: Value) -> CoreResult<Value>;
}

/// HTTP POST transport against the indexer endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> CoreResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> CoreResult<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!("indexer returned {status}")));
        }

        let body: GraphQlResponse = response.json().await?;
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let detail = serde_json::to_string(&errors)
                    .unwrap_or_else(|_| "unprintable error payload".to_string());
                return Err(CoreError::Indexer(detail));
            }
        }
        body.data
            .ok_or_else(|| CoreError::Indexer("response missing data".to_string()))
    }
}

/// Typed client over the indexer's pools/bets/payouts queries.
#[derive(Clone)]
pub struct IndexerClient {
    transport: Arc<dyn GraphQlTransport>,
}

impl IndexerClient {
    pub fn new(transport: Arc<dyn GraphQlTransport>) -> Self {
        Self { transport }
    }

    pub fn over_http(endpoint: &str, timeout: Duration) -> CoreResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(endpoint, timeout)?)))
    }

    pub async fn bets(&self, config: &FilterConfig, page: PageRequest) -> CoreResult<Vec<BetEvent>> {
        let variables = json!({
            "filter": config.where_clause,
            "orderBy": config.order_by,
            "orderDirection": config.order_direction,
            "first": page.first,
            "skip": page.skip,
        });
        self.fetch_list(queries::GET_BETS, variables, "bets").await
    }

    pub async fn payouts(
        &self,
        config: &FilterConfig,
        page: PageRequest,
    ) -> CoreResult<Vec<PayoutEvent>> {
        let variables = json!({
            "where": config.where_clause,
            "orderBy": config.order_by,
            "orderDirection": config.order_direction,
            "first": page.first,
            "skip": page.skip,
        });
        self.fetch_list(queries::GET_PAYOUT_CLAIMED, variables, "payoutClaimeds")
            .await
    }

    pub async fn bet_placed(
        &self,
        config: &FilterConfig,
        page: PageRequest,
    ) -> CoreResult<Vec<BetPlacedEvent>> {
        let variables = json!({
            "filter": config.where_clause,
            "orderBy": config.order_by,
            "orderDirection": config.order_direction,
            "first": page.first,
            "skip": page.skip,
        });
        self.fetch_list(queries::GET_BET_PLACED, variables, "betPlaceds")
            .await
    }

    pub async fn bet_withdrawals(
        &self,
        config: &FilterConfig,
        page: PageRequest,
    ) -> CoreResult<Vec<BetWithdrawalEvent>> {
        let variables = json!({
            "where": config.where_clause,
            "orderBy": config.order_by,
            "orderDirection": config.order_direction,
            "first": page.first,
            "skip": page.skip,
        });
        self.fetch_list(queries::GET_BET_WITHDRAWALS, variables, "betWithdrawals")
            .await
    }

    pub async fn pools(&self, opts: &PoolFilterOpts, page: PageRequest) -> CoreResult<Vec<Pool>> {
        let variables = json!({
            "filter": opts.where_clause(),
            "orderBy": opts.order_by(),
            "orderDirection": "desc",
            "first": page.first,
            "skip": page.skip,
        });
        self.fetch_list(queries::GET_POOLS, variables, "pools").await
    }

    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        root: &str,
    ) -> CoreResult<Vec<T>> {
        let data = self.transport.execute(query, variables).await?;
        let items = data
            .get(root)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let parsed: Vec<T> = serde_json::from_value(items)?;
        debug!(root, count = parsed.len(), "fetched indexer page");
        Ok(parsed)
    }
}
