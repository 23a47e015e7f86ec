//! GraphQL documents for the indexer API
//!
//! Field sets are trimmed to what the core models consume; the indexer is
//! the sole source of truth for on-chain state.

pub const GET_POOLS: &str = r#"
query GetPools(
  $filter: Pool_filter!
  $orderBy: Pool_orderBy!
  $orderDirection: OrderDirection!
  $first: Int!
  $skip: Int!
) {
  pools(where: $filter, orderBy: $orderBy, orderDirection: $orderDirection, first: $first, skip: $skip) {
    id
    question
    options
    status
    betsCloseAt
    usdcBetTotals
    pointsBetTotals
    bets {
      id
      user
      amount
      tokenType
    }
  }
}"#;

pub const GET_BETS: &str = r#"
query GetBets(
  $filter: Bet_filter!
  $orderBy: Bet_orderBy!
  $orderDirection: OrderDirection!
  $first: Int!
  $skip: Int!
) {
  bets(where: $filter, orderBy: $orderBy, orderDirection: $orderDirection, first: $first, skip: $skip) {
    id
    user
    amount
    tokenType
    isWithdrawn
    createdAt
    pool {
      id
      question
      options
      status
    }
  }
}"#;

pub const GET_BET_PLACED: &str = r#"
query GetBetPlaced(
  $filter: BetPlaced_filter!
  $orderBy: BetPlaced_orderBy!
  $orderDirection: OrderDirection!
  $first: Int!
  $skip: Int!
) {
  betPlaceds(where: $filter, orderBy: $orderBy, orderDirection: $orderDirection, first: $first, skip: $skip) {
    id
    betId
    poolId
    user
    optionIndex
    amount
    tokenType
    blockTimestamp
  }
}"#;

pub const GET_BET_WITHDRAWALS: &str = r#"
query GetBetWithdrawals(
  $where: BetWithdrawal_filter
  $orderBy: BetWithdrawal_orderBy!
  $orderDirection: OrderDirection!
  $first: Int!
  $skip: Int!
) {
  betWithdrawals(where: $where, orderBy: $orderBy, orderDirection: $orderDirection, first: $first, skip: $skip) {
    id
    betId
    user
    blockNumber
    blockTimestamp
    transactionHash
  }
}"#;

pub const GET_PAYOUT_CLAIMED: &str = r#"
query GetPayoutClaimed(
  $where: PayoutClaimed_filter
  $orderBy: PayoutClaimed_orderBy!
  $orderDirection: OrderDirection!
  $first: Int!
  $skip: Int!
) {
  payoutClaimeds(where: $where, orderBy: $orderBy, orderDirection: $orderDirection, first: $first, skip: $skip) {
    id
    user
    amount
    bet {
      id
      amount
      pool {
        id
        question
        options
        status
      }
    }
    pool {
      id
      question
      options
      status
    }
  }
}"#;
