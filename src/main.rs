//! Betpool user-stats CLI
//!
//! Pages a user's bets and payouts out of the indexer and prints derived
//! betting statistics.

use anyhow::Result;
use betpool_core::config::AppConfig;
use betpool_core::indexer::{
    bet_pager, filter_bets, filter_config, filter_payouts, payout_pager, withdrawal_filter_config,
    withdrawal_pager, BetListFilter, IndexerClient,
};
use betpool_core::models::{Address, BetEvent, PayoutEvent, PoolStatus};
use betpool_core::stats;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "betpool-stats")]
#[command(about = "Derive betting statistics for a user from the Betpool indexer")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "betpool.toml")]
    config: String,

    /// User address to aggregate (0x-prefixed)
    #[arg(short, long)]
    user: String,

    /// Listing filter: active, won, lost, all
    #[arg(short, long, default_value = "all")]
    filter: String,

    /// Case-insensitive free-text filter over pool questions
    #[arg(short, long)]
    query: Option<String>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        AppConfig::default()
    };

    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }

    init_logging(&config);

    if !std::path::Path::new(&cli.config).exists() {
        warn!("Config file not found, using defaults: {}", cli.config);
    }

    let user = Address::parse(&cli.user)
        .ok_or_else(|| anyhow::anyhow!("invalid user address: {}", cli.user))?;
    let filter = BetListFilter::parse(&cli.filter)
        .ok_or_else(|| anyhow::anyhow!("unknown filter: {}", cli.filter))?;

    config.validate()?;
    info!("Indexer endpoint: {}", config.indexer.endpoint);

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let client = IndexerClient::over_http(
        &config.indexer.endpoint,
        Duration::from_secs(config.indexer.request_timeout_secs),
    )?;

    // Stats always need the full bet history plus won payouts; the selected
    // tab only narrows the listing line below.
    let mut bets_pager = bet_pager(
        &client,
        filter_config(BetListFilter::All, &user),
        config.indexer.page_size,
    );
    let all_bets = bets_pager.collect_all().await?;

    let mut payouts_pager = payout_pager(
        &client,
        filter_config(BetListFilter::Won, &user),
        config.indexer.page_size,
    );
    let all_payouts = payouts_pager.collect_all().await?;

    let mut withdrawals_pager = withdrawal_pager(
        &client,
        withdrawal_filter_config(&user),
        config.indexer.page_size,
    );
    let withdrawals = withdrawals_pager.collect_all().await?;

    let query = cli.query.unwrap_or_default();
    let bets: Vec<BetEvent> = filter_bets(&all_bets, &query).into_iter().cloned().collect();
    let payouts: Vec<PayoutEvent> = filter_payouts(&all_payouts, &query)
        .into_iter()
        .cloned()
        .collect();

    let listing_len = if filter.uses_payouts() {
        payouts.len()
    } else {
        match filter {
            BetListFilter::Active => bets
                .iter()
                .filter(|bet| bet.pool.status == PoolStatus::Pending)
                .count(),
            BetListFilter::Lost => bets
                .iter()
                .filter(|bet| bet.pool.status == PoolStatus::Graded && !bet.is_withdrawn)
                .count(),
            _ => bets.len(),
        }
    };
    info!(filter = filter.as_str(), matches = listing_len, "listing filter applied");

    let stats = stats::aggregate(&bets, &payouts);
    info!(
        total_bets = stats.total_bets,
        won = stats.won_bets,
        lost = stats.lost_bets,
        pending = stats.pending_bets,
        "aggregated user activity"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "user": user.as_str(),
            "totalBets": stats.total_bets,
            "wonBets": stats.won_bets,
            "lostBets": stats.lost_bets,
            "pendingBets": stats.pending_bets,
            "totalVolume": stats.total_volume,
            "activeVolume": stats.active_volume,
            "winRate": stats.win_rate_display(),
            "avgBetSize": stats.avg_bet_size_display(),
            "withdrawals": withdrawals.len(),
        }))?
    );

    Ok(())
}

fn init_logging(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.monitoring.log_level));

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
