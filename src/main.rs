//! Yield Prophet Agent - Main Entry Point
//! 
//! Demo runner: samples protocol yields on an interval, prints the optimal
//! allocation and a prophecy, and rebalances once from a testnet wallet.

use yield_prophet_agent::*;
use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::{info, warn, error};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    
    // Load configuration
    let config = CONFIG.clone();

    // Initialize logging
    utils::setup_output_directories(&config)?;
    let _logging_guard = utils::setup_logging(&config)?;
    
    info!("🔮 Yield Prophet Agent v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Node: {}", config.node_url);
    info!("   Faucet: {} ({})", config.faucet_url, if config.enable_faucet { "enabled" } else { "disabled" });
    info!("   Portfolio Total: ${}", config.portfolio_total);
    info!("   Refresh Interval: {}s", config.refresh_interval_secs);
    info!("   Rebalance Function: {}", config.rebalance_function);
    info!("   Gas Unit Price: {} octas", config.gas_unit_price);
    info!("   Execution Timeout: {}s", config.execution_timeout_secs);
    info!("   Logs: {}, State: {}", config.log_dir.display(), config.state_dir.display());
    info!("   ⚠️  TESTNET MODE - No real funds at risk");
    
    // Setup chain client and agent
    let client = Arc::new(network::AptosRestClient::new(&config)?);
    let agent = YieldProphetAgent::new(client, &config);
    
    if let Some(previous) = agent.restore_session().await {
        info!("   Last session used {}", previous.short());
    }
    
    let address = agent.connect_wallet(config.private_key.as_deref()).await?;
    info!("👛 Wallet ready: {}", address);
    info!("   Balance: {} APT", agent.get_account_balance().await);
    
    // Setup monitoring state
    let start_time = Instant::now();
    let mut state = SessionState::default();
    
    // Setup shutdown handler
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let shutdown_tx = Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx)));
    
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
        if let Some(tx) = shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }
    });
    
    info!("\n🚀 Starting yield refresh loop...\n");
    
    let mut interval = time::interval(Duration::from_secs(config.refresh_interval_secs));
    
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = run_refresh_cycle(&agent, &config, &mut state).await {
                    error!("Refresh cycle error: {}", e);
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting main loop...");
                break;
            }
        }
    }
    
    // Print final statistics
    utils::print_session_stats(
        start_time,
        state.refresh_cycles,
        state.total_rebalances,
        state.synthetic_rebalances,
        state.total_gas_cost,
        &agent.error_summary().await,
    );
    
    Ok(())
}

/// Counters reported when the session ends
#[derive(Default)]
struct SessionState {
    refresh_cycles: u64,
    total_rebalances: u64,
    synthetic_rebalances: u64,
    total_gas_cost: Decimal,
}

/// Sample, optimize and simulate; rebalance on the first cycle only
async fn run_refresh_cycle(
    agent: &YieldProphetAgent,
    config: &Config,
    state: &mut SessionState,
) -> AgentResult<()> {
    state.refresh_cycles += 1;
    
    let yields = agent.get_protocol_yields().await;
    let sources: Vec<YieldSource> = yields.iter().map(|y| y.source).collect();
    utils::print_market_snapshot(&agent.market_snapshot(&yields).await, &sources);
    
    let allocations = agent.optimize_portfolio(&yields, config.portfolio_total)?;
    let simulation = agent.simulate_transaction(&allocations).await;
    utils::print_allocations(&allocations, &simulation);
    
    if let Some(prophecy) = agent.reveal_prophecy().await {
        utils::print_prophecy(&prophecy);
    }
    
    if state.refresh_cycles == 1 {
        let result = agent.execute_rebalancing(&allocations).await?;
        utils::print_rebalance_result(&result);
        
        state.total_rebalances += 1;
        state.total_gas_cost += result.gas_cost;
        if result.is_synthetic() {
            state.synthetic_rebalances += 1;
            warn!("Skipping status lookup for synthetic transaction");
        } else {
            let status = agent.get_transaction_status(&result.transaction_hash).await;
            utils::print_transaction_status(&status);
        }
    }
    
    Ok(())
}
