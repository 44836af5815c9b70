//! Scripted voting round against an in-process engine.
//!
//! Builds a three-validator registry, opens a block proposal and an
//! add-validator proposal, casts votes, and prints the session
//! summary. Useful for eyeballing the `EVENT:` log stream.

use std::sync::Arc;

use tracing::info;

use ballot_common::crypto::hash::block_hash;
use ballot_common::env::proposal::DEFAULT_PROPOSAL_DURATION_SECS;
use ballot_common::Address;
use ballot_engine::GenesisConfig;

fn addr(n: u8) -> Address {
    Address::try_from(format!("0x{:040x}", n).as_str()).expect("static address")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let owner = addr(1);
    let config = GenesisConfig {
        owner: owner.clone(),
        validators: vec![addr(2), addr(3), addr(4)],
    };
    let env = config.build_env(Arc::new(|event| {
        info!("🔔 Event: {:?}", event);
    }));

    info!("--- STARTING BALLOT SIMULATION ---");
    info!("Owner: {}", env.owner().await);
    info!("Validators: {}", env.validator_count().await);
    info!("Quorum: {}", env.quorum().await);

    // Round 1: block proposal, accepted early by two yes votes.
    let summary = "Block #42 transactions";
    let id = env
        .create_proposal(&owner, block_hash(summary), summary, DEFAULT_PROPOSAL_DURATION_SECS)
        .await?;
    env.vote(&addr(2), id, true).await?;
    env.vote(&addr(3), id, true).await?;
    env.pump_events().await;

    let decided = env.proposal(id).await?;
    info!(
        "Proposal [{}] decided: {} ({} yes / {} no)",
        id, decided.status, decided.yes_votes, decided.no_votes
    );

    // Round 2: admit a fourth validator.
    let candidate = addr(9);
    let id = env
        .create_add_validator_proposal(
            &owner,
            candidate.clone(),
            "Admit validator 9",
            DEFAULT_PROPOSAL_DURATION_SECS,
        )
        .await?;
    env.vote(&addr(2), id, true).await?;
    env.vote(&addr(4), id, true).await?;
    env.pump_events().await;

    info!(
        "Validator {} admitted: {} (count now {})",
        candidate,
        env.is_validator(&candidate).await,
        env.validator_count().await
    );

    env.storage.read().await.print_summary();

    Ok(())
}
