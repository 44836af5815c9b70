use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use ballot_common::env::event::EngineEvent;
use ballot_common::env::outcome::VoteOutcome;
use ballot_common::env::proposal::{Proposal, ProposalStatus};
use ballot_common::env::vote::Vote;
use ballot_common::utils::time::current_time;
use ballot_common::{Address, Result};

use crate::env::storage::audit::save_audit;
use crate::env::storage::Storage;
use crate::voting::registry::ValidatorRegistry;
use crate::voting::VotingEngine;

/// Callback invoked for every engine event drained by `pump_events`.
pub type Callback = Arc<dyn Fn(EngineEvent) + Send + Sync>;

/// Async façade over the voting engine.
///
/// The engine itself is synchronous; this wrapper serializes every
/// mutating call behind one lock (global serialization is the
/// simplest correct choice given the single-active-proposal policy),
/// stamps wall-clock time, and mirrors accepted state into the
/// storage collaborator.
pub struct BallotEnv {
    pub engine: Arc<Mutex<VotingEngine>>,
    pub storage: Arc<RwLock<Storage>>,
    pub callback: Callback,
}

impl BallotEnv {
    pub fn new(registry: ValidatorRegistry, callback: Callback) -> Self {
        Self {
            engine: Arc::new(Mutex::new(VotingEngine::new(registry))),
            storage: Arc::new(RwLock::new(Storage::new())),
            callback,
        }
    }

    pub async fn create_proposal(
        &self,
        caller: &Address,
        block_hash: [u8; 32],
        summary: &str,
        duration_secs: u64,
    ) -> Result<u64> {
        let mut engine = self.engine.lock().await;
        let id = engine.create_proposal(
            caller,
            block_hash,
            summary.to_string(),
            duration_secs,
            current_time(),
        )?;
        let proposal = engine.proposal(id)?.clone();
        drop(engine);

        self.storage.write().await.log_proposal(proposal);
        Ok(id)
    }

    pub async fn create_add_validator_proposal(
        &self,
        caller: &Address,
        candidate: Address,
        summary: &str,
        duration_secs: u64,
    ) -> Result<u64> {
        let mut engine = self.engine.lock().await;
        let id = engine.create_add_validator_proposal(
            caller,
            candidate,
            summary.to_string(),
            duration_secs,
            current_time(),
        )?;
        let proposal = engine.proposal(id)?.clone();
        drop(engine);

        self.storage.write().await.log_proposal(proposal);
        Ok(id)
    }

    /// Casts a vote and mirrors it into storage on success.
    pub async fn vote(
        &self,
        caller: &Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<ProposalStatus> {
        let status = self
            .engine
            .lock()
            .await
            .cast_vote(caller, proposal_id, support, current_time())?;

        self.storage
            .write()
            .await
            .log_vote(proposal_id, caller.clone(), Vote::from(support));

        Ok(status)
    }

    /// Runs the deadline finalization path. Callable by anyone.
    pub async fn finalize_expired(&self, proposal_id: u64) -> Result<ProposalStatus> {
        self.engine
            .lock()
            .await
            .finalize_if_expired(proposal_id, current_time())
    }

    /// Drains accumulated engine events, records final outcomes in
    /// storage, and invokes the callback for each event in order.
    pub async fn pump_events(&self) -> Vec<EngineEvent> {
        let events = self.engine.lock().await.drain_events();

        for event in &events {
            if let EngineEvent::ProposalFinalized { id, status, yes_votes, no_votes } = event {
                self.storage.write().await.log_result(VoteOutcome {
                    proposal_id: *id,
                    status: *status,
                    yes_votes: *yes_votes,
                    no_votes: *no_votes,
                });
            }
            (self.callback)(event.clone());
        }

        events
    }

    // --- Query surface ---

    pub async fn owner(&self) -> Address {
        self.engine.lock().await.owner().clone()
    }

    pub async fn is_validator(&self, id: &Address) -> bool {
        self.engine.lock().await.is_validator(id)
    }

    pub async fn validator_count(&self) -> usize {
        self.engine.lock().await.validator_count()
    }

    pub async fn quorum(&self) -> u32 {
        self.engine.lock().await.quorum()
    }

    pub async fn proposal_count(&self) -> u64 {
        self.engine.lock().await.proposal_count()
    }

    pub async fn proposal(&self, id: u64) -> Result<Proposal> {
        Ok(self.engine.lock().await.proposal(id)?.clone())
    }

    pub async fn committed_hash(&self, id: u64) -> Option<[u8; 32]> {
        self.engine.lock().await.committed_hash(id).copied()
    }

    pub async fn export_audit(&self, path: &str) {
        let audit = self.storage.read().await.to_audit();
        if let Err(err) = save_audit(path, &audit) {
            warn!("Warning: failed to export audit data to {}: {}", path, err);
        }
    }
}
