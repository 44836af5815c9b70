use tracing::{info, warn};

use ballot_common::env::event::EngineEvent;
use ballot_common::env::proposal::{Proposal, ProposalKind, ProposalStatus};
use ballot_common::env::vote::Vote;
use ballot_common::{Address, BallotError, Result};

use super::{
    applier::CommitEffectApplier, quorum::QuorumPolicy, registry::ValidatorRegistry,
    store::ProposalStore,
};

/// The voting state machine.
///
/// Composes the validator registry, the quorum policy, the proposal
/// store and the commit-effect applier. All mutations of the
/// validator set and the vote ledgers go through this type; callers
/// never touch them directly.
#[derive(Debug, Clone)]
pub struct VotingEngine {
    registry: ValidatorRegistry,
    store: ProposalStore,
    policy: QuorumPolicy,
    applier: CommitEffectApplier,
    events: Vec<EngineEvent>,
}

impl VotingEngine {
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self {
            registry,
            store: ProposalStore::new(),
            policy: QuorumPolicy,
            applier: CommitEffectApplier::new(),
            events: Vec::new(),
        }
    }

    /// Opens a block proposal. Owner only.
    pub fn create_proposal(
        &mut self,
        caller: &Address,
        block_hash: [u8; 32],
        summary: String,
        duration_secs: u64,
        now: u64,
    ) -> Result<u64> {
        self.create(caller, ProposalKind::Block { block_hash }, summary, duration_secs, now)
    }

    /// Opens an add-validator proposal. Owner only.
    ///
    /// A candidate that is already a validator is allowed through and
    /// finalizes as a no-op insert.
    pub fn create_add_validator_proposal(
        &mut self,
        caller: &Address,
        candidate: Address,
        summary: String,
        duration_secs: u64,
        now: u64,
    ) -> Result<u64> {
        self.create(caller, ProposalKind::AddValidator { candidate }, summary, duration_secs, now)
    }

    fn create(
        &mut self,
        caller: &Address,
        kind: ProposalKind,
        summary: String,
        duration_secs: u64,
        now: u64,
    ) -> Result<u64> {
        if !self.registry.is_owner(caller) {
            warn!("⚠️ Proposal creation refused for non-owner [{}]", caller);
            return Err(BallotError::Unauthorized(format!(
                "only the owner can create proposals, got {}",
                caller
            )));
        }

        if let ProposalKind::AddValidator { candidate } = &kind {
            if candidate.to_bytes() == [0u8; 20] {
                return Err(BallotError::InvalidInput(
                    "candidate address must not be zero".to_string(),
                ));
            }
        }

        // Quorum is computed from the current validator count and
        // frozen into the proposal.
        let count = self.registry.count();
        let quorum = self.policy.required(count);

        let id = self
            .store
            .create(kind.clone(), summary.clone(), duration_secs, now, quorum, count as u32)?;

        let deadline = now + duration_secs;
        info!(
            "📝 Proposal [{}] created (quorum: {}/{}, deadline: {})",
            id, quorum, count, deadline
        );
        tracing::info!(target: "voting", "EVENT:PROPOSE id={} quorum={} deadline={}", id, quorum, deadline);

        self.events.push(EngineEvent::ProposalCreated { id, kind, deadline, summary });

        Ok(id)
    }

    /// Casts a validator's vote on a proposal.
    ///
    /// If the deadline has passed the vote is not recorded; the
    /// proposal is finalized by the deadline rule instead and the call
    /// fails with `ProposalExpired`. Otherwise the ledger entry and
    /// tally update commit as one step, then early finalization is
    /// evaluated. Returns the proposal's status after the call.
    pub fn cast_vote(
        &mut self,
        caller: &Address,
        proposal_id: u64,
        support: bool,
        now: u64,
    ) -> Result<ProposalStatus> {
        if !self.registry.is_validator(caller) {
            warn!("⚠️ Vote refused from non-validator [{}]", caller);
            return Err(BallotError::Unauthorized(format!(
                "only validators can vote, got {}",
                caller
            )));
        }

        let proposal = self.store.get(proposal_id)?;
        if !proposal.is_active() {
            return Err(BallotError::ProposalNotActive(proposal_id));
        }
        if self.store.has_voted(proposal_id, caller) {
            return Err(BallotError::AlreadyVoted(caller.to_string(), proposal_id));
        }

        let deadline = self.store.get(proposal_id)?.deadline;
        if now >= deadline {
            // Too late to vote: decide the proposal by the deadline
            // rule and report the expiry to the caller.
            self.finalize_if_expired(proposal_id, now)?;
            return Err(BallotError::ProposalExpired(proposal_id));
        }

        let vote = Vote::from(support);
        self.store.record_vote(proposal_id, caller.clone(), vote)?;

        let proposal = self.store.get(proposal_id)?;
        info!(
            "📥 [{}] voted {} on proposal [{}] ({} yes / {} no)",
            caller, vote, proposal_id, proposal.yes_votes, proposal.no_votes
        );
        tracing::info!(target: "voting", "EVENT:VOTE id={} voter={} vote={}", proposal_id, caller, vote);

        self.evaluate_early(proposal_id)
    }

    /// Early finalization after a recorded vote.
    ///
    /// Accepts as soon as the frozen quorum is met; rejects as soon as
    /// quorum can no longer be reached even if every remaining
    /// validator voted yes.
    fn evaluate_early(&mut self, proposal_id: u64) -> Result<ProposalStatus> {
        let proposal = self.store.get(proposal_id)?;
        let (yes, no) = (proposal.yes_votes, proposal.no_votes);
        let (quorum, total) = (proposal.quorum, proposal.validators_at_creation);

        if yes >= quorum {
            return self.finalize(proposal_id, ProposalStatus::Accepted);
        }
        if no > total.saturating_sub(quorum) {
            return self.finalize(proposal_id, ProposalStatus::Rejected);
        }
        Ok(ProposalStatus::Active)
    }

    /// Finalizes an expired proposal. Callable by anyone.
    ///
    /// Accepted iff the frozen quorum was met by the deadline.
    /// Idempotent: a terminal proposal is returned as-is.
    pub fn finalize_if_expired(&mut self, proposal_id: u64, now: u64) -> Result<ProposalStatus> {
        let proposal = self.store.get(proposal_id)?;
        if !proposal.is_active() {
            return Ok(proposal.status);
        }
        if now < proposal.deadline {
            return Ok(ProposalStatus::Active);
        }

        let status = if proposal.yes_votes >= proposal.quorum {
            ProposalStatus::Accepted
        } else {
            ProposalStatus::Rejected
        };
        self.finalize(proposal_id, status)
    }

    /// Commits the one-way transition out of Active.
    ///
    /// The status flip guards the applier: it runs exactly once per
    /// proposal, so a retried or duplicate call cannot double-apply.
    fn finalize(&mut self, proposal_id: u64, status: ProposalStatus) -> Result<ProposalStatus> {
        let proposal = self.store.get_mut(proposal_id)?;
        debug_assert!(proposal.is_active());
        proposal.status = status;

        let snapshot = proposal.clone();
        info!(
            "🗳️ Proposal [{}] finalized: {} ({} yes / {} no, quorum {})",
            proposal_id, status, snapshot.yes_votes, snapshot.no_votes, snapshot.quorum
        );
        tracing::info!(
            target: "voting",
            "EVENT:FINALIZE id={} status={} yes={} no={}",
            proposal_id, status, snapshot.yes_votes, snapshot.no_votes
        );

        self.events.push(EngineEvent::ProposalFinalized {
            id: proposal_id,
            status,
            yes_votes: snapshot.yes_votes,
            no_votes: snapshot.no_votes,
        });

        if status == ProposalStatus::Accepted {
            if let Some(event) = self.applier.apply(&snapshot, &mut self.registry) {
                tracing::info!(target: "voting", "EVENT:VALIDATOR_ADDED id={}", proposal_id);
                self.events.push(event);
            }
        }

        Ok(status)
    }

    // --- Query surface ---

    pub fn owner(&self) -> &Address {
        self.registry.owner()
    }

    pub fn is_validator(&self, id: &Address) -> bool {
        self.registry.is_validator(id)
    }

    pub fn validator_count(&self) -> usize {
        self.registry.count()
    }

    /// Current informational quorum value; in-flight proposals keep
    /// the threshold frozen at their creation.
    pub fn quorum(&self) -> u32 {
        self.policy.required(self.registry.count())
    }

    pub fn proposal_count(&self) -> u64 {
        self.store.count()
    }

    pub fn proposal(&self, id: u64) -> Result<&Proposal> {
        self.store.get(id)
    }

    pub fn latest_proposal_id(&self) -> Option<u64> {
        self.store.latest_id()
    }

    pub fn committed_hash(&self, proposal_id: u64) -> Option<&[u8; 32]> {
        self.applier.committed_hash(proposal_id)
    }

    /// Ordered events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::try_from(format!("0x{:040x}", n).as_str()).unwrap()
    }

    fn engine_with_validators(n: u8) -> VotingEngine {
        let validators = (2..2 + n).map(addr).collect();
        VotingEngine::new(ValidatorRegistry::new(addr(1), validators))
    }

    #[test]
    fn test_non_owner_cannot_create() {
        let mut engine = engine_with_validators(3);
        let err = engine.create_proposal(&addr(2), [0u8; 32], "p".into(), 600, 1000);
        assert!(matches!(err, Err(BallotError::Unauthorized(_))));
        assert_eq!(engine.proposal_count(), 0);
    }

    #[test]
    fn test_non_validator_cannot_vote() {
        let mut engine = engine_with_validators(3);
        let id = engine.create_proposal(&addr(1), [0u8; 32], "p".into(), 600, 1000).unwrap();

        // Neither the owner nor a stranger may vote.
        let err = engine.cast_vote(&addr(1), id, true, 1010);
        assert!(matches!(err, Err(BallotError::Unauthorized(_))));
        let err = engine.cast_vote(&addr(99), id, true, 1010);
        assert!(matches!(err, Err(BallotError::Unauthorized(_))));
    }

    #[test]
    fn test_zero_candidate_rejected() {
        let mut engine = engine_with_validators(3);
        let err = engine.create_add_validator_proposal(&addr(1), addr(0), "bad".into(), 600, 1000);
        assert!(matches!(err, Err(BallotError::InvalidInput(_))));
    }

    #[test]
    fn test_vote_on_unknown_proposal() {
        let mut engine = engine_with_validators(3);
        let err = engine.cast_vote(&addr(2), 5, true, 1000);
        assert!(matches!(err, Err(BallotError::NotFound(5))));
    }

    #[test]
    fn test_quorum_frozen_at_creation() {
        let mut engine = engine_with_validators(3);
        let id = engine
            .create_add_validator_proposal(&addr(1), addr(9), "add".into(), 600, 1000)
            .unwrap();
        assert_eq!(engine.proposal(id).unwrap().quorum, 2);

        // Accept: the registry grows to 4 validators.
        engine.cast_vote(&addr(2), id, true, 1010).unwrap();
        let status = engine.cast_vote(&addr(3), id, true, 1020).unwrap();
        assert_eq!(status, ProposalStatus::Accepted);
        assert_eq!(engine.validator_count(), 4);
        assert_eq!(engine.quorum(), 3);

        // A new proposal freezes the new threshold; the old proposal
        // keeps the old one.
        let id2 = engine.create_proposal(&addr(1), [0u8; 32], "b".into(), 600, 2000).unwrap();
        assert_eq!(engine.proposal(id2).unwrap().quorum, 3);
        assert_eq!(engine.proposal(id).unwrap().quorum, 2);
    }

    #[test]
    fn test_expired_vote_triggers_deadline_finalization() {
        let mut engine = engine_with_validators(3);
        let id = engine.create_proposal(&addr(1), [0u8; 32], "p".into(), 600, 1000).unwrap();
        engine.cast_vote(&addr(2), id, true, 1010).unwrap();

        // Deadline passed with 1 yes < quorum 2: the late vote is not
        // recorded and the proposal is rejected.
        let err = engine.cast_vote(&addr(3), id, true, 1600);
        assert!(matches!(err, Err(BallotError::ProposalExpired(_))));

        let p = engine.proposal(id).unwrap();
        assert_eq!(p.status, ProposalStatus::Rejected);
        assert_eq!((p.yes_votes, p.no_votes), (1, 0));
    }

    #[test]
    fn test_vote_after_finalization_is_not_active() {
        let mut engine = engine_with_validators(3);
        let id = engine.create_proposal(&addr(1), [0u8; 32], "p".into(), 600, 1000).unwrap();
        engine.cast_vote(&addr(2), id, true, 1010).unwrap();
        engine.cast_vote(&addr(3), id, true, 1020).unwrap();

        let err = engine.cast_vote(&addr(4), id, true, 1030);
        assert!(matches!(err, Err(BallotError::ProposalNotActive(_))));
    }

    #[test]
    fn test_events_are_ordered() {
        let mut engine = engine_with_validators(3);
        let id = engine
            .create_add_validator_proposal(&addr(1), addr(9), "add".into(), 600, 1000)
            .unwrap();
        engine.cast_vote(&addr(2), id, true, 1010).unwrap();
        engine.cast_vote(&addr(3), id, true, 1020).unwrap();

        let events = engine.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], EngineEvent::ProposalCreated { id: 1, .. }));
        assert!(matches!(
            events[1],
            EngineEvent::ProposalFinalized { status: ProposalStatus::Accepted, .. }
        ));
        assert!(matches!(events[2], EngineEvent::ValidatorAdded { .. }));
        assert!(engine.events().is_empty());
    }
}
