use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ballot_common::env::proposal::{Proposal, ProposalKind, ProposalStatus};
use ballot_common::env::vote::Vote;
use ballot_common::{Address, BallotError, Result};

/// Owns the sequentially-numbered proposals and their vote ledgers.
///
/// Ids start at 1; 0 is reserved to mean "no proposal". The store
/// enforces the single-active-proposal policy: a new proposal cannot
/// be opened while an earlier one is unresolved. Each proposal has a
/// private ledger mapping voter to vote, consulted only to reject a
/// second vote from the same validator; entries are never removed
/// while the proposal exists.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
    ledgers: HashMap<u64, HashMap<Address, Vote>>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next proposal id and stores the proposal Active.
    ///
    /// `quorum` and `validators_at_creation` are stamped by the
    /// caller from the current registry state and frozen here.
    pub fn create(
        &mut self,
        kind: ProposalKind,
        summary: String,
        duration_secs: u64,
        now: u64,
        quorum: u32,
        validators_at_creation: u32,
    ) -> Result<u64> {
        if duration_secs == 0 {
            return Err(BallotError::InvalidInput("duration must be positive".to_string()));
        }
        if let Some(active) = self.active_id() {
            return Err(BallotError::ProposalAlreadyActive(active));
        }

        let id = self.proposals.len() as u64 + 1;
        self.proposals.push(Proposal {
            id,
            kind,
            summary,
            created_at: now,
            deadline: now + duration_secs,
            status: ProposalStatus::Active,
            yes_votes: 0,
            no_votes: 0,
            quorum,
            validators_at_creation,
        });
        self.ledgers.insert(id, HashMap::new());

        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&Proposal> {
        self.proposals
            .get(Self::index(id)?)
            .ok_or(BallotError::NotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Result<&mut Proposal> {
        let idx = Self::index(id)?;
        self.proposals.get_mut(idx).ok_or(BallotError::NotFound(id))
    }

    /// Highest allocated id, if any proposal exists.
    pub fn latest_id(&self) -> Option<u64> {
        let len = self.proposals.len() as u64;
        (len > 0).then_some(len)
    }

    pub fn count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Id of the unresolved proposal, if one exists.
    ///
    /// Only the latest proposal can still be Active, earlier ones are
    /// terminal by construction.
    pub fn active_id(&self) -> Option<u64> {
        self.proposals.last().filter(|p| p.is_active()).map(|p| p.id)
    }

    pub fn has_voted(&self, id: u64, voter: &Address) -> bool {
        self.ledgers
            .get(&id)
            .map(|ledger| ledger.contains_key(voter))
            .unwrap_or(false)
    }

    /// Records a vote in the ledger and updates the tally as one step.
    ///
    /// Fails with `AlreadyVoted` without touching the tally if the
    /// voter already has a ledger entry, regardless of the support
    /// value.
    pub fn record_vote(&mut self, id: u64, voter: Address, vote: Vote) -> Result<()> {
        if self.has_voted(id, &voter) {
            return Err(BallotError::AlreadyVoted(voter.to_string(), id));
        }

        let proposal = self.get_mut(id)?;
        match vote {
            Vote::Yes => proposal.yes_votes += 1,
            Vote::No => proposal.no_votes += 1,
        }
        self.ledgers.entry(id).or_default().insert(voter, vote);

        Ok(())
    }

    fn index(id: u64) -> Result<usize> {
        // Id 0 means "no proposal" and is never allocated.
        if id == 0 {
            return Err(BallotError::NotFound(id));
        }
        Ok((id - 1) as usize)
    }
}
