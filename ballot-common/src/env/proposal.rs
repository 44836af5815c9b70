use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Default voting window offered to proposal creators, in seconds.
pub const DEFAULT_PROPOSAL_DURATION_SECS: u64 = 600;

/// Payload of a proposal, one variant per decision kind.
///
/// Modeled as a sum type so that exactly one payload is populated per
/// proposal; there is no "block hash AND candidate" state to rule out
/// at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// Approve the next block to commit, identified by its hash.
    Block {
        #[serde(with = "hex::serde")]
        block_hash: [u8; 32],
    },
    /// Admit a new validator into the registry.
    AddValidator { candidate: Address },
}

/// Lifecycle state of a proposal.
///
/// Transitions are one-way: `Active` to `Accepted` or `Rejected`,
/// never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Active,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProposalStatus::Active => "Active",
            ProposalStatus::Accepted => "Accepted",
            ProposalStatus::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

/// A timed decision request submitted to the voting engine.
///
/// Ids are allocated sequentially starting at 1; id 0 is reserved to
/// mean "no proposal". The quorum threshold is computed from the
/// validator count at creation and frozen here, so registry growth
/// while the proposal is in flight cannot shift its meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential identifier, starting at 1.
    pub id: u64,

    /// Decision payload: a block hash or a validator candidate.
    pub kind: ProposalKind,

    /// Human-readable description of the decision.
    pub summary: String,

    /// Creation timestamp (UNIX seconds).
    pub created_at: u64,

    /// Voting closes at this timestamp (UNIX seconds).
    pub deadline: u64,

    pub status: ProposalStatus,

    pub yes_votes: u32,
    pub no_votes: u32,

    /// Affirmative votes required to accept, frozen at creation.
    pub quorum: u32,

    /// Size of the validator set at creation, frozen for the
    /// unreachable-quorum rejection rule.
    pub validators_at_creation: u32,
}

impl Proposal {
    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    /// Block hash, for block proposals.
    pub fn block_hash(&self) -> Option<&[u8; 32]> {
        match &self.kind {
            ProposalKind::Block { block_hash } => Some(block_hash),
            ProposalKind::AddValidator { .. } => None,
        }
    }

    /// Candidate address, for add-validator proposals.
    pub fn candidate(&self) -> Option<&Address> {
        match &self.kind {
            ProposalKind::Block { .. } => None,
            ProposalKind::AddValidator { candidate } => Some(candidate),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("serialize proposal")
    }
}
