use serde::{Deserialize, Serialize};

use crate::env::proposal::ProposalStatus;

/// The final decision recorded for a proposal.
///
/// Produced once per proposal, at the moment finalization commits,
/// and kept by the storage collaborator for auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    /// The proposal this outcome corresponds to.
    pub proposal_id: u64,

    /// Terminal status: `Accepted` or `Rejected`.
    pub status: ProposalStatus,

    /// Tallies at the moment of finalization.
    pub yes_votes: u32,
    pub no_votes: u32,
}

impl VoteOutcome {
    pub fn accepted(&self) -> bool {
        self.status == ProposalStatus::Accepted
    }
}
