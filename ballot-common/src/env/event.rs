use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::env::proposal::{ProposalKind, ProposalStatus};

/// Observable transition records emitted by the voting engine.
///
/// Events are appended to an ordered log at the moment the transition
/// commits; a polling collaborator drains them. The engine never
/// pushes data itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    ProposalCreated {
        id: u64,
        kind: ProposalKind,
        deadline: u64,
        summary: String,
    },
    ProposalFinalized {
        id: u64,
        status: ProposalStatus,
        yes_votes: u32,
        no_votes: u32,
    },
    ValidatorAdded {
        validator: Address,
    },
}
