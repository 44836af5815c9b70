use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use ballot_common::env::event::EngineEvent;
use ballot_common::env::proposal::{Proposal, ProposalKind};

use super::registry::ValidatorRegistry;

/// Applies the side effect of an accepted proposal.
///
/// Block proposals have their hash recorded as the committed decision
/// for that id; actual block execution belongs to an external
/// collaborator. Add-validator proposals insert the candidate into
/// the registry. The engine invokes this exactly once per proposal,
/// guarded by the one-way status transition, and both paths tolerate
/// a retry without further mutation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CommitEffectApplier {
    committed: HashMap<u64, [u8; 32]>,
}

impl CommitEffectApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the proposal's effect against the registry.
    ///
    /// Returns the ValidatorAdded event when a candidate was actually
    /// inserted; a candidate that is already a validator is a no-op.
    pub fn apply(
        &mut self,
        proposal: &Proposal,
        registry: &mut ValidatorRegistry,
    ) -> Option<EngineEvent> {
        match &proposal.kind {
            ProposalKind::Block { block_hash } => {
                self.committed.insert(proposal.id, *block_hash);
                info!(
                    "💾 Block hash committed for proposal [{}]: {}",
                    proposal.id,
                    hex::encode(block_hash)
                );
                None
            }
            ProposalKind::AddValidator { candidate } => {
                if registry.add_validator(candidate.clone()) {
                    info!("➕ Validator admitted: {}", candidate);
                    Some(EngineEvent::ValidatorAdded {
                        validator: candidate.clone(),
                    })
                } else {
                    info!("Validator {} already present, no-op insert", candidate);
                    None
                }
            }
        }
    }

    /// Committed block hash for an accepted block proposal.
    pub fn committed_hash(&self, proposal_id: u64) -> Option<&[u8; 32]> {
        self.committed.get(&proposal_id)
    }
}
