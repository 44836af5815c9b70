//! Simple persistence collaborator for the voting engine.
//!
//! Keeps an append-only, id-indexed record of proposals, per-voter
//! ledgers and final outcomes. The engine itself never performs I/O;
//! this layer is what a real deployment would back with a database.

pub mod audit;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use ballot_common::env::outcome::VoteOutcome;
use ballot_common::env::proposal::Proposal;
use ballot_common::env::vote::Vote;
use ballot_common::Address;

use audit::AuditData;

/// In-memory record of a voting session.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Storage {
    /// All proposals submitted to the engine, in id order.
    pub proposals: Vec<Proposal>,

    /// Map of proposal id -> (voter -> vote).
    pub votes: HashMap<u64, HashMap<Address, Vote>>,

    /// Map of proposal id -> final outcome.
    pub results: HashMap<u64, VoteOutcome>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a newly created proposal.
    pub fn log_proposal(&mut self, proposal: Proposal) {
        info!("📝 Storing proposal [{}]", proposal.id);
        self.proposals.push(proposal);
    }

    /// Logs a vote cast by a validator on a proposal.
    pub fn log_vote(&mut self, proposal_id: u64, voter: Address, vote: Vote) {
        info!("🧾 Logging vote from [{}] on [{}]", voter, proposal_id);
        self.votes.entry(proposal_id).or_default().insert(voter, vote);
    }

    /// Logs the final outcome of a proposal.
    pub fn log_result(&mut self, outcome: VoteOutcome) {
        info!(
            "📌 Storing result for proposal [{}]: {}",
            outcome.proposal_id, outcome.status
        );
        self.results.insert(outcome.proposal_id, outcome);
    }

    /// Prints a summary report of all proposals and their outcomes.
    pub fn print_summary(&self) {
        println!("\n📋 FINAL SUMMARY");

        for prop in &self.proposals {
            let result = self.results.get(&prop.id);
            println!(
                "- [{}] \"{}\" → {}",
                prop.id,
                prop.summary,
                match result {
                    Some(r) if r.accepted() => "✅ ACCEPTED",
                    Some(_) => "❌ REJECTED",
                    None => "⏳ NO RESULT",
                }
            );
        }
    }

    pub fn to_audit(&self) -> AuditData {
        AuditData {
            proposals: self.proposals.clone(),
            votes: self.votes.clone(),
            results: self.results.clone(),
        }
    }

    pub fn apply_audit(&mut self, data: AuditData) {
        self.proposals = data.proposals;
        self.votes = data.votes;
        self.results = data.results;
    }
}
