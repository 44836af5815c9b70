use std::collections::HashMap;
use std::fs;

use serde::{Deserialize, Serialize};

use ballot_common::env::outcome::VoteOutcome;
use ballot_common::env::proposal::Proposal;
use ballot_common::env::vote::Vote;
use ballot_common::Address;

/// Full audit record of a voting session.
///
/// It includes:
/// - All submitted proposals.
/// - The per-proposal vote ledgers.
/// - The final outcome of each finalized proposal.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuditData {
    pub proposals: Vec<Proposal>,
    pub votes: HashMap<u64, HashMap<Address, Vote>>,
    pub results: HashMap<u64, VoteOutcome>,
}

/// Saves audit data to a JSON file in pretty format.
pub fn save_audit(path: &str, data: &AuditData) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads audit data from a JSON file.
pub fn load_audit(path: &str) -> std::io::Result<AuditData> {
    let json = fs::read_to_string(path)?;
    let data: AuditData = serde_json::from_str(&json)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_common::env::proposal::{ProposalKind, ProposalStatus};
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load_audit_data() {
        let voter = Address::try_from("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();

        let proposal = Proposal {
            id: 1,
            kind: ProposalKind::Block { block_hash: [3u8; 32] },
            summary: "Block #42 transactions".to_string(),
            created_at: 1000,
            deadline: 1600,
            status: ProposalStatus::Accepted,
            yes_votes: 2,
            no_votes: 0,
            quorum: 2,
            validators_at_creation: 3,
        };

        let mut votes = HashMap::new();
        let mut ledger = HashMap::new();
        ledger.insert(voter.clone(), Vote::Yes);
        votes.insert(proposal.id, ledger);

        let mut results = HashMap::new();
        results.insert(
            proposal.id,
            VoteOutcome {
                proposal_id: proposal.id,
                status: ProposalStatus::Accepted,
                yes_votes: 2,
                no_votes: 0,
            },
        );

        let data = AuditData { proposals: vec![proposal], votes, results };

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        save_audit(path, &data).unwrap();
        let loaded = load_audit(path).unwrap();

        assert_eq!(loaded.proposals.len(), 1);
        assert_eq!(loaded.proposals[0].id, 1);
        assert_eq!(loaded.votes[&1][&voter], Vote::Yes);
        assert!(loaded.results[&1].accepted());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_audit("/nonexistent/audit.json").is_err());
    }
}
