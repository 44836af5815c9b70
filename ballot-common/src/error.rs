use thiserror::Error;

/// Errors reported by the voting engine.
///
/// Every variant is synchronous and non-retryable: a rejected
/// operation leaves the engine state unchanged, and no error is fatal
/// to subsequent requests.
#[derive(Debug, Error)]
pub enum BallotError {
    /// The caller lacks the role the operation requires
    /// (owner for proposal creation, validator for voting).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Unknown proposal id.
    #[error("Proposal {0} not found")]
    NotFound(u64),

    /// The proposal has already been finalized.
    #[error("Proposal {0} is not active")]
    ProposalNotActive(u64),

    /// The proposal's deadline has passed; the vote was not recorded.
    #[error("Proposal {0} has expired")]
    ProposalExpired(u64),

    /// An unresolved proposal already exists.
    #[error("Proposal {0} is still active")]
    ProposalAlreadyActive(u64),

    /// The caller already has an entry in this proposal's vote ledger.
    #[error("Validator {0} has already voted on proposal {1}")]
    AlreadyVoted(String, u64),

    /// Malformed input: zero duration, invalid candidate address, etc.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BallotError>;
