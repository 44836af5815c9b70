//! ballot-engine
//!
//! Permissioned voting engine governing two kinds of decisions in a
//! small validator set: approving the next block to commit and
//! admitting a new validator.
//!
//! The owner opens proposals, validators vote, and the engine
//! finalizes each proposal either early (quorum reached, or quorum
//! mathematically unreachable) or at its deadline. Accepted proposals
//! have their side effect applied exactly once.

pub mod config;
pub mod env;
pub mod voting;

pub use config::GenesisConfig;
pub use env::runtime::BallotEnv;
pub use voting::quorum::QuorumPolicy;
pub use voting::VotingEngine;
