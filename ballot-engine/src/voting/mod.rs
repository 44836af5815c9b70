//! The voting state machine.
//!
//! `VotingEngine` composes the validator registry, the quorum policy
//! and the proposal store, and applies commit effects when a proposal
//! is accepted. Each proposal progresses `Active -> Accepted` or
//! `Active -> Rejected`; no transition ever leaves a terminal state.

pub mod applier;
mod engine;
pub mod quorum;
pub mod registry;
pub mod store;

pub use engine::VotingEngine;
