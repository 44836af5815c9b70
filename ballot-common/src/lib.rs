//! ballot-common
//!
//! Shared vocabulary for the ballot voting engine: validator
//! identities, proposal and vote types, transition events, hashing
//! helpers and the error taxonomy.

pub mod address;
pub mod crypto;
pub mod env;
pub mod error;
pub mod utils;

pub use address::Address;
pub use error::{BallotError, Result};
