pub mod event;
pub mod outcome;
pub mod proposal;
pub mod vote;
