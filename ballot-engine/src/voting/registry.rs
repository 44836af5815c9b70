use serde::{Deserialize, Serialize};

use ballot_common::Address;

/// Authoritative record of the owner and the validator set.
///
/// The owner is fixed at construction and authorizes proposal
/// creation; validators authorize voting. The owner is not implicitly
/// a validator, membership is checked independently. The set keeps
/// insertion order so enumeration is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorRegistry {
    owner: Address,
    validators: Vec<Address>,
}

impl ValidatorRegistry {
    pub fn new(owner: Address, initial_validators: Vec<Address>) -> Self {
        let mut registry = Self {
            owner,
            validators: Vec::new(),
        };
        for validator in initial_validators {
            registry.add_validator(validator);
        }
        registry
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn is_owner(&self, id: &Address) -> bool {
        *id == self.owner
    }

    pub fn is_validator(&self, id: &Address) -> bool {
        self.validators.contains(id)
    }

    pub fn count(&self) -> usize {
        self.validators.len()
    }

    /// Inserts a validator into the set.
    ///
    /// Returns `true` if the validator was actually inserted, `false`
    /// if it was already present. The no-op path keeps finalization
    /// idempotent under retries; the flag lets the caller emit the
    /// ValidatorAdded event at most once.
    pub fn add_validator(&mut self, id: Address) -> bool {
        if self.validators.contains(&id) {
            return false;
        }
        self.validators.push(id);
        true
    }

    /// Validators in insertion order.
    pub fn validators(&self) -> &[Address] {
        &self.validators
    }
}
