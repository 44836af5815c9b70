use serde::{Deserialize, Serialize};

use crate::error::BallotError;

/// Account address identifying the owner, validators and validator
/// candidates.
///
/// Addresses are `0x`-prefixed 20-byte hex strings. Comparison is
/// case-insensitive: the hex part is normalized to lowercase on
/// construction so registry lookups never miss on casing.
/// Deserialization routes through `TryFrom` so data loaded from disk
/// (genesis files, audits) upholds the same invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Address(String);

impl Address {
    /// Returns whether the given string is a well-formed address.
    pub fn is_valid(address: &str) -> bool {
        let Some(body) = address.strip_prefix("0x") else {
            return false;
        };
        body.len() == 40 && hex::decode(body).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw 20 bytes of the address.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        // Constructor guarantees a valid 40-char hex body.
        let body = hex::decode(&self.0[2..]).expect("validated address body");
        out.copy_from_slice(&body);
        out
    }
}

impl TryFrom<&str> for Address {
    type Error = BallotError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if Address::is_valid(s) {
            Ok(Address(format!("0x{}", s[2..].to_lowercase())))
        } else {
            Err(BallotError::InvalidInput(format!("invalid address: {}", s)))
        }
    }
}

impl TryFrom<String> for Address {
    type Error = BallotError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Address::try_from(s.as_str())
    }
}

impl std::ops::Deref for Address {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
