use std::fmt;

use serde::{Deserialize, Serialize};

/// A validator's position on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    Yes,
    No,
}

impl Vote {
    pub fn is_yes(&self) -> bool {
        matches!(self, Vote::Yes)
    }
}

impl From<bool> for Vote {
    fn from(support: bool) -> Self {
        if support {
            Vote::Yes
        } else {
            Vote::No
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vote::Yes => "Yes",
            Vote::No => "No",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_support_flag() {
        assert_eq!(Vote::from(true), Vote::Yes);
        assert_eq!(Vote::from(false), Vote::No);
        assert!(Vote::Yes.is_yes());
        assert!(!Vote::No.is_yes());
    }
}
