use serde::{Deserialize, Serialize};

/// Two-thirds-majority quorum rule.
///
/// The threshold is a pure function of the validator count:
/// `ceil(2 * count / 3)` affirmative votes accept a proposal. The
/// engine evaluates it at proposal creation and freezes the result
/// into the proposal, so validator-set growth never retroactively
/// changes an in-flight threshold.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct QuorumPolicy;

impl QuorumPolicy {
    /// Minimum affirmative votes required to accept.
    pub fn required(&self, validator_count: usize) -> u32 {
        let n = validator_count as u64;
        (2 * n).div_ceil(3) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_thirds_quorum_table() {
        let policy = QuorumPolicy;
        let expected = [(0, 0), (1, 1), (2, 2), (3, 2), (4, 3), (5, 4), (6, 4), (7, 5)];

        for (count, quorum) in expected {
            assert_eq!(policy.required(count), quorum, "count={}", count);
        }
    }
}
