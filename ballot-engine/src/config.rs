use std::{fs, io};

use serde::{Deserialize, Serialize};

use ballot_common::Address;

use crate::env::runtime::{BallotEnv, Callback};
use crate::voting::registry::ValidatorRegistry;

/// Initial state of the voting engine: the owner identity and the
/// genesis validator set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub owner: Address,
    pub validators: Vec<Address>,
}

impl GenesisConfig {
    /// Builds a ready-to-use environment from this genesis state.
    pub fn build_env(self, callback: Callback) -> BallotEnv {
        let registry = ValidatorRegistry::new(self.owner, self.validators);
        BallotEnv::new(registry, callback)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let parsed = serde_json::from_str::<GenesisConfig>(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::try_from(format!("0x{:040x}", n).as_str()).unwrap()
    }

    #[test]
    fn test_config_file_roundtrip() {
        let config = GenesisConfig {
            owner: addr(1),
            validators: vec![addr(2), addr(3), addr(4)],
        };

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        config.save_to_file(path).unwrap();
        let loaded = GenesisConfig::load_from_file(path).unwrap();

        assert_eq!(loaded.owner, addr(1));
        assert_eq!(loaded.validators.len(), 3);
    }

    /// A genesis file with checksummed (mixed-case) addresses must
    /// yield a registry that answers membership queries for the same
    /// addresses in any casing.
    #[tokio::test]
    async fn test_checksummed_genesis_addresses_resolve() {
        let json = r#"{
            "owner": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "validators": ["0x70997970C51812dc3A010C7d01b50e0d17dc79C8"]
        }"#;

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), json).unwrap();

        let loaded = GenesisConfig::load_from_file(file.path().to_str().unwrap()).unwrap();
        let env = loaded.build_env(std::sync::Arc::new(|_| {}));

        let owner = Address::try_from("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266").unwrap();
        let validator = Address::try_from("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap();
        assert_eq!(env.owner().await, owner);
        assert!(env.is_validator(&validator).await);
    }

    #[tokio::test]
    async fn test_build_env_seeds_registry() {
        let config = GenesisConfig {
            owner: addr(1),
            validators: vec![addr(2), addr(3)],
        };
        let env = config.build_env(std::sync::Arc::new(|_| {}));

        assert_eq!(env.owner().await, addr(1));
        assert_eq!(env.validator_count().await, 2);
        assert!(env.is_validator(&addr(2)).await);
        assert!(!env.is_validator(&addr(1)).await);
    }
}
