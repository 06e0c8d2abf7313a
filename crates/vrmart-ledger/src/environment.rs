//! Ledger deployment environments.

use serde::{Deserialize, Serialize};

/// Asset ledger canister.
pub const DEFAULT_CANISTER_ID: &str = "rdmx6-jaaaa-aaaah-qcaiq-cai";

/// Identity provider canister used by local replicas.
pub const DEFAULT_IDENTITY_CANISTER_ID: &str = "rdmx6-jaaaa-aaaah-qcaiq-cai";

const LOCAL_HOST: &str = "http://localhost:4943";
const PRODUCTION_HOST: &str = "https://ic0.app";
const PRODUCTION_IDENTITY_PROVIDER: &str = "https://identity.ic0.app/#authorize";

/// Where the ledger and identity provider live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEnvironment {
    /// Local development replica.
    #[default]
    Local,
    /// Public network.
    Production,
}

impl LedgerEnvironment {
    /// Select from the `VRMART_ENV` variable; anything but `production` is local.
    pub fn from_env() -> Self {
        match std::env::var("VRMART_ENV") {
            Ok(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Local,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }

    /// Ledger API host.
    pub fn host(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_HOST,
            Self::Production => PRODUCTION_HOST,
        }
    }

    /// Interactive login URL of the identity provider.
    pub fn identity_provider_url(&self, identity_canister_id: &str) -> String {
        match self {
            Self::Local => format!("{LOCAL_HOST}?canisterId={identity_canister_id}#authorize"),
            Self::Production => PRODUCTION_IDENTITY_PROVIDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_endpoints() {
        let env = LedgerEnvironment::Local;
        assert_eq!(env.host(), "http://localhost:4943");
        assert_eq!(
            env.identity_provider_url(DEFAULT_IDENTITY_CANISTER_ID),
            "http://localhost:4943?canisterId=rdmx6-jaaaa-aaaah-qcaiq-cai#authorize"
        );
    }

    #[test]
    fn test_production_endpoints() {
        let env = LedgerEnvironment::Production;
        assert!(env.is_production());
        assert_eq!(env.host(), "https://ic0.app");
        assert_eq!(
            env.identity_provider_url("ignored"),
            "https://identity.ic0.app/#authorize"
        );
    }

    #[test]
    fn test_environment_serde() {
        let env: LedgerEnvironment = serde_json::from_str(r#""production""#).unwrap();
        assert_eq!(env, LedgerEnvironment::Production);
    }
}
