//! Deployer credentials, read from the environment only.

use crate::blockchain::wallet::Wallet;
use crate::config::loader::ConfigError;

pub const PRIVATE_KEY_ENV_VAR: &str = "CLOAKVOTE_PRIVATE_KEY";
pub const ACCOUNT_ADDRESS_ENV_VAR: &str = "CLOAKVOTE_ACCOUNT_ADDRESS";

/// Private key and account address of the deploying account.
#[derive(Clone)]
pub struct Credentials {
    pub private_key: String,
    pub account_address: String,
}

impl Credentials {
    /// Read both variables; each is required and must be non-blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };

        Ok(Self {
            private_key: required(PRIVATE_KEY_ENV_VAR)?,
            account_address: required(ACCOUNT_ADDRESS_ENV_VAR)?,
        })
    }

    /// Signer for `chain_id`. The key must control the account address.
    pub fn signer(&self, chain_id: u64) -> Result<Wallet, ConfigError> {
        Wallet::from_credentials(&self.private_key, &self.account_address, chain_id)
            .map_err(|e| ConfigError::InvalidCredential(e.to_string()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"<redacted>")
            .field("account_address", &self.account_address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(key: Option<&str>, address: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let key = key.map(str::to_string);
        let address = address.map(str::to_string);
        move |name| match name {
            PRIVATE_KEY_ENV_VAR => key.clone(),
            ACCOUNT_ADDRESS_ENV_VAR => address.clone(),
            _ => None,
        }
    }

    #[test]
    fn test_both_present() {
        let creds = Credentials::from_lookup(lookup(Some("0xabc"), Some("0xdef"))).unwrap();
        assert_eq!(creds.private_key, "0xabc");
        assert_eq!(creds.account_address, "0xdef");
    }

    #[test]
    fn test_missing_private_key() {
        let err = Credentials::from_lookup(lookup(None, Some("0xdef"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(PRIVATE_KEY_ENV_VAR)));
    }

    #[test]
    fn test_blank_account_address_counts_as_missing() {
        let err = Credentials::from_lookup(lookup(Some("0xabc"), Some("  "))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ACCOUNT_ADDRESS_ENV_VAR)));
    }

    #[test]
    fn test_signer_rejects_foreign_account() {
        let creds = Credentials::from_lookup(lookup(
            Some(crate::blockchain::wallet::tests::TEST_PRIVATE_KEY),
            Some("0x70997970c51812dc3a010c7d01b50e0d17dc79c8"),
        ))
        .unwrap();
        let err = creds.signer(31337).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCredential(ref m) if m.contains("does not control")));
    }

    #[test]
    fn test_signer_rejects_malformed_key() {
        let creds = Credentials::from_lookup(lookup(Some("0xnothex"), Some("0xdef"))).unwrap();
        assert!(matches!(
            creds.signer(31337),
            Err(ConfigError::InvalidCredential(_))
        ));
    }

    #[test]
    fn test_signer_for_matching_account() {
        let creds = Credentials::from_lookup(lookup(
            Some(crate::blockchain::wallet::tests::TEST_PRIVATE_KEY),
            Some(crate::blockchain::wallet::tests::TEST_ADDRESS),
        ))
        .unwrap();
        let wallet = creds.signer(31337).unwrap();
        assert_eq!(wallet.chain_id(), 31337);
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::from_lookup(lookup(Some("0xsecret"), Some("0xdef"))).unwrap();
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("0xsecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
