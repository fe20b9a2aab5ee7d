//! Credential management for Binance API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::BinanceError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
/// Default environment variable holding the secret key.
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// API credentials containing the key and secret.
///
/// The key travels in the `X-MBX-APIKEY` header. The secret only ever keys
/// the request HMAC and is never sent.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret key.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// Get the secret key.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret_key.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to source credentials from somewhere other than
/// memory or the environment, e.g. a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, secret_key),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads [`API_KEY_VAR`] and [`API_SECRET_VAR`].
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read credentials from the default environment variables.
    pub fn from_env() -> Result<Self, BinanceError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Read credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, BinanceError> {
        let read = |var: &str| {
            std::env::var(var)
                .map_err(|_| BinanceError::Auth(format!("Environment variable {var} not set")))
        };

        Ok(Self {
            credentials: Credentials::new(read(key_var)?, read(secret_var)?),
        })
    }

    /// Like [`EnvCredentials::from_env`], but `None` when a variable is unset.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }

    /// Like [`EnvCredentials::from_env_vars`], but `None` when a variable is unset.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str) -> Option<Self> {
        Self::from_env_vars(key_var, secret_var).ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("key", "secret");
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "secret");
        assert_eq!(creds.secret_bytes(), b"secret");
    }

    #[test]
    fn test_env_credentials_unset() {
        let err = EnvCredentials::from_env_vars(
            "BINANCE_TEST_UNSET_KEY_VAR",
            "BINANCE_TEST_UNSET_SECRET_VAR",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Credentials);
        assert!(err.message().contains("BINANCE_TEST_UNSET_KEY_VAR"));
    }
}
