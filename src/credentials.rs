//! HTTP Basic Authentication credentials.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::HeaderValue;
use std::fmt;

use crate::{Error, Result};

/// Environment variable holding the API username.
pub const USERNAME_ENV: &str = "INTRINIO_USERNAME";

/// Environment variable holding the API password.
pub const PASSWORD_ENV: &str = "INTRINIO_PASSWORD";

/// The username/password pair sent with every request.
///
/// Credentials are immutable once created. The `Debug` implementation never
/// prints the password.
///
/// # Examples
///
/// ```
/// use intrinio_client::Credentials;
///
/// let credentials = Credentials::new("user", "s3cret");
/// assert_eq!(credentials.username(), "user");
/// assert!(!format!("{:?}", credentials).contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from `INTRINIO_USERNAME` and `INTRINIO_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let username = read_env(USERNAME_ENV)?;
        let password = read_env(PASSWORD_ENV)?;
        Ok(Self::new(username, password))
    }

    /// The API username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the `Authorization` header value for the Basic scheme.
    ///
    /// The returned value is marked sensitive so it is not printed by
    /// `HeaderMap`'s `Debug` output.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::try_from(format!("Basic {}", token)).map_err(|e| {
            Error::configuration(format!("Invalid authorization header: {}", e))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::configuration(format!(
            "Environment variable {} is not set",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_is_basic_scheme() {
        let credentials = Credentials::new("user", "pass");
        let header = credentials.authorization_header().unwrap();

        assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_authorization_header_keeps_colons_in_password() {
        let credentials = Credentials::new("key", "a:b");
        let header = credentials.authorization_header().unwrap();
        let encoded = header.to_str().unwrap().trim_start_matches("Basic ");

        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"key:a:b");
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("alice", "hunter2");
        let printed = format!("{:?}", credentials);

        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
