//! Login session.

use secrecy::SecretString;

/// Credential token issued by `login`, presented on every write.
#[derive(Debug)]
pub struct Session {
    token: SecretString,
    username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            username: username.into(),
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
