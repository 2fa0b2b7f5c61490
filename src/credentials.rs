//! Username/password sources for basic-auth logins.

use async_trait::async_trait;

use crate::error::{Result, SeekError};

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Supplies credentials when [`SeekClient::login`](crate::SeekClient::login)
/// is called without a token.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain a username and password.
    ///
    /// # Errors
    ///
    /// Returns [`SeekError::Credentials`] if none can be obtained.
    async fn credentials(&self) -> Result<Credentials>;
}

/// Prompts on the terminal. The password is not echoed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCredentials;

#[async_trait]
impl CredentialProvider for PromptCredentials {
    async fn credentials(&self) -> Result<Credentials> {
        tokio::task::spawn_blocking(|| -> Result<Credentials> {
            let username: String = dialoguer::Input::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(|e| SeekError::Credentials(e.to_string()))?;
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(|e| SeekError::Credentials(e.to_string()))?;
            Ok(Credentials { username, password })
        })
        .await
        .map_err(|e| SeekError::Credentials(e.to_string()))?
    }
}

/// Fixed credentials, for non-interactive use.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl StaticCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self(Credentials::new(username, password))
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}
