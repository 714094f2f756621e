//! SonarQube API client

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::permissions::Permission;

#[cfg(test)]
pub mod mock;
pub mod sonar;

#[cfg(test)]
pub use mock::MockSonarClient;
pub use sonar::SonarClient;

/// SonarQube operations needed to validate access and provision a viewer.
///
/// The HTTP client is passed around as an explicit dependency; host and token
/// travel with each call.
#[async_trait]
pub trait SonarApi: Send + Sync {
    /// Check that `host` is a SonarQube server
    async fn validate_endpoint(&self, host: &str) -> Result<()>;

    /// Check that `token` authenticates against `host`
    async fn validate_credential(&self, host: &str, token: &str) -> Result<()>;

    /// Create a local user account
    async fn create_user(&self, creds: &Credentials, login: &str, password: &str) -> Result<()>;

    /// Grant one project permission to a user
    async fn add_user_permission(
        &self,
        creds: &Credentials,
        login: &str,
        permission: Permission,
        project_key: &str,
    ) -> Result<()>;
}

/// A validated server URL and the admin token that authenticated against it
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL without trailing slash
    pub host: String,
    pub token: String,
}

impl Credentials {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}
