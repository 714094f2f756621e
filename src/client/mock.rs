//! Mock SonarQube client for testing
//!
//! Provides a mock implementation of [`SonarApi`] for unit testing the
//! provisioning flow without making real API calls.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Barrier, Mutex};

use super::{Credentials, SonarApi};
use crate::error::{ApiError, Result};
use crate::permissions::Permission;

/// A call received by the mock, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ValidateEndpoint(String),
    ValidateCredential { host: String, token: String },
    CreateUser { login: String, password: String },
    AddUserPermission {
        login: String,
        permission: Permission,
        project_key: String,
    },
}

/// Mock API client for testing.
///
/// By default every host and token is accepted and every write succeeds.
///
/// # Example
/// ```ignore
/// let mock = MockSonarClient::new()
///     .with_valid_host("http://sonar")
///     .with_valid_token("good");
/// ```
#[derive(Default)]
pub struct MockSonarClient {
    /// Hosts accepted by validate_endpoint (empty = accept all)
    valid_hosts: Arc<Mutex<HashSet<String>>>,
    /// Tokens accepted by validate_credential (empty = accept all)
    valid_tokens: Arc<Mutex<HashSet<String>>>,
    /// Status returned by create_user when it should fail
    create_user_status: Arc<Mutex<Option<u16>>>,
    /// Permissions whose grant fails with 403
    failing_permissions: Arc<Mutex<HashSet<Permission>>>,
    /// Every grant waits here before answering
    permission_barrier: Option<Arc<Barrier>>,
    /// Captured calls for test assertions
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockSonarClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept the given host(s)
    pub fn with_valid_host(self, host: &str) -> Self {
        self.valid_hosts.try_lock().unwrap().insert(host.to_string());
        self
    }

    /// Only accept the given token(s)
    pub fn with_valid_token(self, token: &str) -> Self {
        self.valid_tokens.try_lock().unwrap().insert(token.to_string());
        self
    }

    /// Make create_user answer with `status`
    pub fn with_create_user_status(self, status: u16) -> Self {
        *self.create_user_status.try_lock().unwrap() = Some(status);
        self
    }

    /// Make the grant of `permission` fail
    pub fn with_failing_permission(self, permission: Permission) -> Self {
        self.failing_permissions.try_lock().unwrap().insert(permission);
        self
    }

    /// Hold each grant until `barrier` releases it
    pub fn with_permission_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.permission_barrier = Some(barrier);
        self
    }

    /// All calls received so far
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// Permission grants received so far
    pub async fn granted(&self) -> Vec<Permission> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                Call::AddUserPermission { permission, .. } => Some(*permission),
                _ => None,
            })
            .collect()
    }

    /// Count calls matching a predicate
    pub async fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().await.iter().filter(|c| pred(*c)).count()
    }
}

#[async_trait]
impl SonarApi for MockSonarClient {
    async fn validate_endpoint(&self, host: &str) -> Result<()> {
        self.calls
            .lock()
            .await
            .push(Call::ValidateEndpoint(host.to_string()));

        let valid = self.valid_hosts.lock().await;
        if valid.is_empty() || valid.contains(host) {
            Ok(())
        } else {
            Err(ApiError::BadStatus {
                endpoint: "/api/server/version",
                expected: 200,
                actual: 404,
            }
            .into())
        }
    }

    async fn validate_credential(&self, host: &str, token: &str) -> Result<()> {
        self.calls.lock().await.push(Call::ValidateCredential {
            host: host.to_string(),
            token: token.to_string(),
        });

        let valid = self.valid_tokens.lock().await;
        if valid.is_empty() || valid.contains(token) {
            Ok(())
        } else {
            Err(ApiError::BadStatus {
                endpoint: "/api/system/ping",
                expected: 200,
                actual: 401,
            }
            .into())
        }
    }

    async fn create_user(&self, _creds: &Credentials, login: &str, password: &str) -> Result<()> {
        self.calls.lock().await.push(Call::CreateUser {
            login: login.to_string(),
            password: password.to_string(),
        });

        match *self.create_user_status.lock().await {
            Some(actual) => Err(ApiError::BadStatus {
                endpoint: "/api/users/create",
                expected: 200,
                actual,
            }
            .into()),
            None => Ok(()),
        }
    }

    async fn add_user_permission(
        &self,
        _creds: &Credentials,
        login: &str,
        permission: Permission,
        project_key: &str,
    ) -> Result<()> {
        self.calls.lock().await.push(Call::AddUserPermission {
            login: login.to_string(),
            permission,
            project_key: project_key.to_string(),
        });

        match &self.permission_barrier {
            Some(barrier) => {
                barrier.wait().await;
            }
            // Yield so sibling grants interleave like real requests
            None => tokio::task::yield_now().await,
        }

        if self.failing_permissions.lock().await.contains(&permission) {
            Err(ApiError::BadStatus {
                endpoint: "/api/permissions/add_user",
                expected: 204,
                actual: 403,
            }
            .into())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_accepts_everything_by_default() {
        let mock = MockSonarClient::new();
        let creds = Credentials::new("http://any", "any");

        assert!(mock.validate_endpoint("http://any").await.is_ok());
        assert!(mock.validate_credential("http://any", "any").await.is_ok());
        assert!(mock.create_user(&creds, "l", "p").await.is_ok());
        assert_eq!(mock.calls().await.len(), 3);
    }

    #[tokio::test]
    async fn test_mock_rejects_unknown_token() {
        let mock = MockSonarClient::new().with_valid_token("good");

        assert!(mock.validate_credential("h", "good").await.is_ok());
        assert!(mock.validate_credential("h", "bad").await.is_err());
    }
}
