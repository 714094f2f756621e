//! Concurrent project permission grants for the temporary account.
//!
//! Every grant is launched up front and every one is driven to completion,
//! even after a failure, so no request is abandoned mid-flight. Already
//! granted permissions are left in place when a sibling fails.

use std::fmt;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};

use crate::account::TemporaryAccount;
use crate::client::{Credentials, SonarApi};
use crate::error::Result;

/// A project-level SonarQube permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Browse the project's source code
    CodeViewer,
    /// Browse the project
    User,
}

impl Permission {
    /// What a temporary viewer receives. `scan` is deliberately absent: only
    /// admin token holders may run analysis.
    pub const VIEWER: [Permission; 2] = [Permission::CodeViewer, Permission::User];

    /// Name used by the SonarQube API
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CodeViewer => "codeviewer",
            Permission::User => "user",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant [`Permission::VIEWER`] on `project_key` to `account`.
///
/// Returns `Ok` only if every grant succeeded; otherwise the first failure
/// observed, after all outstanding grants have finished.
pub async fn grant_permissions<A>(
    api: &A,
    creds: &Credentials,
    account: &TemporaryAccount,
    project_key: &str,
) -> Result<()>
where
    A: SonarApi + ?Sized,
{
    grant(api, creds, account, project_key, &Permission::VIEWER).await
}

async fn grant<A>(
    api: &A,
    creds: &Credentials,
    account: &TemporaryAccount,
    project_key: &str,
    permissions: &[Permission],
) -> Result<()>
where
    A: SonarApi + ?Sized,
{
    debug!(
        "Granting {} permissions to {} on {}",
        permissions.len(),
        account.login,
        project_key
    );

    let mut pending: FuturesUnordered<_> = permissions
        .iter()
        .map(|&permission| async move {
            let result = api
                .add_user_permission(creds, &account.login, permission, project_key)
                .await;
            (permission, result)
        })
        .collect();

    let mut first_error = None;
    let mut granted = 0;
    while let Some((permission, result)) = pending.next().await {
        match result {
            Ok(()) => {
                debug!("Granted {} to {}", permission, account.login);
                granted += 1;
            }
            Err(e) => {
                warn!("Failed to grant {} to {}: {}", permission, account.login, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        None => Ok(()),
        Some(e) => {
            if granted > 0 {
                warn!(
                    "{} keeps {} of {} permissions on {}",
                    account.login,
                    granted,
                    permissions.len(),
                    project_key
                );
            }
            Err(e)
        }
    }
}
