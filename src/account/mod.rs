//! Temporary viewer accounts
//!
//! Each run creates one account named `{team}-{two random words}` with a
//! three-word password. Accounts are never persisted or cleaned up by this
//! tool.

use std::fmt;

use log::{debug, warn};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

use crate::client::{Credentials, SonarApi};
use crate::error::Result;

mod words;

use words::WORDS;

/// Words in the login suffix
const LOGIN_WORDS: usize = 2;

/// Words in the password
const PASSWORD_WORDS: usize = 3;

/// Login/password pair handed to the requester
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryAccount {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for TemporaryAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryAccount")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TemporaryAccount {
    /// Generate a fresh login/password pair for `team`.
    pub fn generate(team: &str) -> Self {
        let suffix = random_words(LOGIN_WORDS).unwrap_or_else(|| {
            warn!("OS random source unavailable, falling back to clock seed for login");
            fallback_words(LOGIN_WORDS, "", clock_nanos())
        });
        let password = random_words(PASSWORD_WORDS).unwrap_or_else(|| {
            warn!("OS random source unavailable, falling back to clock seed for password");
            fallback_words(PASSWORD_WORDS, team, clock_nanos())
        });

        Self {
            login: format!("{}-{}", team, suffix.concat()),
            password: password.concat(),
        }
    }
}

/// Create a temporary account on the server.
///
/// Any status other than 200 means the account does not exist and the run
/// must stop. Calling this twice creates two distinct accounts.
pub async fn create_account<A>(api: &A, creds: &Credentials, team: &str) -> Result<TemporaryAccount>
where
    A: SonarApi + ?Sized,
{
    let account = TemporaryAccount::generate(team);
    debug!("Creating temporary user {}", account.login);

    api.create_user(creds, &account.login, &account.password)
        .await?;

    Ok(account)
}

/// Pick `count` words using the operating system RNG
fn random_words(count: usize) -> Option<Vec<&'static str>> {
    let mut rng = OsRng;
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let n = rng.try_next_u32().ok()?;
        picked.push(WORDS[n as usize % WORDS.len()]);
    }
    Some(picked)
}

/// Pick `count` words from a seed built from the clock and `salt`.
///
/// Deterministic for a given `(salt, nanos)`.
fn fallback_words(count: usize, salt: &str, nanos: i64) -> Vec<&'static str> {
    let seed = salt
        .bytes()
        .fold(nanos as u64, |acc, b| acc.rotate_left(5) ^ u64::from(b));
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect()
}

fn clock_nanos() -> i64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros())
}
