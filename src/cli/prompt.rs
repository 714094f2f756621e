//! Interactive input: repository URL and SonarQube credentials
//!
//! Invalid answers are re-asked in a loop bounded by `max_attempts`.

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;
use thiserror::Error;
use url::Url;

use crate::client::{Credentials, SonarApi};
use crate::error::{Error, Result};
use crate::output::Console;

/// Secrets the run needs from the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    SonarHost,
    SonarToken,
}

impl SecretKey {
    pub fn name(&self) -> &'static str {
        match self {
            SecretKey::SonarHost => "sonarHost",
            SecretKey::SonarToken => "sonarToken",
        }
    }
}

/// Source of interactive answers
pub trait Prompter: Send + Sync {
    /// Ask for the repository URL
    fn repo_url(&self) -> Result<String>;

    /// Ask for a secret
    fn secret(&self, key: SecretKey) -> Result<String>;
}

/// Prompts on the terminal with dialoguer
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn repo_url(&self) -> Result<String> {
        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Please enter your publicly accessible, http(s) git repository URL to analyse")
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn secret(&self, key: SecretKey) -> Result<String> {
        let theme = ColorfulTheme::default();
        let answer = match key {
            SecretKey::SonarHost => Input::<String>::with_theme(&theme)
                .with_prompt("SonarQube server URL")
                .allow_empty(true)
                .interact_text()?,
            SecretKey::SonarToken => Password::with_theme(&theme)
                .with_prompt("SonarQube administrative token")
                .allow_empty_password(true)
                .interact()?,
        };
        Ok(answer)
    }
}

/// Secrets from flags, environment or config first, the prompter afterwards.
///
/// A preset value is offered once; if it turns out to be invalid the next
/// request for that key goes to the prompter.
pub struct SecretSource<'a> {
    prompter: &'a dyn Prompter,
    host: Option<String>,
    token: Option<String>,
}

impl<'a> SecretSource<'a> {
    pub fn new(prompter: &'a dyn Prompter, host: Option<String>, token: Option<String>) -> Self {
        Self {
            prompter,
            host,
            token,
        }
    }

    pub fn fetch(&mut self, key: SecretKey) -> Result<String> {
        let preset = match key {
            SecretKey::SonarHost => self.host.take(),
            SecretKey::SonarToken => self.token.take(),
        };
        match preset {
            Some(value) => {
                debug!("Using preset {}", key.name());
                Ok(value)
            }
            None => self.prompter.secret(key),
        }
    }
}

/// Counts attempts for one prompt loop
#[derive(Debug)]
pub struct Attempts {
    what: &'static str,
    max: usize,
    used: usize,
}

impl Attempts {
    /// `max == 0` means unbounded
    pub fn new(what: &'static str, max: usize) -> Self {
        Self { what, max, used: 0 }
    }

    /// Claim the next attempt, failing once the budget is spent.
    pub fn next(&mut self) -> Result<()> {
        if self.max != 0 && self.used >= self.max {
            return Err(Error::AttemptsExhausted(self.what));
        }
        self.used += 1;
        Ok(())
    }
}

/// Why a repository URL was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRepoUrl {
    #[error("URL cannot be empty!")]
    Empty,

    #[error("Invalid URL detected: {0}")]
    Malformed(String),

    #[error("We only support cloning with http(s), we do not support {0}")]
    Scheme(String),
}

/// Accept only absolute http/https URLs.
pub fn parse_repo_url(input: &str) -> std::result::Result<String, InvalidRepoUrl> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InvalidRepoUrl::Empty);
    }

    let url = Url::parse(input).map_err(|e| InvalidRepoUrl::Malformed(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(input.to_string()),
        other => Err(InvalidRepoUrl::Scheme(other.to_string())),
    }
}

fn report_failure(console: &dyn Console, message: &str) {
    console.print(&format!("{} {}", "✗".red(), message));
}

/// Ask for a repository URL until a valid one is given.
pub fn prompt_repo(
    prompter: &dyn Prompter,
    console: &dyn Console,
    max_attempts: usize,
) -> Result<String> {
    let mut attempts = Attempts::new("repository URL", max_attempts);
    loop {
        attempts.next()?;
        let answer = prompter.repo_url()?;
        match parse_repo_url(&answer) {
            Ok(url) => return Ok(url),
            Err(e) => report_failure(console, &e.to_string()),
        }
    }
}

/// Obtain a server URL and admin token that both validate.
///
/// An invalid host restarts from scratch; an invalid token only re-asks the
/// token and keeps the validated host.
pub async fn prompt_credentials<A>(
    api: &A,
    secrets: &mut SecretSource<'_>,
    console: &dyn Console,
    max_attempts: usize,
) -> Result<Credentials>
where
    A: SonarApi + ?Sized,
{
    let mut host_attempts = Attempts::new("SonarQube host", max_attempts);
    let host = loop {
        host_attempts.next()?;
        let host = secrets.fetch(SecretKey::SonarHost)?;
        let host = host.trim().trim_end_matches('/').to_string();

        match api.validate_endpoint(&host).await {
            Ok(()) => break host,
            Err(e) => {
                debug!("Host validation failed for {}: {}", host, e);
                report_failure(
                    console,
                    "That URL does not appear to be a valid SonarQube server, please try again!",
                );
            }
        }
    };

    let mut token_attempts = Attempts::new("SonarQube token", max_attempts);
    loop {
        token_attempts.next()?;
        let token = secrets.fetch(SecretKey::SonarToken)?;

        match api.validate_credential(&host, &token).await {
            Ok(()) => return Ok(Credentials::new(host, token)),
            Err(e) => {
                debug!("Token validation failed: {}", e);
                report_failure(
                    console,
                    "That token does not appear to be a valid SonarQube administrative token, please try again!",
                );
            }
        }
    }
}
