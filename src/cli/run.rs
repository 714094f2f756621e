//! The clone → provision → scan → grant flow
//!
//! The clone is started before any credential prompt so both proceed in
//! parallel; it is awaited only once the temporary account exists.

use std::fmt;
use std::sync::Arc;

use colored::Colorize;
use log::debug;

use crate::account::{TemporaryAccount, create_account};
use crate::cli::prompt::{Prompter, SecretSource, prompt_credentials, prompt_repo};
use crate::client::SonarApi;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::git::{Cloner, spawn_clone, wait_for_clone};
use crate::output::{Console, print_scanner_output};
use crate::permissions::grant_permissions;
use crate::scanner::Scanner;

/// Everything the flow talks to
pub struct Collaborators {
    pub api: Arc<dyn SonarApi>,
    pub cloner: Arc<dyn Cloner>,
    pub scanner: Arc<dyn Scanner>,
    pub prompter: Arc<dyn Prompter>,
    pub console: Arc<dyn Console>,
}

/// Steps of a run, in order. Any step may end the run with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ValidatingInput,
    CredentialPrompt,
    CloningAndProvisioning,
    Scanning,
    GrantingPermissions,
    Reporting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ValidatingInput => "validating input",
            Stage::CredentialPrompt => "credential prompt",
            Stage::CloningAndProvisioning => "cloning and provisioning",
            Stage::Scanning => "scanning",
            Stage::GrantingPermissions => "granting permissions",
            Stage::Reporting => "reporting",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    debug!("stage: {}", stage);
}

/// How a run that got as far as reporting ended
#[derive(Debug)]
pub enum Outcome {
    /// The account can view the analysis
    Granted(TemporaryAccount),
    /// Analysis finished but the account could not be given access
    GrantFailed(Error),
}

/// Run one clone-scan-provision cycle.
///
/// `repo_arg` is used verbatim when present; otherwise the user is asked for
/// an http(s) URL.
pub async fn run(settings: &Settings, repo_arg: Option<String>, deps: &Collaborators) -> Result<Outcome> {
    let console = deps.console.as_ref();

    enter(Stage::ValidatingInput);
    let repo = match repo_arg {
        Some(repo) => repo,
        None => prompt_repo(deps.prompter.as_ref(), console, settings.max_attempts)?,
    };

    let clone = spawn_clone(deps.cloner.clone(), repo.clone(), settings.clone_dir.clone());

    enter(Stage::CredentialPrompt);
    let mut secrets = SecretSource::new(
        deps.prompter.as_ref(),
        settings.sonar_host.clone(),
        settings.sonar_token.clone(),
    );
    let creds = prompt_credentials(
        deps.api.as_ref(),
        &mut secrets,
        console,
        settings.max_attempts,
    )
    .await?;

    enter(Stage::CloningAndProvisioning);
    let account = create_account(deps.api.as_ref(), &creds, &settings.team_name).await?;

    console.spinner_start("Cloning your Git repository...");
    if let Err(e) = wait_for_clone(clone).await {
        console.spinner_stop(&format!("{} Cloning failed", "✗".red()));
        return Err(e);
    }
    console.spinner_stop(&format!("{} Cloning finished!", "✓".green()));

    enter(Stage::Scanning);
    let project_key = settings.project_key(&repo);
    console.spinner_start("Running analysis...");
    let output = match deps
        .scanner
        .scan(&settings.clone_dir, &creds, &project_key)
        .await
    {
        Ok(output) => output,
        Err(e) => {
            console.spinner_stop(&format!("{} Analysis failed", "✗".red()));
            if let Error::Scanner { output, .. } = &e {
                print_scanner_output(console, output);
            }
            console.print_big(&e.to_string());
            return Err(e);
        }
    };

    enter(Stage::GrantingPermissions);
    let granted = grant_permissions(deps.api.as_ref(), &creds, &account, &project_key).await;
    console.spinner_stop(&format!("{} Analysis finished!", "✓".green()));

    enter(Stage::Reporting);
    print_scanner_output(console, &output);
    let outcome = match granted {
        Ok(()) => {
            console.print(&format!(
                "Access your analysis with the credentials `{}` and password `{}`",
                account.login, account.password
            ));
            Outcome::Granted(account)
        }
        Err(e) => {
            console.print(&format!(
                "{} Error granting your new user the permissions to access the analysis! {}",
                "✗".red(),
                e
            ));
            Outcome::GrantFailed(e)
        }
    };

    enter(Stage::Done);
    Ok(outcome)
}
