//! Repository cloning
//!
//! The clone runs on its own task while the user is being prompted; its single
//! result is handed back through a oneshot channel.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;
use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Something that can clone a repository into a directory
#[async_trait]
pub trait Cloner: Send + Sync {
    async fn clone_repo(&self, url: &str, dir: &Path) -> Result<()>;
}

/// Clones with the `git` binary: shallow, single branch.
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn command(&self, url: &str, dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.args(["clone", "--depth", "1", "--single-branch", "--", url]);
        cmd.arg(dir);
        cmd.stdin(Stdio::null());
        // An abandoned run must not leave git writing into the clone dir
        cmd.kill_on_drop(true);
        cmd
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Refuse to clone over an existing, non-empty directory.
fn ensure_clone_target(dir: &Path) -> Result<()> {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(Error::Git(format!(
                    "{} already exists and is not empty",
                    dir.display()
                )));
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Cloner for GitCli {
    async fn clone_repo(&self, url: &str, dir: &Path) -> Result<()> {
        ensure_clone_target(dir)?;

        let mut cmd = self.command(url, dir);
        debug!("{cmd:?}");
        let output = cmd
            .output()
            .await
            .map_err(|e| Error::Git(format!("unable to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let summary = stderr
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or("no output");
            return Err(Error::Git(summary.to_string()));
        }
        Ok(())
    }
}

/// Start cloning in the background.
pub fn spawn_clone(
    cloner: Arc<dyn Cloner>,
    url: String,
    dir: PathBuf,
) -> oneshot::Receiver<Result<()>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        debug!("Cloning {} into {}", url, dir.display());
        let result = cloner.clone_repo(&url, &dir).await;
        // Receiver gone means the run already failed
        let _ = tx.send(result);
    });
    rx
}

/// Wait for a clone started with [`spawn_clone`].
pub async fn wait_for_clone(rx: oneshot::Receiver<Result<()>>) -> Result<()> {
    rx.await
        .map_err(|_| Error::Git("clone task ended without a result".to_string()))?
}
