//! sonar-scanner invocation

use std::io::Read;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::client::Credentials;
use crate::error::{Error, Result};

/// Runs an analysis of a checked-out repository
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Analyse `dir` and return the scanner's combined stdout and stderr.
    async fn scan(&self, dir: &Path, creds: &Credentials, project_key: &str) -> Result<Vec<u8>>;
}

/// The external `sonar-scanner` executable
pub struct SonarScanner {
    program: String,
}

impl SonarScanner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// `-D` properties passed to the scanner
fn scanner_args(creds: &Credentials, project_key: &str) -> Vec<String> {
    vec![
        format!("-Dsonar.host.url={}", creds.host),
        format!("-Dsonar.login={}", creds.token),
        format!("-Dsonar.projectKey={}", project_key),
    ]
}

#[async_trait]
impl Scanner for SonarScanner {
    async fn scan(&self, dir: &Path, creds: &Credentials, project_key: &str) -> Result<Vec<u8>> {
        debug!(
            "Running {} in {} for {}",
            self.program,
            dir.display(),
            project_key
        );

        // One pipe for both streams keeps stdout and stderr lines in the
        // order the scanner wrote them.
        let (mut reader, writer) = std::io::pipe()?;
        let mut child = Command::new(&self.program)
            .args(scanner_args(creds, project_key))
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .kill_on_drop(true)
            .spawn()?;

        let drain = tokio::task::spawn_blocking(move || {
            let mut combined = Vec::new();
            reader.read_to_end(&mut combined).map(|_| combined)
        });
        let (combined, status) = tokio::join!(drain, child.wait());
        let combined = combined.map_err(std::io::Error::other)??;
        let status = status?;

        if status.success() {
            Ok(combined)
        } else {
            Err(Error::scanner(status, combined))
        }
    }
}
