//! CLI definition and the provisioning flow

use std::path::PathBuf;

use clap::Parser;

pub mod prompt;
pub mod run;

/// SonarOp - analyse a repository with SonarQube and get a temporary viewer account
#[derive(Parser, Debug)]
#[command(name = "sonarop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Public http(s) git repository to analyse (prompted for when omitted)
    pub repo: Option<String>,

    /// SonarQube server URL (`sonarHost`)
    #[arg(long, env = "SONAR_HOST", hide_env = true)]
    pub host: Option<String>,

    /// SonarQube administrative token (`sonarToken`)
    #[arg(long, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Team name used to namespace logins and project keys
    #[arg(long, env = "OPS_TEAM_NAME")]
    pub team: Option<String>,

    /// Directory to clone the repository into
    #[arg(long, env = "SONAROP_CLONE_DIR", hide_env = true)]
    pub clone_dir: Option<PathBuf>,

    /// Scanner executable
    #[arg(long, env = "SONAROP_SCANNER", hide_env = true)]
    pub scanner: Option<String>,

    /// Give up after this many invalid answers per prompt (0 = never)
    #[arg(long, default_value_t = 5)]
    pub max_attempts: usize,

    /// Timeout in seconds for each SonarQube request (the HTTP client's own
    /// default would wait indefinitely)
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Override config file location
    #[arg(long, env = "SONAROP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "SONAROP_DEBUG", hide_env = true)]
    pub debug: bool,
}
