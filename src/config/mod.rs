//! Configuration management for SonarOp
//!
//! Settings are resolved with the precedence CLI flag > environment variable >
//! config file > default. The config file is optional and only read, never
//! written: nothing is persisted between runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{ConfigError, Result};

/// Directory the repository is cloned into when nothing else is configured
pub const DEFAULT_CLONE_DIR: &str = "/ops/proj";

/// Scanner executable looked up on `PATH` by default
pub const DEFAULT_SCANNER: &str = "sonar-scanner";

/// Optional on-disk configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SonarQube server URL (`sonarHost` secret)
    #[serde(default)]
    pub sonar_host: Option<String>,

    /// Administrative token (`sonarToken` secret)
    #[serde(default)]
    pub sonar_token: Option<String>,

    /// Team name used to namespace logins and project keys
    #[serde(default)]
    pub team_name: Option<String>,

    /// Where to clone the repository
    #[serde(default)]
    pub clone_dir: Option<PathBuf>,

    /// Scanner executable
    #[serde(default)]
    pub scanner: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".sonarop").join("config.yaml"))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration from an explicit path, or from the default path.
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// configuration.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Fully resolved runtime settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Team name, possibly empty
    pub team_name: String,
    pub clone_dir: PathBuf,
    pub scanner: String,
    /// Maximum attempts per prompt loop, `0` for unbounded
    pub max_attempts: usize,
    /// Timeout applied to every SonarQube request
    pub timeout: Duration,
    /// Preset server URL, tried before prompting
    pub sonar_host: Option<String>,
    /// Preset admin token, tried before prompting
    pub sonar_token: Option<String>,
}

impl Settings {
    /// Merge CLI/env values over the config file.
    pub fn resolve(cli: &Cli, file: Config) -> Result<Self> {
        if cli.timeout == 0 {
            return Err(ConfigError::Invalid("--timeout must be greater than zero".to_string()).into());
        }

        Ok(Self {
            team_name: cli.team.clone().or(file.team_name).unwrap_or_default(),
            clone_dir: cli
                .clone_dir
                .clone()
                .or(file.clone_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLONE_DIR)),
            scanner: cli
                .scanner
                .clone()
                .or(file.scanner)
                .unwrap_or_else(|| DEFAULT_SCANNER.to_string()),
            max_attempts: cli.max_attempts,
            timeout: Duration::from_secs(cli.timeout),
            sonar_host: cli.host.clone().or(file.sonar_host),
            sonar_token: cli.token.clone().or(file.sonar_token),
        })
    }

    /// Project key scoping the scan and the permission grant.
    ///
    /// Uses the repository argument exactly as given.
    pub fn project_key(&self, repo: &str) -> String {
        format!("{}-{}", self.team_name, repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use tempfile::tempdir;

    /// Parse flags only; env fallbacks are stripped so the caller's shell
    /// cannot leak `SONAR_TOKEN` and friends into the result.
    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sonarop"];
        argv.extend_from_slice(args);
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(argv)
            .unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            "sonar_host: http://sonar.local\nteam_name: ops\nclone_dir: /tmp/proj\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sonar_host.as_deref(), Some("http://sonar.local"));
        assert_eq!(config.team_name.as_deref(), Some("ops"));
        assert_eq!(config.clone_dir, Some(PathBuf::from("/tmp/proj")));
        assert!(config.sonar_token.is_none());
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope.yaml");

        let err = Config::load_at(Some(missing.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "sonar_hots: typo\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let cli = parse(&[]);
        let settings = Settings::resolve(&cli, Config::default()).unwrap();

        assert_eq!(settings.clone_dir, PathBuf::from(DEFAULT_CLONE_DIR));
        assert_eq!(settings.scanner, DEFAULT_SCANNER);
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_flags_override_file() {
        let cli = parse(&["--team", "flag-team", "--host", "http://flag"]);
        let file = Config {
            sonar_host: Some("http://file".to_string()),
            sonar_token: Some("file-token".to_string()),
            team_name: Some("file-team".to_string()),
            clone_dir: None,
            scanner: Some("/opt/scanner".to_string()),
        };

        let settings = Settings::resolve(&cli, file).unwrap();
        assert_eq!(settings.team_name, "flag-team");
        assert_eq!(settings.sonar_host.as_deref(), Some("http://flag"));
        assert_eq!(settings.sonar_token.as_deref(), Some("file-token"));
        assert_eq!(settings.scanner, "/opt/scanner");
    }

    #[test]
    fn test_env_is_ignored_by_parse_helper() {
        let cli = parse(&[]);
        assert!(cli.token.is_none());
        assert!(cli.host.is_none());
        assert!(cli.team.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = parse(&["--timeout", "0"]);
        assert!(Settings::resolve(&cli, Config::default()).is_err());
    }

    #[test]
    fn test_project_key_uses_raw_repo() {
        let cli = parse(&["--team", "ops"]);
        let settings = Settings::resolve(&cli, Config::default()).unwrap();

        assert_eq!(
            settings.project_key("https://github.com/acme/app.git"),
            "ops-https://github.com/acme/app.git"
        );
    }
}
