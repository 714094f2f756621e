//! SonarOp CLI - analyse a repository with SonarQube and hand out a temporary viewer account

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use log::{LevelFilter, debug};

mod account;
mod cli;
mod client;
mod config;
mod error;
mod git;
mod output;
mod permissions;
mod scanner;

use cli::Cli;
use cli::prompt::TerminalPrompter;
use cli::run::{Collaborators, Outcome};
use client::SonarClient;
use config::{Config, Settings};
use error::Result;
use git::GitCli;
use output::Terminal;
use scanner::SonarScanner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("sonarop", LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: Cli) -> Result<()> {
    let file = Config::load_at(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file)?;
    debug!("Settings: team={:?}, clone_dir={}", settings.team_name, settings.clone_dir.display());

    println!("{}", "SonarOp".bold().green());

    let deps = Collaborators {
        api: Arc::new(SonarClient::new(settings.timeout)?),
        cloner: Arc::new(GitCli::new()),
        scanner: Arc::new(SonarScanner::new(settings.scanner.clone())),
        prompter: Arc::new(TerminalPrompter),
        console: Arc::new(Terminal::new()),
    };

    match cli::run::run(&settings, cli.repo, &deps).await? {
        Outcome::Granted(account) => debug!("Provisioned {:?}", account),
        Outcome::GrantFailed(e) => debug!("Analysis done without viewer access: {}", e),
    }
    Ok(())
}
