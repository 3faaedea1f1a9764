//! cardnav CLI - navigate a card deck with session-scoped history.
//!
//! Each invocation opens one session (`--session`, default `default`),
//! performs one command against it and exits. History and the signed-in
//! principal live in the session directory, so consecutive invocations
//! with the same session id behave like one browsing tab.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CARDNAV_*`)
//! 3. Project config (`.cardnav/config.toml` in the project root)
//! 4. Global config (`~/.cardnav/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `CARDNAV_DEBUG`: Enable debug mode (`true`/`false`)
//! - `CARDNAV_ALLOWED_USERS`: Comma separated allow-list
//! - `CARDNAV_MAX_HISTORY`: History capacity
//! - `CARDNAV_SESSION_PATH`: Custom session storage path
//! - `CARDNAV_CONTENT`: Card deck JSON file
//! - `CARDNAV_SESSION`: Session id (same as `--session`)

use anyhow::{Context, Result};
use cardnav_runtime::{
    ConfigError, ConfigLoader, ConfigResolver, HistoryEntry, NavConfig, NavSession,
};
use cardnav_types::{Handle, SessionId, TryNew};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// cardnav - card navigator with session history
#[derive(Parser, Debug)]
#[command(name = "cardnav")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// Session to operate on
    #[arg(long, env = "CARDNAV_SESSION", default_value = "default")]
    session: String,

    /// Custom session storage path
    #[arg(long)]
    session_path: Option<PathBuf>,

    /// Card deck JSON file
    #[arg(long)]
    content: Option<PathBuf>,

    /// Allow a handle onto privileged routes (repeatable; replaces the configured list)
    #[arg(long = "allow", value_name = "HANDLE")]
    allow: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Navigate to a path and print the rendered view
    Visit {
        /// Path such as `/`, `/intro` or `/admin`
        path: String,
    },
    /// Print the session history, oldest first
    History,
    /// Truncate history after INDEX and show the new tip
    Jump {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Clear the session history
    Clear,
    /// Sign in as HANDLE
    Login {
        #[arg(value_parser = parse_handle)]
        handle: Handle,
    },
    /// Sign out
    Logout,
    /// Print the access gate state
    Whoami,
    /// Delete everything stored for this session
    EndSession,
}

fn parse_handle(s: &str) -> Result<Handle, String> {
    Handle::try_from(s).map_err(|e| e.to_string())
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
#[derive(Debug)]
struct CliConfigResolver {
    project_root: PathBuf,
    debug: bool,
    session_path: Option<PathBuf>,
    content: Option<PathBuf>,
    allow: Vec<String>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            debug: args.debug,
            session_path: args.session_path.clone(),
            content: args.content.clone(),
            allow: args.allow.clone(),
        }
    }

    fn resolve(&self) -> Result<NavConfig, ConfigError> {
        self.resolve_with(ConfigLoader::new())
    }

    fn resolve_with(&self, loader: ConfigLoader) -> Result<NavConfig, ConfigError> {
        let mut config = loader.with_project_root(&self.project_root).load()?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut NavConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref p) = self.session_path {
            config.paths.session_dir = Some(p.clone());
        }
        if let Some(ref p) = self.content {
            config.paths.content_file = Some(p.clone());
        }
        if !self.allow.is_empty() {
            config.auth.allowed_users.clone_from(&self.allow);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);

    // Resolve config before tracing so a config-level `debug = true` applies.
    let config = resolver
        .resolve()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn".
    // Logs go to stderr; stdout carries only command output.
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    info!(path = %resolver.project_root.display(), "Project root");

    let session_id = SessionId::try_new(args.session.clone())
        .with_context(|| format!("Cannot open session '{}'", args.session))?;
    let session = NavSession::open(&config, session_id)?;

    let stdout = std::io::stdout();
    execute(args.command, session, &mut stdout.lock()).await
}

/// Runs one command against an open session.
async fn execute(command: Command, session: NavSession, out: &mut impl Write) -> Result<()> {
    let nav = session.navigator();

    match command {
        Command::Visit { path } => {
            writeln!(out, "{}", nav.navigate(&path))?;
        }
        Command::History => {
            let entries = nav.history();
            if entries.is_empty() {
                writeln!(out, "(no history)")?;
            }
            let last = entries.len().saturating_sub(1);
            for (index, entry) in entries.iter().enumerate() {
                writeln!(out, "{}", history_line(index, entry, index == last))?;
            }
        }
        Command::Jump { index } => match nav.jump(index) {
            Some(view) => writeln!(out, "{view}")?,
            None => writeln!(out, "(history empty)")?,
        },
        Command::Clear => {
            nav.clear_history();
            writeln!(out, "History cleared")?;
        }
        Command::Login { handle } => {
            session.login(handle.clone()).await?;
            writeln!(out, "Signed in as {handle} ({})", nav.gate().state())?;
        }
        Command::Logout => {
            session.logout().await;
            writeln!(out, "{}", nav.gate().state())?;
        }
        Command::Whoami => {
            let gate = nav.gate();
            match gate.current_principal() {
                Some(principal) => writeln!(out, "{}: {}", gate.state(), principal.handle())?,
                None => writeln!(out, "{}", gate.state())?,
            }
        }
        Command::EndSession => {
            let id = session.session_id().as_str().to_string();
            session.end()?;
            writeln!(out, "Session ended: {id}")?;
        }
    }

    Ok(())
}

fn history_line(index: usize, entry: &HistoryEntry, is_current: bool) -> String {
    let marker = if is_current { '*' } else { ' ' };
    let time = entry
        .recorded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.timestamp().to_string());
    format!("{marker} {index}: {}  ({time})", entry.page_id())
}
