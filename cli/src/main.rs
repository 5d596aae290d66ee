// Filebot CLI - Command Line Interface Entry Point

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use filebot_config::{Config, ConfigLoader};
use filebot_core::devserver;
use filebot_core::tools::build_registry;
use filebot_core::{generate_simple_response, run_agent};
use filebot_protocol::{AgentEvent, AgentStatus};

/// Filebot - chat-driven file edit agent
#[derive(Parser, Debug)]
#[command(name = "filebot")]
#[command(version, about, long_about = None)]
struct TopCli {
    #[clap(flatten)]
    config_overrides: CliConfigOverrides,

    #[clap(subcommand)]
    command: Commands,
}

/// CLI configuration overrides
#[derive(Debug, clap::Args)]
struct CliConfigOverrides {
    /// Configuration override in key=value format
    #[arg(short = 'c', long = "config", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

impl CliConfigOverrides {
    fn parse(&self) -> Result<Vec<(String, String)>> {
        self.overrides
            .iter()
            .map(|raw| {
                raw.split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .with_context(|| format!("invalid override (expected KEY=VALUE): {raw}"))
            })
            .collect()
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a tool-enabled agent turn against a project
    Run {
        /// Task description
        task: String,

        /// Project directory
        #[arg(short = 'd', long = "dir")]
        dir: Option<PathBuf>,
    },

    /// Ask a plain question, no tools
    Ask {
        /// Question text
        question: String,
    },

    /// List the registered tools
    Tools,

    /// Launch the project's dev server and print its URL
    Dev {
        /// Project directory
        #[arg(short = 'd', long = "dir")]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let cli = TopCli::parse();

    // The project directory decides which .filebot/config.toml layer
    // applies, so it must be resolved before the config is loaded.
    let project_hint = match &cli.command {
        Commands::Run { dir, .. } | Commands::Dev { dir } => dir.clone(),
        _ => None,
    };
    let config = load_config(&cli.config_overrides, project_hint)?;

    match cli.command {
        Commands::Run { task, dir } => run_task(&config, &task, dir).await,
        Commands::Ask { question } => ask(&config, &question).await,
        Commands::Tools => list_tools(),
        Commands::Dev { dir } => run_dev(dir).await,
    }
}

fn load_config(overrides: &CliConfigOverrides, project_dir: Option<PathBuf>) -> Result<Config> {
    let dir = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot resolve current directory")?,
    };
    ConfigLoader::new()
        .with_project_dir(dir)
        .load_with_cli_overrides(overrides.parse()?)
}

fn project_dir(config: &Config, dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir);
    }
    if let Some(root) = &config.project_root {
        return Ok(root.clone());
    }
    std::env::current_dir().context("cannot resolve current directory")
}

fn require_api_key(config: &Config) -> Result<String> {
    config
        .resolve_api_key()
        .context("no API key configured (set model.api_key or the provider's env var)")
}

async fn run_task(config: &Config, task: &str, dir: Option<PathBuf>) -> Result<()> {
    let root = project_dir(config, dir)?;
    let api_key = require_api_key(config)?;
    info!(provider = %config.model.provider, root = %root.display(), "starting run");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                AgentEvent::Progress(p) => println!("[{}] {}", render_phase(p.phase), p.message),
                AgentEvent::ServerUrl(s) => println!("[url] {}", s.url),
                AgentEvent::Result(_) => {}
            }
        }
    });

    let result = run_agent(&config.model.provider, &api_key, task, &root, &tx).await;
    drop(tx);
    printer.await.ok();

    println!("{}", result.message);
    match result.status {
        AgentStatus::Success => Ok(()),
        AgentStatus::Error => bail!("run failed"),
    }
}

fn render_phase(phase: filebot_protocol::ProgressPhase) -> &'static str {
    match phase {
        filebot_protocol::ProgressPhase::ToolUse => "tool",
        filebot_protocol::ProgressPhase::ToolResult => "done",
    }
}

async fn ask(config: &Config, question: &str) -> Result<()> {
    let api_key = require_api_key(config)?;
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let result = generate_simple_response(&config.model.provider, &api_key, question, &tx).await;
    println!("{}", result.message);
    match result.status {
        AgentStatus::Success => Ok(()),
        AgentStatus::Error => bail!("request failed"),
    }
}

fn list_tools() -> Result<()> {
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    let registry = build_registry(&cwd)?;
    println!("{}", registry.catalog());
    Ok(())
}

async fn run_dev(dir: Option<PathBuf>) -> Result<()> {
    let root = dir
        .map(Ok)
        .unwrap_or_else(std::env::current_dir)
        .context("cannot resolve project directory")?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut child = devserver::launch(&root, tx)?;

    if let Some(AgentEvent::ServerUrl(event)) = rx.recv().await {
        println!("{}", event.url);
    }

    // Keep streaming until the server exits.
    let status = child.wait().await?;
    if !status.success() {
        bail!("dev server exited with {status}");
    }
    Ok(())
}
