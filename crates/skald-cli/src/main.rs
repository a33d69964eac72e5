use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skald_audit::{license_channel, AuditEvent, AuditTrailPlugin, LogLevel, LoggingConfig};
use skald_core::{AppenderConfig, LayoutConfig, SkaldConfig};
use skald_sources::{MemorySourceStore, SourceStore, Sources};

#[derive(Parser, Debug)]
#[command(name = "skald", version, about = "Skald audit trail and sources CLI")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "skald.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit trail operations
    Trail {
        #[command(subcommand)]
        cmd: TrailCommand,
    },

    /// Source configuration operations
    Sources {
        #[command(subcommand)]
        cmd: SourcesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TrailCommand {
    /// Read JSON-lines audit events from stdin and forward them through
    /// the license gate
    Run,

    /// Print the derived logging configuration as YAML
    LoggingConfig,
}

#[derive(Subcommand, Debug)]
enum SourcesCommand {
    /// Print the resolved configuration of a source as JSON
    Show {
        /// Source id
        #[arg(default_value = "default")]
        id: String,
    },

    /// List sources with a stored override
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SkaldConfig::from_file(&cli.config)?;

    match cli.cmd {
        Command::Trail { cmd } => match cmd {
            TrailCommand::Run => trail_run(&config).await,
            TrailCommand::LoggingConfig => {
                let derived = skald_audit::logging_config(&config.audit_trail);
                print!("{}", serde_yaml::to_string(&derived)?);
                Ok(())
            }
        },
        Command::Sources { cmd } => {
            let store = Arc::new(MemorySourceStore::with_overrides(config.sources.clone()));
            match cmd {
                SourcesCommand::Show { id } => {
                    let sources = Sources::new(store);
                    let resolved = sources.resolve(&id).await?;
                    println!("{}", serde_json::to_string_pretty(&resolved)?);
                    Ok(())
                }
                SourcesCommand::List => {
                    for id in store.list().await? {
                        println!("{id}");
                    }
                    Ok(())
                }
            }
        }
    }
}

/// Feed stdin events through the gate until EOF, then drain and stop.
async fn trail_run(config: &SkaldConfig) -> anyhow::Result<()> {
    let derived = skald_audit::logging_config(&config.audit_trail);
    init_logging(&derived)?;

    let (feed, watch) = license_channel();
    if let Some(features) = config.license {
        feed.push(features);
    } else {
        tracing::warn!("no license data configured, audit events will be dropped");
    }

    let mut plugin = AuditTrailPlugin::new(config.audit_trail.clone());
    let handle = plugin.setup(watch)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AuditEvent>(&line) {
            Ok(event) => handle.emit(event)?,
            Err(error) => tracing::warn!(%error, "skipping malformed audit event"),
        }
    }

    plugin.stop().await;
    Ok(())
}

/// Apply the derived logging configuration to this process: the CLI is
/// its own logging subsystem, so the registered appender and logger
/// levels become a `tracing_subscriber` setup.
fn init_logging(derived: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(derived)));

    let appender = derived
        .appenders
        .get(skald_audit::APPENDER_NAME)
        .cloned()
        .unwrap_or_else(AppenderConfig::default_console);

    match appender {
        AppenderConfig::Console { layout } => match layout {
            LayoutConfig::Pattern { highlight } => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(highlight)
                    .init();
            }
            LayoutConfig::Json => {
                tracing_subscriber::fmt().with_env_filter(filter).json().init();
            }
        },
        AppenderConfig::File { path } => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
    }

    Ok(())
}

fn filter_directives(derived: &LoggingConfig) -> String {
    let mut directives = vec!["info".to_string()];
    for logger in &derived.loggers {
        let level = match logger.level {
            LogLevel::Debug => "debug",
            LogLevel::Off => "off",
        };
        directives.push(format!("{}={}", logger.name, level));
    }
    directives.join(",")
}
