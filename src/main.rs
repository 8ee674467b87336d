//! SPA router demo (v1)
//!
//! Drives the navigation router against an in-memory history and either
//! stdout or a file sink.
//!
//! # Architecture Overview
//!
//! ```text
//!   navigate(path)        ┌──────────────────────────────────────────────┐
//!   ──────────────────────┼─▶ guards ─▶ before ─▶ loading ─▶ resolve ─┐   │
//!                         │                                          │   │
//!   history back/forward  │      ┌──────────┐      ┌─────────────┐   │   │
//!   ──────────────────────┼─────▶│ popstate │      │ route table │◀──┘   │
//!                         │      │ listener │      │ + not-found │       │
//!                         │      └──────────┘      └──────┬──────┘       │
//!                         │                               ▼              │
//!   content sink          │   swap (page | 404 | error) ─▶ after hook    │
//!   ◀─────────────────────┼───────────────────────────────────────────── │
//!                         │                                              │
//!                         │  config (+ hot reload) · session · logging   │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use spa_router::config::watcher::ConfigWatcher;
use spa_router::config::{load_config, AppConfig};
use spa_router::history::{History, MemoryHistory};
use spa_router::lifecycle::signals::shutdown_on_ctrl_c;
use spa_router::lifecycle::startup::{apply_page_updates, build_router, Collaborators};
use spa_router::observability::logging::init_logging;
use spa_router::routing::{Credentials, NavigationOutcome, Router};
use spa_router::sink::{ContentSink, FileSink, MemorySink};
use spa_router::{SessionState, Shutdown};

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Client-side navigation router demo", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate through paths and print the result of each step.
    /// `:back`, `:forward` and `:reload` act like the browser buttons.
    Navigate {
        #[arg(required = true)]
        steps: Vec<String>,

        /// Start with a stored credential
        #[arg(long)]
        signed_in: bool,
    },
    /// Validate the configuration and list the routes
    Check,
    /// Render into a file and follow config changes until Ctrl-C
    Watch {
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,

        /// Path shown at startup
        #[arg(long, default_value = "home")]
        start: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability)?;
    tracing::info!(
        base_path = %config.router.base_path,
        not_found = %config.router.not_found_path,
        pages = config.pages.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Navigate { steps, signed_in } => navigate(&config, steps, signed_in).await?,
        Commands::Check => check(&config)?,
        Commands::Watch { output, start } => watch(&config, cli.config, output, start).await?,
    }
    Ok(())
}

async fn navigate(
    config: &AppConfig,
    steps: Vec<String>,
    signed_in: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let history = Arc::new(MemoryHistory::default());
    let sink = Arc::new(MemorySink::default());
    let credentials = Arc::new(Credentials::new());
    if signed_in {
        credentials.sign_in("cli");
    }
    let router = build_router(
        config,
        Collaborators {
            history: history.clone(),
            sink: sink.clone(),
            session: Arc::new(SessionState::new()),
            credentials,
        },
    )?;

    for step in steps {
        let outcome = match step.as_str() {
            ":back" if history.back() => router.handle_popstate().await,
            ":forward" if history.forward() => router.handle_popstate().await,
            ":back" | ":forward" => {
                println!("{step}: nothing to move to");
                continue;
            }
            ":reload" => router.reload().await,
            path => router.navigate(path).await,
        };
        print_step(&router, &outcome, &history.current_address(), &sink.content());
    }
    Ok(())
}

fn print_step(router: &Router, outcome: &NavigationOutcome, address: &str, content: &str) {
    let title = router.get_route_config(&outcome.path).config().title.clone();
    println!("── {} [{}] {} · {}", address, outcome.status.as_str(), outcome.path, title);
    println!("{content}");
}

fn check(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = build_router(
        config,
        Collaborators {
            history: Arc::new(MemoryHistory::default()),
            sink: Arc::new(MemorySink::default()),
            session: Arc::new(SessionState::new()),
            credentials: Arc::new(Credentials::new()),
        },
    )?;
    println!("configuration OK, {} routes:", router.routes().len());
    for path in router.routes() {
        let entry = router.get_route_config(&path);
        let auth = if entry.config().requires_auth { " (auth)" } else { "" };
        println!("  {} → {}{}", router.address_for(&path), entry.config().title, auth);
    }
    Ok(())
}

async fn watch(
    config: &AppConfig,
    config_path: Option<PathBuf>,
    output: PathBuf,
    start: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let history = Arc::new(MemoryHistory::default());
    let sink: Arc<dyn ContentSink> = Arc::new(FileSink::new(&output));
    let router = Arc::new(build_router(
        config,
        Collaborators {
            history: history.clone(),
            sink,
            session: Arc::new(SessionState::new()),
            credentials: Arc::new(Credentials::new()),
        },
    )?);

    let shutdown = Shutdown::new();
    let outcome = router.navigate(&start).await;
    tracing::info!(output = %output.display(), status = outcome.status.as_str(), "Initial page rendered");

    let listener = {
        let router = router.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move { router.listen(rx).await })
    };

    // Keep the watcher handle alive for the whole session.
    let _watcher = match config_path {
        Some(path) => {
            let (watcher, mut updates) = ConfigWatcher::new(&path);
            let handle = watcher.run()?;
            let router = router.clone();
            let mut stop = shutdown.subscribe();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        update = updates.recv() => match update {
                            Some(config) => apply_page_updates(&router, &config.pages).await,
                            None => break,
                        },
                        _ = stop.recv() => break,
                    }
                }
            });
            Some(handle)
        }
        None => None,
    };

    shutdown_on_ctrl_c(&shutdown).await;
    listener.await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
