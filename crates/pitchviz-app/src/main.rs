use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use pitchviz_config::Config;
use pitchviz_types::{AppEvent, PitchSymbol};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod controller;
pub mod dictionary;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::commands::Outputs;
use self::controller::AppController;
use self::state::{AppState, Services};

#[derive(Parser)]
#[command(name = "pitchviz", version, about = "Japanese pitch accent diagrams")]
struct Cli {
    /// JSON config or profile file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Debug, Default)]
struct OutputArgs {
    /// Write the SVG to this file
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Render a PNG to this file
    #[arg(long)]
    png: Option<PathBuf>,
    /// Copy the rendered PNG to the clipboard
    #[arg(long)]
    copy: bool,
}

impl From<OutputArgs> for Outputs {
    fn from(args: OutputArgs) -> Self {
        Self {
            svg: args.svg,
            png: args.png,
            copy: args.copy,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Draw an H/L pattern
    Draw {
        pattern: String,
        /// Particle pitch, defaults to the configured one
        #[arg(long)]
        particle: Option<PitchSymbol>,
        #[command(flatten)]
        outputs: OutputArgs,
    },
    /// Draw a word from its accent type
    Word {
        word: String,
        #[arg(long)]
        accent: u32,
        #[command(flatten)]
        outputs: OutputArgs,
    },
    /// Search the pitch dictionary
    Search { query: String },
    /// Read commands from stdin (default)
    Interactive {
        /// Also write every diagram to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = profile::load_config(cli.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(dispatch(config, cli.command));

    // A pending stdin read never finishes on its own
    runtime.shutdown_timeout(Duration::from_millis(500));
    result
}

async fn dispatch(config: Config, command: Option<Command>) -> anyhow::Result<()> {
    match command {
        Some(Command::Draw {
            pattern,
            particle,
            outputs,
        }) => {
            let particle = particle.unwrap_or(config.default_particle);
            commands::draw(&config, &pattern, particle, &outputs.into()).await
        }
        Some(Command::Word {
            word,
            accent,
            outputs,
        }) => commands::word(&config, &word, accent, &outputs.into()).await,
        Some(Command::Search { query }) => commands::search(&config, &query).await,
        Some(Command::Interactive { svg }) => run(config, svg, ctrl_c()).await,
        None => run(config, None, ctrl_c()).await,
    }
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Interactive session until quit, end of input or `shutdown`
pub async fn run(
    config: Config,
    svg_output: Option<PathBuf>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let capacity = config.channel_capacity;
    let services = Arc::new(Services::new(&config));
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(state, services, capacity);
    let mut tasks = controller.spawn_tasks(svg_output).await;
    let mut event_loop = controller.spawn_event_loop();

    println!("{}", io::HELP);

    let finished = tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            None
        }
        result = &mut event_loop => Some(result),
    };

    let result = match finished {
        Some(result) => result,
        None => {
            // Let in-flight exports finish before tearing down
            controller.ui_sender().send(AppEvent::Quit).await?;
            event_loop.await
        }
    };

    controller.shutdown();
    while let Some(task) = tasks.join_next().await {
        match task {
            Ok(Err(e)) => tracing::error!("Task exited with error: {}", e),
            Err(e) => tracing::error!("Task panicked: {}", e),
            Ok(Ok(())) => {}
        }
    }

    match result {
        Ok(inner) => inner,
        Err(e) => Err(anyhow::anyhow!("event loop panicked: {e}")),
    }
}
