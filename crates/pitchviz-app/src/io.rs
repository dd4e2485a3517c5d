use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kanal::AsyncSender;
use pitchviz_types::{AppEvent, ExportTarget, PitchSymbol};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
commands:
  p <pattern>          set the pitch pattern (H/L, anything else is dropped)
  particle high|low    set the particle pitch
  s <query>            search the pitch dictionary
  pick <n>             use result n from the last search
  dismiss              hide search results
  png [path]           save the current diagram as PNG
  copy                 copy the current diagram to the clipboard
  help                 show this text
  quit                 exit";

/// One line of interactive input
#[derive(Debug, Clone)]
pub enum Command {
    Event(AppEvent),
    Help,
    Empty,
}

pub fn parse_command(line: &str, default_export: &Path) -> Result<Command, String> {
    if line.trim().is_empty() {
        return Ok(Command::Empty);
    }

    // Only the separator after the command word is consumed, a search
    // query keeps its own spaces
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    let (name, raw_rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = raw_rest.trim();

    let event = match name {
        "p" | "pattern" => AppEvent::PatternInput(rest.to_string()),
        "particle" => {
            let particle: PitchSymbol = rest.parse().map_err(|e| format!("{e}"))?;
            AppEvent::ParticleChanged(particle)
        }
        "s" | "search" => AppEvent::SearchText(raw_rest.to_string()),
        "pick" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => AppEvent::SelectResult(n - 1),
            _ => return Err(format!("pick expects a result number, got '{rest}'")),
        },
        "dismiss" => AppEvent::DismissResults,
        "png" => {
            let path = if rest.is_empty() {
                default_export.to_path_buf()
            } else {
                PathBuf::from(rest)
            };
            AppEvent::Export(ExportTarget::File(path))
        }
        "copy" => AppEvent::Export(ExportTarget::Clipboard),
        "help" | "?" => return Ok(Command::Help),
        "q" | "quit" | "exit" => AppEvent::Quit,
        other => return Err(format!("Unknown command '{other}', try 'help'")),
    };

    Ok(Command::Event(event))
}

/// Reads commands from stdin and forwards them to the event loop.
/// End of input counts as quit.
pub async fn watcher_io(
    default_export: PathBuf,
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Reading commands from stdin");

    let quit_sent = Arc::new(AtomicBool::new(false));
    let on_line = {
        let quit_sent = quit_sent.clone();
        let ui_to_app_tx = ui_to_app_tx.clone();
        move |line: String| {
            let quit_sent = quit_sent.clone();
            let ui_to_app_tx = ui_to_app_tx.clone();
            let app_to_ui_tx = app_to_ui_tx.clone();
            let default_export = default_export.clone();
            async move {
                let (tx, event) = match parse_command(&line, &default_export) {
                    Ok(Command::Event(event)) => (ui_to_app_tx, event),
                    Ok(Command::Help) => (app_to_ui_tx, AppEvent::StatusUpdate(HELP.to_string())),
                    Ok(Command::Empty) => return true,
                    Err(message) => {
                        tracing::debug!("Rejected input line: {}", line);
                        (app_to_ui_tx, AppEvent::StatusUpdate(message))
                    }
                };

                let quit = matches!(event, AppEvent::Quit);
                if let Err(e) = tx.send(event).await {
                    tracing::error!("Failed to forward command: {}", e);
                    return false;
                }
                if quit {
                    quit_sent.store(true, Ordering::SeqCst);
                }
                !quit
            }
        }
    };

    tokio::select! {
        result = pitchviz_io::console::watch_stdin(on_line) => {
            if let Err(e) = result {
                tracing::error!("Stdin watcher error: {}", e);
            }
            if !quit_sent.load(Ordering::SeqCst) {
                ui_to_app_tx.send(AppEvent::Quit).await?;
            }
        }
        _ = cancel.cancelled() => {
            tracing::info!("Stdin watcher stopping");
        }
    }

    Ok(())
}
