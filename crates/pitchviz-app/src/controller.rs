use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use pitchviz_types::AppEvent;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::dictionary::load_dictionary;
use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::{AppState, Services};
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    services: Arc<Services>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, services: Arc<Services>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity),
            state,
            services,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    pub fn spawn_event_loop(&self) -> JoinHandle<anyhow::Result<()>> {
        tokio::spawn(event_loop(
            self.state.clone(),
            self.services.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ))
    }

    /// UI, stdin watcher and the dictionary load. All of them stop on
    /// [`AppController::shutdown`].
    pub async fn spawn_tasks(&self, svg_output: Option<PathBuf>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            svg_output,
            self.cancel_token.child_token(),
        ));

        let default_export = self.state.config.read().await.export.default_path();
        tasks.spawn(watcher_io(
            default_export,
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks.spawn(load_dictionary(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
