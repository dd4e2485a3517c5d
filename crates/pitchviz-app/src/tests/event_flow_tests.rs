use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use image::RgbaImage;
use kanal::{AsyncReceiver, AsyncSender};
use pitchviz_config::{BackgroundStyle, Config};
use pitchviz_lang_japanese::PitchDictionary;
use pitchviz_render::{ExportError, Rasterizer, SvgRasterizer};
use pitchviz_types::{AppEvent, ExportTarget, PitchSymbol};
use tokio::sync::Barrier;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::events::event_loop;
use crate::state::{AppState, Services};

const TABLE: &str = r#"{"tree": [2], "treetop": [0], "Tree": [1], "さくら": [0], "はし": [1, 2]}"#;

struct Harness {
    state: Arc<AppState>,
    ui_to_app: AsyncSender<AppEvent>,
    app_to_ui: AsyncReceiver<AppEvent>,
    event_loop: JoinHandle<anyhow::Result<()>>,
}

/// Holds every render until `parties` of them are in flight, then waits
/// `delay` before drawing
struct SlowRasterizer {
    barrier: Option<Barrier>,
    delay: Duration,
    finished: Arc<AtomicUsize>,
}

impl SlowRasterizer {
    fn new(parties: usize, delay: Duration) -> Self {
        Self {
            barrier: (parties > 1).then(|| Barrier::new(parties)),
            delay,
            finished: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl Rasterizer for SlowRasterizer {
    async fn rasterize(&self, svg: &str, pixel_height: u32) -> Result<RgbaImage, ExportError> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        tokio::time::sleep(self.delay).await;
        let image = SvgRasterizer.rasterize(svg, pixel_height).await?;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(image)
    }
}

impl Harness {
    fn start(config: Config, with_dictionary: bool) -> Self {
        Self::start_with(config, with_dictionary, None)
    }

    fn start_with(
        config: Config,
        with_dictionary: bool,
        rasterizer: Option<Arc<dyn Rasterizer>>,
    ) -> Self {
        let mut services = Services::new(&config);
        if let Some(rasterizer) = rasterizer {
            services.rasterizer = rasterizer;
        }
        let services = Arc::new(services);
        let state = Arc::new(AppState::new(config));
        if with_dictionary {
            let dictionary = PitchDictionary::from_json(TABLE, "test").unwrap();
            assert!(state.install_dictionary(Arc::new(dictionary)));
        }

        let (ui_to_app, ui_to_app_rx) = kanal::bounded_async(16);
        let (app_to_ui_tx, app_to_ui) = kanal::bounded_async(16);
        let event_loop = tokio::spawn(event_loop(
            state.clone(),
            services,
            ui_to_app_rx,
            app_to_ui_tx,
        ));

        Self {
            state,
            ui_to_app,
            app_to_ui,
            event_loop,
        }
    }

    async fn send(&self, event: AppEvent) {
        self.ui_to_app.send(event).await.expect("send failed");
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(5), self.app_to_ui.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - event never arrived!"),
        }
    }

    async fn quit(self) {
        self.send(AppEvent::Quit).await;
        let result = timeout(Duration::from_secs(5), self.event_loop)
            .await
            .expect("event loop did not stop");
        result.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_pattern_input_is_normalized_and_drawn() {
    let harness = Harness::start(Config::default(), false);

    harness.send(AppEvent::PatternInput("lh x l".to_string())).await;

    match harness.next().await {
        AppEvent::ShowDiagram(view) => {
            assert_eq!(view.pattern, "LHL");
            assert_eq!(view.particle, PitchSymbol::Low);
            assert_eq!(view.layout.anchors.len(), 4);
            assert_eq!(view.layout.width, 120.0);
            assert!(view.svg.starts_with("<svg"));
            assert!(view.label.is_none());
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn test_particle_change_redraws_current_pattern() {
    let harness = Harness::start(Config::default(), false);

    harness.send(AppEvent::PatternInput("HL".to_string())).await;
    harness.next().await;
    harness.send(AppEvent::ParticleChanged(PitchSymbol::High)).await;

    match harness.next().await {
        AppEvent::ShowDiagram(view) => {
            assert_eq!(view.pattern, "HL");
            let particle = view.layout.terminal().unwrap();
            assert_eq!(particle.band, PitchSymbol::High);
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn test_search_pick_and_dismiss() {
    let harness = Harness::start(Config::default(), true);

    harness.send(AppEvent::SearchText("tree".to_string())).await;
    match harness.next().await {
        AppEvent::ShowResults(hits) => {
            let words: Vec<&str> = hits.iter().map(|hit| hit.word.as_str()).collect();
            assert_eq!(words, vec!["tree", "treetop"]);
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    // Blank query leaves the shown results alone
    harness.send(AppEvent::SearchText("   ".to_string())).await;
    harness.send(AppEvent::SelectResult(0)).await;

    assert!(matches!(harness.next().await, AppEvent::HideResults));
    match harness.next().await {
        AppEvent::ShowDiagram(view) => {
            assert_eq!(view.pattern, "LHLL");
            assert_eq!(view.particle, PitchSymbol::Low);
            assert!(view.label.unwrap().starts_with("tree ②"));
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    assert!(harness.state.results().await.is_empty());
    let pattern = harness.state.pattern.read().await.clone();
    assert_eq!(pattern.pattern, "LHLL");

    harness.quit().await;
}

#[tokio::test]
async fn test_select_uses_first_accent_alternative() {
    let harness = Harness::start(Config::default(), true);

    harness.send(AppEvent::SearchText("はし".to_string())).await;
    harness.next().await;
    harness.send(AppEvent::SelectResult(0)).await;
    harness.next().await;

    match harness.next().await {
        AppEvent::ShowDiagram(view) => {
            assert_eq!(view.pattern, "HL");
            assert_eq!(view.particle, PitchSymbol::Low);
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn test_select_without_results_reports_status() {
    let harness = Harness::start(Config::default(), true);

    harness.send(AppEvent::SelectResult(3)).await;
    match harness.next().await {
        AppEvent::StatusUpdate(text) => assert!(text.contains("#4")),
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn test_search_without_dictionary() {
    let harness = Harness::start(Config::default(), false);

    harness.send(AppEvent::SearchText("tree".to_string())).await;
    assert!(matches!(harness.next().await, AppEvent::StatusUpdate(_)));

    harness.quit().await;
}

#[tokio::test]
async fn test_dismiss_clears_results() {
    let harness = Harness::start(Config::default(), true);

    harness.send(AppEvent::SearchText("さく".to_string())).await;
    harness.next().await;
    harness.send(AppEvent::DismissResults).await;

    assert!(matches!(harness.next().await, AppEvent::HideResults));
    assert!(harness.state.results().await.is_empty());

    harness.quit().await;
}

#[tokio::test]
async fn test_export_without_diagram_fails() {
    let harness = Harness::start(Config::default(), false);

    harness.send(AppEvent::Export(ExportTarget::Clipboard)).await;
    match harness.next().await {
        AppEvent::ExportFailed { target, .. } => assert_eq!(target, ExportTarget::Clipboard),
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn test_export_invalid_color_then_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("pitch.png");

    let mut config = Config::default();
    config.export.background = BackgroundStyle::Color;
    config.export.background_color = "#12".to_string();
    let harness = Harness::start(config, false);

    harness.send(AppEvent::PatternInput("LHH".to_string())).await;
    harness.next().await;

    harness
        .send(AppEvent::Export(ExportTarget::File(path.clone())))
        .await;
    match harness.next().await {
        AppEvent::ExportFailed { error, .. } => assert!(error.contains("#12")),
        other => panic!("Wrong event type: {other:?}"),
    }
    assert!(!path.exists());

    harness.state.config.write().await.export.background_color = "#ffffff".to_string();
    harness
        .send(AppEvent::Export(ExportTarget::File(path.clone())))
        .await;
    match harness.next().await {
        AppEvent::ExportFinished { target, detail } => {
            assert_eq!(target, ExportTarget::File(path.clone()));
            assert!(detail.contains("PNG"));
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    let image = image::open(&path).unwrap();
    assert_eq!(image.height(), 100);

    harness.quit().await;
}

#[tokio::test]
async fn test_invalid_style_color_rejected_before_spawn() {
    let mut config = Config::default();
    config.diagram.line_color = "greenish".to_string();
    let rasterizer = Arc::new(SlowRasterizer::new(1, Duration::ZERO));
    let finished = rasterizer.finished.clone();
    let harness = Harness::start_with(config, false, Some(rasterizer));

    harness.send(AppEvent::PatternInput("LH".to_string())).await;
    harness.next().await;

    harness.send(AppEvent::Export(ExportTarget::Clipboard)).await;
    match harness.next().await {
        AppEvent::ExportFailed { error, .. } => assert!(error.contains("greenish")),
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_overlapping_exports_finish_independently() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    // Both renders must be in flight at once or the barrier never opens
    let rasterizer = Arc::new(SlowRasterizer::new(2, Duration::from_millis(20)));
    let harness = Harness::start_with(Config::default(), false, Some(rasterizer));

    harness.send(AppEvent::PatternInput("HLL".to_string())).await;
    harness.next().await;

    harness
        .send(AppEvent::Export(ExportTarget::File(first.clone())))
        .await;
    harness
        .send(AppEvent::Export(ExportTarget::File(second.clone())))
        .await;

    let mut done = Vec::new();
    for _ in 0..2 {
        match harness.next().await {
            AppEvent::ExportFinished { target, .. } => done.push(target),
            other => panic!("Wrong event type: {other:?}"),
        }
    }
    assert!(done.contains(&ExportTarget::File(first.clone())));
    assert!(done.contains(&ExportTarget::File(second.clone())));
    assert!(first.exists());
    assert!(second.exists());

    harness.quit().await;
}

#[tokio::test]
async fn test_quit_waits_for_running_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pitch.png");
    let rasterizer = Arc::new(SlowRasterizer::new(1, Duration::from_millis(300)));
    let harness = Harness::start_with(Config::default(), false, Some(rasterizer));

    harness.send(AppEvent::PatternInput("LHH".to_string())).await;
    harness.next().await;

    harness
        .send(AppEvent::Export(ExportTarget::File(path.clone())))
        .await;
    harness.send(AppEvent::Quit).await;

    match harness.next().await {
        AppEvent::ExportFinished { target, .. } => assert_eq!(target, ExportTarget::File(path.clone())),
        other => panic!("Wrong event type: {other:?}"),
    }

    let result = timeout(Duration::from_secs(5), harness.event_loop)
        .await
        .expect("event loop did not stop");
    result.unwrap().unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_loop_error_still_waits_for_exports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pitch.png");
    let rasterizer = Arc::new(SlowRasterizer::new(1, Duration::from_millis(300)));
    let finished = rasterizer.finished.clone();
    let Harness {
        ui_to_app,
        app_to_ui,
        event_loop,
        ..
    } = Harness::start_with(Config::default(), false, Some(rasterizer));

    ui_to_app
        .send(AppEvent::PatternInput("LH".to_string()))
        .await
        .unwrap();
    timeout(Duration::from_secs(5), app_to_ui.recv())
        .await
        .unwrap()
        .unwrap();
    ui_to_app
        .send(AppEvent::Export(ExportTarget::File(path.clone())))
        .await
        .unwrap();

    // With the UI gone the next redraw fails and the loop exits with an error
    drop(app_to_ui);
    ui_to_app
        .send(AppEvent::PatternInput("HL".to_string()))
        .await
        .unwrap();

    let result = timeout(Duration::from_secs(5), event_loop)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_err());
    assert_eq!(finished.load(Ordering::SeqCst), 1);
    assert!(path.exists());
}

#[tokio::test]
async fn test_pick_reports_particle_change() {
    let harness = Harness::start(Config::default(), true);

    harness.send(AppEvent::ParticleChanged(PitchSymbol::High)).await;
    harness.next().await;

    harness.send(AppEvent::SearchText("tree".to_string())).await;
    harness.next().await;
    harness.send(AppEvent::SelectResult(0)).await;

    assert!(matches!(harness.next().await, AppEvent::HideResults));
    match harness.next().await {
        AppEvent::ShowDiagram(view) => assert_eq!(view.particle, PitchSymbol::Low),
        other => panic!("Wrong event type: {other:?}"),
    }
    match harness.next().await {
        AppEvent::StatusUpdate(text) => {
            assert!(text.contains("low"));
            assert!(text.contains("tree"));
        }
        other => panic!("Wrong event type: {other:?}"),
    }

    harness.quit().await;
}
