use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use voxnote::list::{InMemoryNoteStore, ListAction, ListExecutor, NoteId};
use voxnote::reminder::{FavoriteCatalog, ReminderIntentParser};
use voxnote::routing::{
    AdaptiveRouter, HintDetector, NoteContext, RouteDecision, RouterConfig, VoiceCommandRouter,
    VoiceHeuristicsConfig, VoiceSegment,
};
use voxnote::telemetry::TelemetryRecorder;

/// Reads utterances from stdin and prints how each one would be routed.
#[derive(Debug, Parser)]
#[command(name = "voxnote", version)]
struct Args {
    /// JSON file with adaptive router weights.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with favorite places.
    #[arg(long)]
    favorites: Option<PathBuf>,

    /// The current note is a checklist.
    #[arg(long)]
    list_mode: bool,

    #[arg(long, default_value_t = 0)]
    pending_jobs: u32,

    /// Recognizer confidence attached to every segment.
    #[arg(long)]
    confidence: Option<f32>,

    /// Route everything as a plain note.
    #[arg(long)]
    disable_commands: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let args = Args::parse();

    let heuristics = match &args.config {
        Some(path) => VoiceHeuristicsConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => VoiceHeuristicsConfig::default(),
    };
    let favorites: FavoriteCatalog = match &args.favorites {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FavoriteCatalog::default(),
    };
    tracing::info!(favorites = favorites.len(), "favorites loaded");

    let recorder = Arc::new(TelemetryRecorder::new());
    let router = VoiceCommandRouter::new(
        RouterConfig {
            voice_commands_enabled: !args.disable_commands,
        },
        ReminderIntentParser::with_favorites(Arc::new(favorites)),
    )
    .with_observer(recorder.clone());
    let detector = HintDetector::new(router.clone());
    let adaptive = AdaptiveRouter::new(heuristics).with_observer(recorder.clone());
    let store = Arc::new(InMemoryNoteStore::new());
    let executor = ListExecutor::new(store).with_observer(recorder.clone());

    let mut current_note: Option<NoteId> = None;
    let mut list_mode = args.list_mode;

    tracing::info!("voxnote ready, one utterance per line");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let hint = detector.detect(text, list_mode);
        let segment = VoiceSegment::from_text(text, args.confidence);
        let context = NoteContext {
            is_list_mode: list_mode,
            pending_jobs: args.pending_jobs,
            segment_duration_ms: None,
        };
        let decision = adaptive.decide(&segment, Some(&hint), &context);
        let route = router.route(text, list_mode);

        let execution = match &route {
            RouteDecision::List(command) => {
                let result = executor.execute(current_note, command).await;
                if let Some(id) = result.note_id() {
                    current_note = Some(id);
                    list_mode = command.action != ListAction::ConvertToText;
                }
                Some(result)
            }
            _ => None,
        };

        let out = json!({
            "route": route,
            "hint": hint,
            "adaptive": decision,
            "execution": execution,
        });
        println!("{}", serde_json::to_string(&out)?);
    }

    let snapshot = recorder.snapshot();
    tracing::info!(
        routes = snapshot.route_stats.total,
        forced = snapshot.mode_stats.forced,
        executions = snapshot.execution_stats.success
            + snapshot.execution_stats.incomplete
            + snapshot.execution_stats.failure,
        "session done"
    );
    println!("{}", serde_json::to_string(&json!({ "telemetry": snapshot }))?);
    Ok(())
}
