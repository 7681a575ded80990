//! PadSense Application
//!
//! Command-line harness for the pad placement engine. Runs sessions against
//! the reference mesh scene and prints what the trainee would see.
//!
//! # Usage
//!
//! ```bash
//! # Canned session ending on the top biceps zone
//! padsense demo
//!
//! # Replay recorded pointer events
//! padsense replay session.json
//!
//! # Dump the standard configuration, edit it, then use it
//! padsense config > engine.json
//! padsense --config engine.json demo
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use padsense_core::PointerSample;
use padsense_engine::{
    ConfigPreset, EngineConfig, InteractionEngine, InteractionState, MeshScene, Overlay, ZoneMatch,
};
use padsense_mesh::DecalFootprint;

/// PadSense placement trainer
#[derive(Parser, Debug)]
#[command(name = "padsense")]
#[command(author, version, about = "Electrode pad placement trainer", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in configuration, ignored when --config is given
    #[arg(short, long, value_enum, default_value = "standard")]
    preset: PresetArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a canned session (default if no subcommand)
    Demo,

    /// Replay a JSON list of timed pointer events
    Replay {
        /// Script file
        script: PathBuf,

        /// Canvas width for canvas_move events
        #[arg(long, default_value = "850")]
        width: f32,

        /// Canvas height for canvas_move events
        #[arg(long, default_value = "450")]
        height: f32,
    },

    /// Print the active configuration as JSON
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Standard,
    MultiAnchorGlow,
    Lenient,
}

impl From<PresetArg> for ConfigPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Standard => Self::Standard,
            PresetArg::MultiAnchorGlow => Self::MultiAnchorGlow,
            PresetArg::Lenient => Self::Lenient,
        }
    }
}

/// One scripted input, `at_ms` after the session starts.
#[derive(Clone, Debug, Deserialize)]
struct ScriptStep {
    #[serde(default)]
    at_ms: u64,
    #[serde(flatten)]
    event: ScriptEvent,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ScriptEvent {
    Move { x: f32, y: f32 },
    CanvasMove { client_x: f32, client_y: f32 },
    Down,
    Dismiss,
    Reset,
    Tick,
}

/// What the session ended on.
#[derive(Debug, Serialize)]
struct SessionReport {
    state: InteractionState,
    outcome: Option<bool>,
    overlay: Option<Overlay>,
    last_match: Option<ZoneMatch>,
    feedback_intensity: f32,
    live_footprint: Option<DecalFootprint>,
}

impl SessionReport {
    fn capture(engine: &InteractionEngine<MeshScene>) -> Self {
        Self {
            state: engine.current_state(),
            outcome: engine.outcome(),
            overlay: engine.overlay(),
            last_match: engine.last_match().cloned(),
            feedback_intensity: engine.feedback_intensity(),
            live_footprint: engine.live_footprint().copied(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("PadSense v{}", padsense_core::VERSION);

    let config = load_config(cli.config.as_deref(), cli.preset.into())?;

    match cli.command {
        None | Some(Commands::Demo) => run_demo(config)?,
        Some(Commands::Replay {
            script,
            width,
            height,
        }) => run_replay(config, &script, width, height)?,
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Load and validate the engine configuration
fn load_config(path: Option<&Path>, preset: ConfigPreset) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            debug!("Using {:?} preset", preset);
            EngineConfig::from_preset(preset)
        }
    };
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

/// Canned session: dismiss, sweep toward the top biceps, commit, wait
fn run_demo(config: EngineConfig) -> anyhow::Result<()> {
    let delay = config.resolve_delay;
    let mut engine = InteractionEngine::new(MeshScene::training(), config)?;
    let start = Instant::now();

    info!("Intro: {}", Overlay::Intro.message());
    engine.dismiss_overlay();

    let path = [
        (0.3, -0.3),
        (0.1, -0.05),
        (-0.1, 0.1),
        (-0.25, 0.18),
        (-0.35, 0.22),
    ];
    for (x, y) in path {
        engine.on_pointer_move(PointerSample::new(x, y));
        match engine.live_footprint() {
            Some(f) => info!(
                "Pointer ({:+.2}, {:+.2}) -> pad at ({:.1}, {:.1}) size {:.1}x{:.1}, glow {:.3}",
                x,
                y,
                f.center.x,
                f.center.y,
                f.size.x,
                f.size.y,
                engine.feedback_intensity()
            ),
            None => info!("Pointer ({:+.2}, {:+.2}) off the body", x, y),
        }
    }

    engine.on_pointer_down(start);
    if let Some(m) = engine.last_match() {
        info!("Committed: {:?}", m);
    }
    engine.tick(start + delay);

    if let Some(overlay) = engine.overlay() {
        info!("{}", overlay.message());
    }
    println!("{}", serde_json::to_string_pretty(&SessionReport::capture(&engine))?);
    Ok(())
}

/// Replay a recorded session and print where it ended
fn run_replay(config: EngineConfig, script: &Path, width: f32, height: f32) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("reading {}", script.display()))?;
    let steps: Vec<ScriptStep> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", script.display()))?;
    info!("Replaying {} events from {}", steps.len(), script.display());

    let engine = replay(config, &steps, width, height)?;
    println!("{}", serde_json::to_string_pretty(&SessionReport::capture(&engine))?);
    Ok(())
}

/// Feed scripted events to a fresh engine
fn replay(
    config: EngineConfig,
    steps: &[ScriptStep],
    width: f32,
    height: f32,
) -> anyhow::Result<InteractionEngine<MeshScene>> {
    let mut engine = InteractionEngine::new(MeshScene::training(), config)?;
    let start = Instant::now();
    let mut last_ms = 0;

    for step in steps {
        if step.at_ms < last_ms {
            warn!("Event at {} ms is out of order, replaying it at {} ms", step.at_ms, last_ms);
        }
        last_ms = last_ms.max(step.at_ms);
        let now = start + Duration::from_millis(last_ms);

        // Frame clock runs before every input
        engine.tick(now);

        match step.event {
            ScriptEvent::Move { x, y } => engine.on_pointer_move(PointerSample::new(x, y)),
            ScriptEvent::CanvasMove { client_x, client_y } => engine.on_pointer_move(
                PointerSample::from_canvas(client_x, client_y, width, height),
            ),
            ScriptEvent::Down => engine.on_pointer_down(now),
            ScriptEvent::Dismiss => engine.dismiss_overlay(),
            ScriptEvent::Reset => engine.reset(),
            ScriptEvent::Tick => {}
        }
        debug!("{} ms: {}", last_ms, engine.current_state().as_str());
    }

    Ok(engine)
}
