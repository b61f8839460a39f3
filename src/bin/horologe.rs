use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "horologe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a layer set over simulated time and dump every frame as JSON.
    Simulate(SimulateArgs),
    /// Print each layer's complexity and recommendations.
    Assess(LayersArgs),
    /// Print sanitize adjustments and validation errors.
    Validate(LayersArgs),
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Layer set JSON (bare array or `{ "layers": [...] }`).
    #[arg(long)]
    layers: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Layer set JSON (bare array or `{ "layers": [...] }`).
    #[arg(long)]
    layers: PathBuf,

    /// Number of ticks.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Start instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,

    /// Local zone of the display, hours east of UTC.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    local_offset: f64,

    /// Master clock dial.
    #[arg(long, value_enum, default_value_t = HourModeChoice::Twelve)]
    hour_mode: HourModeChoice,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HourModeChoice {
    #[value(name = "12")]
    Twelve,
    #[value(name = "24")]
    TwentyFour,
}

impl From<HourModeChoice> for horologe::HourMode {
    fn from(choice: HourModeChoice) -> Self {
        match choice {
            HourModeChoice::Twelve => horologe::HourMode::Twelve,
            HourModeChoice::TwentyFour => horologe::HourMode::TwentyFour,
        }
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("'{s}' is not an RFC 3339 instant: {e}"))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Assess(args) => cmd_assess(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,horologe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn read_layers(path: &Path) -> anyhow::Result<horologe::ValidatedLayers> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read layer set '{}'", path.display()))?;
    let set = horologe::parse_layer_set(&json)
        .with_context(|| format!("load layer set '{}'", path.display()))?;
    for issue in &set.adjustments {
        tracing::warn!(%issue, "layer config adjusted");
    }
    Ok(set)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }
    let set = read_layers(&args.layers)?;

    let source = horologe::ManualTimeSource::new(args.at.unwrap_or_else(Utc::now))
        .with_local_offset_hours(args.local_offset)?;
    let opts = horologe::OrchestratorOpts {
        hour_mode: args.hour_mode.into(),
        target_fps: args.fps,
        ..horologe::OrchestratorOpts::default()
    };
    let mut orch = horologe::ClockOrchestrator::new(source, opts)?;
    for (id, cfg) in set.with_ids() {
        orch.add_layer(id, cfg.clone())?;
    }
    orch.on_error(|layer, msg| match layer {
        Some(id) => eprintln!("{id}: {msg}"),
        None => eprintln!("orchestrator: {msg}"),
    });

    let delta = Duration::from_secs_f64(1.0 / args.fps);
    let mut sink = horologe::InMemorySink::new();
    orch.start();
    for _ in 0..args.frames {
        orch.tick_into(delta, &mut sink)?;
        orch.time_source_mut().advance_std(delta);
    }
    orch.stop();

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &sink.frames).context("write frames JSON")?;
            w.flush().context("flush frames JSON")?;
            eprintln!("wrote {} frames to {}", sink.frames.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &sink.frames).context("write frames JSON")?;
            writeln!(w).context("write frames JSON")?;
        }
    }

    let status = orch.status();
    eprintln!(
        "frames={} fps={:.1} late={} active_layers={} errors={}",
        status.total_frames,
        status.frame_rate,
        status.late_frames,
        status.active_layer_count,
        status.errors.len()
    );
    Ok(())
}

fn cmd_assess(args: LayersArgs) -> anyhow::Result<()> {
    let set = read_layers(&args.layers)?;
    for (id, cfg) in set.with_ids() {
        let report = horologe::assess_complexity(cfg);
        println!("{id}: {:?} (score {})", report.level, report.score);
        for rec in &report.recommendations {
            println!("  - {rec}");
        }
    }
    Ok(())
}

fn cmd_validate(args: LayersArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.layers)
        .with_context(|| format!("read layer set '{}'", args.layers.display()))?;
    match horologe::parse_layer_set(&json) {
        Ok(set) => {
            for issue in &set.adjustments {
                println!("adjusted {issue}");
            }
            println!("ok: {} layers", set.layers.len());
            Ok(())
        }
        Err(horologe::HorologeError::Config(errs)) => {
            for issue in &errs.errors {
                println!("error {issue}");
            }
            anyhow::bail!("{} validation errors", errs.errors.len())
        }
        Err(e) => Err(e).with_context(|| format!("parse layer set '{}'", args.layers.display())),
    }
}
