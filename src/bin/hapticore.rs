use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use hapticore::{
    Capabilities, HapticEffect, Millis, PlatformProbe, RenderOp, RenderTier, SilentVibrator,
    Timeline, VibratorConfig, active_time, create_backend,
};

#[derive(Parser, Debug)]
#[command(name = "hapticore", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log filter level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log: tracing::Level,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved wait of every primitive and the nominal effect duration.
    Timeline(TimelineArgs),
    /// Print the selected render tier and what each primitive renders to.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input effect JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input effect JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Vibrator config JSON (waveform step, on/off threshold and gap).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host API level reported by the simulated device.
    #[arg(long, default_value_t = 36)]
    api_level: u32,

    #[arg(long)]
    no_composition: bool,

    #[arg(long)]
    no_envelopes: bool,

    #[arg(long)]
    no_amplitude: bool,

    /// Simulate a device without any vibrator.
    #[arg(long)]
    no_vibrator: bool,
}

impl RenderArgs {
    fn probe(&self) -> PlatformProbe {
        PlatformProbe {
            api_level: self.api_level,
            has_vibrator: !self.no_vibrator,
            supports_composition: !self.no_composition,
            supports_envelopes: !self.no_envelopes,
            supports_amplitude_control: !self.no_amplitude,
        }
    }
}

#[derive(serde::Serialize)]
struct RenderedStep<'a> {
    wait: Millis,
    active: Millis,
    op: &'a RenderOp,
}

#[derive(serde::Serialize)]
struct RenderReport<'a> {
    tier: Option<RenderTier>,
    capabilities: Capabilities,
    steps: Vec<RenderedStep<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_effect(path: &std::path::Path) -> anyhow::Result<HapticEffect> {
    HapticEffect::from_path(path).with_context(|| format!("load effect '{}'", path.display()))
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let effect = read_effect(&args.in_path)?;
    let timeline = Timeline::resolve(&effect);
    let out = serde_json::to_string_pretty(&timeline).context("serialize timeline")?;
    println!("{out}");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let effect = read_effect(&args.in_path)?;
    let config = match &args.config {
        Some(path) => VibratorConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => VibratorConfig::default(),
    };

    let probe = args.probe();
    let caps = Capabilities::from_probe(&probe);
    let backend = create_backend(caps, Arc::new(SilentVibrator::new(probe)), config.waveform);

    let timeline = Timeline::resolve(&effect);
    let ops: Vec<RenderOp> = timeline
        .steps
        .iter()
        .map(|s| backend.render(&s.primitive.basic))
        .collect();
    let steps = timeline
        .steps
        .iter()
        .zip(&ops)
        .map(|(s, op)| RenderedStep {
            wait: s.wait,
            active: active_time(op),
            op,
        })
        .collect();

    let report = RenderReport {
        tier: backend.tier(),
        capabilities: backend.capabilities(),
        steps,
    };
    let out = serde_json::to_string_pretty(&report).context("serialize render report")?;
    println!("{out}");
    Ok(())
}
