//! Synesthesia - spatial audio sonification of depth camera frames

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use synesthesia::capture::{
    CaptureAdapter, FrameReport, FrameSource, ImageSequenceSource, SequenceConfig, SyntheticScene,
    SyntheticSource,
};
use synesthesia::config::{self, SonifyConfig};
use synesthesia::engine::{reference_positions, FrameProcessor};
use synesthesia::render::{JsonLinesRenderer, Renderer, VoiceBank};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean.
    // RUST_LOG controls the level, e.g. RUST_LOG=synesthesia=debug
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match cli.command {
        Commands::Run {
            config: config_path,
            frames,
            repeat,
            json,
            max_frames,
        } => {
            let cfg = load_or_default(&config_path)?;
            run(cfg, frames, repeat, json, max_frames)?;
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Grid: {} rows x {} columns", cfg.grid.rows, cfg.grid.columns);
                    println!("  Column angles: {:?}", cfg.grid.column_angles);
                    println!("  Row angles: {:?}", cfg.grid.row_angles);
                    println!(
                        "  Calibration: raw {}..{} -> distance {}..{}",
                        cfg.calibration.in_min,
                        cfg.calibration.in_max,
                        cfg.calibration.out_min,
                        cfg.calibration.out_max
                    );
                    println!(
                        "  Pitch: distance {}..{} -> {}..{} Hz",
                        cfg.pitch.in_min, cfg.pitch.in_max, cfg.pitch.out_min, cfg.pitch.out_max
                    );
                    println!("  Sound threshold: {}", cfg.sound.threshold);
                    println!("  Hysteresis: {:.2}", cfg.sound.hysteresis);
                    println!("  Sampler: {:?}", cfg.sampler.strategy);
                    println!(
                        "  Capture: {}x{} @ {} fps",
                        cfg.capture.width, cfg.capture.height, cfg.capture.fps
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Tones { config: config_path } => {
            let cfg = load_or_default(&config_path)?;
            let layout = cfg.layout()?;
            let distance = cfg.sound.reference_distance;

            println!("Reference tones at distance {}:", distance);
            for (region, position) in reference_positions(&layout, distance) {
                println!(
                    "  [{}, {}] x: {}, y: {}, z: {}",
                    region.column, region.row, position.x, position.y, position.z
                );
            }
        }

        Commands::Init => {
            let path = "synesthesia.yaml";
            if Path::new(path).exists() {
                println!("synesthesia.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, config::EXAMPLE_CONFIG)?;
                println!("Created synesthesia.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the configuration, falling back to the stock one when the file is absent
fn load_or_default(path: &Path) -> Result<SonifyConfig> {
    if path.exists() {
        config::load_config(path)
    } else {
        warn!(path = %path.display(), "configuration not found, using defaults");
        Ok(SonifyConfig::default())
    }
}

fn run(
    cfg: SonifyConfig,
    frames: Option<PathBuf>,
    repeat: bool,
    json: bool,
    max_frames: Option<u64>,
) -> Result<()> {
    let processor = FrameProcessor::new(&cfg)?;
    let interval = Duration::from_secs_f64(1.0 / f64::from(cfg.capture.fps));

    let mut source: Box<dyn FrameSource> = match frames {
        Some(directory) => Box::new(ImageSequenceSource::new(
            "recorded",
            SequenceConfig {
                directory,
                interval,
                repeat,
            },
        )),
        None => Box::new(SyntheticSource::new(
            "synthetic",
            SyntheticScene {
                width: cfg.capture.width,
                height: cfg.capture.height,
                steps: cfg.grid.columns,
                background: cfg.calibration.in_min.clamp(0.0, 255.0) as u8,
                object: cfg.calibration.in_max.clamp(0.0, 255.0) as u8,
            },
            interval,
        )),
    };

    let mut renderer: Box<dyn Renderer> = if json {
        Box::new(JsonLinesRenderer::new(std::io::stdout()))
    } else {
        Box::new(VoiceBank::new(processor.layout(), cfg.sound.amplitude))
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut frames = source.subscribe();
        source.start()?;
        info!(source = source.name(), "sonification running, Ctrl-C to stop");

        let (mut adapter, mut reports) = CaptureAdapter::spawn(processor);
        let mut poll = tokio::time::interval(Duration::from_millis(250));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut submitted = 0u64;
        let mut last_status: Option<String> = None;

        loop {
            tokio::select! {
                frame = frames.recv() => match frame {
                    Ok(frame) => {
                        if adapter.submit(frame) {
                            submitted += 1;
                        }
                        if max_frames.is_some_and(|max| submitted >= max) {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "frames arrived faster than they were taken");
                    }
                    Err(RecvError::Closed) => break,
                },
                report = reports.recv() => match report {
                    Some(report) => present(renderer.as_mut(), report, &mut last_status, json)?,
                    None => break,
                },
                _ = poll.tick() => {
                    if !source.is_running() {
                        info!(source = source.name(), "source finished");
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    info!("interrupted");
                    break;
                }
            }
        }

        source.stop();
        let dropped = adapter.dropped();

        // Keep rendering while the worker finishes its queued frame
        let draining = async {
            while let Some(report) = reports.recv().await {
                present(renderer.as_mut(), report, &mut last_status, json)?;
            }
            Ok::<(), anyhow::Error>(())
        };
        let (mut processor, ()) = tokio::try_join!(adapter.shutdown(), draining)?;
        let sounding = processor.grid().active_count();
        renderer.apply(&processor.silence())?;

        if !json {
            println!(
                "Processed {} frames ({} dropped), {} regions sounding at stop",
                submitted, dropped, sounding
            );
        }
        Ok::<(), anyhow::Error>(())
    })
}

/// Hand a frame's updates to the renderer and show the center status
fn present(
    renderer: &mut dyn Renderer,
    report: FrameReport,
    last_status: &mut Option<String>,
    json: bool,
) -> Result<()> {
    renderer.apply(&report.output.updates)?;

    if let Some(status) = report.output.status {
        if last_status.as_deref() != Some(status.as_str()) {
            if json {
                info!(sequence = report.sequence, %status, "center region");
            } else {
                println!("{}", status);
            }
            *last_status = Some(status);
        }
    }
    Ok(())
}
