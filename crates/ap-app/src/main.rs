mod cli;
mod player;
mod select;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ap_audio::AudioCompanion;
use ap_core::config::{PlayerConfig, load_config};
use ap_render::{KeyMonitor, TermSurface, discover_grid};
use ap_source::{VideoInfo, VideoSource};

use crate::cli::{Cli, resolve_ramp};
use crate::player::{Player, StopReason};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level);

    let config = resolve_config(&cli);

    let video = match cli.video.clone() {
        Some(path) => path,
        None => select::choose_video(&std::env::current_dir()?)?,
    };
    let audio_path = resolve_audio(&cli, &video);

    let mut source = VideoSource::open(&video)
        .with_context(|| format!("cannot play {}", video.display()))?;
    let info = source.info();

    let grid = resolve_grid(&cli, &config);
    print_banner(&video, audio_path.as_deref(), info, grid, cli.fullscreen);
    thread::sleep(Duration::from_secs(2));

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .context("cannot install interrupt handler")?;
    }

    let mut audio = match &audio_path {
        Some(path) => AudioCompanion::start(path).unwrap_or_else(|e| {
            log::warn!("audio disabled: {e}");
            AudioCompanion::silent()
        }),
        None => AudioCompanion::silent(),
    };

    let mut surface = TermSurface::new().context("cannot initialize terminal")?;
    let mut input = KeyMonitor::new();
    let mut player = Player::new(config, grid, interrupted);
    let reason = player.run(&mut source, &mut audio, &mut surface, &mut input);
    drop(surface);

    if reason == StopReason::DecodeError {
        anyhow::bail!("playback ended on a decode error");
    }
    println!("Stopped.");
    Ok(())
}

fn init_logger(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new().filter_level(filter).init();
}

/// Load the config file if present, fall back to defaults otherwise, then
/// layer the CLI overrides on top.
fn resolve_config(cli: &Cli) -> PlayerConfig {
    let mut config = if cli.config.exists() {
        match load_config(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "config {} unreadable, using defaults: {e:#}",
                    cli.config.display()
                );
                PlayerConfig::default()
            }
        }
    } else {
        log::info!("no config at {}, using defaults", cli.config.display());
        PlayerConfig::default()
    };
    if let Some(ramp) = &cli.ramp {
        config.ramp = resolve_ramp(ramp);
    }
    config.clamp_all();
    config
}

/// Explicit --width/--height win over discovery, capped to the configured
/// maxima. Discovered grids are used as-is: the windowed path is already
/// terminal-clamped and the fullscreen preset applies uncapped.
fn resolve_grid(cli: &Cli, config: &PlayerConfig) -> (u16, u16) {
    let (auto_w, auto_h) = discover_grid(config, cli.fullscreen);
    let width = cli.width.map_or(auto_w, |w| w.clamp(1, config.max_columns));
    let height = cli.height.map_or(auto_h, |h| h.clamp(1, config.max_rows));
    (width, height)
}

fn resolve_audio(cli: &Cli, video: &Path) -> Option<PathBuf> {
    if cli.no_audio {
        return None;
    }
    cli.audio.clone().or_else(|| {
        let dir = video.parent().filter(|p| !p.as_os_str().is_empty());
        select::match_audio(video, dir.unwrap_or(Path::new(".")))
    })
}

fn print_banner(
    video: &Path,
    audio: Option<&Path>,
    info: VideoInfo,
    grid: (u16, u16),
    fullscreen: bool,
) {
    println!("asciiplay - terminal video player");
    println!("  file:   {}", video.display());
    match audio {
        Some(path) => println!("  audio:  {}", path.display()),
        None => println!("  audio:  (none)"),
    }
    println!("  video:  {}x{} @ {:.3} fps", info.width, info.height, info.fps);
    if info.total_frames > 0 {
        let seconds = info.total_frames as f64 / info.fps.max(1.0);
        println!("  length: {} frames (~{seconds:.1}s)", info.total_frames);
    }
    println!(
        "  grid:   {}x{}{}",
        grid.0,
        grid.1,
        if fullscreen { " (fullscreen preset)" } else { "" }
    );
    println!("  keys:   space pause | +/- speed | q quit");
    println!("Starting in 2 seconds...");
}
