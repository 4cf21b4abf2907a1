//! Sky Raid native runner
//!
//! Plays headless sessions with the autopilot and logs how each one went.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use sky_raid::{
    SimError, Settings,
    assets::AssetCache,
    audio::{AudioBus, HeadlessChannel},
    platform::{Autopilot, FixedIntervalScheduler, FrameScheduler, Session, Unpaced},
    renderer::HeadlessRenderer,
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(author, version, about = "Sky Raid headless runner")]
struct Cli {
    /// JSON settings file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop each session after this many frames
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Override the RNG seed from the settings
    #[arg(long)]
    seed: Option<u64>,

    /// Run frames back to back instead of at 60 Hz
    #[arg(long)]
    unpaced: bool,

    /// Number of sessions to play, restarting in between
    #[arg(long, default_value_t = 1)]
    sessions: u32,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), SimError> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Sky Raid (native) starting...");

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }

    let assets = AssetCache::preloaded(settings.sprites);
    let audio = AudioBus::new(&settings, HeadlessChannel::for_sound);
    let mut session = Session::new(settings, HeadlessRenderer::new(), audio);
    session.start(&assets)?;

    if cli.unpaced {
        play(&mut session, &mut Unpaced, &cli)
    } else {
        play(&mut session, &mut FixedIntervalScheduler::default(), &cli)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn play<S: FrameScheduler>(
    session: &mut Session<HeadlessRenderer, AudioBus<HeadlessChannel>>,
    scheduler: &mut S,
    cli: &Cli,
) -> Result<(), SimError> {
    let mut pilot = Autopilot::default();

    for round in 1..=cli.sessions {
        if round > 1 {
            session.restart()?;
        }
        let summary = session.run(scheduler, &mut pilot, Some(cli.frames))?;
        log::info!(
            "Session {}: {} frames, score {}, wave {}{}",
            round,
            summary.frames,
            summary.score,
            summary.wave,
            if summary.game_over { ", ship destroyed" } else { "" }
        );
    }

    let renderer = session.renderer();
    log::info!(
        "Done: {} sprites drawn, {} regions cleared",
        renderer.sprites_drawn,
        renderer.regions_cleared
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Session` directly
}
