//! Session runner
//!
//! Owns the game state together with the renderer and effects sink. A
//! session only starts once the renderer has a drawing context and every
//! asset has loaded; after that each frame is one [`tick`] followed by
//! forwarding the frame's events.

use super::{EffectsBus, FrameScheduler, InputSource, InputState};
use crate::assets::AssetStore;
use crate::error::{SimError, SimResult};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{FrameOutcome, GameEvent, GameState, tick};

/// Result of a [`Session::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames run by this call
    pub frames: u64,
    pub score: u64,
    pub wave: u32,
    pub game_over: bool,
}

pub struct Session<R: Renderer, E: EffectsBus> {
    settings: Settings,
    state: Option<GameState>,
    renderer: R,
    effects: E,
}

impl<R: Renderer, E: EffectsBus> Session<R, E> {
    pub fn new(settings: Settings, renderer: R, effects: E) -> Self {
        Self {
            settings,
            state: None,
            renderer,
            effects,
        }
    }

    /// Build the game state and announce the session.
    ///
    /// Fails without touching anything if the renderer is unsupported or
    /// assets are still loading.
    pub fn start(&mut self, assets: &dyn AssetStore) -> SimResult<()> {
        if !self.renderer.is_supported() {
            log::error!("Renderer has no drawing context, not starting");
            return Err(SimError::UnsupportedSurface);
        }
        if !assets.is_ready() {
            log::warn!("Start requested before all assets loaded");
            return Err(SimError::AssetsNotReady);
        }

        let state = GameState::new(self.settings.clone(), assets)?;
        log::info!("Session started (seed {})", state.seed);
        self.state = Some(state);
        self.effects.notify(&GameEvent::SessionStarted);
        self.forward_events();
        Ok(())
    }

    /// Run exactly one frame
    pub fn frame(&mut self, input: &InputState) -> SimResult<FrameOutcome> {
        let state = self.state.as_mut().ok_or(SimError::NotStarted)?;
        let outcome = tick(state, input, &mut self.renderer)?;
        self.forward_events();
        Ok(outcome)
    }

    /// Run frames until the game ends or `max_frames` have run
    pub fn run<S, I>(
        &mut self,
        scheduler: &mut S,
        input: &mut I,
        max_frames: Option<u64>,
    ) -> SimResult<SessionSummary>
    where
        S: FrameScheduler,
        I: InputSource,
    {
        let mut frames = 0;
        let mut game_over = self.state.as_ref().ok_or(SimError::NotStarted)?.is_game_over();

        while !game_over && max_frames.is_none_or(|max| frames < max) {
            scheduler.wait_for_next_frame();
            let frame = self.state.as_ref().map_or(0, |s| s.frame);
            let outcome = self.frame(&input.poll(frame))?;
            frames += 1;
            game_over = outcome == FrameOutcome::GameOver;
        }

        let state = self.state.as_ref().ok_or(SimError::NotStarted)?;
        Ok(SessionSummary {
            frames,
            score: state.score,
            wave: state.wave,
            game_over,
        })
    }

    /// Start over with a fresh game
    pub fn restart(&mut self) -> SimResult<()> {
        let state = self.state.as_mut().ok_or(SimError::NotStarted)?;
        state.restart();
        self.effects.notify(&GameEvent::SessionStarted);
        self.forward_events();
        Ok(())
    }

    fn forward_events(&mut self) {
        if let Some(state) = self.state.as_mut() {
            for event in state.drain_events() {
                self.effects.notify(&event);
            }
        }
    }

    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCache, SpriteSizes};
    use crate::platform::{Autopilot, Unpaced};
    use crate::renderer::HeadlessRenderer;
    use crate::sim::GamePhase;

    type TestSession = Session<HeadlessRenderer, Vec<GameEvent>>;

    fn session(renderer: HeadlessRenderer) -> TestSession {
        Session::new(Settings::default(), renderer, Vec::new())
    }

    fn assets() -> AssetCache {
        AssetCache::preloaded(SpriteSizes::default())
    }

    #[test]
    fn test_start_announces_session() {
        let mut session = session(HeadlessRenderer::new());
        session.start(&assets()).unwrap();

        assert!(session.is_started());
        assert_eq!(
            session.effects(),
            &vec![GameEvent::SessionStarted, GameEvent::WaveSpawned { wave: 1 }]
        );
    }

    #[test]
    fn test_unsupported_renderer_never_ticks() {
        let mut session = session(HeadlessRenderer::unsupported());
        let err = session.start(&assets()).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedSurface));

        assert!(matches!(
            session.frame(&InputState::default()),
            Err(SimError::NotStarted)
        ));
        assert_eq!(session.renderer().sprites_drawn, 0);
        assert!(session.effects().is_empty());
    }

    #[test]
    fn test_waits_for_assets() {
        let mut session = session(HeadlessRenderer::new());
        let mut cache = AssetCache::new();
        let err = session.start(&cache).unwrap_err();
        assert!(matches!(err, SimError::AssetsNotReady));
        assert!(!session.is_started());

        cache = assets();
        session.start(&cache).unwrap();
        assert!(session.is_started());
    }

    #[test]
    fn test_run_respects_frame_limit() {
        let mut session = session(HeadlessRenderer::new());
        session.start(&assets()).unwrap();

        // Enemy fire cannot reach the ship this early
        let summary = session
            .run(&mut Unpaced, &mut InputState::default(), Some(100))
            .unwrap();
        assert_eq!(summary.frames, 100);
        assert!(!summary.game_over);
        assert_eq!(session.state().unwrap().frame, 100);
    }

    #[test]
    fn test_run_stops_at_game_over() {
        let mut session = session(HeadlessRenderer::new());
        session.start(&assets()).unwrap();
        session.state_mut().unwrap().ship.body.colliding = true;

        let summary = session.run(&mut Unpaced, &mut Autopilot::default(), None).unwrap();
        assert_eq!(summary.frames, 1);
        assert!(summary.game_over);
        assert_eq!(session.effects().last(), Some(&GameEvent::ShipDestroyed));

        // A finished game runs no more frames
        let again = session.run(&mut Unpaced, &mut Autopilot::default(), None).unwrap();
        assert_eq!(again.frames, 0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = session(HeadlessRenderer::new());
        session.start(&assets()).unwrap();
        session.state_mut().unwrap().ship.body.colliding = true;
        session.frame(&InputState::default()).unwrap();
        session.effects_mut().clear();

        session.restart().unwrap();
        let state = session.state().unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 0);
        assert_eq!(state.score, 0);
        assert_eq!(
            session.effects(),
            &vec![GameEvent::SessionStarted, GameEvent::WaveSpawned { wave: 1 }]
        );

        assert_eq!(
            session.frame(&InputState::default()).unwrap(),
            FrameOutcome::Continue
        );
    }

    #[test]
    fn test_restart_requires_start() {
        let mut session = session(HeadlessRenderer::new());
        assert!(matches!(session.restart(), Err(SimError::NotStarted)));
    }
}
