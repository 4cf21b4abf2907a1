//! Sound effects and music driven by game events
//!
//! Short effects play from small pools of channels so rapid fire can overlap
//! itself. A pool hands out channels round-robin and skips a channel that is
//! still busy rather than cutting it off. Decoding and mixing belong to the
//! host behind [`SoundChannel`].

use crate::platform::EffectsBus;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Every sound the game makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Ship volley
    Laser,
    /// Enemy destroyed
    Explosion,
    /// Background loop
    Music,
    /// Loop played after the ship is destroyed
    GameOverMusic,
}

impl Sound {
    pub fn is_music(self) -> bool {
        matches!(self, Sound::Music | Sound::GameOverMusic)
    }
}

/// One playable voice provided by the host
pub trait SoundChannel {
    /// Not playing, or finished playing
    fn is_idle(&self) -> bool;
    /// Play from the start
    fn play(&mut self);
    fn stop(&mut self);
}

/// Round-robin pool of channels for one effect
#[derive(Debug, Clone)]
pub struct SoundPool<C: SoundChannel> {
    channels: Vec<C>,
    current: usize,
}

impl<C: SoundChannel> SoundPool<C> {
    pub fn new(channels: Vec<C>) -> Self {
        Self { channels, current: 0 }
    }

    /// Play on the next channel if it is idle. The cursor moves on either way.
    pub fn play(&mut self) -> bool {
        let len = self.channels.len();
        let Some(channel) = self.channels.get_mut(self.current) else {
            return false;
        };

        let played = channel.is_idle();
        if played {
            channel.play();
        }
        self.current = (self.current + 1) % len;
        played
    }

    pub fn channels(&self) -> &[C] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [C] {
        &mut self.channels
    }
}

/// Routes game events to effect pools and music tracks
#[derive(Debug, Clone)]
pub struct AudioBus<C: SoundChannel> {
    pub laser: SoundPool<C>,
    pub explosion: SoundPool<C>,
    pub music: C,
    pub game_over_music: C,
    pub muted: bool,
}

impl<C: SoundChannel> AudioBus<C> {
    /// Build every channel through `factory`, which receives the sound and
    /// its configured volume
    pub fn new(settings: &Settings, mut factory: impl FnMut(Sound, f32) -> C) -> Self {
        let laser = (0..settings.laser_channels)
            .map(|_| factory(Sound::Laser, settings.laser_volume))
            .collect();
        let explosion = (0..settings.explosion_channels)
            .map(|_| factory(Sound::Explosion, settings.explosion_volume))
            .collect();

        Self {
            laser: SoundPool::new(laser),
            explosion: SoundPool::new(explosion),
            music: factory(Sound::Music, settings.music_volume),
            game_over_music: factory(Sound::GameOverMusic, settings.game_over_volume),
            muted: settings.muted,
        }
    }
}

impl<C: SoundChannel> EffectsBus for AudioBus<C> {
    fn notify(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }

        match event {
            GameEvent::SessionStarted => {
                self.game_over_music.stop();
                self.music.stop();
                self.music.play();
            }
            GameEvent::ShipFired => {
                self.laser.play();
            }
            GameEvent::EnemyDestroyed { .. } => {
                self.explosion.play();
            }
            GameEvent::ShipDestroyed => {
                self.music.stop();
                self.game_over_music.stop();
                self.game_over_music.play();
            }
            GameEvent::WaveSpawned { .. } => {}
        }
    }
}

/// Channel without an audio device
///
/// One-shot channels finish the moment they start; held channels keep
/// playing until stopped, like a looping track.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessChannel {
    pub volume: f32,
    /// Times `play` was called
    pub plays: u32,
    pub playing: bool,
    hold: bool,
}

impl HeadlessChannel {
    pub fn one_shot(volume: f32) -> Self {
        Self {
            volume,
            plays: 0,
            playing: false,
            hold: false,
        }
    }

    pub fn held(volume: f32) -> Self {
        Self {
            hold: true,
            ..Self::one_shot(volume)
        }
    }

    /// Music loops, effects are one-shot
    pub fn for_sound(sound: Sound, volume: f32) -> Self {
        if sound.is_music() {
            Self::held(volume)
        } else {
            Self::one_shot(volume)
        }
    }
}

impl SoundChannel for HeadlessChannel {
    fn is_idle(&self) -> bool {
        !self.playing
    }

    fn play(&mut self) {
        self.plays += 1;
        self.playing = self.hold;
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn held_pool(size: usize) -> SoundPool<HeadlessChannel> {
        SoundPool::new((0..size).map(|_| HeadlessChannel::held(1.0)).collect())
    }

    fn plays(pool: &SoundPool<HeadlessChannel>) -> Vec<u32> {
        pool.channels().iter().map(|c| c.plays).collect()
    }

    #[test]
    fn test_round_robin() {
        let mut pool = SoundPool::new((0..3).map(|_| HeadlessChannel::one_shot(1.0)).collect());
        for _ in 0..7 {
            assert!(pool.play());
        }
        assert_eq!(plays(&pool), vec![3, 2, 2]);
    }

    #[test]
    fn test_busy_channel_is_skipped() {
        let mut pool = held_pool(3);
        assert!(pool.play());
        assert!(pool.play());
        assert!(pool.play());

        // Channel 0 is still playing: nothing plays, but the cursor moves on
        assert!(!pool.play());
        assert_eq!(plays(&pool), vec![1, 1, 1]);

        pool.channels_mut()[1].stop();
        assert!(pool.play());
        assert_eq!(plays(&pool), vec![1, 2, 1]);
    }

    #[test]
    fn test_empty_pool_is_silent() {
        let mut pool: SoundPool<HeadlessChannel> = SoundPool::new(Vec::new());
        assert!(!pool.play());
    }

    #[test]
    fn test_bus_uses_settings() {
        let bus = AudioBus::new(&Settings::default(), HeadlessChannel::for_sound);
        assert_eq!(bus.laser.channels().len(), 10);
        assert_eq!(bus.explosion.channels().len(), 20);
        assert_eq!(bus.laser.channels()[0].volume, 0.12);
        assert_eq!(bus.explosion.channels()[0].volume, 0.1);
        assert_eq!(bus.music.volume, 0.25);
        assert_eq!(bus.game_over_music.volume, 0.25);
    }

    #[test]
    fn test_bus_routes_events() {
        let mut bus = AudioBus::new(&Settings::default(), HeadlessChannel::for_sound);

        bus.notify(&GameEvent::SessionStarted);
        assert!(bus.music.playing);

        bus.notify(&GameEvent::ShipFired);
        bus.notify(&GameEvent::ShipFired);
        bus.notify(&GameEvent::EnemyDestroyed { pos: Vec2::ZERO });
        let lasers: u32 = bus.laser.channels().iter().map(|c| c.plays).sum();
        let explosions: u32 = bus.explosion.channels().iter().map(|c| c.plays).sum();
        assert_eq!(lasers, 2);
        assert_eq!(explosions, 1);

        bus.notify(&GameEvent::ShipDestroyed);
        assert!(!bus.music.playing);
        assert!(bus.game_over_music.playing);

        // Restart swaps the tracks back
        bus.notify(&GameEvent::SessionStarted);
        assert!(bus.music.playing);
        assert!(!bus.game_over_music.playing);
        assert_eq!(bus.music.plays, 2);
    }

    #[test]
    fn test_muted_bus_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut bus = AudioBus::new(&settings, HeadlessChannel::for_sound);
        bus.notify(&GameEvent::SessionStarted);
        bus.notify(&GameEvent::ShipFired);
        assert_eq!(bus.music.plays, 0);
        assert!(bus.laser.channels().iter().all(|c| c.plays == 0));
    }
}
