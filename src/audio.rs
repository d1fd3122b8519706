//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The event → sound mapping is platform independent; playback is web only.

use crate::sim::{GameEvent, PowerUpKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Left the ground
    Jump,
    /// Mid-air jump
    DoubleJump,
    /// Touched down
    Land,
    /// Coin picked up
    Coin,
    /// Power-up picked up
    PowerUp,
    /// Shield absorbed a hit
    ShieldBreak,
    /// Player hit a hazard
    Crash,
    /// Run ended
    GameOver,
    /// New session high score
    HighScore,
    /// Menu button
    Click,
}

impl SoundEffect {
    /// Sound for a simulation event
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::DoubleJumped => Some(SoundEffect::DoubleJump),
            GameEvent::Landed => Some(SoundEffect::Land),
            GameEvent::CoinCollected => Some(SoundEffect::Coin),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::ShieldBroken => Some(SoundEffect::ShieldBreak),
            GameEvent::Crashed => Some(SoundEffect::Crash),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
        }
    }
}

/// Pitch of the power-up chime per kind
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn powerup_base_freq(kind: PowerUpKind) -> f32 {
    match kind {
        PowerUpKind::Shield => 520.0,
        PowerUpKind::Magnet => 620.0,
        PowerUpKind::SlowMotion => 440.0,
        PowerUpKind::DoubleScore => 700.0,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, powerup_base_freq};
    use crate::sim::{GameEvent, PowerUpKind};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(sfx_volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: sfx_volume.clamp(0.0, 1.0),
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.sfx_volume }
        }

        /// Voice a simulation event
        pub fn play_event(&self, event: GameEvent) {
            match event {
                // Chime pitch follows the power-up kind
                GameEvent::PowerUpCollected(kind) => self.with_ctx(|ctx, vol| {
                    self.play_powerup(ctx, vol, kind);
                }),
                _ => {
                    if let Some(effect) = SoundEffect::for_event(event) {
                        self.play(effect);
                    }
                }
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            self.with_ctx(|ctx, vol| match effect {
                SoundEffect::Jump => self.play_sweep(ctx, vol * 0.3, 220.0, 520.0, 0.12),
                SoundEffect::DoubleJump => self.play_sweep(ctx, vol * 0.3, 360.0, 820.0, 0.12),
                SoundEffect::Land => self.play_land(ctx, vol),
                SoundEffect::Coin => self.play_coin(ctx, vol),
                SoundEffect::PowerUp => self.play_powerup(ctx, vol, PowerUpKind::Shield),
                SoundEffect::ShieldBreak => self.play_shield_break(ctx, vol),
                SoundEffect::Crash => self.play_crash(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
                SoundEffect::Click => self.play_sweep(ctx, vol * 0.2, 600.0, 600.0, 0.05),
            });
        }

        fn with_ctx(&self, f: impl FnOnce(&AudioContext, f32)) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            f(ctx, vol);
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Frequency sweep with a quick decay (jumps, clicks)
        fn play_sweep(&self, ctx: &AudioContext, gain_level: f32, from: f32, to: f32, len: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(gain_level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len * 0.8)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.03).ok();
        }

        /// Landing - soft thump
        fn play_land(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Coin - two-note ding
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [988.0, 1319.0].iter().enumerate() {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.12, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.15).ok();
                }
            }
        }

        /// Power-up - rising arpeggio
        fn play_powerup(&self, ctx: &AudioContext, vol: f32, kind: PowerUpKind) {
            let base = powerup_base_freq(kind);
            for (i, ratio) in [1.0, 1.25, 1.5, 2.0].iter().enumerate() {
                let delay = i as f64 * 0.05;
                if let Some((osc, gain)) =
                    self.create_osc(ctx, base * ratio, OscillatorType::Triangle)
                {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Shield break - glassy crackle
        fn play_shield_break(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 2500.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(2500.0, t).ok();
                osc.frequency().set_value_at_time(600.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(3000.0, t + 0.04).ok();
                osc.frequency().set_value_at_time(400.0, t + 0.07).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.18).ok();
            }
        }

        /// Crash - boom
        fn play_crash(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();

            // High frequency crack
            if let Some((osc2, gain2)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.2, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.15).ok();
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
