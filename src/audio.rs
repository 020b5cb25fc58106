//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::sim::SoundCue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(master_volume: f32, sfx_volume: f32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume,
            sfx_volume,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_volumes(&mut self, master: f32, sfx: f32) {
        self.master_volume = master.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
    }

    /// Play one cue; playback failures are dropped
    pub fn play(&self, cue: SoundCue) {
        match cue {
            // Long sine sweep as the flyer drops away
            SoundCue::Fall => self.tone(OscillatorType::Sine, 600.0, 120.0, 0.6),
            // Short harsh blip on impact
            SoundCue::Collision => self.tone(OscillatorType::Square, 220.0, 80.0, 0.18),
        }
    }

    /// Oscillator with an exponential pitch drop and a decay envelope
    fn tone(&self, shape: OscillatorType, start_hz: f32, end_hz: f32, seconds: f64) {
        let Some(ctx) = &self.ctx else { return };
        let gain_value = self.master_volume * self.sfx_volume * 0.3;
        if gain_value <= 0.0 {
            return;
        }

        let result = (|| -> Result<(), JsValue> {
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.set_type(shape);

            let now = ctx.current_time();
            osc.frequency().set_value(start_hz);
            osc.frequency()
                .exponential_ramp_to_value_at_time(end_hz, now + seconds)?;
            gain.gain().set_value(gain_value);
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, now + seconds)?;

            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            osc.start()?;
            osc.stop_with_when(now + seconds)?;
            Ok(())
        })();

        if result.is_err() {
            log::warn!("Audio playback failed");
        }
    }
}
