//! Sound and haptic feedback collaborators.
//!
//! The session controller only talks to the [`ToneOutput`] and [`Haptics`]
//! traits; every call is best-effort and the controller drops failures.

pub mod binaural;
#[cfg(feature = "audio")]
pub mod engine;
pub mod tone;

#[cfg(feature = "audio")]
pub use engine::AudioEngineHandle;

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

const CHIME_BASE_HZ: f32 = 880.0;
const MISS_HZ: f32 = 220.0;

/// Haptic pulse pattern played on a hit: on/off/on, in milliseconds.
pub const HIT_PULSE_MS: [u64; 3] = [100, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    pub frequency_hz: f32,
    pub peak_gain: f32,
    pub attack: Duration,
    pub length: Duration,
}

impl Tone {
    /// Ascending hit chime; pitch rises 5% per streak step.
    pub fn chime(streak: u32) -> Self {
        Self {
            frequency_hz: CHIME_BASE_HZ * (1.0 + streak as f32 * 0.05),
            peak_gain: 0.2,
            attack: Duration::from_millis(50),
            length: Duration::from_secs(1),
        }
    }

    pub fn miss() -> Self {
        Self {
            frequency_hz: MISS_HZ,
            peak_gain: 0.1,
            attack: Duration::from_millis(50),
            length: Duration::from_millis(300),
        }
    }
}

pub trait ToneOutput: Send + Sync {
    fn play_tone(&self, tone: Tone) -> Result<()>;

    /// Start or stop the binaural background soundscape.
    fn set_soundscape(&self, playing: bool) -> Result<()>;

    /// Release the output device. Further calls may fail.
    fn dispose(&self) {}
}

pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern_ms: &[u64]) -> Result<()>;
}

/// Output used when sound is muted or no device support is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ToneOutput for Silent {
    fn play_tone(&self, _tone: Tone) -> Result<()> {
        Ok(())
    }

    fn set_soundscape(&self, _playing: bool) -> Result<()> {
        Ok(())
    }
}

impl Haptics for Silent {
    fn vibrate(&self, _pattern_ms: &[u64]) -> Result<()> {
        Ok(())
    }
}
