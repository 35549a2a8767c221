use std::f32::consts::PI;
use std::time::Duration;

use super::Tone;

const SAMPLE_RATE: u32 = 44100;
const SILENCE_FLOOR: f32 = 0.0001;

/// One-shot sine tone: linear attack to `peak_gain`, then an exponential fall to
/// near silence at the end of the tone.
pub struct ToneSource {
    frequency_hz: f32,
    peak_gain: f32,
    attack_samples: usize,
    total_samples: usize,
    num_sample: usize,
}

impl ToneSource {
    pub fn new(tone: Tone) -> Self {
        let total_samples = samples_for(tone.length);
        let attack_samples = samples_for(tone.attack).min(total_samples);
        Self {
            frequency_hz: tone.frequency_hz,
            peak_gain: tone.peak_gain,
            attack_samples,
            total_samples,
            num_sample: 0,
        }
    }

    fn envelope(&self, n: usize) -> f32 {
        if n < self.attack_samples {
            return self.peak_gain * n as f32 / self.attack_samples as f32;
        }
        let decay_samples = self.total_samples.saturating_sub(self.attack_samples).max(1);
        let progress = (n - self.attack_samples) as f32 / decay_samples as f32;
        // Same curve as an exponential ramp from peak to the silence floor.
        self.peak_gain * (SILENCE_FLOOR / self.peak_gain.max(SILENCE_FLOOR)).powf(progress)
    }
}

fn samples_for(length: Duration) -> usize {
    (length.as_secs_f32() * SAMPLE_RATE as f32).round() as usize
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        let n = self.num_sample;
        self.num_sample += 1;

        let t = n as f32 / SAMPLE_RATE as f32;
        Some((2.0 * PI * self.frequency_hz * t).sin() * self.envelope(n))
    }
}

#[cfg(feature = "audio")]
impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.num_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / SAMPLE_RATE as f32,
        ))
    }
}
