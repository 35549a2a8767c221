use std::f32::consts::PI;
#[cfg(feature = "audio")]
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const TARGET_GAIN: f32 = 0.02;
const FADE_IN_SECS: f32 = 1.0;

/// Binaural beat generator for the exercise soundscape.
/// Plays two slightly different frequencies in each ear to create a perceived "beat";
/// fades in over the first second.
pub struct BinauralBeats {
    left_freq: f32,
    right_freq: f32,
    sample_rate: u32,
    num_sample: usize,
}

impl BinauralBeats {
    pub fn new(left_freq: f32, right_freq: f32) -> Self {
        Self {
            left_freq,
            right_freq,
            sample_rate: SAMPLE_RATE,
            num_sample: 0,
        }
    }

    /// 200 Hz carrier with a 10 Hz (alpha band) offset on the right ear.
    pub fn alpha_waves() -> Self {
        Self::new(200.0, 210.0)
    }

    fn gain(&self, t: f32) -> f32 {
        TARGET_GAIN * (t / FADE_IN_SECS).min(1.0)
    }
}

impl Iterator for BinauralBeats {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);

        // Interleaved stereo: a frame is two samples.
        let frame = self.num_sample / 2;
        let t = frame as f32 / self.sample_rate as f32;

        let freq = if self.num_sample % 2 == 0 {
            self.left_freq
        } else {
            self.right_freq
        };

        Some((2.0 * PI * freq * t).sin() * self.gain(t))
    }
}

#[cfg(feature = "audio")]
impl rodio::Source for BinauralBeats {
    fn current_frame_len(&self) -> Option<usize> {
        None // Infinite stream
    }

    fn channels(&self) -> u16 {
        2 // Stereo
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None // Infinite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soundscape_never_exceeds_target_gain() {
        let beats = BinauralBeats::alpha_waves();
        assert!(beats
            .take(SAMPLE_RATE as usize * 4)
            .all(|s| s.abs() <= TARGET_GAIN + f32::EPSILON));
    }

    #[test]
    fn soundscape_starts_silent() {
        let mut beats = BinauralBeats::alpha_waves();
        let first = beats.next().unwrap_or(1.0);
        assert!(first.abs() < 1e-6);
    }
}
