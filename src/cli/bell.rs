use std::io::{stdout, Write};

use anyhow::Result;

use crate::audio::Haptics;

/// Stands in for a vibration motor: one terminal bell per "on" pulse.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Haptics for TerminalBell {
    fn vibrate(&self, pattern_ms: &[u64]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        // Even positions are vibration, odd positions are gaps.
        let pulses = pattern_ms.iter().step_by(2).count();
        let mut out = stdout();
        out.write_all("\x07".repeat(pulses).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
