use super::binaural::BinauralBeats;
use super::tone::ToneSource;
use super::{Tone, ToneOutput};

use anyhow::{anyhow, Result};
use log::debug;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

enum AudioCommand {
    PlayTone(Tone),
    StartSoundscape,
    StopSoundscape,
    Shutdown,
}

/// Handle to a dedicated audio thread that owns the (non-`Send`) rodio output.
pub struct AudioEngineHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
}

impl AudioEngineHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>> {
        let mut guard = self.tx.lock().map_err(|e| anyhow!("audio handle poisoned: {e}"))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut output: Option<(OutputStream, OutputStreamHandle)> = None;
                let mut soundscape: Option<Sink> = None;

                fn ensure_output(
                    output: &mut Option<(OutputStream, OutputStreamHandle)>,
                ) -> Result<OutputStreamHandle, String> {
                    if output.is_none() {
                        let opened = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        *output = Some(opened);
                    }
                    output
                        .as_ref()
                        .map(|(_, handle)| handle.clone())
                        .ok_or_else(|| "audio output unavailable".to_string())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::PlayTone(tone) => {
                            let played = ensure_output(&mut output).and_then(|handle| {
                                let sink = Sink::try_new(&handle)
                                    .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                                sink.append(ToneSource::new(tone));
                                sink.detach();
                                Ok(())
                            });
                            if let Err(err) = played {
                                debug!("tone dropped: {err}");
                            }
                        }
                        AudioCommand::StartSoundscape => {
                            if soundscape.is_some() {
                                continue;
                            }
                            let started = ensure_output(&mut output).and_then(|handle| {
                                let sink = Sink::try_new(&handle)
                                    .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                                sink.append(BinauralBeats::alpha_waves());
                                Ok(sink)
                            });
                            match started {
                                Ok(sink) => soundscape = Some(sink),
                                Err(err) => debug!("soundscape not started: {err}"),
                            }
                        }
                        AudioCommand::StopSoundscape => {
                            if let Some(sink) = soundscape.take() {
                                sink.stop();
                            }
                        }
                        AudioCommand::Shutdown => {
                            if let Some(sink) = soundscape.take() {
                                sink.stop();
                            }
                            break;
                        }
                    }
                }
            })
            .map_err(|e| anyhow!("failed to spawn audio thread: {e}"))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }

    fn send(&self, cmd: AudioCommand) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(cmd).map_err(|_| anyhow!("audio thread has exited"))
    }
}

impl Default for AudioEngineHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneOutput for AudioEngineHandle {
    fn play_tone(&self, tone: Tone) -> Result<()> {
        self.send(AudioCommand::PlayTone(tone))
    }

    fn set_soundscape(&self, playing: bool) -> Result<()> {
        if playing {
            self.send(AudioCommand::StartSoundscape)
        } else {
            self.send(AudioCommand::StopSoundscape)
        }
    }

    fn dispose(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(AudioCommand::Shutdown);
            }
        }
    }
}
