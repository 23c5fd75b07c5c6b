use crate::{
    CoreError, CoreResult, Cue, CuePlayer,
    audio::{Resampler, tones},
    recording::{Player, RecordingArtifact},
};

use std::{
    io::Cursor,
    panic::Location,
    sync::{Arc, Mutex, MutexGuard},
};

use cpal::{
    Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

struct Voice {
    samples: Vec<f32>,
    position: Option<usize>,
}

impl Voice {
    fn next(&mut self) -> f32 {
        let Some(pos) = self.position else {
            return 0.0;
        };
        match self.samples.get(pos) {
            Some(&s) => {
                self.position = Some(pos + 1);
                s
            }
            None => {
                self.position = None;
                0.0
            }
        }
    }
}

struct Clip {
    artifact_id: Uuid,
    voice: Voice,
    paused: bool,
}

/// Everything the output callback mixes.
pub(crate) struct Mixer {
    cues: Vec<Voice>,
    clip: Option<Clip>,
    cue_volume: f32,
    clip_finished: bool,
}

impl Mixer {
    pub(crate) fn new(sample_rate: u32, cue_volume: f32) -> Self {
        Self {
            cues: Cue::ALL
                .iter()
                .map(|&cue| Voice {
                    samples: tones::render(cue, sample_rate),
                    position: None,
                })
                .collect(),
            clip: None,
            cue_volume,
            clip_finished: false,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let cues: f32 = self.cues.iter_mut().map(Voice::next).sum::<f32>() * self.cue_volume;

        let clip = match &mut self.clip {
            Some(clip) if !clip.paused => {
                let s = clip.voice.next();
                if clip.voice.position.is_none() {
                    self.clip = None;
                    self.clip_finished = true;
                }
                s
            }
            _ => 0.0,
        };

        (cues + clip).clamp(-1.0, 1.0)
    }

    /// Restart `cue` from its first sample.
    pub(crate) fn trigger(&mut self, cue: Cue) {
        if let Some(voice) = self.cues.get_mut(cue.index()) {
            voice.position = Some(0);
        }
    }

    /// Resume the loaded clip if it is `artifact_id` and paused.
    pub(crate) fn resume(&mut self, artifact_id: Uuid) -> bool {
        match self.clip.as_mut() {
            Some(clip) if clip.artifact_id == artifact_id && clip.paused => {
                clip.paused = false;
                true
            }
            _ => false,
        }
    }

    /// Replace the loaded clip and start it.
    pub(crate) fn load(&mut self, artifact_id: Uuid, samples: Vec<f32>) {
        self.clip_finished = false;
        self.clip = Some(Clip {
            artifact_id,
            voice: Voice {
                samples,
                position: Some(0),
            },
            paused: false,
        });
    }

    pub(crate) fn pause(&mut self) {
        if let Some(clip) = self.clip.as_mut() {
            clip.paused = true;
        }
    }

    pub(crate) fn unload(&mut self) {
        self.clip = None;
        self.clip_finished = false;
    }

    pub(crate) fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.clip_finished)
    }

    pub(crate) fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }
}

/// Default output device shared by cue playback and recording preview.
///
/// Each cue has its own voice, so different cues overlap while replaying the
/// same cue restarts it. At most one clip is loaded at a time.
pub struct AudioOutput {
    _stream: Stream,
    mixer: Arc<Mutex<Mixer>>,
    sample_rate: u32,
}

impl AudioOutput {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// Returns error if no output device exists or its stream cannot start.
    #[track_caller]
    #[instrument]
    pub fn new(cue_volume: f32) -> CoreResult<Self> {
        let device = cpal::default_host().default_output_device().ok_or_else(|| {
            CoreError::AudioOutput {
                reason: "No output device found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config: StreamConfig = device
            .default_output_config()
            .map_err(|e| CoreError::AudioOutput {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .into();

        let sample_rate = config.sample_rate;
        let channels = usize::from(config.channels);
        let mixer = Arc::new(Mutex::new(Mixer::new(
            sample_rate,
            cue_volume.clamp(0.0, 1.0),
        )));

        let stream = {
            let mixer = Arc::clone(&mixer);
            device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let mut mixer = mixer.lock().unwrap_or_else(|e| {
                            error!("Mixer lock poisoned, recovering: {}", e);
                            e.into_inner()
                        });
                        mixer.fill(data, channels);
                    },
                    |err| {
                        error!("Audio output stream error: {}", err);
                    },
                    None,
                )
                .map_err(|e| CoreError::AudioOutput {
                    reason: format!("Failed to build stream: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?
        };

        stream.play().map_err(|e| CoreError::AudioOutput {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(sample_rate, channels, "Audio output opened");

        Ok(Self {
            _stream: stream,
            mixer,
            sample_rate,
        })
    }

    fn mixer(&self) -> MutexGuard<'_, Mixer> {
        self.mixer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CuePlayer for AudioOutput {
    fn play(&self, cue: Cue) -> CoreResult<()> {
        self.mixer().trigger(cue);
        Ok(())
    }
}

impl Player for AudioOutput {
    #[instrument(skip(self, artifact), fields(artifact = %artifact.id()))]
    fn play(&self, artifact: &RecordingArtifact) -> CoreResult<()> {
        if self.mixer().resume(artifact.id()) {
            debug!("Playback resumed");
            return Ok(());
        }

        let samples = decode_wav(artifact.data(), self.sample_rate)?;
        self.mixer().load(artifact.id(), samples);
        debug!("Playback started");

        Ok(())
    }

    fn pause(&self) {
        self.mixer().pause();
    }

    fn stop(&self) {
        self.mixer().unload();
    }

    fn take_finished(&self) -> bool {
        self.mixer().take_finished()
    }
}

/// Decode a mono 16-bit WAV payload and resample it to `output_rate`.
#[track_caller]
pub(crate) fn decode_wav(data: &[u8], output_rate: u32) -> CoreResult<Vec<f32>> {
    let reader = hound::WavReader::new(Cursor::new(data)).map_err(|e| CoreError::Encoding {
        reason: format!("Failed to read WAV: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let input_rate = reader.spec().sample_rate;
    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| f32::from(v) / f32::from(i16::MAX)))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| CoreError::Encoding {
            reason: format!("Failed to decode WAV samples: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Resampler::convert(&samples, input_rate, output_rate)
}

/// Output stand-in used when no output device can be opened.
///
/// Every call reports the missing device so the feedback façade logs it.
#[derive(Debug, Default)]
pub struct SilentOutput;

impl SilentOutput {
    #[track_caller]
    fn unavailable() -> CoreError {
        CoreError::AudioOutput {
            reason: "No audio output available".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl CuePlayer for SilentOutput {
    fn play(&self, _cue: Cue) -> CoreResult<()> {
        Err(Self::unavailable())
    }
}

impl Player for SilentOutput {
    fn play(&self, _artifact: &RecordingArtifact) -> CoreResult<()> {
        Err(Self::unavailable())
    }

    fn pause(&self) {}

    fn stop(&self) {}
}
