use crate::{
    CoreError, CoreResult,
    recording::{CaptureStream, Microphone, RecordingArtifact, WAV_MIME_TYPE},
};

use std::{
    collections::VecDeque,
    io::Cursor,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    BuildStreamError, PlayStreamError, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Maximum samples to buffer (5 minutes at 48kHz mono).
/// Oldest samples are dropped beyond this.
pub(crate) const MAX_BUFFER_SAMPLES: usize = 48_000 * 60 * 5;

/// Microphone backed by the default cpal input device.
///
/// The device is looked up on every [`open`](Microphone::open), so a
/// microphone plugged in after startup is picked up.
#[derive(Debug, Default)]
pub struct CpalMicrophone;

impl CpalMicrophone {
    /// Create a microphone handle. No device is touched until opened.
    pub fn new() -> Self {
        Self
    }

    /// Whether the default host currently has an input device.
    pub fn is_available() -> bool {
        cpal::default_host().default_input_device().is_some()
    }
}

impl Microphone for CpalMicrophone {
    type Capture = CpalCapture;

    #[instrument(skip(self))]
    async fn open(&mut self) -> CoreResult<CpalCapture> {
        CpalCapture::open()
    }
}

/// Live capture from a cpal input stream. Dropping it closes the device.
pub struct CpalCapture {
    stream: Option<Stream>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    /// Set before the stream is dropped so a late callback writes nothing.
    shutdown: Arc<AtomicBool>,
    sample_rate: u32,
    channels: u16,
}

impl CpalCapture {
    #[track_caller]
    fn open() -> CoreResult<Self> {
        let device = cpal::default_host().default_input_device().ok_or_else(|| {
            CoreError::DeviceUnavailable {
                reason: "No input device found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config: StreamConfig = device
            .default_input_config()
            .map_err(|e| CoreError::DeviceUnavailable {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .into();

        let samples = Arc::new(Mutex::new(VecDeque::with_capacity(MAX_BUFFER_SAMPLES)));
        let shutdown = Arc::new(AtomicBool::new(false));

        let stream = {
            let samples = Arc::clone(&samples);
            let shutdown = Arc::clone(&shutdown);
            device
                .build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if shutdown.load(Ordering::Acquire) {
                            return;
                        }
                        let mut buf = samples.lock().unwrap_or_else(|e| {
                            error!("Sample buffer lock poisoned, recovering: {}", e);
                            e.into_inner()
                        });
                        push_bounded(&mut buf, data);
                    },
                    |err| {
                        error!("Audio input stream error: {}", err);
                    },
                    None,
                )
                .map_err(build_error)?
        };

        stream.play().map_err(play_error)?;

        info!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Microphone opened"
        );

        Ok(Self {
            stream: Some(stream),
            samples,
            shutdown,
            sample_rate: config.sample_rate,
            channels: config.channels,
        })
    }

    fn release(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Microphone released");
        }
    }
}

impl CaptureStream for CpalCapture {
    #[instrument(skip(self))]
    fn finish(mut self) -> CoreResult<RecordingArtifact> {
        self.release();

        let interleaved: Vec<f32> = {
            let buf = self.samples.lock().unwrap_or_else(|e| e.into_inner());
            buf.iter().copied().collect()
        };

        let mono = downmix(&interleaved, self.channels);
        debug!(sample_count = mono.len(), "Captured audio samples");

        let data = encode_wav(&mono, self.sample_rate)?;
        let duration = Duration::from_secs_f64(mono.len() as f64 / f64::from(self.sample_rate));

        Ok(RecordingArtifact::new(data, WAV_MIME_TYPE, duration))
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Append `data`, dropping the oldest samples past [`MAX_BUFFER_SAMPLES`].
pub(crate) fn push_bounded(buf: &mut VecDeque<f32>, data: &[f32]) {
    buf.extend(data.iter().copied());
    while buf.len() > MAX_BUFFER_SAMPLES {
        buf.pop_front();
    }
}

/// Average interleaved frames down to one channel.
pub(crate) fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 | 1 => interleaved.to_vec(),
        n => interleaved
            .chunks_exact(usize::from(n))
            .map(|frame| frame.iter().sum::<f32>() / f32::from(n))
            .collect(),
    }
}

/// Encode mono f32 samples as 16-bit PCM WAV.
#[track_caller]
pub(crate) fn encode_wav(samples: &[f32], sample_rate: u32) -> CoreResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| CoreError::Encoding {
                reason: format!("Failed to create WAV writer: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(value)
                .map_err(|e| CoreError::Encoding {
                    reason: format!("Failed to write sample: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        writer.finalize().map_err(|e| CoreError::Encoding {
            reason: format!("Failed to finalize WAV: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    }

    Ok(cursor.into_inner())
}

#[track_caller]
fn build_error(e: BuildStreamError) -> CoreError {
    let location = ErrorLocation::from(Location::caller());
    let reason = format!("Failed to build stream: {}", e);

    match e {
        BuildStreamError::DeviceNotAvailable => CoreError::DeviceUnavailable { reason, location },
        _ if reason.to_lowercase().contains("permission") => {
            CoreError::PermissionDenied { reason, location }
        }
        _ => CoreError::DeviceUnavailable { reason, location },
    }
}

#[track_caller]
fn play_error(e: PlayStreamError) -> CoreError {
    let location = ErrorLocation::from(Location::caller());
    let reason = format!("Failed to start stream: {}", e);

    if reason.to_lowercase().contains("permission") {
        CoreError::PermissionDenied { reason, location }
    } else {
        CoreError::DeviceUnavailable { reason, location }
    }
}
