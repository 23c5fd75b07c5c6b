use crate::audio::capture::{MAX_BUFFER_SAMPLES, downmix, encode_wav, push_bounded};

use std::{
    collections::VecDeque,
    io::Cursor,
    sync::{Arc, Mutex},
};

/// WHAT: Buffer respects MAX_BUFFER_SAMPLES limit
/// WHY: Prevents unbounded memory growth during long recordings
#[test]
fn given_buffer_at_max_capacity_when_pushing_samples_then_oldest_discarded() {
    // Given: A buffer at max capacity filled with 0.0
    let mut buf = VecDeque::with_capacity(MAX_BUFFER_SAMPLES);
    buf.extend(std::iter::repeat_n(0.0f32, MAX_BUFFER_SAMPLES));

    // When: Pushing 1024 new samples beyond the limit
    push_bounded(&mut buf, &[1.0f32; 1024]);

    // Then: Length capped and newest samples preserved
    assert_eq!(buf.len(), MAX_BUFFER_SAMPLES);
    assert!((buf[MAX_BUFFER_SAMPLES - 1] - 1.0).abs() < f32::EPSILON);
    assert!((buf[MAX_BUFFER_SAMPLES - 1024] - 1.0).abs() < f32::EPSILON);
    assert!(buf[MAX_BUFFER_SAMPLES - 1025].abs() < f32::EPSILON);
}

/// WHAT: Lock poison recovery preserves buffer data
/// WHY: A panicking callback must not lose captured audio
#[test]
#[allow(clippy::unwrap_used, clippy::panic)]
fn given_poisoned_mutex_when_recovering_then_data_preserved() {
    // Given: A mutex poisoned by a panic while holding the lock
    let buf = Arc::new(Mutex::new(VecDeque::from(vec![0.5f32; 100])));
    let buf_clone = Arc::clone(&buf);

    let _ = std::thread::spawn(move || {
        let _guard = buf_clone.lock().unwrap();
        panic!("intentional panic to poison mutex");
    })
    .join();

    // When: Recovering the way the capture callback does
    let mut recovered = buf.lock().unwrap_or_else(|e| e.into_inner());
    push_bounded(&mut recovered, &[0.25]);

    // Then: Original data is preserved and writes continue
    assert_eq!(recovered.len(), 101);
    assert!((recovered[0] - 0.5).abs() < f32::EPSILON);
}

/// WHAT: Stereo frames average to mono
/// WHY: Recordings are stored single-channel
#[test]
fn given_stereo_frames_when_downmixing_then_channels_averaged() {
    // Given: Two stereo frames
    let interleaved = [1.0, 0.0, -0.5, -0.5];

    // When: Downmixing
    let mono = downmix(&interleaved, 2);

    // Then: One sample per frame
    assert_eq!(mono, vec![0.5, -0.5]);
}

/// WHAT: Mono input passes through downmix untouched
/// WHY: Most microphones are already mono
#[test]
fn given_mono_input_when_downmixing_then_unchanged() {
    let samples = [0.1, 0.2, 0.3];

    assert_eq!(downmix(&samples, 1), samples.to_vec());
}

/// WHAT: Encoded WAV carries the capture rate and every sample
/// WHY: Playback decodes the artifact bytes with a standard reader
#[test]
#[allow(clippy::unwrap_used)]
fn given_samples_when_encoding_wav_then_reader_sees_same_spec_and_length() {
    // Given: Half a second of silence at 16kHz
    let samples = vec![0.0f32; 8_000];

    // When: Encoding
    let bytes = encode_wav(&samples, 16_000).unwrap();

    // Then: RIFF header with mono 16-bit PCM
    assert_eq!(&bytes[..4], b"RIFF");
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 8_000);
}

/// WHAT: Out-of-range samples are clipped, not wrapped
/// WHY: Overdriven input must not turn into loud noise
#[test]
#[allow(clippy::unwrap_used)]
fn given_overdriven_samples_when_encoding_wav_then_clipped_to_full_scale() {
    let bytes = encode_wav(&[2.0, -2.0], 8_000).unwrap();

    let values: Vec<i16> = hound::WavReader::new(Cursor::new(bytes))
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();

    assert_eq!(values, vec![i16::MAX, -i16::MAX]);
}

/// WHAT: Default input device records a playable WAV artifact
/// WHY: End-to-end check of the cpal capture path on real hardware
#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
async fn given_default_input_device_when_capturing_then_wav_artifact() {
    use crate::{CaptureStream, CpalMicrophone, Microphone, WAV_MIME_TYPE};

    // Given: The default microphone, opened
    let mut microphone = CpalMicrophone::new();
    let capture = microphone.open().await.unwrap();

    // When: Capturing half a second
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    let artifact = capture.finish().unwrap();

    // Then: A WAV artifact with a plausible duration
    assert_eq!(artifact.mime_type(), WAV_MIME_TYPE);
    assert!(artifact.duration() > std::time::Duration::from_millis(100));
}
