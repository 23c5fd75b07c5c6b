use crate::audio::Resampler;

const INPUT_SAMPLE_RATE: u32 = 48_000;
const OUTPUT_SAMPLE_RATE: u32 = 16_000;
const ONE_SECOND_INPUT_SAMPLES: usize = INPUT_SAMPLE_RATE as usize;
const ONE_SECOND_OUTPUT_SAMPLES: usize = OUTPUT_SAMPLE_RATE as usize;
const LENGTH_TOLERANCE: u64 = 100;
const TEST_SIGNAL_AMPLITUDE: f32 = 0.5;
const MAX_AMPLITUDE: f32 = 1.5;

/// WHAT: Resampler converts 48kHz to 16kHz with the expected length
/// WHY: Recordings captured at one rate play on devices at another
#[test]
#[allow(clippy::unwrap_used)]
fn given_48khz_audio_when_resampling_to_16khz_then_output_length_approximately_correct() {
    // Given: Resampler configured for 48kHz -> 16kHz
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES];

    // When: Resampling one second of audio
    let output = resampler.resample(&input).unwrap();

    // Then: Output is approximately one second at 16kHz
    assert!(
        (output.len() as i64 - ONE_SECOND_OUTPUT_SAMPLES as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        ONE_SECOND_OUTPUT_SAMPLES,
        output.len()
    );
    assert!(
        output
            .iter()
            .all(|&s| s.is_finite() && s.abs() <= MAX_AMPLITUDE)
    );
}

/// WHAT: Upsampling 16kHz to 48kHz triples the length
/// WHY: Low-rate recordings play on 48kHz output devices
#[test]
#[allow(clippy::unwrap_used)]
fn given_16khz_audio_when_converting_to_48khz_then_length_tripled() {
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_OUTPUT_SAMPLES];

    let output = Resampler::convert(&input, OUTPUT_SAMPLE_RATE, INPUT_SAMPLE_RATE).unwrap();

    let drift = (output.len() as i64 - ONE_SECOND_INPUT_SAMPLES as i64).unsigned_abs();
    assert!(drift < LENGTH_TOLERANCE * 3);
}

/// WHAT: Equal rates skip resampling entirely
/// WHY: No filter delay or rounding on the common path
#[test]
#[allow(clippy::unwrap_used)]
fn given_equal_rates_when_converting_then_samples_unchanged() {
    let input = vec![0.1, -0.2, 0.3];

    let output = Resampler::convert(&input, 44_100, 44_100).unwrap();

    assert_eq!(output, input);
}

/// WHAT: Empty samples return empty output
/// WHY: Edge case handling for zero-length recordings
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_samples_when_resampling_then_empty_output() {
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();

    let output = resampler.resample(&[]).unwrap();

    assert!(output.is_empty());
}
