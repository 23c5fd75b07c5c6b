use crate::{
    Cue,
    audio::{
        capture::encode_wav,
        output::{Mixer, decode_wav},
        tones,
    },
};

use uuid::Uuid;

const RATE: u32 = 8_000;

fn drain(mixer: &mut Mixer, frames: usize) -> Vec<f32> {
    let mut buf = vec![0.0f32; frames];
    mixer.fill(&mut buf, 1);
    buf
}

/// WHAT: An idle mixer outputs silence
/// WHY: Nothing plays until a cue or clip is started
#[test]
fn given_idle_mixer_when_filling_then_silence() {
    let mut mixer = Mixer::new(RATE, 1.0);

    assert!(drain(&mut mixer, 256).iter().all(|s| *s == 0.0));
}

/// WHAT: Triggering a cue plays its rendered samples
/// WHY: Cue playback is sample-exact at full volume
#[test]
fn given_triggered_cue_when_filling_then_rendered_samples_played() {
    // Given: A full-volume mixer with the click cue triggered
    let mut mixer = Mixer::new(RATE, 1.0);
    let expected = tones::render(Cue::Click, RATE);
    mixer.trigger(Cue::Click);

    // When: Draining the whole cue
    let out = drain(&mut mixer, expected.len());

    // Then: Output equals the rendered cue
    assert_eq!(out, expected);
}

/// WHAT: Retriggering a cue restarts it
/// WHY: The same cue never stacks on itself
#[test]
fn given_cue_midway_when_retriggered_then_restarts_from_start() {
    let mut mixer = Mixer::new(RATE, 1.0);
    let expected = tones::render(Cue::Success, RATE);
    mixer.trigger(Cue::Success);
    let _ = drain(&mut mixer, 100);

    mixer.trigger(Cue::Success);
    let out = drain(&mut mixer, 200);

    assert_eq!(out, expected[..200].to_vec());
}

/// WHAT: Different cues overlap
/// WHY: A click during a longer cue must not cut it off
#[test]
fn given_two_cues_when_both_triggered_then_outputs_summed() {
    let mut mixer = Mixer::new(RATE, 0.5);
    let a = tones::render(Cue::Recording, RATE);
    let b = tones::render(Cue::Error, RATE);
    mixer.trigger(Cue::Recording);
    mixer.trigger(Cue::Error);

    let out = drain(&mut mixer, 200);

    for i in 0..200 {
        let expected = ((a[i] + b[i]) * 0.5).clamp(-1.0, 1.0);
        assert!((out[i] - expected).abs() < 1e-6);
    }
}

/// WHAT: A clip reports finished exactly once after its last sample
/// WHY: Drives the one-shot "Playback complete." announcement
#[test]
fn given_loaded_clip_when_played_to_end_then_finished_reported_once() {
    let mut mixer = Mixer::new(RATE, 1.0);
    mixer.load(Uuid::new_v4(), vec![0.5; 10]);

    let out = drain(&mut mixer, 20);

    assert!(out[..10].iter().all(|s| (*s - 0.5).abs() < f32::EPSILON));
    assert!(out[10..].iter().all(|s| *s == 0.0));
    assert!(mixer.take_finished());
    assert!(!mixer.take_finished());
}

/// WHAT: Pausing holds the position and resume continues from it
/// WHY: Play after pause continues the same recording
#[test]
fn given_paused_clip_when_resumed_then_continues_where_it_left_off() {
    // Given: A ramp clip played halfway, then paused
    let id = Uuid::new_v4();
    let clip: Vec<f32> = (0..8).map(|i| i as f32 / 10.0).collect();
    let mut mixer = Mixer::new(RATE, 1.0);
    mixer.load(id, clip.clone());
    let _ = drain(&mut mixer, 4);
    mixer.pause();

    // Then: Silence while paused
    assert!(drain(&mut mixer, 4).iter().all(|s| *s == 0.0));

    // When: Resuming the same artifact
    assert!(mixer.resume(id));
    let out = drain(&mut mixer, 4);

    // Then: Remaining half plays
    assert_eq!(out, clip[4..].to_vec());
}

/// WHAT: Resume refuses a different artifact
/// WHY: A new recording must be loaded fresh
#[test]
fn given_paused_clip_when_resuming_other_artifact_then_refused() {
    let mut mixer = Mixer::new(RATE, 1.0);
    mixer.load(Uuid::new_v4(), vec![0.1; 4]);
    mixer.pause();

    assert!(!mixer.resume(Uuid::new_v4()));
}

/// WHAT: Unloading discards the clip without a finished signal
/// WHY: Stopping is not completing
#[test]
fn given_playing_clip_when_unloaded_then_silent_and_not_finished() {
    let mut mixer = Mixer::new(RATE, 1.0);
    mixer.load(Uuid::new_v4(), vec![0.3; 100]);

    mixer.unload();

    assert!(drain(&mut mixer, 10).iter().all(|s| *s == 0.0));
    assert!(!mixer.take_finished());
}

/// WHAT: Multichannel frames get the same sample on every channel
/// WHY: Mono mix feeds stereo devices
#[test]
fn given_stereo_output_when_filling_then_channels_duplicated() {
    let mut mixer = Mixer::new(RATE, 1.0);
    mixer.load(Uuid::new_v4(), vec![0.2, 0.4]);
    let mut buf = vec![0.0f32; 4];

    mixer.fill(&mut buf, 2);

    assert_eq!(buf, vec![0.2, 0.2, 0.4, 0.4]);
}

/// WHAT: Captured WAV decodes back at the device rate
/// WHY: Recorded artifacts feed the preview player
#[test]
#[allow(clippy::unwrap_used)]
fn given_encoded_wav_when_decoding_at_same_rate_then_samples_close() {
    // Given: A short ramp encoded as WAV
    let samples: Vec<f32> = (0..100).map(|i| i as f32 / 200.0).collect();
    let bytes = encode_wav(&samples, RATE).unwrap();

    // When: Decoding at the same rate
    let decoded = decode_wav(&bytes, RATE).unwrap();

    // Then: Same length, within 16-bit quantization
    assert_eq!(decoded.len(), samples.len());
    for (a, b) in decoded.iter().zip(&samples) {
        assert!((a - b).abs() < 1e-3);
    }
}

/// WHAT: Garbage bytes fail to decode
/// WHY: Corrupt artifacts surface as an error, not noise
#[test]
fn given_non_wav_bytes_when_decoding_then_error() {
    assert!(decode_wav(b"definitely not audio", RATE).is_err());
}

/// WHAT: Default output device accepts cues and clips
/// WHY: End-to-end check of the cpal output path on real hardware
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_default_output_device_when_playing_cue_and_clip_then_ok() {
    use crate::{AudioOutput, CuePlayer, Player, RecordingArtifact, WAV_MIME_TYPE};

    let output = AudioOutput::new(0.3).unwrap();
    let wav = encode_wav(&tones::render(Cue::Success, 16_000), 16_000).unwrap();
    let clip = RecordingArtifact::new(wav, WAV_MIME_TYPE, std::time::Duration::from_millis(200));

    CuePlayer::play(&output, Cue::Click).unwrap();
    Player::play(&output, &clip).unwrap();
    Player::pause(&output);
    Player::play(&output, &clip).unwrap();
    Player::stop(&output);
}
