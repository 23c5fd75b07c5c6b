use crate::{
    Cue,
    audio::tones::{notes, render},
};

const RATE: u32 = 48_000;

/// WHAT: Every cue renders a distinct, non-empty waveform
/// WHY: Cues must be told apart by ear
#[test]
fn given_all_cues_when_rendering_then_each_waveform_distinct() {
    let rendered: Vec<Vec<f32>> = Cue::ALL.iter().map(|&c| render(c, RATE)).collect();

    for (i, a) in rendered.iter().enumerate() {
        assert!(!a.is_empty());
        for b in rendered.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

/// WHAT: Rendered length matches the note durations
/// WHY: Cues stay short enough not to mask speech
#[test]
fn given_cue_when_rendering_then_length_matches_notes() {
    for &cue in Cue::ALL.iter() {
        let expected: usize = notes(cue)
            .iter()
            .map(|n| (n.secs * RATE as f32) as usize)
            .sum();

        assert_eq!(render(cue, RATE).len(), expected, "{cue}");
    }
}

/// WHAT: Samples stay in range and start silent
/// WHY: The attack ramp avoids clicks at note onsets
#[test]
fn given_cue_when_rendering_then_bounded_with_silent_onset() {
    for &cue in Cue::ALL.iter() {
        let samples = render(cue, RATE);

        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        assert!(samples[0].abs() < f32::EPSILON);
    }
}
