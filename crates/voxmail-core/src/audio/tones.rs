use crate::Cue;

use std::f32::consts::TAU;

/// Length of the attack and release ramps, in seconds.
const RAMP_SECS: f32 = 0.005;

/// One note of a cue: frequency in Hz and length in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Note {
    pub(crate) frequency: f32,
    pub(crate) secs: f32,
}

const fn note(frequency: f32, secs: f32) -> Note {
    Note { frequency, secs }
}

/// The note sequence played for each cue.
pub(crate) fn notes(cue: Cue) -> &'static [Note] {
    match cue {
        Cue::Success => const { &[note(660.0, 0.08), note(880.0, 0.12)] },
        Cue::Error => const { &[note(440.0, 0.12), note(330.0, 0.18)] },
        Cue::Notification => const { &[note(880.0, 0.06), note(660.0, 0.06)] },
        Cue::Click => const { &[note(1_200.0, 0.02)] },
        Cue::Recording => const { &[note(1_000.0, 0.15)] },
        Cue::Login => const { &[note(523.0, 0.07), note(659.0, 0.07), note(784.0, 0.12)] },
        Cue::Logout => const { &[note(784.0, 0.07), note(523.0, 0.12)] },
    }
}

/// Render `cue` as mono samples at `sample_rate`.
pub(crate) fn render(cue: Cue, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let mut out = Vec::new();

    for n in notes(cue) {
        let len = (n.secs * rate) as usize;
        let ramp = ((RAMP_SECS * rate) as usize).clamp(1, len.max(1));

        out.extend((0..len).map(|i| {
            let envelope = if i < ramp {
                i as f32 / ramp as f32
            } else if len - i <= ramp {
                (len - i) as f32 / ramp as f32
            } else {
                1.0
            };
            (TAU * n.frequency * i as f32 / rate).sin() * envelope
        }));
    }

    out
}
