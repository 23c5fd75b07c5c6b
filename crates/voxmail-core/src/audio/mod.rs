//! cpal-backed audio collaborators: microphone capture and device output.

pub(crate) mod capture;
pub(crate) mod output;
mod resampler;
pub(crate) mod tones;

pub(crate) use resampler::Resampler;

pub use {
    capture::{CpalCapture, CpalMicrophone},
    output::{AudioOutput, SilentOutput},
};
