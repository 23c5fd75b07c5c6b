use crate::{CoreError, CoreResult};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Mono FFT resampler used to match recordings to the output device rate.
pub(crate) struct Resampler {
    inner: Fft<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub(crate) fn new(input_rate: u32, output_rate: u32) -> CoreResult<Self> {
        let inner = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            CHUNK_SIZE,
            SUB_CHUNKS,
            1,
            FixedSync::Input,
        )
        .map_err(|e| CoreError::Resampling {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            inner,
            input_rate,
            output_rate,
        })
    }

    /// Convert `samples` from `input_rate` to `output_rate`, borrowing nothing.
    ///
    /// Equal rates return the input unchanged.
    #[track_caller]
    pub(crate) fn convert(
        samples: &[f32],
        input_rate: u32,
        output_rate: u32,
    ) -> CoreResult<Vec<f32>> {
        if input_rate == output_rate {
            return Ok(samples.to_vec());
        }
        Self::new(input_rate, output_rate)?.resample(samples)
    }

    #[track_caller]
    #[instrument(skip(self, samples))]
    pub(crate) fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let ratio = f64::from(self.output_rate) / f64::from(self.input_rate);
        let expected_len = (samples.len() as f64 * ratio) as usize;
        let mut output = Vec::with_capacity(expected_len);
        let mut scratch = vec![0.0f32; self.inner.output_frames_max()];

        for chunk in samples.chunks(CHUNK_SIZE) {
            let written = self.process_chunk(chunk, &mut scratch)?;
            output.extend_from_slice(&scratch[..written]);
        }

        // Zero padding of the last chunk produces a tail past the real signal.
        output.truncate(expected_len);

        debug!(
            input_len = samples.len(),
            output_len = output.len(),
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Resampled audio"
        );

        Ok(output)
    }

    #[track_caller]
    fn process_chunk(&mut self, chunk: &[f32], scratch: &mut [f32]) -> CoreResult<usize> {
        let mut padded;
        let input: &[f32] = if chunk.len() < CHUNK_SIZE {
            padded = chunk.to_vec();
            padded.resize(CHUNK_SIZE, 0.0);
            &padded
        } else {
            chunk
        };

        let input_adapter = InterleavedSlice::new(input, 1, CHUNK_SIZE).map_err(|e| {
            CoreError::Resampling {
                reason: format!("Failed to create input adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let frames = scratch.len();
        let mut output_adapter =
            InterleavedSlice::new_mut(scratch, 1, frames).map_err(|e| CoreError::Resampling {
                reason: format!("Failed to create output adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (_, written) = self
            .inner
            .process_into_buffer(&input_adapter, &mut output_adapter, None)
            .map_err(|e| CoreError::Resampling {
                reason: format!("Resampling failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(written)
    }
}
