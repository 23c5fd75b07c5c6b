mod capture;
mod output;
mod resampler;
mod tones;
