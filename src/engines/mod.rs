//! Numerical engines: the FFT and the frequency response built on it.

pub mod fft;
pub mod response;

pub use response::{FrequencyResponse, magnitude_response};
