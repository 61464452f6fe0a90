//! Magnitude response of a pole/zero filter.
//!
//! `|H(e^{iω})| = |gain| · |Z(e^{iω})| / |P(e^{iω})|` where `Z` and `P` are the
//! monic polynomials whose roots are the zeros and the poles. Both are evaluated
//! on the unit circle with one FFT each, so no transcendental function is called
//! per bin.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engines::fft::{FftError, evaluate_on_unit_circle};
use crate::math::{Complex, Polynomial, conjugates};

/// Magnitudes for bins `0..=size/2`, from DC to Nyquist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyResponse {
    pub magnitudes: Vec<f64>,
    /// Linear axis from 0 to the Nyquist value, one entry per magnitude.
    pub frequencies: Vec<f64>,
}

impl FrequencyResponse {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Largest finite magnitude, or `0.0` when there is none.
    ///
    /// A pole on the unit circle yields an infinite bin; it is skipped so the
    /// plot range stays usable.
    pub fn peak(&self) -> f64 {
        self.magnitudes
            .iter()
            .copied()
            .filter(|m| m.is_finite())
            .fold(0.0, f64::max)
    }

    /// `(frequency, magnitude)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }
}

fn expand(roots: &[Complex]) -> Vec<Complex> {
    roots.iter().flat_map(|&r| conjugates(r)).collect()
}

/// Computes the magnitude response over `size` FFT bins.
///
/// Every complex root also contributes its conjugate, keeping both polynomials
/// real. `nyquist` is the value shown for the last bin.
pub fn magnitude_response(
    zeros: &[Complex],
    poles: &[Complex],
    gain: Complex,
    size: usize,
    nyquist: f64,
) -> Result<FrequencyResponse, FftError> {
    debug!(
        zeros = zeros.len(),
        poles = poles.len(),
        size,
        "computing frequency response"
    );
    let numerator = Polynomial::from_roots(&expand(zeros));
    let denominator = Polynomial::from_roots(&expand(poles));
    let num = evaluate_on_unit_circle(numerator.coefficients(), size)?;
    let den = evaluate_on_unit_circle(denominator.coefficients(), size)?;

    let scale = gain.norm();
    let half = size / 2;
    let magnitudes = num
        .iter()
        .zip(&den)
        .take(half + 1)
        .map(|(n, d)| scale * n.norm() / d.norm())
        .collect();
    let frequencies = (0..=half)
        .map(|k| {
            if half == 0 {
                0.0
            } else {
                nyquist * k as f64 / half as f64
            }
        })
        .collect();
    Ok(FrequencyResponse {
        magnitudes,
        frequencies,
    })
}
