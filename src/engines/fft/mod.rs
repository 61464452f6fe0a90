//! Radix-2 decimation-in-frequency FFT over split real/imaginary buffers.
//!
//! The transform uses a positive exponent, so bin `k` of the transform of a
//! coefficient sequence `c` equals the polynomial `Σ c[n] x^n` evaluated at
//! `x = e^{2πik/N}`. This is what the frequency response needs: one FFT gives a
//! polynomial's values on `N` evenly spaced points of the unit circle.
//!
//! Twiddle factors come from one process-wide sine table ([`sine_table`]) built
//! on first use and never written again. The recursion works in place on
//! sub-slices of the caller's buffers and reads the table through strided views,
//! doubling the stride at each level; the base case is an unrolled size-4
//! butterfly. A final pass swaps every index with its bit reversal.
//!
//! Supported sizes are powers of two from 1 to [`SINE_TABLE_LEN`].

mod fft_core;
mod sine_table;

use crate::math::Complex;

pub use fft_core::reverse16;
pub use sine_table::{SINE_TABLE_LEN, sine_table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    NotPowerOfTwo(usize),
    TooLarge { size: usize, max: usize },
    LengthMismatch { real: usize, imag: usize },
    /// The polynomial has at least as many coefficients as there are bins.
    DegreeTooHigh { degree: usize, size: usize },
}

impl std::fmt::Display for FftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPowerOfTwo(size) => write!(f, "FFT size {size} is not a power of two"),
            Self::TooLarge { size, max } => {
                write!(f, "FFT size {size} exceeds the maximum of {max}")
            }
            Self::LengthMismatch { real, imag } => write!(
                f,
                "real and imaginary buffers differ in length ({real} vs {imag})"
            ),
            Self::DegreeTooHigh { degree, size } => write!(
                f,
                "polynomial degree {degree} needs more than {size} frequency bins"
            ),
        }
    }
}

impl std::error::Error for FftError {}

/// Checks that `size` is a power of two the sine table can serve.
pub fn validate_size(size: usize) -> Result<(), FftError> {
    if !size.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo(size));
    }
    if size > SINE_TABLE_LEN {
        return Err(FftError::TooLarge {
            size,
            max: SINE_TABLE_LEN,
        });
    }
    Ok(())
}

/// Transforms `real`/`imag` in place, leaving the output in natural order.
///
/// ```rust
/// use polezero::engines::fft::fft;
///
/// let mut re = vec![1.0, 0.0, 0.0, 0.0];
/// let mut im = vec![0.0; 4];
/// fft(&mut re, &mut im).unwrap();
/// assert_eq!(re, vec![1.0; 4]);
/// ```
pub fn fft(real: &mut [f64], imag: &mut [f64]) -> Result<(), FftError> {
    if real.len() != imag.len() {
        return Err(FftError::LengthMismatch {
            real: real.len(),
            imag: imag.len(),
        });
    }
    validate_size(real.len())?;
    fft_core::transform(real, imag);
    Ok(())
}

/// Values of the polynomial with ascending `coefficients` at `e^{2πik/size}`
/// for `k = 0..size`.
pub fn evaluate_on_unit_circle(
    coefficients: &[Complex],
    size: usize,
) -> Result<Vec<Complex>, FftError> {
    validate_size(size)?;
    if coefficients.len() > size {
        return Err(FftError::DegreeTooHigh {
            degree: coefficients.len() - 1,
            size,
        });
    }
    let mut real = vec![0.0; size];
    let mut imag = vec![0.0; size];
    for (i, c) in coefficients.iter().enumerate() {
        real[i] = c.real;
        imag[i] = c.imag;
    }
    fft_core::transform(&mut real, &mut imag);
    Ok(real
        .into_iter()
        .zip(imag)
        .map(|(re, im)| Complex::new(re, im))
        .collect())
}
