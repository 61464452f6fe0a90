use super::sine_table::{SINE_TABLE_LEN, StridedView, sine_table};

/// In-place forward transform with a positive exponent:
/// `X[k] = Σ x[n] e^{+2πikn/N}`.
///
/// Lengths must already be validated: equal, a power of two, at most
/// `SINE_TABLE_LEN`.
pub(crate) fn transform(real: &mut [f64], imag: &mut [f64]) {
    let n = real.len();
    match n {
        0 | 1 => return,
        2 => {
            let (r0, i0) = (real[0], imag[0]);
            real[0] = r0 + real[1];
            imag[0] = i0 + imag[1];
            real[1] = r0 - real[1];
            imag[1] = i0 - imag[1];
            return;
        }
        _ => {}
    }
    let table = sine_table();
    let stride = SINE_TABLE_LEN / n;
    let sin = StridedView::new(table, 0, stride);
    let cos = StridedView::new(table, SINE_TABLE_LEN / 4, stride);
    decimate(real, imag, sin, cos);
    unscramble(real, imag);
}

/// Decimation in frequency; leaves the output in bit-reversed order.
fn decimate(real: &mut [f64], imag: &mut [f64], sin: StridedView<'_>, cos: StridedView<'_>) {
    if real.len() == 4 {
        fft4(real, imag);
        return;
    }
    let half = real.len() / 2;
    let (real0, real1) = real.split_at_mut(half);
    let (imag0, imag1) = imag.split_at_mut(half);
    for i in 0..half {
        let nr = real0[i] - real1[i];
        let ni = imag0[i] - imag1[i];
        real0[i] += real1[i];
        imag0[i] += imag1[i];
        let (s, c) = (sin.get(i), cos.get(i));
        real1[i] = nr * c - ni * s;
        imag1[i] = nr * s + ni * c;
    }
    let sin = sin.slice(0, 2);
    let cos = cos.slice(0, 2);
    decimate(real0, imag0, sin, cos);
    decimate(real1, imag1, sin, cos);
}

#[inline]
fn fft4(real: &mut [f64], imag: &mut [f64]) {
    let ns = [
        real[0] + real[2],
        imag[0] + imag[2],
        real[1] + real[3],
        imag[1] + imag[3],
        real[0] - real[2],
        imag[0] - imag[2],
        imag[3] - imag[1],
        real[1] - real[3],
    ];
    real[0] = ns[0] + ns[2];
    imag[0] = ns[1] + ns[3];
    real[1] = ns[0] - ns[2];
    imag[1] = ns[1] - ns[3];
    real[2] = ns[4] + ns[6];
    imag[2] = ns[5] + ns[7];
    real[3] = ns[4] - ns[6];
    imag[3] = ns[5] - ns[7];
}

/// Reverses the low 16 bits of `x`.
#[inline]
pub fn reverse16(x: u32) -> u32 {
    let x = ((x & 0x5555_5555) << 1) | ((x & 0xAAAA_AAAA) >> 1);
    let x = ((x & 0x3333_3333) << 2) | ((x & 0xCCCC_CCCC) >> 2);
    let x = ((x & 0x0F0F_0F0F) << 4) | ((x & 0xF0F0_F0F0) >> 4);
    ((x & 0x00FF_00FF) << 8) | ((x & 0xFF00_FF00) >> 8)
}

/// Swaps each index with its bit reversal, restoring natural order.
fn unscramble(real: &mut [f64], imag: &mut [f64]) {
    let n = real.len();
    let shift = 16 - n.trailing_zeros();
    for i in (1..n).rev() {
        let j = (reverse16(i as u32) >> shift) as usize;
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn naive(real: &[f64], imag: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = real.len();
        let mut out_re = vec![0.0; n];
        let mut out_im = vec![0.0; n];
        for k in 0..n {
            for j in 0..n {
                let theta = TAU * (k * j) as f64 / n as f64;
                let (s, c) = theta.sin_cos();
                out_re[k] += real[j] * c - imag[j] * s;
                out_im[k] += real[j] * s + imag[j] * c;
            }
        }
        (out_re, out_im)
    }

    #[test]
    fn reverse16_reverses_low_bits() {
        assert_eq!(reverse16(1), 0x8000);
        assert_eq!(reverse16(0x8000), 1);
        assert_eq!(reverse16(0b1011), 0b1101 << 12);
        assert_eq!(reverse16(0xFFFF), 0xFFFF);
        assert_eq!(reverse16(6) >> 13, 3);
    }

    #[test]
    fn fft4_matches_naive_dft_in_bit_reversed_order() {
        let mut re = [1.0, 2.0, -1.0, 0.5];
        let mut im = [0.0, -1.0, 3.0, 2.0];
        let (want_re, want_im) = naive(&re, &im);
        fft4(&mut re, &mut im);
        for (slot, bin) in [0, 2, 1, 3].into_iter().enumerate() {
            assert_abs_diff_eq!(re[slot], want_re[bin], epsilon = 1e-12);
            assert_abs_diff_eq!(im[slot], want_im[bin], epsilon = 1e-12);
        }
    }

    #[test]
    fn transform_matches_naive_dft() {
        for n in [2usize, 4, 8, 16, 64, 256] {
            let re: Vec<f64> = (0..n).map(|i| ((i * 7 + 3) % 11) as f64 - 5.0).collect();
            let im: Vec<f64> = (0..n).map(|i| ((i * 5 + 1) % 13) as f64 * 0.25).collect();
            let (want_re, want_im) = naive(&re, &im);
            let (mut got_re, mut got_im) = (re.clone(), im.clone());
            transform(&mut got_re, &mut got_im);
            for k in 0..n {
                assert_abs_diff_eq!(got_re[k], want_re[k], epsilon = 1e-9);
                assert_abs_diff_eq!(got_im[k], want_im[k], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn single_point_is_unchanged() {
        let (mut re, mut im) = ([3.0], [-2.0]);
        transform(&mut re, &mut im);
        assert_eq!((re[0], im[0]), (3.0, -2.0));
    }
}
