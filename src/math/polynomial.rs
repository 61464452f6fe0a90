//! Polynomials with complex coefficients and Halley root extraction.
//!
//! Coefficients are stored in ascending order: `coefficients()[k]` multiplies `x^k`.
//! The same order is used for FFT input and for display/import elsewhere in the crate.
//!
//! Root finding runs Halley's method from random starting points, restarting up to
//! [`HalleySolver::max_trials`] times, then deflates the found root out of the
//! polynomial and repeats. Results are sorted with [`Complex::compare`] so the
//! output does not depend on which root a trial happened to converge to first.

use std::fmt;

use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::math::{Complex, MathError};

/// Step size below which a Halley iterate is accepted as a root.
pub const ROOT_EPSILON: f64 = 1e-10;

/// Polynomial as an ascending coefficient sequence (length = degree + 1).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<Complex>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<Complex>) -> Self {
        Self { coeffs }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self {
            coeffs: vec![Complex::ONE],
        }
    }

    /// Monic polynomial `prod (x - r)` over the supplied roots.
    ///
    /// Roots equal to zero (within [`crate::math::EPSILON`]) contribute no factor: a
    /// root at the origin only shows up as a missing degree. Each factor is folded in
    /// place, highest coefficient first, with the new top slot starting at zero.
    pub fn from_roots(roots: &[Complex]) -> Self {
        let mut desc = vec![Complex::ONE];
        for &root in roots {
            if root.is_zero() {
                continue;
            }
            desc.push(Complex::ZERO);
            for i in (1..desc.len()).rev() {
                desc[i] = desc[i] - root * desc[i - 1];
            }
        }
        desc.reverse();
        Self { coeffs: desc }
    }

    pub fn coefficients(&self) -> &[Complex] {
        &self.coeffs
    }

    pub fn into_coefficients(self) -> Vec<Complex> {
        self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, x: Complex) -> Complex {
        self.coeffs
            .iter()
            .rev()
            .fold(Complex::ZERO, |acc, &c| acc * x + c)
    }

    /// `(f(x), f'(x), f''(x))` by direct summation over the coefficients.
    pub fn derivatives(&self, x: Complex) -> (Complex, Complex, Complex) {
        let mut f0 = Complex::ZERO;
        let mut f1 = Complex::ZERO;
        let mut f2 = Complex::ZERO;
        // x^i, x^(i-1), x^(i-2); the lower powers stay zero until i reaches them.
        let mut x_i = Complex::ONE;
        let mut x_im1 = Complex::ZERO;
        let mut x_im2 = Complex::ZERO;
        for (i, &c) in self.coeffs.iter().enumerate() {
            let k = i as f64;
            f0 = f0 + c * x_i;
            f1 = f1 + Complex::from_real(k) * c * x_im1;
            f2 = f2 + Complex::from_real(k * (k - 1.0)) * c * x_im2;
            x_im2 = x_im1;
            x_im1 = x_i;
            x_i = x_i * x;
        }
        (f0, f1, f2)
    }

    /// Synthetic division by `(x - root)`.
    ///
    /// The root is assumed exact; the remainder is discarded without a check.
    pub fn deflate(&self, root: Complex) -> Self {
        let n = self.coeffs.len();
        let mut quotient = vec![Complex::ZERO; n.saturating_sub(1)];
        let mut carry = Complex::ZERO;
        for i in (1..n).rev() {
            carry = self.coeffs[i] + carry * root;
            quotient[i - 1] = carry;
        }
        Self { coeffs: quotient }
    }

    /// Drops exactly-zero leading (highest-degree) coefficients.
    ///
    /// # Errors
    /// Returns [`MathError::InvalidInput`] for the zero polynomial.
    pub fn trimmed(&self) -> Result<Self, MathError> {
        let len = self
            .coeffs
            .iter()
            .rposition(|c| c.real != 0.0 || c.imag != 0.0)
            .map(|top| top + 1)
            .ok_or(MathError::InvalidInput("zero polynomial has no finite root set"))?;
        Ok(Self {
            coeffs: self.coeffs[..len].to_vec(),
        })
    }

    /// One Halley update `x - 2 f f' / (2 f'^2 - f f'')`.
    pub fn halley_step(&self, x: Complex) -> Complex {
        let (f0, f1, f2) = self.derivatives(x);
        let two = Complex::from_real(2.0);
        x - (two * f0 * f1) / (two * f1 * f1 - f0 * f2)
    }

    /// All roots with the default solver and the thread-local RNG.
    pub fn find_roots(&self) -> Result<Vec<Complex>, MathError> {
        HalleySolver::default().find_roots(self)
    }
}

/// Renders highest degree first: `(c) x^2 + (c) x + (c)`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(crate::math::complex::DEFAULT_PRECISION);
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if i + 1 != self.coeffs.len() {
                write!(f, " + ")?;
            }
            match i {
                0 => write!(f, "({c:.p$})")?,
                1 => write!(f, "({c:.p$}) x")?,
                _ => write!(f, "({c:.p$}) x^{i}")?,
            }
        }
        Ok(())
    }
}

/// Halley iteration with random restarts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalleySolver {
    /// Accept an iterate once the step size falls below this.
    pub tolerance: f64,
    /// Independent random starting points tried per root.
    pub max_trials: usize,
    /// Iterations always run before the stall test applies.
    pub min_iterations: usize,
    /// After `min_iterations`, keep iterating only while
    /// `step / previous_step` stays below this.
    pub stall_ratio: f64,
}

impl Default for HalleySolver {
    fn default() -> Self {
        Self {
            tolerance: ROOT_EPSILON,
            max_trials: 100,
            min_iterations: 10,
            stall_ratio: 0.95,
        }
    }
}

impl HalleySolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn find_root(&self, poly: &Polynomial) -> Result<Complex, MathError> {
        self.find_root_with_rng(poly, &mut rand::rng())
    }

    /// Finds one root of `poly`, drawing starting points from `rng`.
    ///
    /// Each trial starts at a point whose real and imaginary parts are both
    /// `U[0,1) * 10^(3 U[0,1))`, spreading magnitudes log-uniformly over three
    /// decades. The first converged trial wins.
    ///
    /// # Errors
    /// - [`MathError::InvalidInput`] when `poly` has degree zero.
    /// - [`MathError::NonConvergence`] when every trial fails.
    pub fn find_root_with_rng<R: Rng + ?Sized>(
        &self,
        poly: &Polynomial,
        rng: &mut R,
    ) -> Result<Complex, MathError> {
        if poly.degree() == 0 {
            return Err(MathError::InvalidInput("constant polynomial has no roots"));
        }
        for trial in 0..self.max_trials {
            let start = trial_point(rng);
            if let Some((root, iterations)) = self.converge(poly, start) {
                trace!(trial, iterations, "halley trial converged");
                return Ok(root);
            }
        }
        warn!(
            trials = self.max_trials,
            degree = poly.degree(),
            "root finding exhausted all restart trials"
        );
        Err(MathError::NonConvergence {
            trials: self.max_trials,
        })
    }

    pub fn find_roots(&self, poly: &Polynomial) -> Result<Vec<Complex>, MathError> {
        self.find_roots_with_rng(poly, &mut rand::rng())
    }

    /// Extracts every root by repeated find-and-deflate, sorted with
    /// [`Complex::compare`].
    ///
    /// # Errors
    /// Fails for the zero polynomial or when any single extraction does not converge.
    pub fn find_roots_with_rng<R: Rng + ?Sized>(
        &self,
        poly: &Polynomial,
        rng: &mut R,
    ) -> Result<Vec<Complex>, MathError> {
        let mut rest = poly.trimmed()?;
        debug!(degree = rest.degree(), "extracting polynomial roots");
        let mut roots = Vec::with_capacity(rest.degree());
        while rest.coeffs.len() > 1 {
            let root = self.find_root_with_rng(&rest, rng)?;
            roots.push(root);
            rest = rest.deflate(root);
        }
        roots.sort_by(Complex::compare);
        Ok(roots)
    }

    /// Runs one trial. Returns the root and iteration count on convergence.
    fn converge(&self, poly: &Polynomial, start: Complex) -> Option<(Complex, usize)> {
        let mut x = start;
        let mut previous = f64::INFINITY;
        let mut ratio = 1.0;
        let mut iterations = 0;
        while iterations < self.min_iterations || ratio < self.stall_ratio {
            let next = poly.halley_step(x);
            if !next.is_finite() {
                debug!(?start, iterations, "halley iterate became non-finite; restarting");
                return None;
            }
            let step = (x - next).norm();
            if step < self.tolerance {
                return Some((next, iterations + 1));
            }
            ratio = step / previous;
            previous = step;
            x = next;
            iterations += 1;
        }
        None
    }
}

fn trial_point<R: Rng + ?Sized>(rng: &mut R) -> Complex {
    let real = rng.random::<f64>() * 10f64.powf(3.0 * rng.random::<f64>());
    let imag = rng.random::<f64>() * 10f64.powf(3.0 * rng.random::<f64>());
    Complex::new(real, imag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn c(re: f64, im: f64) -> Complex {
        Complex::new(re, im)
    }

    #[test]
    fn from_roots_is_monic_and_ascending() {
        let p = Polynomial::from_roots(&[c(1.0, 0.0), c(2.0, 0.0)]);
        assert_eq!(p.coefficients(), &[c(2.0, 0.0), c(-3.0, 0.0), c(1.0, 0.0)]);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn from_roots_skips_zero_roots() {
        let p = Polynomial::from_roots(&[Complex::ZERO, c(-1.0, 0.0), c(1e-12, 0.0)]);
        assert_eq!(p.coefficients(), &[c(1.0, 0.0), c(1.0, 0.0)]);
        assert_eq!(Polynomial::from_roots(&[]), Polynomial::one());
    }

    #[test]
    fn conjugate_pair_gives_real_coefficients() {
        let p = Polynomial::from_roots(&[c(0.5, 0.5), c(0.5, -0.5)]);
        for coeff in p.coefficients() {
            assert!(coeff.imag.abs() < 1e-15);
        }
        assert!(p.coefficients()[0].approx_eq(c(0.5, 0.0)));
        assert!(p.coefficients()[1].approx_eq(c(-1.0, 0.0)));
    }

    #[test]
    fn deflate_divides_out_a_root() {
        let p = Polynomial::new(vec![c(2.0, 0.0), c(-3.0, 0.0), c(1.0, 0.0)]);
        assert_eq!(p.deflate(c(1.0, 0.0)).coefficients(), &[c(-2.0, 0.0), c(1.0, 0.0)]);
        assert!(Polynomial::one().deflate(Complex::ONE).coefficients().is_empty());
    }

    #[test]
    fn derivatives_match_closed_form() {
        // p(x) = x^3 - 2x + 5
        let p = Polynomial::new(vec![c(5.0, 0.0), c(-2.0, 0.0), Complex::ZERO, c(1.0, 0.0)]);
        let x = c(1.5, -0.5);
        let (f0, f1, f2) = p.derivatives(x);
        assert!(f0.approx_eq(x * x * x - c(2.0, 0.0) * x + c(5.0, 0.0)));
        assert!(f1.approx_eq(c(3.0, 0.0) * x * x - c(2.0, 0.0)));
        assert!(f2.approx_eq(c(6.0, 0.0) * x));
        assert!(p.eval(x).approx_eq(f0));
    }

    #[test]
    fn roots_roundtrip_through_coefficients() {
        let mut expected = vec![c(1.0, 0.0), c(-2.0, 0.0), c(0.5, 0.5), c(0.5, -0.5), c(0.0, 3.0), c(0.0, -3.0)];
        let p = Polynomial::from_roots(&expected);
        let mut rng = StdRng::seed_from_u64(42);
        let roots = HalleySolver::default().find_roots_with_rng(&p, &mut rng).unwrap();
        expected.sort_by(Complex::compare);
        assert_eq!(roots.len(), expected.len());
        for (found, want) in roots.iter().zip(&expected) {
            assert!(found.approx_eq_eps(*want, 1e-6), "found {found:?}, want {want:?}");
        }
    }

    #[test]
    fn linear_polynomial_converges_in_one_step() {
        let p = Polynomial::from_roots(&[c(3.0, -4.0)]);
        let mut rng = StdRng::seed_from_u64(1);
        let root = HalleySolver::default().find_root_with_rng(&p, &mut rng).unwrap();
        assert!(root.approx_eq(c(3.0, -4.0)));
    }

    #[test]
    fn constant_polynomial_has_no_roots() {
        assert_eq!(Polynomial::new(vec![c(2.0, 0.0)]).find_roots().unwrap(), vec![]);
        assert!(matches!(
            HalleySolver::default().find_root(&Polynomial::one()),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_polynomial_is_rejected() {
        let p = Polynomial::new(vec![Complex::ZERO, Complex::ZERO]);
        assert!(matches!(p.find_roots(), Err(MathError::InvalidInput(_))));
    }

    #[test]
    fn leading_zero_coefficients_are_trimmed() {
        let p = Polynomial::new(vec![c(-1.0, 0.0), c(1.0, 0.0), Complex::ZERO]);
        let roots = p.find_roots().unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].approx_eq(Complex::ONE));
    }

    #[test]
    fn exhausted_trials_report_non_convergence() {
        let p = Polynomial::from_roots(&[c(1.0, 0.0), c(2.0, 0.0)]);
        let solver = HalleySolver::default().with_max_trials(0);
        assert_eq!(solver.find_root(&p), Err(MathError::NonConvergence { trials: 0 }));
    }

    #[test]
    fn display_lists_highest_degree_first() {
        let p = Polynomial::new(vec![c(2.0, 0.0), c(-3.0, 0.0), c(1.0, 0.0)]);
        assert_eq!(p.to_string(), "(1.0000) x^2 + (-3.0000) x + (2.0000)");
        assert_eq!(format!("{:.1}", Polynomial::one()), "(1.0)");
    }
}
