//! Complex numbers in Cartesian and polar form.
//!
//! [`Complex`] is an immutable `(real, imag)` pair of `f64`; every operation returns a
//! new value. Arithmetic follows IEEE semantics throughout: dividing by a zero-modulus
//! value yields infinities or NaN rather than an error.
//!
//! Formatting honours the formatter precision and defaults to four decimals:
//! ```rust
//! use polezero::math::Complex;
//!
//! let z = Complex::new(1.0, -2.0);
//! assert_eq!(z.to_string(), "1.0000 - 2.0000i");
//! assert_eq!(format!("{z:.1}"), "1.0 - 2.0i");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use serde::{Deserialize, Serialize};

use crate::math::{EPSILON, close_to};

/// Decimal places used by `Display` when no precision is requested.
pub const DEFAULT_PRECISION: usize = 4;

/// Complex number as a real/imaginary pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

/// Complex number as modulus and argument (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Polar {
    pub modulus: f64,
    pub argument: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 0.0);
    pub const I: Self = Self::new(0.0, 1.0);

    #[inline]
    pub const fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    #[inline]
    pub const fn from_real(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }

    /// Euclidean modulus `|z|`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.real.hypot(self.imag)
    }

    /// Principal argument in `(-pi, pi]`.
    ///
    /// A negative-zero imaginary part counts as `+0`, so negated reals sit at `pi`.
    #[inline]
    pub fn arg(self) -> f64 {
        (self.imag + 0.0).atan2(self.real)
    }

    /// Modulus as a real-valued complex number.
    pub fn abs(self) -> Self {
        Self::from_real(self.norm())
    }

    /// Argument as a real-valued complex number.
    pub fn angle(self) -> Self {
        Self::from_real(self.arg())
    }

    pub fn conj(self) -> Self {
        Self::new(self.real, -self.imag)
    }

    /// Projection onto the real axis.
    pub fn real_part(self) -> Self {
        Self::from_real(self.real)
    }

    /// Imaginary component as a real-valued complex number.
    pub fn imag_part(self) -> Self {
        Self::from_real(self.imag)
    }

    pub fn to_polar(self) -> Polar {
        Polar {
            modulus: self.norm(),
            argument: self.arg(),
        }
    }

    pub fn is_finite(self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    pub fn exp(self) -> Self {
        let scale = self.real.exp();
        Self::new(scale * self.imag.cos(), scale * self.imag.sin())
    }

    /// Principal natural logarithm `ln|z| + i arg z`.
    pub fn ln(self) -> Self {
        let p = self.to_polar();
        Self::new(p.modulus.ln(), p.argument)
    }

    /// Principal square root, taken in polar form.
    pub fn sqrt(self) -> Self {
        let p = self.to_polar();
        Polar::new(p.modulus.sqrt(), p.argument / 2.0).into()
    }

    /// `self^exponent` evaluated as `exp(exponent * ln(self))` on the polar form.
    ///
    /// A zero base with a positive real exponent is exactly zero; other zero-base
    /// cases propagate NaN.
    pub fn pow(self, exponent: Self) -> Self {
        if self.real == 0.0 && self.imag == 0.0 && exponent.real > 0.0 {
            return Self::ZERO;
        }
        let p = self.to_polar();
        let log_mod = p.modulus.ln();
        Self::new(
            log_mod * exponent.real - p.argument * exponent.imag,
            log_mod * exponent.imag + p.argument * exponent.real,
        )
        .exp()
    }

    pub fn sin(self) -> Self {
        Self::new(
            self.real.sin() * self.imag.cosh(),
            self.real.cos() * self.imag.sinh(),
        )
    }

    pub fn cos(self) -> Self {
        Self::new(
            self.real.cos() * self.imag.cosh(),
            -self.real.sin() * self.imag.sinh(),
        )
    }

    pub fn tan(self) -> Self {
        let d = (2.0 * self.real).cos() + (2.0 * self.imag).cosh();
        Self::new((2.0 * self.real).sin() / d, (2.0 * self.imag).sinh() / d)
    }

    /// `asin z = -i ln(iz + sqrt(1 - z^2))`
    pub fn asin(self) -> Self {
        let root = (Self::ONE - self * self).sqrt();
        let l = (Self::I * self + root).ln();
        Self::new(l.imag, -l.real)
    }

    /// `acos z = -i ln(z + i sqrt(1 - z^2))`
    pub fn acos(self) -> Self {
        let root = (Self::ONE - self * self).sqrt();
        let l = (self + Self::I * root).ln();
        Self::new(l.imag, -l.real)
    }

    /// `atan z = (i/2) ln((i + z) / (i - z))`
    pub fn atan(self) -> Self {
        let l = ((Self::I + self) / (Self::I - self)).ln();
        Self::new(-l.imag / 2.0, l.real / 2.0)
    }

    pub fn is_zero(self) -> bool {
        self.is_zero_eps(EPSILON)
    }

    pub fn is_zero_eps(self, eps: f64) -> bool {
        close_to(self.real, 0.0, eps) && close_to(self.imag, 0.0, eps)
    }

    pub fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_eps(other, EPSILON)
    }

    pub fn approx_eq_eps(self, other: Self, eps: f64) -> bool {
        (self - other).is_zero_eps(eps)
    }

    /// Orders by real part, then imaginary part; differences below [`EPSILON`]
    /// count as equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.compare_eps(other, EPSILON)
    }

    pub fn compare_eps(&self, other: &Self, eps: f64) -> Ordering {
        match tolerant_sign(self.real - other.real, eps) {
            Ordering::Equal => tolerant_sign(self.imag - other.imag, eps),
            ord => ord,
        }
    }
}

fn tolerant_sign(diff: f64, eps: f64) -> Ordering {
    if diff <= -eps {
        Ordering::Less
    } else if diff >= eps {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// The value itself, plus its conjugate when it is not real.
///
/// A single user-entered complex root stands for a conjugate pair, which keeps the
/// resulting polynomial coefficients real.
pub fn conjugates(x: Complex) -> Vec<Complex> {
    if close_to(x.imag, 0.0, EPSILON) {
        vec![x]
    } else {
        vec![x, x.conj()]
    }
}

impl Polar {
    #[inline]
    pub const fn new(modulus: f64, argument: f64) -> Self {
        Self { modulus, argument }
    }

    pub fn to_cartesian(self) -> Complex {
        Complex::new(
            self.modulus * self.argument.cos(),
            self.modulus * self.argument.sin(),
        )
    }
}

impl From<Polar> for Complex {
    fn from(p: Polar) -> Self {
        p.to_cartesian()
    }
}

impl From<Complex> for Polar {
    fn from(z: Complex) -> Self {
        z.to_polar()
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Self::from_real(real)
    }
}

impl From<num_complex::Complex64> for Complex {
    fn from(z: num_complex::Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Complex> for num_complex::Complex64 {
    fn from(z: Complex) -> Self {
        num_complex::Complex64::new(z.real, z.imag)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl Div for Complex {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let d = rhs.real * rhs.real + rhs.imag * rhs.imag;
        Self::new(
            (self.real * rhs.real + self.imag * rhs.imag) / d,
            (self.imag * rhs.real - self.real * rhs.imag) / d,
        )
    }
}

/// Remainder with the calculator's own definition.
///
/// With `m = x.re % y.re` when `y.re != 0` (otherwise `m = x.im % y.im`), the result
/// is `x - m * y` taken component-wise. Note that `m` is a remainder, not a quotient,
/// so `7 % 3` evaluates to `4`. Displayed coefficients depend on this exact rule.
impl Rem for Complex {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        let m = if rhs.real != 0.0 {
            self.real % rhs.real
        } else {
            self.imag % rhs.imag
        };
        Self::new(self.real - m * rhs.real, self.imag - m * rhs.imag)
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.real, -self.imag)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(DEFAULT_PRECISION);
        if self.real == 0.0 && self.imag == 0.0 {
            return write!(f, "0");
        }
        if self.imag == 0.0 {
            return write!(f, "{:.p$}", self.real);
        }
        if self.real == 0.0 {
            return write!(f, "{:.p$}i", self.imag);
        }
        let sign = if self.imag < 0.0 { '-' } else { '+' };
        write!(f, "{:.p$} {sign} {:.p$}i", self.real, self.imag.abs())
    }
}

/// Renders `m*e^(ti)`, `e^(ti)` for unit modulus, or just `m` for a zero argument.
/// The output is valid calculator input.
impl fmt::Display for Polar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(DEFAULT_PRECISION);
        if close_to(self.argument, 0.0, EPSILON) {
            write!(f, "{:.p$}", self.modulus)
        } else if close_to(self.modulus, 1.0, EPSILON) {
            write!(f, "e^({:.p$}i)", self.argument)
        } else {
            write!(f, "{:.p$}*e^({:.p$}i)", self.modulus, self.argument)
        }
    }
}
