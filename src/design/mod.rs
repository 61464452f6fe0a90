//! Editable pole/zero filter design.
//!
//! A [`FilterDesign`] holds the user's roots as text plus value, and the options
//! that shape the response plot. Every edit path (typing a root, dragging it,
//! bulk import) goes through here; the response is recomputed from scratch on
//! each call and nothing is cached between calls.
//!
//! ```rust
//! use polezero::design::FilterDesign;
//!
//! let design = FilterDesign::from_import("zeros = [-1]\npoles = [0.9i]").unwrap();
//! let response = design.response().unwrap();
//! assert_eq!(response.len(), 129);
//! assert!(response.peak() > 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{FilterError, Root};
use crate::dsl::{ImportEntry, parse_import};
use crate::engines::fft::validate_size;
use crate::engines::{FrequencyResponse, magnitude_response};
use crate::math::{Complex, Polynomial, conjugates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    Pole,
    Zero,
}

impl RootKind {
    /// Section name used by the import syntax.
    pub fn label(self) -> &'static str {
        match self {
            RootKind::Pole => "poles",
            RootKind::Zero => "zeros",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "poles" => Some(RootKind::Pole),
            "zeros" => Some(RootKind::Zero),
            _ => None,
        }
    }
}

/// Plot options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOptions {
    /// FFT size; the response has `resolution / 2 + 1` bins.
    pub resolution: usize,
    /// Scales every magnitude by its modulus.
    pub gain: Root,
    /// Value shown at the Nyquist bin (real part).
    pub frequency: Root,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            resolution: 256,
            gain: Root::parse("1"),
            frequency: Root::parse("pi"),
        }
    }
}

impl ResponseOptions {
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_size(self.resolution)?;
        if let Some(err) = &self.gain.error {
            return Err(FilterError::InvalidInput(format!("gain: {err}")));
        }
        if let Some(err) = &self.frequency.error {
            return Err(FilterError::InvalidInput(format!("frequency: {err}")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterDesign {
    pub zeros: Vec<Root>,
    pub poles: Vec<Root>,
    pub options: ResponseOptions,
}

impl FilterDesign {
    pub fn new(zeros: Vec<Root>, poles: Vec<Root>) -> Self {
        Self {
            zeros,
            poles,
            options: ResponseOptions::default(),
        }
    }

    pub fn roots(&self, kind: RootKind) -> &[Root] {
        match kind {
            RootKind::Pole => &self.poles,
            RootKind::Zero => &self.zeros,
        }
    }

    pub fn roots_mut(&mut self, kind: RootKind) -> &mut Vec<Root> {
        match kind {
            RootKind::Pole => &mut self.poles,
            RootKind::Zero => &mut self.zeros,
        }
    }

    fn values(&self, kind: RootKind) -> Vec<Complex> {
        self.roots(kind).iter().map(|root| root.value).collect()
    }

    fn expanded(&self, kind: RootKind) -> Vec<Complex> {
        self.roots(kind)
            .iter()
            .flat_map(|root| conjugates(root.value))
            .collect()
    }

    /// Monic polynomial whose roots are the zeros and their conjugates.
    pub fn numerator(&self) -> Polynomial {
        Polynomial::from_roots(&self.expanded(RootKind::Zero))
    }

    /// Monic polynomial whose roots are the poles and their conjugates.
    pub fn denominator(&self) -> Polynomial {
        Polynomial::from_roots(&self.expanded(RootKind::Pole))
    }

    pub fn response(&self) -> Result<FrequencyResponse, FilterError> {
        self.options.validate()?;
        let response = magnitude_response(
            &self.values(RootKind::Zero),
            &self.values(RootKind::Pole),
            self.options.gain.value,
            self.options.resolution,
            self.options.frequency.value.real,
        )?;
        Ok(response)
    }

    /// Replaces a root with a dragged value. The new text is the value's
    /// Cartesian rendering.
    pub fn move_root(
        &mut self,
        kind: RootKind,
        index: usize,
        value: Complex,
    ) -> Result<(), FilterError> {
        let roots = self.roots_mut(kind);
        let count = roots.len();
        let slot = roots.get_mut(index).ok_or_else(|| {
            FilterError::InvalidInput(format!(
                "{} index {index} out of range ({count} entries)",
                kind.label()
            ))
        })?;
        *slot = Root::from_value(value);
        Ok(())
    }

    /// Builds a design from `poles = [...]` and `zeros = [...]` sections.
    ///
    /// Repeated sections append. Any other section label is rejected.
    pub fn from_import(text: &str) -> Result<Self, FilterError> {
        let mut design = Self::default();
        for entry in parse_import(text)? {
            let kind = RootKind::from_label(&entry.label).ok_or_else(|| {
                FilterError::InvalidInput(format!(
                    "unknown section {:?}, expected \"poles\" or \"zeros\"",
                    entry.label
                ))
            })?;
            design.roots_mut(kind).extend(entry.roots);
        }
        Ok(design)
    }

    /// Renders the roots in the import syntax, zeros first.
    pub fn to_import(&self) -> String {
        [RootKind::Zero, RootKind::Pole]
            .into_iter()
            .map(|kind| {
                ImportEntry {
                    label: kind.label().to_string(),
                    roots: self.roots(kind).to_vec(),
                }
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
