use std::f64::consts::TAU;
use std::sync::LazyLock;

use tracing::debug;

/// Entries per full turn. Also the largest supported transform size.
pub const SINE_TABLE_LEN: usize = 65_536;

static SINE_TABLE: LazyLock<Box<[f64]>> = LazyLock::new(|| {
    debug!(entries = SINE_TABLE_LEN, "building FFT sine table");
    (0..SINE_TABLE_LEN)
        .map(|i| (TAU * i as f64 / SINE_TABLE_LEN as f64).sin())
        .collect()
});

/// `sin(2πi / SINE_TABLE_LEN)` for every `i`, built once per process.
///
/// Cosines are read from the same table a quarter turn further on.
pub fn sine_table() -> &'static [f64] {
    &SINE_TABLE
}

/// Read-only view `data[start + n * step]` over a shared table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StridedView<'a> {
    data: &'a [f64],
    start: usize,
    step: usize,
}

impl<'a> StridedView<'a> {
    pub(crate) fn new(data: &'a [f64], start: usize, step: usize) -> Self {
        Self { data, start, step }
    }

    #[inline]
    pub(crate) fn get(&self, n: usize) -> f64 {
        self.data[self.start + n * self.step]
    }

    /// Sub-view starting at element `start` of this view, `step` elements apart.
    pub(crate) fn slice(&self, start: usize, step: usize) -> Self {
        Self {
            data: self.data,
            start: self.start + start * self.step,
            step: self.step * step,
        }
    }
}
