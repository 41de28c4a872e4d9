use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// A predicted collision between particles `i` and `j` (`i < j`), `time` after now.
///
/// Events are totally ordered by time, then by `(i, j)`, so the minimum over any
/// set of pairs is the same regardless of the order they were evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairEvent {
    pub time: NotNan<f64>,
    pub i: usize,
    pub j: usize,
}

impl PairEvent {
    /// Create a new event, validating that time is finite and non-NaN.
    pub fn new(time: f64, i: usize, j: usize) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidParam("event time must be finite".into()));
        }
        let time = NotNan::new(time)
            .map_err(|_| Error::InvalidParam("event time cannot be NaN".into()))?;
        Ok(Self { time, i, j })
    }

    /// Build an event from a predictor result; `+∞` (no collision) yields `None`.
    pub fn from_prediction(time: f64, i: usize, j: usize) -> Option<Self> {
        Self::new(time, i, j).ok()
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }
}

impl Ord for PairEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => (self.i, self.j).cmp(&(other.i, other.j)),
            o => o,
        }
    }
}

impl PartialOrd for PairEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
