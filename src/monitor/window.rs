//! Bounded rolling window of temperature samples.
//!
//! Each channel keeps the most recent `H` samples, oldest first. Pushing onto
//! a full window evicts the oldest sample. Aggregates are recomputed from the
//! stored samples on every call; `H` is a few dozen at most.
//!
//! # Example
//!
//! ```
//! use traytemp::monitor::RollingWindow;
//!
//! let mut window = RollingWindow::new(2).unwrap();
//! for v in [40.0, 60.0, 90.0] {
//!     window.push(v);
//! }
//! assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![60.0, 90.0]);
//! assert_eq!(window.average(), Some(75.0));
//! ```

use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Average, minimum and maximum over a non-empty window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Arithmetic mean.
    pub average: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

/// A fixed-capacity FIFO of numeric samples.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    data: VecDeque<f64>,
    /// Maximum number of samples (never exceeded, always >= 1).
    capacity: usize,
}

impl RollingWindow {
    /// Creates an empty window holding at most `capacity` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        Ok(Self { data: VecDeque::with_capacity(capacity), capacity })
    }

    /// Appends a sample, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: f64) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Returns the most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.data.back().copied()
    }

    /// Returns the number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no samples are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the maximum number of samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting the oldest samples if it shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        while self.data.len() > capacity {
            self.data.pop_front();
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Iterates samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Removes every sample. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Mean of the stored samples, `None` when empty.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Smallest stored sample, `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    /// Largest stored sample, `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// All three aggregates, `None` when empty.
    #[must_use]
    pub fn stats(&self) -> Option<WindowStats> {
        Some(WindowStats { average: self.average()?, min: self.min()?, max: self.max()? })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_length_never_exceeds_capacity(
            capacity in 1usize..64,
            values in prop::collection::vec(-50.0f64..150.0, 0..300)
        ) {
            let mut w = RollingWindow::new(capacity).unwrap();
            for &v in &values {
                w.push(v);
                prop_assert!(w.len() <= capacity);
            }
            prop_assert_eq!(w.len(), values.len().min(capacity));
        }

        #[test]
        fn prop_contents_are_last_h_values(
            capacity in 1usize..32,
            values in prop::collection::vec(-50.0f64..150.0, 0..200)
        ) {
            let mut w = RollingWindow::new(capacity).unwrap();
            for &v in &values {
                w.push(v);
            }
            let skip = values.len().saturating_sub(capacity);
            let expected: Vec<f64> = values.into_iter().skip(skip).collect();
            let actual: Vec<f64> = w.iter().copied().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_aggregates_match_contents(
            capacity in 1usize..32,
            values in prop::collection::vec(-50.0f64..150.0, 1..100)
        ) {
            let mut w = RollingWindow::new(capacity).unwrap();
            for &v in &values {
                w.push(v);
            }
            let kept: Vec<f64> = w.iter().copied().collect();
            let mean = kept.iter().sum::<f64>() / kept.len() as f64;
            let min = kept.iter().copied().fold(f64::INFINITY, f64::min);
            let max = kept.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            let stats = w.stats().unwrap();
            prop_assert!((stats.average - mean).abs() < 1e-9);
            prop_assert_eq!(stats.min, min);
            prop_assert_eq!(stats.max, max);
            prop_assert!(stats.min <= stats.average + 1e-9 && stats.average <= stats.max + 1e-9);
        }
    }
}
