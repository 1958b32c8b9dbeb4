//! Summary statistics over connection durations.

use serde::{Deserialize, Serialize};

/// Min, max, mean and population standard deviation of a sample set.
///
/// All values are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Summarize `samples`, or `None` if there are none.
    ///
    /// The standard deviation divides by N. Samples are sorted before
    /// summing so the result does not depend on input order.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let avg = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;

        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            avg,
            std_dev: variance.sqrt(),
        })
    }
}
