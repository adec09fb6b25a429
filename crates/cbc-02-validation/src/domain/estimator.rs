//! # Binary Estimator
//!
//! Weighted majority over the latest estimates visible in a justification.
//!
//! ## Algorithm
//!
//! 1. Every cited sender contributes its weight to the value it last reported
//! 2. The value with the greater total weight is the expected estimate
//! 3. Equal totals (including an all-zero tally) resolve to the configured
//!    tie-break value

use shared_types::{Estimate, Weight};

/// Accumulated weight per estimate value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EstimateTally {
    pub zero: u128,
    pub one: u128,
}

impl EstimateTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sender's weight behind `estimate`.
    pub fn add(&mut self, estimate: Estimate, weight: Weight) {
        match estimate {
            Estimate::Zero => self.zero += u128::from(weight),
            Estimate::One => self.one += u128::from(weight),
        }
    }

    /// Total weight counted so far.
    pub fn total(&self) -> u128 {
        self.zero + self.one
    }

    /// The heavier value, `tie_break` on equality.
    pub fn winner(&self, tie_break: Estimate) -> Estimate {
        match self.zero.cmp(&self.one) {
            std::cmp::Ordering::Greater => Estimate::Zero,
            std::cmp::Ordering::Less => Estimate::One,
            std::cmp::Ordering::Equal => tie_break,
        }
    }
}

impl FromIterator<(Estimate, Weight)> for EstimateTally {
    fn from_iter<I: IntoIterator<Item = (Estimate, Weight)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (estimate, weight) in iter {
            tally.add(estimate, weight);
        }
        tally
    }
}

/// Weighted-majority estimator with a deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryEstimator {
    tie_break: Estimate,
}

impl BinaryEstimator {
    pub fn new(tie_break: Estimate) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> Estimate {
        self.tie_break
    }

    /// Expected estimate for a set of `(latest estimate, weight)` votes.
    pub fn estimate<I>(&self, votes: I) -> Estimate
    where
        I: IntoIterator<Item = (Estimate, Weight)>,
    {
        votes.into_iter().collect::<EstimateTally>().winner(self.tie_break)
    }
}

impl Default for BinaryEstimator {
    fn default() -> Self {
        Self::new(Estimate::Zero)
    }
}
