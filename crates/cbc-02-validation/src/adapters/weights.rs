//! Static weight table adapter
//!
//! Implements `WeightProvider` from a fixed map. Senders missing from the
//! map contribute `default_weight`.

use std::collections::HashMap;

use shared_types::{SenderId, Weight};

use crate::ports::WeightProvider;

/// Fixed per-sender weights.
#[derive(Clone, Debug)]
pub struct StaticWeightTable {
    weights: HashMap<SenderId, Weight>,
    default_weight: Weight,
}

impl StaticWeightTable {
    /// Every sender carries `weight`.
    pub fn uniform(weight: Weight) -> Self {
        Self {
            weights: HashMap::new(),
            default_weight: weight,
        }
    }

    /// Override the weight of one sender.
    pub fn with_weight(mut self, sender: impl Into<SenderId>, weight: Weight) -> Self {
        self.weights.insert(sender.into(), weight);
        self
    }

    pub fn default_weight(&self) -> Weight {
        self.default_weight
    }
}

impl Default for StaticWeightTable {
    fn default() -> Self {
        Self::uniform(1)
    }
}

impl WeightProvider for StaticWeightTable {
    fn weight_of(&self, sender: &SenderId) -> Weight {
        self.weights
            .get(sender)
            .copied()
            .unwrap_or(self.default_weight)
    }
}
