//! Driven ports (Outbound dependencies)

use shared_types::{SenderId, Weight};

/// Validator weight source (validator-set management lives elsewhere)
pub trait WeightProvider: Send + Sync {
    /// Weight `sender` contributes to the estimator.
    fn weight_of(&self, sender: &SenderId) -> Weight;
}
