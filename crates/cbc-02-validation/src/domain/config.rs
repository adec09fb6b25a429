//! Validation engine configuration

use shared_types::Estimate;

/// Configuration for the validation engine
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    /// Value the estimator returns when both estimates carry equal weight
    pub tie_break: Estimate,
    /// Reject messages from already-flagged senders without re-running checks
    pub reject_flagged_senders: bool,
    /// Recompute the digest of every retrieved record
    pub verify_digests: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tie_break: Estimate::Zero,
            reject_flagged_senders: false,
            verify_digests: true,
        }
    }
}
