//! Adapters layer

mod weights;

pub use weights::StaticWeightTable;
