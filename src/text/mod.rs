//! Text preprocessing applied before vectorization.

mod normalizer;

pub use normalizer::{normalize, TextNormalizer};
