pub mod matrix;
pub mod stats;

pub use matrix::{ChainLink, CorrelationMatrix, ImpactChain, RenderedChain, IMPACT_CHAINS};
pub use stats::{lead_lag, pearson_correlation, LeadLagResult};
