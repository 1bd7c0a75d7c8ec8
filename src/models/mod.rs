mod central_bank;
mod correlation;
mod event;

pub use central_bank::{CentralBankEvent, CentralBankEventType, RateProbabilities};
pub use correlation::{Correlation, LeadLag};
pub use event::{
    ConsensusIntelligence, DirectionBias, EconomicEvent, EventCategory, HistoricalStats, Impact,
    Region, RevisionMomentum, TradingSetup,
};
