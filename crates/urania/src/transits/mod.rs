pub mod insight;
pub mod matcher;
pub mod timing;
pub mod types;

pub use insight::{top_transits, DaySummary, EmotionalTone, EnergyBalance, LunarPhase};
pub use matcher::{classify_influence, TransitMatcher, TransitSettings, DEFAULT_INGRESS_ORB};
pub use timing::{FixedTiming, NominalTiming, TransitTimes, TransitTiming};
pub use types::{TimeWindow, Transit, TransitImpact, TransitInfluence};
