pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{Aspect, AspectNature, AspectSettings, AspectType, EXACT_ORB};
