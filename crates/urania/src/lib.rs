//! Angular-relationship engine for natal and transit charts.
//!
//! Longitudes come in, already computed by an ephemeris; aspects, transits
//! and a display-mode filtered selection come out. Everything here is a pure
//! function over immutable values.

pub mod aspects;
pub mod chart;
pub mod display;
pub mod error;
pub mod priority;
pub mod session;
pub mod transits;

pub use aspects::{Aspect, AspectCalculator, AspectNature, AspectSettings, AspectType};
pub use chart::{
    angular_separation, normalize_degrees, BodyClass, BodyKind, BodyRecord, CelestialBody, Chart,
    House, HouseCusps, ZodiacPlacement, ZodiacSign,
};
pub use display::{DetailDepth, DisplayConfig, DisplayMode, SkillLevel};
pub use error::{ChartError, SettingsError};
pub use priority::{select_for_display, select_houses, Selection};
pub use session::{compute_selection, ChartSession};
pub use transits::{
    DaySummary, LunarPhase, NominalTiming, TimeWindow, Transit, TransitImpact, TransitInfluence,
    TransitMatcher, TransitSettings, TransitTiming,
};
