//! When a transit is in effect.
//!
//! Real windows need ephemeris trend data, which lives outside this crate.
//! The matcher only asks a [`TransitTiming`] for them.

use chrono::{DateTime, Duration, Utc};

use super::types::TimeWindow;
use crate::aspects::AspectType;
use crate::chart::BodyKind;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Window and peak instant for one matched transit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitTimes {
    pub window: TimeWindow,
    pub peak: DateTime<Utc>,
}

/// Source of activity windows for matched transits
pub trait TransitTiming {
    fn times(
        &self,
        moving: BodyKind,
        natal: Option<BodyKind>,
        aspect: AspectType,
        orb: f64,
        as_of: DateTime<Utc>,
    ) -> TransitTimes;
}

/// Rule-of-thumb durations per moving body, centered on the reference instant.
///
/// The peak is placed `orb / 2` days before the reference instant; sign
/// ingresses get a flat one-week window peaking at the reference instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NominalTiming;

impl NominalTiming {
    /// Nominal length of a transit by the moving body, in hours
    pub fn nominal_hours(kind: BodyKind) -> i64 {
        match kind {
            BodyKind::Sun => 48,
            BodyKind::Moon => 12,
            BodyKind::Mercury => 72,
            BodyKind::Venus => 120,
            BodyKind::Mars => 168,
            BodyKind::Jupiter => 336,
            BodyKind::Saturn => 720,
            BodyKind::Uranus => 2160,
            BodyKind::Neptune => 2880,
            BodyKind::Pluto => 3600,
            BodyKind::Ascendant | BodyKind::Midheaven | BodyKind::NorthNode => 168,
        }
    }
}

const INGRESS_HOURS: i64 = 168;

// Both clamp to chrono's representable range
fn earlier(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_sub_signed(by).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn later(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl TransitTiming for NominalTiming {
    fn times(
        &self,
        moving: BodyKind,
        natal: Option<BodyKind>,
        _aspect: AspectType,
        orb: f64,
        as_of: DateTime<Utc>,
    ) -> TransitTimes {
        let hours = match natal {
            Some(_) => Self::nominal_hours(moving),
            None => INGRESS_HOURS,
        };
        let half = Duration::minutes(hours * 30);
        let window = TimeWindow::new(earlier(as_of, half), later(as_of, half));
        let peak = match natal {
            Some(_) => earlier(
                as_of,
                Duration::seconds((orb / 2.0 * SECONDS_PER_DAY).round() as i64),
            ),
            None => as_of,
        };
        TransitTimes { window, peak }
    }
}

/// Hands back the same injected window for every transit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTiming {
    pub window: TimeWindow,
    pub peak: DateTime<Utc>,
}

impl TransitTiming for FixedTiming {
    fn times(
        &self,
        _moving: BodyKind,
        _natal: Option<BodyKind>,
        _aspect: AspectType,
        _orb: f64,
        _as_of: DateTime<Utc>,
    ) -> TransitTimes {
        TransitTimes {
            window: self.window,
            peak: self.peak,
        }
    }
}

impl<T: TransitTiming + ?Sized> TransitTiming for &T {
    fn times(
        &self,
        moving: BodyKind,
        natal: Option<BodyKind>,
        aspect: AspectType,
        orb: f64,
        as_of: DateTime<Utc>,
    ) -> TransitTimes {
        (**self).times(moving, natal, aspect, orb, as_of)
    }
}
