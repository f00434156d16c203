use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::zodiac::{normalize_degrees, ZodiacPlacement, ZodiacSign};
use crate::error::ChartError;

/// Bodies and chart points the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
    Midheaven,
    NorthNode,
}

/// Coarse grouping used for display priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyClass {
    /// Fast-moving bodies: Sun through Mars
    Personal,
    /// Chart angles: Ascendant and Midheaven
    Angular,
    /// Everything slower, plus the lunar node
    Outer,
}

impl BodyKind {
    pub const ALL: [BodyKind; 13] = [
        BodyKind::Sun,
        BodyKind::Moon,
        BodyKind::Mercury,
        BodyKind::Venus,
        BodyKind::Mars,
        BodyKind::Jupiter,
        BodyKind::Saturn,
        BodyKind::Uranus,
        BodyKind::Neptune,
        BodyKind::Pluto,
        BodyKind::Ascendant,
        BodyKind::Midheaven,
        BodyKind::NorthNode,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BodyKind::Sun => "sun",
            BodyKind::Moon => "moon",
            BodyKind::Mercury => "mercury",
            BodyKind::Venus => "venus",
            BodyKind::Mars => "mars",
            BodyKind::Jupiter => "jupiter",
            BodyKind::Saturn => "saturn",
            BodyKind::Uranus => "uranus",
            BodyKind::Neptune => "neptune",
            BodyKind::Pluto => "pluto",
            BodyKind::Ascendant => "ascendant",
            BodyKind::Midheaven => "midheaven",
            BodyKind::NorthNode => "north_node",
        }
    }

    pub fn class(self) -> BodyClass {
        match self {
            BodyKind::Sun
            | BodyKind::Moon
            | BodyKind::Mercury
            | BodyKind::Venus
            | BodyKind::Mars => BodyClass::Personal,
            BodyKind::Ascendant | BodyKind::Midheaven => BodyClass::Angular,
            _ => BodyClass::Outer,
        }
    }

    pub fn is_personal(self) -> bool {
        self.class() == BodyClass::Personal
    }

    pub fn is_angle(self) -> bool {
        self.class() == BodyClass::Angular
    }

    /// Display priority, lower is more important.
    ///
    /// Personal bodies first, then the angles, then the outer bodies, each
    /// group in catalog order.
    pub fn priority_rank(self) -> u8 {
        match self {
            BodyKind::Sun => 1,
            BodyKind::Moon => 2,
            BodyKind::Mercury => 3,
            BodyKind::Venus => 4,
            BodyKind::Mars => 5,
            BodyKind::Ascendant => 6,
            BodyKind::Midheaven => 7,
            BodyKind::Jupiter => 8,
            BodyKind::Saturn => 9,
            BodyKind::Uranus => 10,
            BodyKind::Neptune => 11,
            BodyKind::Pluto => 12,
            BodyKind::NorthNode => 13,
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BodyKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let id = match lowered.as_str() {
            "asc" => "ascendant",
            "mc" => "midheaven",
            "node" | "true_node" | "northnode" => "north_node",
            other => other,
        };
        BodyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| ChartError::UnknownBody(s.to_string()))
    }
}

/// Plain input record: what an ephemeris or a chart file hands over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub kind: BodyKind,
    pub longitude: f64,
    /// Longitudinal speed in degrees per day, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// A body at a normalized ecliptic longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BodyRecord")]
pub struct CelestialBody {
    kind: BodyKind,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

impl CelestialBody {
    /// Build a body, reducing the longitude into `[0, 360)`.
    ///
    /// A non-finite longitude is kept as-is and marks the body as having no
    /// usable position; see [`CelestialBody::has_position`].
    pub fn new(kind: BodyKind, longitude: f64) -> Self {
        Self {
            kind,
            longitude: normalize_degrees(longitude),
            speed: None,
        }
    }

    /// Like [`CelestialBody::new`] but rejects NaN and infinite longitudes
    pub fn try_new(kind: BodyKind, longitude: f64) -> Result<Self, ChartError> {
        if !longitude.is_finite() {
            return Err(ChartError::NonFiniteLongitude {
                body: kind.id().to_string(),
                value: longitude,
            });
        }
        Ok(Self::new(kind, longitude))
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed.is_finite().then_some(speed);
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn has_position(&self) -> bool {
        self.longitude.is_finite()
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed.is_some_and(|s| s < 0.0)
    }

    pub fn placement(&self) -> ZodiacPlacement {
        ZodiacPlacement::from_longitude(self.longitude)
    }

    pub fn sign(&self) -> ZodiacSign {
        self.placement().sign
    }
}

impl From<BodyRecord> for CelestialBody {
    fn from(record: BodyRecord) -> Self {
        let body = CelestialBody::new(record.kind, record.longitude);
        match record.speed {
            Some(speed) => body.with_speed(speed),
            None => body,
        }
    }
}

impl From<CelestialBody> for BodyRecord {
    fn from(body: CelestialBody) -> Self {
        Self {
            kind: body.kind,
            longitude: body.longitude,
            speed: body.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_aliases() {
        assert_eq!("Sun".parse::<BodyKind>().unwrap(), BodyKind::Sun);
        assert_eq!("asc".parse::<BodyKind>().unwrap(), BodyKind::Ascendant);
        assert_eq!("MC".parse::<BodyKind>().unwrap(), BodyKind::Midheaven);
        assert_eq!("north_node".parse::<BodyKind>().unwrap(), BodyKind::NorthNode);
        assert!(matches!(
            "chiron".parse::<BodyKind>(),
            Err(ChartError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_priority_rank_groups_by_class() {
        let mut kinds = BodyKind::ALL.to_vec();
        kinds.sort_by_key(|k| k.priority_rank());
        let classes: Vec<BodyClass> = kinds.iter().map(|k| k.class()).collect();
        let mut sorted = classes.clone();
        sorted.sort();
        assert_eq!(classes, sorted);
    }

    #[test]
    fn test_new_normalizes_longitude() {
        let body = CelestialBody::new(BodyKind::Mercury, 370.0);
        assert_eq!(body.longitude(), 10.0);
        let body = CelestialBody::new(BodyKind::Mars, -30.0);
        assert_eq!(body.longitude(), 330.0);
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(CelestialBody::try_new(BodyKind::Sun, f64::NAN).is_err());
        assert!(CelestialBody::try_new(BodyKind::Sun, f64::INFINITY).is_err());
        assert!(CelestialBody::try_new(BodyKind::Sun, 12.0).is_ok());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let body: CelestialBody =
            serde_json::from_str(r#"{"kind":"moon","longitude":-90.0,"speed":13.2}"#).unwrap();
        assert_eq!(body.kind(), BodyKind::Moon);
        assert_eq!(body.longitude(), 270.0);
        assert_eq!(body.speed(), Some(13.2));
        assert!(!body.is_retrograde());
    }
}
