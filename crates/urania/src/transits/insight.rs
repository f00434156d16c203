//! Day-level digest of a transit scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Transit, TransitInfluence};
use crate::chart::{normalize_degrees, BodyKind, CelestialBody};

/// Eight-fold lunar phase from the Sun–Moon elongation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl LunarPhase {
    const ORDER: [LunarPhase; 8] = [
        LunarPhase::NewMoon,
        LunarPhase::WaxingCrescent,
        LunarPhase::FirstQuarter,
        LunarPhase::WaxingGibbous,
        LunarPhase::FullMoon,
        LunarPhase::WaningGibbous,
        LunarPhase::ThirdQuarter,
        LunarPhase::WaningCrescent,
    ];

    /// Each phase spans 45°, centered on its exact elongation
    pub fn from_elongation(elongation: f64) -> Self {
        let e = normalize_degrees(elongation);
        if !e.is_finite() {
            return LunarPhase::NewMoon;
        }
        let index = ((e + 22.5) / 45.0).floor() as usize % 8;
        Self::ORDER[index]
    }

    pub fn from_longitudes(sun: f64, moon: f64) -> Self {
        Self::from_elongation(moon - sun)
    }

    /// Phase from a body list containing both the Sun and the Moon
    pub fn from_bodies(bodies: &[CelestialBody]) -> Option<Self> {
        let find = |kind: BodyKind| bodies.iter().find(|b| b.kind() == kind && b.has_position());
        let sun = find(BodyKind::Sun)?;
        let moon = find(BodyKind::Moon)?;
        Some(Self::from_longitudes(sun.longitude(), moon.longitude()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Uplifting,
    Challenging,
    Transformative,
    Peaceful,
}

/// Whether harmonious or challenging transits dominate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyBalance {
    Harmonious,
    Tense,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: DateTime<Utc>,
    pub tone: EmotionalTone,
    /// Share of harmonious transits among the key transits, 0..=1
    pub energy_level: f64,
    pub balance: EnergyBalance,
    pub key_transits: Vec<Transit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunar_phase: Option<LunarPhase>,
}

/// Strongest transits first: impact tier, then intensity.
///
/// Stable, so equal transits keep their input order.
pub fn top_transits(transits: &[Transit], limit: usize) -> Vec<Transit> {
    let mut sorted = transits.to_vec();
    sorted.sort_by(|a, b| {
        b.impact()
            .priority()
            .cmp(&a.impact().priority())
            .then_with(|| b.intensity().total_cmp(&a.intensity()))
    });
    sorted.truncate(limit);
    sorted
}

impl DaySummary {
    /// Number of transits that shape the summary
    pub const KEY_TRANSITS: usize = 5;

    pub fn from_transits(transits: &[Transit], date: DateTime<Utc>) -> Self {
        let key_transits = top_transits(transits, Self::KEY_TRANSITS);
        let count = |influence: TransitInfluence| {
            key_transits
                .iter()
                .filter(|t| t.influence == influence)
                .count()
        };
        let harmonious = count(TransitInfluence::Harmonious);
        let challenging = count(TransitInfluence::Challenging);
        let transformative = count(TransitInfluence::Transformative);

        let tone = if transformative > 0 {
            EmotionalTone::Transformative
        } else if challenging > harmonious {
            EmotionalTone::Challenging
        } else if harmonious > 0 {
            EmotionalTone::Uplifting
        } else {
            EmotionalTone::Peaceful
        };

        let balance = match harmonious.cmp(&challenging) {
            std::cmp::Ordering::Greater => EnergyBalance::Harmonious,
            std::cmp::Ordering::Less => EnergyBalance::Tense,
            std::cmp::Ordering::Equal => EnergyBalance::Balanced,
        };

        let energy_level = harmonious as f64 / key_transits.len().max(1) as f64;

        Self {
            date,
            tone,
            energy_level,
            balance,
            key_transits,
            lunar_phase: None,
        }
    }

    pub fn with_lunar_phase(mut self, phase: Option<LunarPhase>) -> Self {
        self.lunar_phase = phase;
        self
    }

    /// Transits in the summary that are active at `at`
    pub fn active_at(&self, at: DateTime<Utc>) -> impl Iterator<Item = &Transit> + '_ {
        self.key_transits.iter().filter(move |t| t.is_active(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lunar_phase_buckets() {
        assert_eq!(LunarPhase::from_longitudes(100.0, 100.0), LunarPhase::NewMoon);
        assert_eq!(LunarPhase::from_longitudes(100.0, 95.0), LunarPhase::NewMoon);
        assert_eq!(LunarPhase::from_longitudes(0.0, 90.0), LunarPhase::FirstQuarter);
        assert_eq!(LunarPhase::from_longitudes(10.0, 190.0), LunarPhase::FullMoon);
        assert_eq!(LunarPhase::from_longitudes(0.0, 270.0), LunarPhase::ThirdQuarter);
        assert_eq!(LunarPhase::from_longitudes(0.0, 330.0), LunarPhase::WaningCrescent);
    }

    #[test]
    fn test_phase_needs_sun_and_moon() {
        let bodies = [CelestialBody::new(BodyKind::Sun, 0.0)];
        assert_eq!(LunarPhase::from_bodies(&bodies), None);
    }
}
