use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::AspectType;
use crate::chart::BodyKind;

/// Closed time interval during which a transit is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, swapping the bounds if they arrive reversed
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Strength tier derived from a transit's intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitImpact {
    Subtle,
    Minor,
    Moderate,
    Major,
}

impl TransitImpact {
    pub fn from_intensity(intensity: f64) -> Self {
        if intensity >= 0.8 {
            TransitImpact::Major
        } else if intensity >= 0.5 {
            TransitImpact::Moderate
        } else if intensity >= 0.2 {
            TransitImpact::Minor
        } else {
            TransitImpact::Subtle
        }
    }

    /// 4 for major down to 1 for subtle
    pub fn priority(self) -> u32 {
        match self {
            TransitImpact::Major => 4,
            TransitImpact::Moderate => 3,
            TransitImpact::Minor => 2,
            TransitImpact::Subtle => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitInfluence {
    Harmonious,
    Challenging,
    Transformative,
    Neutral,
}

/// A moving body's relationship to a natal position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub moving_body: BodyKind,
    /// `None` for a sign ingress, which has no natal partner
    pub natal_body: Option<BodyKind>,
    pub aspect_type: AspectType,
    pub orb: f64,
    pub influence: TransitInfluence,
    pub active_window: TimeWindow,
    pub peak: DateTime<Utc>,
}

impl Transit {
    /// `1 - orb / max_orb`, clamped to `[0, 1]`
    pub fn intensity(&self) -> f64 {
        let max_orb = self.aspect_type.max_orb();
        if max_orb <= 0.0 {
            return if self.orb <= 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 - self.orb / max_orb).clamp(0.0, 1.0)
    }

    pub fn impact(&self) -> TransitImpact {
        TransitImpact::from_intensity(self.intensity())
    }

    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        self.active_window.contains(at)
    }

    pub fn is_ingress(&self) -> bool {
        self.natal_body.is_none()
    }

    /// Personal bodies at either end (0..=2)
    pub fn personal_count(&self) -> u32 {
        u32::from(self.moving_body.is_personal())
            + u32::from(self.natal_body.is_some_and(|k| k.is_personal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn transit(aspect_type: AspectType, orb: f64) -> Transit {
        let at = Utc.with_ymd_and_hms(2025, 10, 26, 12, 0, 0).unwrap();
        Transit {
            moving_body: BodyKind::Venus,
            natal_body: Some(BodyKind::Sun),
            aspect_type,
            orb,
            influence: TransitInfluence::Harmonious,
            active_window: TimeWindow::new(at - Duration::days(1), at + Duration::days(1)),
            peak: at,
        }
    }

    #[test]
    fn test_intensity_and_impact_tiers() {
        assert_eq!(transit(AspectType::Trine, 0.0).intensity(), 1.0);
        assert_eq!(transit(AspectType::Trine, 0.0).impact(), TransitImpact::Major);
        assert_eq!(transit(AspectType::Trine, 1.0).impact(), TransitImpact::Major);
        assert_eq!(transit(AspectType::Trine, 4.0).impact(), TransitImpact::Moderate);
        assert_eq!(transit(AspectType::Trine, 6.0).impact(), TransitImpact::Minor);
        assert_eq!(transit(AspectType::Trine, 7.0).impact(), TransitImpact::Subtle);
        assert_eq!(transit(AspectType::Sextile, 9.0).intensity(), 0.0);
    }

    #[test]
    fn test_window_contains_bounds() {
        let t = transit(AspectType::Square, 2.0);
        assert!(t.is_active(t.active_window.start));
        assert!(t.is_active(t.active_window.end));
        assert!(!t.is_active(t.active_window.end + Duration::seconds(1)));
    }

    #[test]
    fn test_reversed_window_is_swapped() {
        let a = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let w = TimeWindow::new(a, b);
        assert_eq!(w.start, b);
        assert_eq!(w.duration(), Duration::days(1));
    }
}
