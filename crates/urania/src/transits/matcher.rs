use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timing::{NominalTiming, TransitTiming};
use super::types::{Transit, TransitInfluence};
use crate::aspects::calculator::closest_aspect;
use crate::aspects::{AspectNature, AspectSettings, AspectType};
use crate::chart::{angular_separation, BodyKind, CelestialBody};
use crate::error::SettingsError;

/// Default distance from a sign boundary that counts as an ingress
pub const DEFAULT_INGRESS_ORB: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitSettings {
    /// Aspect types scanned between moving and natal bodies
    pub aspects: AspectSettings,
    /// Emit natal-less transits for bodies about to change sign
    pub include_ingresses: bool,
    pub ingress_orb: f64,
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            aspects: AspectSettings::default(),
            include_ingresses: true,
            ingress_orb: DEFAULT_INGRESS_ORB,
        }
    }
}

impl TransitSettings {
    /// Ingresses are reported as conjunctions, so their orb is capped by
    /// the conjunction orb.
    pub fn with_ingress_orb(mut self, orb: f64) -> Result<Self, SettingsError> {
        let max = AspectType::Conjunction.max_orb();
        if !(0.0..=max).contains(&orb) {
            return Err(SettingsError::IngressOrbOutOfRange { orb, max });
        }
        self.ingress_orb = orb;
        Ok(self)
    }

    pub fn without_ingresses(mut self) -> Self {
        self.include_ingresses = false;
        self
    }
}

/// Matches a moving body set against a fixed natal set
#[derive(Debug, Clone, Default)]
pub struct TransitMatcher<T = NominalTiming> {
    settings: TransitSettings,
    timing: T,
}

impl TransitMatcher<NominalTiming> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TransitSettings) -> Self {
        Self {
            settings,
            timing: NominalTiming,
        }
    }
}

impl<T: TransitTiming> TransitMatcher<T> {
    pub fn with_timing(settings: TransitSettings, timing: T) -> Self {
        Self { settings, timing }
    }

    pub fn settings(&self) -> &TransitSettings {
        &self.settings
    }

    /// Match every transiting body against every natal body.
    ///
    /// Output follows transiting order, then natal order, with each moving
    /// body's ingress (if any) after its natal matches. An empty side gives
    /// an empty result.
    pub fn match_transits(
        &self,
        transiting: &[CelestialBody],
        natal: &[CelestialBody],
        as_of: DateTime<Utc>,
    ) -> Vec<Transit> {
        if transiting.is_empty() || natal.is_empty() {
            log::debug!(
                "no transits: {} transiting, {} natal",
                transiting.len(),
                natal.len()
            );
            return Vec::new();
        }

        let mut transits = Vec::new();
        for moving in transiting.iter().filter(|b| b.has_position()) {
            for natal_body in natal.iter().filter(|b| b.has_position()) {
                let separation = angular_separation(moving.longitude(), natal_body.longitude());
                let Some((aspect_type, orb)) = closest_aspect(separation, &self.settings.aspects)
                else {
                    continue;
                };
                transits.push(self.build(
                    moving.kind(),
                    Some(natal_body.kind()),
                    aspect_type,
                    orb,
                    as_of,
                ));
            }
            if let Some(orb) = self.ingress_orb(moving) {
                transits.push(self.build(moving.kind(), None, AspectType::Conjunction, orb, as_of));
            }
        }

        log::debug!(
            "matched {} transits ({} moving x {} natal)",
            transits.len(),
            transiting.len(),
            natal.len()
        );
        transits
    }

    /// Distance to the nearest sign boundary when it is inside the ingress orb
    fn ingress_orb(&self, moving: &CelestialBody) -> Option<f64> {
        // Angles turn with the horizon once a day, so their sign changes are not transits
        if !self.settings.include_ingresses || moving.kind().is_angle() {
            return None;
        }
        let distance = moving.placement().distance_to_boundary();
        (distance <= self.settings.ingress_orb).then_some(distance)
    }

    fn build(
        &self,
        moving: BodyKind,
        natal: Option<BodyKind>,
        aspect_type: AspectType,
        orb: f64,
        as_of: DateTime<Utc>,
    ) -> Transit {
        let times = self.timing.times(moving, natal, aspect_type, orb, as_of);
        Transit {
            moving_body: moving,
            natal_body: natal,
            aspect_type,
            orb,
            influence: classify_influence(moving, natal, aspect_type),
            active_window: times.window,
            peak: times.peak,
        }
    }
}

/// Qualitative flavour of a transit.
///
/// Sextiles and trines are harmonious, squares and oppositions challenging.
/// Conjunctions depend on the bodies: benefic pairs are harmonious, anything
/// touching Uranus, Neptune or Pluto is transformative, Mars or Saturn makes
/// it challenging. Ingresses are always transformative.
pub fn classify_influence(
    moving: BodyKind,
    natal: Option<BodyKind>,
    aspect: AspectType,
) -> TransitInfluence {
    let Some(natal) = natal else {
        return TransitInfluence::Transformative;
    };
    match aspect.nature() {
        AspectNature::Harmonic => TransitInfluence::Harmonious,
        AspectNature::Challenging => TransitInfluence::Challenging,
        AspectNature::Neutral => {
            let benefic = |k: BodyKind| {
                matches!(k, BodyKind::Venus | BodyKind::Jupiter | BodyKind::Sun | BodyKind::Moon)
            };
            let generational =
                |k: BodyKind| matches!(k, BodyKind::Uranus | BodyKind::Neptune | BodyKind::Pluto);
            let malefic = |k: BodyKind| matches!(k, BodyKind::Mars | BodyKind::Saturn);

            if benefic(moving) && benefic(natal) {
                TransitInfluence::Harmonious
            } else if generational(moving) || generational(natal) {
                TransitInfluence::Transformative
            } else if malefic(moving) || malefic(natal) {
                TransitInfluence::Challenging
            } else {
                TransitInfluence::Neutral
            }
        }
    }
}
