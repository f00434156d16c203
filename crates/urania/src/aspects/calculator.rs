use crate::aspects::types::{Aspect, AspectSettings, AspectType};
use crate::chart::{angular_separation, CelestialBody};

/// Days to project motion forward when deciding applying vs separating
const PROJECTION_STEP_DAYS: f64 = 0.1;

/// Relative speeds below this are treated as standing still
const MIN_RELATIVE_SPEED: f64 = 1e-9;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    /// Create a calculator with the canonical aspect table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Compute aspects between every unordered pair of entries.
    ///
    /// Pairs come out in input index order `(i, j)` with `i < j`. Entries
    /// sharing a kind are still paired; an entry is never paired with itself.
    pub fn detect_aspects(&self, bodies: &[CelestialBody]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if let Some(aspect) = self.calculate_aspect(&bodies[i], &bodies[j]) {
                    aspects.push(aspect);
                }
            }
        }
        log::debug!(
            "detected {} aspects across {} bodies",
            aspects.len(),
            bodies.len()
        );
        aspects
    }

    /// Calculate the aspect between two bodies, if any.
    ///
    /// Returns `None` when either body has no usable longitude or when no
    /// configured aspect is within orb.
    pub fn calculate_aspect(&self, a: &CelestialBody, b: &CelestialBody) -> Option<Aspect> {
        if !a.has_position() || !b.has_position() {
            log::trace!("skipping {} / {}: missing longitude", a.kind(), b.kind());
            return None;
        }
        let separation = angular_separation(a.longitude(), b.longitude());
        let (aspect_type, orb) = closest_aspect(separation, &self.settings)?;
        let is_applying = match (a.speed(), b.speed()) {
            (Some(speed_a), Some(speed_b)) => is_aspect_applying(
                a.longitude(),
                b.longitude(),
                speed_a,
                speed_b,
                aspect_type.angle(),
                separation,
            ),
            _ => false,
        };

        Some(Aspect {
            body_a: a.kind(),
            body_b: b.kind(),
            aspect_type,
            separation,
            orb,
            is_applying,
        })
    }
}

/// Pick the configured aspect whose angle is nearest to `separation`.
///
/// Only a type whose own orb admits the deviation qualifies; on equal orbs
/// the earlier entry in `settings.aspect_types` wins.
pub(crate) fn closest_aspect(
    separation: f64,
    settings: &AspectSettings,
) -> Option<(AspectType, f64)> {
    let mut best: Option<(AspectType, f64)> = None;
    for &aspect_type in &settings.aspect_types {
        let orb = (separation - aspect_type.angle()).abs();
        if orb > settings.orb_for(aspect_type) {
            continue;
        }
        match best {
            Some((_, best_orb)) if best_orb <= orb => {}
            _ => best = Some((aspect_type, orb)),
        }
    }
    best
}

/// Determine if an aspect is applying (approaching exact) or separating
fn is_aspect_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
    current_angle: f64,
) -> bool {
    let relative_speed = speed1 - speed2;
    if relative_speed.abs() < MIN_RELATIVE_SPEED {
        return false;
    }

    let signed_diff = wrap_signed(lon1 - lon2);
    let future_angle = wrap_signed(signed_diff + relative_speed * PROJECTION_STEP_DAYS).abs();

    let current_distance = (current_angle - aspect_angle).abs();
    let future_distance = (future_angle - aspect_angle).abs();

    future_distance < current_distance
}

/// Map a difference into `(-180, 180]`
fn wrap_signed(diff: f64) -> f64 {
    let mut d = diff % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}
