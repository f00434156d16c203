//! Turns raw aspects and transits into what a display mode may show.
//!
//! Selection is idempotent and deterministic: feeding a [`Selection`] back in
//! with the same mode returns it unchanged, and all ordering comes from stable
//! sorts over the input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::aspects::{Aspect, AspectType};
use crate::chart::{BodyKind, CelestialBody, House, HouseCusps};
use crate::display::{DisplayConfig, DisplayMode};
use crate::transits::Transit;

/// Orb at or under which a relationship counts as a tight alignment
const TIGHT_ORB: f64 = 1.0;

const TIGHT_BONUS: u32 = 100;
const PERSONAL_BONUS: u32 = 20;
const IMPACT_SCALE: u32 = 1000;

/// Output of one selection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub bodies: Vec<CelestialBody>,
    pub aspects: Vec<Aspect>,
    pub transits: Vec<Transit>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.aspects.is_empty() && self.transits.is_empty()
    }
}

fn importance_points(aspect: AspectType) -> u32 {
    (aspect.importance() * 10.0).round() as u32
}

/// Ranking weight for an aspect; higher sorts first
pub fn aspect_weight(aspect: &Aspect) -> u32 {
    let tight = if aspect.orb <= TIGHT_ORB { TIGHT_BONUS } else { 0 };
    tight + aspect.personal_count() * PERSONAL_BONUS + importance_points(aspect.aspect_type)
}

/// Ranking weight for a transit; impact tier dominates
pub fn transit_weight(transit: &Transit) -> u32 {
    let tight = if transit.orb <= TIGHT_ORB { TIGHT_BONUS } else { 0 };
    transit.impact().priority() * IMPACT_SCALE
        + tight
        + transit.personal_count() * PERSONAL_BONUS
        + importance_points(transit.aspect_type)
}

/// Weight descending, then orb ascending. `sort_by` is stable, so equal
/// keys keep their input order.
fn rank<T: Copy>(items: Vec<T>, weight: impl Fn(&T) -> u32, orb: impl Fn(&T) -> f64) -> Vec<T> {
    let mut keyed: Vec<(u32, f64, T)> = items
        .into_iter()
        .map(|item| (weight(&item), orb(&item), item))
        .collect();
    keyed.sort_by(|a, b| match b.0.cmp(&a.0) {
        Ordering::Equal => a.1.total_cmp(&b.1),
        other => other,
    });
    keyed.into_iter().map(|(_, _, item)| item).collect()
}

/// Allowed bodies with a position, in display priority order, truncated to
/// the mode's limit
pub fn select_bodies(bodies: &[CelestialBody], config: &DisplayConfig) -> Vec<CelestialBody> {
    let mut kept: Vec<CelestialBody> = bodies
        .iter()
        .filter(|b| b.has_position() && config.allows_body(b.kind()))
        .copied()
        .collect();
    kept.sort_by_key(|b| b.kind().priority_rank());
    kept.truncate(config.max_bodies);
    kept
}

fn relationship_allowed(config: &DisplayConfig, aspect: AspectType, orb: f64) -> bool {
    config.allows_aspect(aspect) && config.allows_orb(orb)
}

/// Aspects the mode allows between surviving bodies, ranked and capped
pub fn select_aspects(
    aspects: &[Aspect],
    shown: &[BodyKind],
    config: &DisplayConfig,
) -> Vec<Aspect> {
    let kept: Vec<Aspect> = aspects
        .iter()
        .filter(|a| relationship_allowed(config, a.aspect_type, a.orb))
        .filter(|a| shown.contains(&a.body_a) && shown.contains(&a.body_b))
        .copied()
        .collect();
    let mut ranked = rank(kept, aspect_weight, |a| a.orb);
    ranked.truncate(config.max_relationships);
    ranked
}

/// Transits the mode allows, ranked and capped.
///
/// The moving body must be a shown kind, and so must the natal body when
/// there is one.
pub fn select_transits(
    transits: &[Transit],
    shown: &[BodyKind],
    config: &DisplayConfig,
) -> Vec<Transit> {
    let kept: Vec<Transit> = transits
        .iter()
        .filter(|t| relationship_allowed(config, t.aspect_type, t.orb))
        .filter(|t| {
            shown.contains(&t.moving_body) && t.natal_body.map_or(true, |k| shown.contains(&k))
        })
        .copied()
        .collect();
    let mut ranked = rank(kept, transit_weight, |t| t.orb);
    ranked.truncate(config.max_relationships);
    ranked
}

/// Filter, order and bound bodies, aspects and transits for one mode
pub fn select_for_display(
    bodies: &[CelestialBody],
    aspects: &[Aspect],
    transits: &[Transit],
    mode: DisplayMode,
) -> Selection {
    let config = mode.config();
    let bodies = select_bodies(bodies, config);
    let shown: Vec<BodyKind> = bodies.iter().map(|b| b.kind()).collect();
    let aspects = select_aspects(aspects, &shown, config);
    let transits = select_transits(transits, &shown, config);

    log::debug!(
        "{} selection: {} bodies, {} aspects, {} transits",
        mode,
        bodies.len(),
        aspects.len(),
        transits.len()
    );

    Selection {
        bodies,
        aspects,
        transits,
    }
}

/// Houses in number order when the mode shows them, otherwise none
pub fn select_houses(houses: &HouseCusps, mode: DisplayMode) -> Vec<House> {
    if mode.config().show_houses {
        houses.houses()
    } else {
        Vec::new()
    }
}
