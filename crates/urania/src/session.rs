//! Explicit recompute pipeline with a result cache.
//!
//! A [`ChartSession`] owns one natal chart. Asking it for a selection runs
//! detect → match → filter and keeps the latest result per mode. A repeat with
//! the same transit input is served from the cache; a new transit input
//! replaces that mode's entry. Nothing recomputes behind the caller's back.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::{hash_bodies, CelestialBody, Chart, House};
use crate::display::DisplayMode;
use crate::priority::{select_for_display, select_houses, Selection};
use crate::transits::{DaySummary, LunarPhase, NominalTiming, TransitMatcher, TransitTiming};

/// Run the whole pipeline once, without caching
pub fn compute_selection<T: TransitTiming>(
    natal: &[CelestialBody],
    transiting: &[CelestialBody],
    as_of: DateTime<Utc>,
    mode: DisplayMode,
    calculator: &AspectCalculator,
    matcher: &TransitMatcher<T>,
) -> Selection {
    let aspects = calculator.detect_aspects(natal);
    let transits = matcher.match_transits(transiting, natal, as_of);
    select_for_display(natal, &aspects, &transits, mode)
}

/// Latest selection computed for one mode
#[derive(Debug, Clone)]
struct CachedSelection {
    transit_input: u64,
    selection: Selection,
}

pub struct ChartSession<T = NominalTiming> {
    natal: Chart,
    fingerprint: u64,
    calculator: AspectCalculator,
    matcher: TransitMatcher<T>,
    natal_aspects: Vec<Aspect>,
    // At most one entry per mode; the chart fingerprint is implied by `natal`
    cache: HashMap<DisplayMode, CachedSelection>,
}

impl ChartSession<NominalTiming> {
    pub fn new(natal: Chart) -> Self {
        Self::with_engines(natal, AspectCalculator::new(), TransitMatcher::new())
    }
}

impl<T: TransitTiming> ChartSession<T> {
    pub fn with_engines(
        natal: Chart,
        calculator: AspectCalculator,
        matcher: TransitMatcher<T>,
    ) -> Self {
        let natal_aspects = calculator.detect_aspects(&natal.bodies);
        Self {
            fingerprint: natal.fingerprint(),
            natal,
            calculator,
            matcher,
            natal_aspects,
            cache: HashMap::new(),
        }
    }

    pub fn natal(&self) -> &Chart {
        &self.natal
    }

    /// Natal-to-natal aspects, unfiltered
    pub fn natal_aspects(&self) -> &[Aspect] {
        &self.natal_aspects
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Replace the natal chart. Returns false and keeps the cache when the
    /// new chart is identical.
    pub fn set_natal(&mut self, natal: Chart) -> bool {
        let fingerprint = natal.fingerprint();
        if fingerprint == self.fingerprint && natal == self.natal {
            return false;
        }
        log::debug!(
            "natal chart changed, dropping {} cached selections",
            self.cache.len()
        );
        self.natal_aspects = self.calculator.detect_aspects(&natal.bodies);
        self.natal = natal;
        self.fingerprint = fingerprint;
        self.cache.clear();
        true
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Natal-only selection for a mode
    pub fn natal_selection(&mut self, mode: DisplayMode, as_of: DateTime<Utc>) -> &Selection {
        self.selection(mode, &[], as_of)
    }

    /// Selection for a mode and a transit scan.
    ///
    /// Computed on first request and whenever the transit input differs from
    /// the one cached for this mode, which it then replaces.
    pub fn selection(
        &mut self,
        mode: DisplayMode,
        transiting: &[CelestialBody],
        as_of: DateTime<Utc>,
    ) -> &Selection {
        let transit_input = transit_fingerprint(transiting, as_of);
        let natal = &self.natal;
        let natal_aspects = &self.natal_aspects;
        let matcher = &self.matcher;
        let compute = || {
            let transits = matcher.match_transits(transiting, &natal.bodies, as_of);
            CachedSelection {
                transit_input,
                selection: select_for_display(&natal.bodies, natal_aspects, &transits, mode),
            }
        };

        let entry = match self.cache.entry(mode) {
            Entry::Occupied(slot) if slot.get().transit_input == transit_input => {
                log::trace!("selection cache hit for {}", mode);
                slot.into_mut()
            }
            Entry::Occupied(mut slot) => {
                log::trace!("transit input changed for {}, recomputing", mode);
                slot.insert(compute());
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(compute()),
        };
        &entry.selection
    }

    /// Day digest over every matched transit, before any mode filtering.
    /// The lunar phase comes from the transiting Sun and Moon.
    pub fn day_summary(&self, transiting: &[CelestialBody], as_of: DateTime<Utc>) -> DaySummary {
        let transits = self.matcher.match_transits(transiting, &self.natal.bodies, as_of);
        DaySummary::from_transits(&transits, as_of)
            .with_lunar_phase(LunarPhase::from_bodies(transiting))
    }

    /// Houses visible in a mode, empty when the chart has none
    pub fn houses(&self, mode: DisplayMode) -> Vec<House> {
        self.natal
            .houses
            .as_ref()
            .map(|h| select_houses(h, mode))
            .unwrap_or_default()
    }
}

fn transit_fingerprint(transiting: &[CelestialBody], as_of: DateTime<Utc>) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_bodies(transiting, &mut hasher);
    // Without transiting bodies the instant cannot change the result
    if !transiting.is_empty() {
        as_of.hash(&mut hasher);
    }
    hasher.finish()
}
