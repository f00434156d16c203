use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use urania::{
    angular_separation, normalize_degrees, select_for_display, AspectCalculator, BodyKind,
    CelestialBody, DisplayMode, TransitImpact, TransitMatcher,
};

fn any_kind() -> impl Strategy<Value = BodyKind> {
    prop::sample::select(BodyKind::ALL.to_vec())
}

fn any_chart() -> impl Strategy<Value = Vec<CelestialBody>> {
    prop::collection::vec((any_kind(), -720.0..720.0f64), 0..14)
        .prop_map(|v| v.into_iter().map(|(k, lon)| CelestialBody::new(k, lon)).collect())
}

fn any_mode() -> impl Strategy<Value = DisplayMode> {
    prop::sample::select(DisplayMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_normalized_range(angle in -1e6..1e6f64) {
        let n = normalize_degrees(angle);
        prop_assert!(n >= 0.0);
        prop_assert!(n < 360.0);
    }

    #[test]
    fn prop_separation_range_and_symmetry(a in -1e4..1e4f64, b in -1e4..1e4f64) {
        let ab = angular_separation(a, b);
        prop_assert!((0.0..=180.0).contains(&ab));
        prop_assert_eq!(ab.to_bits(), angular_separation(b, a).to_bits());
    }

    #[test]
    fn prop_aspect_orb_within_max(a in 0.0..360.0f64, b in 0.0..360.0f64) {
        let calc = AspectCalculator::new();
        let sun = CelestialBody::new(BodyKind::Sun, a);
        let moon = CelestialBody::new(BodyKind::Moon, b);
        if let Some(aspect) = calc.calculate_aspect(&sun, &moon) {
            prop_assert!(aspect.orb >= 0.0);
            prop_assert!(aspect.orb <= aspect.aspect_type.max_orb());
            let swapped = calc.calculate_aspect(&moon, &sun).unwrap();
            prop_assert_eq!(swapped.aspect_type, aspect.aspect_type);
            prop_assert_eq!(swapped.orb.to_bits(), aspect.orb.to_bits());
        } else {
            prop_assert!(calc.calculate_aspect(&moon, &sun).is_none());
        }
    }

    #[test]
    fn prop_selection_respects_mode_bounds(bodies in any_chart(), mode in any_mode()) {
        let aspects = AspectCalculator::new().detect_aspects(&bodies);
        let selection = select_for_display(&bodies, &aspects, &[], mode);
        let config = mode.config();

        prop_assert!(selection.bodies.len() <= config.max_bodies);
        prop_assert!(selection.aspects.len() <= config.max_relationships);
        for body in &selection.bodies {
            prop_assert!(config.allows_body(body.kind()));
        }
        for aspect in &selection.aspects {
            prop_assert!(config.allows_aspect(aspect.aspect_type));
            prop_assert!(aspect.orb <= config.max_aspect_orb);
        }
        let again = select_for_display(&selection.bodies, &selection.aspects, &[], mode);
        prop_assert_eq!(again, selection);
    }

    #[test]
    fn prop_transits_stay_within_orb(
        transiting in any_chart(),
        natal in any_chart(),
        minutes in 0i64..1_000_000,
    ) {
        let as_of = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::minutes(minutes);
        let matcher = TransitMatcher::new();
        let transits = matcher.match_transits(&transiting, &natal, as_of);

        for t in &transits {
            prop_assert!(t.orb >= 0.0);
            prop_assert!(t.orb <= t.aspect_type.max_orb());
            let intensity = t.intensity();
            prop_assert!((0.0..=1.0).contains(&intensity));
            prop_assert_eq!(t.impact(), TransitImpact::from_intensity(intensity));
            prop_assert!(!t.moving_body.is_angle() || !t.is_ingress());
        }
        prop_assert_eq!(matcher.match_transits(&transiting, &natal, as_of), transits);
    }
}
