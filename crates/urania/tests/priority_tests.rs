use chrono::{TimeZone, Utc};
use urania::{
    select_for_display, AspectCalculator, AspectType, BodyKind, CelestialBody, DisplayMode,
    TransitMatcher,
};

fn ten_body_chart() -> Vec<CelestialBody> {
    use BodyKind::*;
    // Deliberately out of priority order
    [
        (Pluto, 215.0),
        (Mars, 95.0),
        (Ascendant, 240.0),
        (Venus, 48.0),
        (Saturn, 330.0),
        (Moon, 120.0),
        (Mercury, 12.0),
        (Jupiter, 180.0),
        (Sun, 0.0),
        (Neptune, 300.0),
    ]
    .into_iter()
    .map(|(kind, lon)| CelestialBody::new(kind, lon))
    .collect()
}

#[test]
fn test_novice_shows_no_aspects() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    assert!(!aspects.is_empty());

    let selection = select_for_display(&bodies, &aspects, &[], DisplayMode::Novice);
    assert!(selection.aspects.is_empty());
    assert!(selection.transits.is_empty());
}

#[test]
fn test_novice_keeps_big_three_in_priority_order() {
    let bodies = ten_body_chart();
    let selection = select_for_display(&bodies, &[], &[], DisplayMode::Novice);
    let kinds: Vec<_> = selection.bodies.iter().map(|b| b.kind()).collect();
    assert_eq!(
        kinds,
        vec![BodyKind::Sun, BodyKind::Moon, BodyKind::Ascendant]
    );
}

#[test]
fn test_intermediate_limits_aspect_types_and_orb() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    let selection = select_for_display(&bodies, &aspects, &[], DisplayMode::Intermediate);
    let config = DisplayMode::Intermediate.config();

    assert!(selection.bodies.len() <= config.max_bodies);
    assert!(selection.aspects.len() <= config.max_relationships);
    let shown: Vec<_> = selection.bodies.iter().map(|b| b.kind()).collect();
    for aspect in &selection.aspects {
        assert!(config.allows_aspect(aspect.aspect_type));
        assert!(aspect.orb <= config.max_aspect_orb);
        assert!(shown.contains(&aspect.body_a) && shown.contains(&aspect.body_b));
    }
    // Sun–Moon trine survives, Sun–Mars square does not
    assert!(selection
        .aspects
        .iter()
        .any(|a| a.involves(BodyKind::Sun) && a.involves(BodyKind::Moon)));
    assert!(selection
        .aspects
        .iter()
        .all(|a| a.aspect_type != AspectType::Square));
}

#[test]
fn test_advanced_ranks_tight_aspects_first() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    let selection = select_for_display(&bodies, &aspects, &[], DisplayMode::Advanced);

    assert_eq!(selection.bodies.len(), 10);
    let first = &selection.aspects[0];
    assert!(first.orb <= 1.0);
    let loose_before_tight = selection
        .aspects
        .windows(2)
        .any(|w| w[0].orb > 1.0 && w[1].orb <= 1.0);
    assert!(!loose_before_tight);
}

#[test]
fn test_selection_is_idempotent() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let transiting = vec![
        CelestialBody::new(BodyKind::Mars, 1.0),
        CelestialBody::new(BodyKind::Venus, 119.0),
    ];
    let transits = TransitMatcher::new().match_transits(&transiting, &bodies, at);

    for mode in DisplayMode::ALL {
        let once = select_for_display(&bodies, &aspects, &transits, mode);
        let twice = select_for_display(&once.bodies, &once.aspects, &once.transits, mode);
        assert_eq!(once, twice, "{mode} selection changed on second pass");
    }
}

#[test]
fn test_selection_is_deterministic() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    let a = select_for_display(&bodies, &aspects, &[], DisplayMode::Advanced);
    let b = select_for_display(&bodies, &aspects, &[], DisplayMode::Advanced);
    assert_eq!(a, b);
}

#[test]
fn test_transits_need_shown_bodies() {
    let bodies = ten_body_chart();
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    // Saturn conjunct natal Sun; Saturn is not an intermediate body
    let transits = TransitMatcher::new().match_transits(
        &[
            CelestialBody::new(BodyKind::Saturn, 1.0),
            CelestialBody::new(BodyKind::Venus, 121.0),
        ],
        &bodies,
        at,
    );
    let selection = select_for_display(&bodies, &[], &transits, DisplayMode::Intermediate);
    assert!(!selection.transits.is_empty());
    assert!(selection
        .transits
        .iter()
        .all(|t| t.moving_body != BodyKind::Saturn));

    let advanced = select_for_display(&bodies, &[], &transits, DisplayMode::Advanced);
    assert!(advanced
        .transits
        .iter()
        .any(|t| t.moving_body == BodyKind::Saturn));
}

#[test]
fn test_missing_positions_are_not_shown() {
    let bodies = vec![
        CelestialBody::new(BodyKind::Sun, f64::NAN),
        CelestialBody::new(BodyKind::Moon, 10.0),
    ];
    let selection = select_for_display(&bodies, &[], &[], DisplayMode::Novice);
    assert_eq!(selection.bodies.len(), 1);
    assert_eq!(selection.bodies[0].kind(), BodyKind::Moon);
}

#[test]
fn test_selection_json_shape() {
    let bodies = ten_body_chart();
    let aspects = AspectCalculator::new().detect_aspects(&bodies);
    let selection = select_for_display(&bodies, &aspects, &[], DisplayMode::Intermediate);

    let json = serde_json::to_value(&selection).unwrap();
    assert_eq!(json["bodies"][0]["kind"], "sun");
    assert_eq!(json["bodies"][0]["longitude"], 0.0);
    assert!(json["bodies"][0].get("speed").is_none());
    assert_eq!(json["aspects"][0]["aspect_type"], "trine");
    assert_eq!(json["transits"].as_array().map(Vec::len), Some(0));

    let back: urania::Selection = serde_json::from_value(json).unwrap();
    assert_eq!(back, selection);
}
