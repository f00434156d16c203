use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::{
    select_for_display, AspectCalculator, BodyKind, CelestialBody, Chart, ChartSession,
    DisplayMode, TransitMatcher,
};

fn full_chart(offset: f64) -> Vec<CelestialBody> {
    BodyKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| CelestialBody::new(*kind, offset + i as f64 * 27.5).with_speed(1.0))
        .collect()
}

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let sun = CelestialBody::new(BodyKind::Sun, 100.0).with_speed(1.0);
    let moon = CelestialBody::new(BodyKind::Moon, 102.0).with_speed(13.0);

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(&sun), black_box(&moon)))
    });
}

fn bench_detect_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let bodies = full_chart(0.0);

    c.bench_function("detect_aspects", |b| {
        b.iter(|| calculator.detect_aspects(black_box(&bodies)))
    });
}

fn bench_match_and_select(c: &mut Criterion) {
    let natal = full_chart(0.0);
    let transiting = full_chart(3.0);
    let aspects = AspectCalculator::new().detect_aspects(&natal);
    let matcher = TransitMatcher::new();
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    c.bench_function("match_transits", |b| {
        b.iter(|| matcher.match_transits(black_box(&transiting), black_box(&natal), at))
    });

    let transits = matcher.match_transits(&transiting, &natal, at);
    c.bench_function("select_for_display_advanced", |b| {
        b.iter(|| {
            select_for_display(
                black_box(&natal),
                black_box(&aspects),
                black_box(&transits),
                DisplayMode::Advanced,
            )
        })
    });

    let mut session = ChartSession::new(Chart::new(natal.clone()));
    c.bench_function("session_cached_selection", |b| {
        b.iter(|| {
            session
                .selection(DisplayMode::Advanced, black_box(&transiting), at)
                .aspects
                .len()
        })
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_detect_aspects, bench_match_and_select);
criterion_main!(benches);
