use approx::assert_relative_eq;
use chartify_fx::charts::{curve_segments, Scene};
use chartify_fx::config::PlotConfig;
use chartify_fx::data::{PlotError, Sampler};
use chartify_fx::expr::Expression;
use chartify_fx::state::PRESETS;

#[test]
fn parabola_plots_as_one_unbroken_curve() {
    let config = PlotConfig::default();
    let data = Sampler::plot("x**2 + 3*x - 5", -10.0, 10.0, &config).unwrap();

    assert_eq!(data.points.len(), config.sample_count + 1);
    assert!(data.pole_breaks.is_empty());

    // Raw extremes are -7.25 (at the sampled x = -1.5) and 125 (at x = 10),
    // widened by 10% of the span on each side.
    let raw_span = 125.0 + 7.25;
    assert_relative_eq!(data.y_range.min, -7.25 - 0.1 * raw_span, epsilon = 1e-9);
    assert_relative_eq!(data.y_range.max, 125.0 + 0.1 * raw_span, epsilon = 1e-9);

    let segments = curve_segments(&data);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 801);

    let scene = Scene::build(&data, &config);
    assert_eq!(scene.curve.len(), 1);
}

#[test]
fn tangent_breaks_at_its_asymptotes() {
    let config = PlotConfig::default();
    let data = Sampler::plot("Math.tan(x)", -10.0, 10.0, &config).unwrap();

    // Odd multiples of pi/2 inside [-10, 10]
    assert_eq!(data.pole_breaks.len(), 6);
    let segments = curve_segments(&data);
    assert!(segments.len() > 1);
    assert_eq!(Scene::build(&data, &config).curve.len(), segments.len());
}

#[test]
fn malformed_expression_produces_no_plot() {
    let config = PlotConfig::default();
    let err = Sampler::plot("x +++ * 2", -10.0, 10.0, &config).unwrap_err();
    assert!(matches!(err, PlotError::Parse(_)));
    assert!(err.to_string().starts_with("Invalid function"));
}

#[test]
fn pole_at_five_is_never_bridged() {
    let config = PlotConfig::default();
    let data = Sampler::plot("1/(x-5)", 0.0, 10.0, &config).unwrap();
    let threshold = data.y_range.span() * 0.5;

    // x = 5 is sampled exactly and dropped
    assert_eq!(data.points.len(), 800);
    assert!(data.points.iter().all(|p| p.y.is_finite()));

    let segments = curve_segments(&data);
    assert_eq!(segments.len(), 2);
    for segment in &segments {
        for pair in segment.windows(2) {
            assert!((pair[1].y - pair[0].y).abs() <= threshold);
            assert!(!(pair[0].x < 5.0 && pair[1].x > 5.0));
        }
    }
}

#[test]
fn presets_round_trip_through_the_sampler() {
    let config = PlotConfig::default();
    for preset in PRESETS {
        let expr = Expression::parse(preset.expression).unwrap();
        let data = Sampler::plot(preset.expression, -10.0, 10.0, &config)
            .unwrap_or_else(|e| panic!("{}: {}", preset.name, e));
        for p in data.points.iter().step_by(97) {
            assert_relative_eq!(p.y, expr.eval(p.x), epsilon = 1e-12);
        }
    }
}

#[test]
fn ranges_are_validated_before_sampling() {
    let config = PlotConfig::default();
    assert!(matches!(
        Sampler::plot("x", 3.0, 3.0, &config),
        Err(PlotError::InvalidRange { .. })
    ));
    assert!(matches!(
        Sampler::plot("x", -600.0, 600.0, &config),
        Err(PlotError::RangeTooWide { .. })
    ));
    assert!(Sampler::plot("x", -500.0, 500.0, &config).is_ok());
    assert_eq!(
        Sampler::plot("   ", -1.0, 1.0, &config),
        Err(PlotError::EmptyExpression)
    );
}

#[test]
fn undefined_everywhere_is_a_global_error() {
    let config = PlotConfig::default();
    assert_eq!(
        Sampler::plot("sqrt(-1 - x*x)", -10.0, 10.0, &config),
        Err(PlotError::NoDefinedPoints)
    );
}

#[test]
fn runaway_nesting_is_reported_not_fatal() {
    let config = PlotConfig::default();
    let source = format!("{}x", "-".repeat(50_000));
    let err = Sampler::plot(&source, -10.0, 10.0, &config).unwrap_err();
    assert!(err.to_string().contains("nested too deeply"), "{}", err);
}
