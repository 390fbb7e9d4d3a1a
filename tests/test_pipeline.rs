#[macro_use]
extern crate assert_float_eq;

use chrono::TimeZone;
use chrono::Utc;
use spirograph::document::build_svg;
use spirograph::library::curve_point;
use spirograph::library::generate_path;
use spirograph::library::generate_points;
use spirograph::library::points_to_path;
use spirograph::library::scale_points;
use spirograph::library::step_count;
use spirograph::library::CanvasTransform;
use spirograph::CurveKind;
use spirograph::SpiroConfig;
use spirograph::SpiroError;
use std::f64::consts::PI;
use svg2polylines::parse as parse_svg;
use svg2polylines::CoordinatePair as Point;

fn configs() -> Vec<SpiroConfig> {
    let mut configs = vec![];
    for curve_kind in [CurveKind::Hypotrochoid, CurveKind::Epitrochoid].iter() {
        for (theta_step, cycles) in [(0.02, 20.0), (0.2, 1.0), (0.13, 7.5)].iter() {
            configs.push(SpiroConfig {
                curve_kind: *curve_kind,
                theta_step: *theta_step,
                cycles: *cycles,
                ..SpiroConfig::default()
            });
        }
    }
    configs
}

#[test]
fn default_hypotrochoid() {
    let config = SpiroConfig::default();
    let points = generate_points(&config);
    assert_eq!(step_count(&config), 6283);
    assert_eq!(points.len(), 6284);
    assert_float_absolute_eq!(points[0].x, 145.0, 1e-9);
    assert_float_absolute_eq!(points[0].y, 0.0, 1e-9);
}

#[test]
fn half_turn_steps() {
    let config = SpiroConfig {
        cycles: 1.0,
        theta_step: PI,
        ..SpiroConfig::default()
    };
    assert_eq!(generate_points(&config).len(), 3);
}

#[test]
fn encode_two_points() {
    let points = vec![Point { x: 10.0, y: 20.0 }, Point { x: 30.0, y: 40.0 }];
    assert_eq!(
        points_to_path(&points).unwrap(),
        "M 10.000 20.000 L 30.000 40.000"
    );
}

#[test]
fn encode_no_points() {
    assert!(matches!(points_to_path(&[]), Err(SpiroError::EmptyCurve)));
}

#[test]
fn lengths_match_step_count() {
    for config in configs() {
        let raw = generate_points(&config);
        let scaled = scale_points(&raw, &config);
        assert_eq!(raw.len(), step_count(&config) + 1);
        assert_eq!(scaled.len(), raw.len());
    }
}

#[test]
fn order_is_preserved() {
    for config in configs() {
        let transform = CanvasTransform::of(&config);
        let scaled = scale_points(&generate_points(&config), &config);
        for (index, point) in scaled.iter().enumerate() {
            let expected = transform.apply(curve_point(&config, index as f64 * config.theta_step));
            assert_eq!(point.x, expected.x);
            assert_eq!(point.y, expected.y);
        }
    }
}

#[test]
fn output_is_deterministic() {
    for config in configs() {
        assert_eq!(
            generate_path(&config).unwrap(),
            generate_path(&config).unwrap()
        );
    }
}

#[test]
fn origin_is_centered() {
    for canvas_size in [200, 901, 3000].iter() {
        for config in configs() {
            let config = SpiroConfig {
                canvas_size: *canvas_size,
                ..config
            };
            let center = CanvasTransform::of(&config).apply(Point { x: 0.0, y: 0.0 });
            assert_float_absolute_eq!(center.x, f64::from(*canvas_size) / 2.0, 1e-9);
            assert_float_absolute_eq!(center.y, f64::from(*canvas_size) / 2.0, 1e-9);
        }
    }
}

#[test]
fn svg_parses_back_into_the_curve() {
    let timestamp = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    for config in configs() {
        let svg = build_svg(&config, 1, timestamp).unwrap();
        let polylines = parse_svg(&svg).unwrap();
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].len(), step_count(&config) + 1);

        let scaled = scale_points(&generate_points(&config), &config);
        for (parsed, point) in polylines[0].iter().zip(scaled.iter()) {
            assert_float_absolute_eq!(parsed.x, point.x, 1e-3);
            assert_float_absolute_eq!(parsed.y, point.y, 1e-3);
        }
    }
}
