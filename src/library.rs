// Copyright (C) 2021 Oren Ben-Kiki
//
// This program is free software: you can redistribute it and/or modify it under the terms of the
// GNU Affero General Public License as published by the Free Software Foundation, either version 3
// of the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without
// even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License along with this program.
// If not, see <https://www.gnu.org/licenses/>.

//! Sample, scale and encode Spirograph curves.

use crate::config::CurveKind;
use crate::config::SpiroConfig;
use crate::error::Result;
use crate::error::SpiroError;
use ordered_float::OrderedFloat;
use std::f64::consts::PI;
use svg2polylines::CoordinatePair as Point;
use svg2polylines::Polyline;
use tracing::debug;
use tracing::trace;

/// Spans at most this far from zero are considered degenerate.
pub const SPAN_TOLERANCE: f64 = 1e-9;

#[cfg(test)]
fn assert_point(point: Point, x: f64, y: f64) {
    assert_float_absolute_eq!(point.x, x, 1e-6);
    assert_float_absolute_eq!(point.y, y, 1e-6);
}

#[cfg(test)]
fn test_config(curve_kind: CurveKind) -> SpiroConfig {
    SpiroConfig {
        curve_kind,
        ..SpiroConfig::default()
    }
}

/// The number of angle steps to sample (there is one more point than steps).
pub fn step_count(config: &SpiroConfig) -> usize {
    let total_angle = 2.0 * PI * config.cycles;
    let steps = (total_angle / config.theta_step).floor();
    if steps < 1.0 {
        1
    } else {
        steps as usize
    }
}

#[cfg(test)]
#[test]
fn test_step_count() {
    let config = test_config(CurveKind::Hypotrochoid);
    assert_eq!(step_count(&config), 6283);

    let half_turn = SpiroConfig {
        cycles: 1.0,
        theta_step: PI,
        ..config.clone()
    };
    assert_eq!(step_count(&half_turn), 2);

    let huge_step = SpiroConfig {
        cycles: 1.0,
        theta_step: 100.0,
        ..config
    };
    assert_eq!(step_count(&huge_step), 1);
}

/// Evaluate the curve at a single angle (in radians).
pub fn curve_point(config: &SpiroConfig, theta: f64) -> Point {
    let outer = config.outer_radius;
    let inner = config.inner_radius;
    let pen = config.pen_offset;
    match config.curve_kind {
        CurveKind::Hypotrochoid => {
            let k = outer - inner;
            let angle = k / inner * theta;
            Point {
                x: k * theta.cos() + pen * angle.cos(),
                y: k * theta.sin() - pen * angle.sin(),
            }
        }
        CurveKind::Epitrochoid => {
            let k = outer + inner;
            let angle = k / inner * theta;
            Point {
                x: k * theta.cos() - pen * angle.cos(),
                y: k * theta.sin() - pen * angle.sin(),
            }
        }
    }
}

#[cfg(test)]
#[test]
fn test_curve_point() {
    let hypotrochoid = test_config(CurveKind::Hypotrochoid);
    assert_point(curve_point(&hypotrochoid, 0.0), 145.0, 0.0);
    // k = 105, k / r = 1.4
    assert_point(
        curve_point(&hypotrochoid, PI / 2.0),
        40.0 * (0.7 * PI).cos(),
        105.0 - 40.0 * (0.7 * PI).sin(),
    );

    let epitrochoid = test_config(CurveKind::Epitrochoid);
    assert_point(curve_point(&epitrochoid, 0.0), 215.0, 0.0);
    // k = 255, k / r = 3.4
    assert_point(
        curve_point(&epitrochoid, PI),
        -255.0 - 40.0 * (3.4 * PI).cos(),
        -40.0 * (3.4 * PI).sin(),
    );
}

/// Sample the raw (unscaled) points of the curve, in increasing angle order.
pub fn generate_points(config: &SpiroConfig) -> Polyline {
    let steps = step_count(config);
    (0..=steps)
        .map(|index| curve_point(config, index as f64 * config.theta_step))
        .collect()
}

#[cfg(test)]
#[test]
fn test_generate_points() {
    let config = SpiroConfig {
        cycles: 1.0,
        theta_step: PI,
        ..test_config(CurveKind::Hypotrochoid)
    };
    let points = generate_points(&config);
    assert_eq!(points.len(), 3);
    for (index, point) in points.iter().enumerate() {
        let expected = curve_point(&config, index as f64 * PI);
        assert_eq!(point.x, expected.x);
        assert_eq!(point.y, expected.y);
    }
}

/// The theoretical radial bounds of the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// The smallest radius the curve may reach.
    pub min_radius: f64,

    /// The largest radius the curve may reach.
    pub max_radius: f64,
}

impl Extent {
    /// Compute the extent from the configuration alone (ignoring any sampled points).
    pub fn of(config: &SpiroConfig) -> Self {
        match config.curve_kind {
            CurveKind::Hypotrochoid => Extent {
                min_radius: config.outer_radius - config.inner_radius - config.pen_offset,
                max_radius: config.outer_radius + config.pen_offset,
            },
            CurveKind::Epitrochoid => Extent {
                min_radius: 0.0,
                max_radius: config.outer_radius + config.inner_radius + config.pen_offset,
            },
        }
    }

    /// The distance between the bounds.
    pub fn span(&self) -> f64 {
        self.max_radius - self.min_radius
    }
}

#[cfg(test)]
#[test]
fn test_extent() {
    let hypotrochoid = Extent::of(&test_config(CurveKind::Hypotrochoid));
    assert_float_absolute_eq!(hypotrochoid.min_radius, 65.0, 1e-9);
    assert_float_absolute_eq!(hypotrochoid.max_radius, 220.0, 1e-9);
    assert_float_absolute_eq!(hypotrochoid.span(), 155.0, 1e-9);

    let epitrochoid = Extent::of(&test_config(CurveKind::Epitrochoid));
    assert_float_absolute_eq!(epitrochoid.min_radius, 0.0, 1e-9);
    assert_float_absolute_eq!(epitrochoid.max_radius, 295.0, 1e-9);
}

/// The uniform scale and translation from raw curve space to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    /// Half the canvas size; the raw origin maps to (half_canvas, half_canvas).
    pub half_canvas: f64,

    /// The factor applied to both axes.
    pub scale: f64,
}

impl CanvasTransform {
    /// Derive the transform that fits the curve's extent into the canvas.
    pub fn of(config: &SpiroConfig) -> Self {
        let mut span = Extent::of(config).span();
        if span.abs() <= SPAN_TOLERANCE {
            span = config.outer_radius.max(1.0);
        }
        let half_canvas = f64::from(config.canvas_size) / 2.0;
        let scale = half_canvas / (span / 2.0).max(1.0);
        CanvasTransform { half_canvas, scale }
    }

    /// Map a single raw point into the canvas.
    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.half_canvas + point.x * self.scale,
            y: self.half_canvas + point.y * self.scale,
        }
    }
}

#[cfg(test)]
#[test]
fn test_canvas_transform() {
    let transform = CanvasTransform::of(&test_config(CurveKind::Hypotrochoid));
    assert_float_absolute_eq!(transform.half_canvas, 450.0, 1e-9);
    assert_float_absolute_eq!(transform.scale, 450.0 / 77.5, 1e-9);
    assert_point(transform.apply(Point { x: 0.0, y: 0.0 }), 450.0, 450.0);
    assert_point(
        transform.apply(Point { x: 77.5, y: -77.5 }),
        900.0,
        0.0,
    );
}

#[cfg(test)]
#[test]
fn test_degenerate_span() {
    let config = SpiroConfig {
        outer_radius: 0.5,
        inner_radius: 1e-12,
        pen_offset: 1e-12,
        ..test_config(CurveKind::Hypotrochoid)
    };
    assert!(Extent::of(&config).span() <= SPAN_TOLERANCE);

    let transform = CanvasTransform::of(&config);
    assert_float_absolute_eq!(transform.scale, 450.0, 1e-9);

    for point in scale_points(&generate_points(&config), &config) {
        assert!(point.x.is_finite() && point.y.is_finite());
        assert!(point.x >= 0.0 && point.x <= 900.0);
        assert!(point.y >= 0.0 && point.y <= 900.0);
    }
}

#[cfg(test)]
#[test]
fn test_tiny_span_is_not_blown_up() {
    let config = SpiroConfig {
        outer_radius: 1.0,
        inner_radius: 0.25,
        pen_offset: 0.25,
        ..test_config(CurveKind::Hypotrochoid)
    };
    assert_float_absolute_eq!(CanvasTransform::of(&config).scale, 450.0, 1e-9);
}

/// Scale raw curve points to fit inside the configured canvas.
pub fn scale_points(points: &[Point], config: &SpiroConfig) -> Polyline {
    if points.is_empty() {
        return vec![];
    }
    let transform = CanvasTransform::of(config);
    points.iter().map(|point| transform.apply(*point)).collect()
}

#[cfg(test)]
#[test]
fn test_scale_points() {
    let config = test_config(CurveKind::Epitrochoid);
    assert!(scale_points(&[], &config).is_empty());

    let raw = vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 147.5, y: 0.0 },
        Point { x: 0.0, y: -147.5 },
    ];
    let scaled = scale_points(&raw, &config);
    assert_eq!(scaled.len(), raw.len());
    assert_point(scaled[0], 450.0, 450.0);
    assert_point(scaled[1], 900.0, 450.0);
    assert_point(scaled[2], 450.0, 0.0);
}

/// Return the minimal and maximal coordinates of some points, if there are any.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let minimal_x = points.iter().map(|point| OrderedFloat(point.x)).min()?;
    let minimal_y = points.iter().map(|point| OrderedFloat(point.y)).min()?;
    let maximal_x = points.iter().map(|point| OrderedFloat(point.x)).max()?;
    let maximal_y = points.iter().map(|point| OrderedFloat(point.y)).max()?;
    Some((
        Point {
            x: *minimal_x,
            y: *minimal_y,
        },
        Point {
            x: *maximal_x,
            y: *maximal_y,
        },
    ))
}

#[cfg(test)]
#[test]
fn test_bounding_box() {
    assert!(bounding_box(&[]).is_none());

    let diamond = vec![
        Point { x: -1.0, y: 0.0 },
        Point { x: 0.0, y: -2.0 },
        Point { x: 3.0, y: 0.0 },
        Point { x: 0.0, y: 4.0 },
    ];
    let (minimal_point, maximal_point) = bounding_box(&diamond).unwrap();
    assert_point(minimal_point, -1.0, -2.0);
    assert_point(maximal_point, 3.0, 4.0);
}

/// Encode points as an SVG path of absolute move/line commands.
pub fn points_to_path(points: &[Point]) -> Result<String> {
    let (first, rest) = points.split_first().ok_or(SpiroError::EmptyCurve)?;
    let mut segments = Vec::with_capacity(points.len());
    segments.push(format!("M {:.3} {:.3}", first.x, first.y));
    segments.extend(
        rest.iter()
            .map(|point| format!("L {:.3} {:.3}", point.x, point.y)),
    );
    Ok(segments.join(" "))
}

#[cfg(test)]
#[test]
fn test_points_to_path() {
    let points = vec![Point { x: 10.0, y: 20.0 }, Point { x: 30.0, y: 40.0 }];
    assert_eq!(
        points_to_path(&points).unwrap(),
        "M 10.000 20.000 L 30.000 40.000"
    );

    let single = vec![Point { x: 1.23456, y: 2.0 }];
    assert_eq!(points_to_path(&single).unwrap(), "M 1.235 2.000");

    assert!(matches!(points_to_path(&[]), Err(SpiroError::EmptyCurve)));
}

/// Generate the scaled SVG path of a configured curve.
pub fn generate_path(config: &SpiroConfig) -> Result<String> {
    let points = generate_points(config);
    let transform = CanvasTransform::of(config);
    debug!(
        kind = %config.curve_kind,
        points = points.len(),
        scale = transform.scale,
        "sampled curve"
    );

    let scaled_points = scale_points(&points, config);
    if let Some((minimal_point, maximal_point)) = bounding_box(&scaled_points) {
        trace!(
            min_x = minimal_point.x,
            min_y = minimal_point.y,
            max_x = maximal_point.x,
            max_y = maximal_point.y,
            "scaled curve bounds"
        );
    }

    points_to_path(&scaled_points)
}

#[cfg(test)]
#[test]
fn test_generate_path() {
    let config = SpiroConfig {
        cycles: 1.0,
        theta_step: PI,
        ..test_config(CurveKind::Hypotrochoid)
    };
    let path = generate_path(&config).unwrap();
    assert!(path.starts_with("M 1291.935 450.000 L "));
    assert_eq!(path.matches(" L ").count(), 2);
    assert_eq!(path, generate_path(&config).unwrap());
}
