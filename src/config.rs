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

//! The configuration of a single design.

use crate::error::SpiroError;
use std::fmt;
use std::str::FromStr;

/// Which family of curves to trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveKind {
    /// The rolling circle is inside the fixed circle.
    Hypotrochoid,

    /// The rolling circle is outside the fixed circle.
    Epitrochoid,
}

impl CurveKind {
    /// All the supported kinds, in the order they are offered.
    pub const NAMES: [&'static str; 2] = ["hypotrochoid", "epitrochoid"];

    /// The name used on the command line and in summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            CurveKind::Hypotrochoid => "hypotrochoid",
            CurveKind::Epitrochoid => "epitrochoid",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for CurveKind {
    type Err = SpiroError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "hypotrochoid" => Ok(CurveKind::Hypotrochoid),
            "epitrochoid" => Ok(CurveKind::Epitrochoid),
            _ => Err(SpiroError::InvalidConfiguration(format!(
                "invalid choice {} for spiro_type",
                text
            ))),
        }
    }
}

/// All the knobs that control a design.
///
/// Values are trusted to be in range; use [`crate::knobs::collect_config`] to build a validated
/// configuration from user input.
#[derive(Clone, Debug, PartialEq)]
pub struct SpiroConfig {
    /// Radius of the fixed circle.
    pub outer_radius: f64,

    /// Radius of the rolling circle (must be positive).
    pub inner_radius: f64,

    /// Distance of the pen from the center of the rolling circle.
    pub pen_offset: f64,

    /// Angle (in radians) between consecutive samples (must be positive).
    pub theta_step: f64,

    /// Number of full rotations to sample.
    pub cycles: f64,

    /// Width of the stroke in the SVG output.
    pub stroke_width: f64,

    /// Color of the stroke in the SVG output.
    pub stroke_color: String,

    /// Side of the square canvas in pixels.
    pub canvas_size: u32,

    /// Which family of curves to trace.
    pub curve_kind: CurveKind,
}

impl Default for SpiroConfig {
    fn default() -> Self {
        SpiroConfig {
            outer_radius: 180.0,
            inner_radius: 75.0,
            pen_offset: 40.0,
            theta_step: 0.02,
            cycles: 20.0,
            stroke_width: 2.0,
            stroke_color: "#1f77b4".to_string(),
            canvas_size: 900,
            curve_kind: CurveKind::Hypotrochoid,
        }
    }
}

#[cfg(test)]
#[test]
fn test_curve_kind_names() {
    for name in CurveKind::NAMES.iter() {
        let kind: CurveKind = name.parse().unwrap();
        assert_eq!(kind.as_str(), *name);
        assert_eq!(kind.to_string(), *name);
    }
    assert!("cycloid".parse::<CurveKind>().is_err());
}
