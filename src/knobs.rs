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

//! The configurable knobs of a design: metadata, validation, random values and prompting.
//!
//! Every knob value travels as text (as given on the command line, typed at a prompt or drawn at
//! random) and is validated into a [`SpiroConfig`] by [`collect_config`].

use crate::config::CurveKind;
use crate::config::SpiroConfig;
use crate::error::Result;
use crate::error::SpiroError;
use rand::Rng;
use std::collections::HashMap;
use std::io;
use std::io::BufRead;
use std::io::Write;

/// The type (and allowed values) of a knob.
#[derive(Clone, Copy, Debug)]
pub enum KnobKind {
    /// A real number in an inclusive range.
    Real {
        /// The smallest allowed value.
        minimum: f64,

        /// The largest allowed value.
        maximum: f64,
    },

    /// A whole number in an inclusive range.
    Integer {
        /// The smallest allowed value.
        minimum: u32,

        /// The largest allowed value.
        maximum: u32,
    },

    /// A hex color such as `#f0a` or `#ff00aa`.
    Color,

    /// One of a fixed set of names.
    Choice(&'static [&'static str]),
}

/// Metadata describing a configurable knob.
#[derive(Debug)]
pub struct Knob {
    /// The name used in messages and summaries.
    pub name: &'static str,

    /// The long command line flag (without the leading `--`).
    pub flag: &'static str,

    /// The short command line flag (without the leading `-`).
    pub short: &'static str,

    /// The question asked when prompting for the value.
    pub prompt: &'static str,

    /// The type of the value.
    pub kind: KnobKind,

    /// The value used when none is given.
    pub default: &'static str,
}

/// The radius of the fixed circle.
pub static OUTER_RADIUS: Knob = Knob {
    name: "outer_radius",
    flag: "outer-radius",
    short: "R",
    prompt: "Outer radius of the fixed circle",
    kind: KnobKind::Real {
        minimum: 10.0,
        maximum: 400.0,
    },
    default: "180.0",
};

/// The radius of the rolling circle.
pub static INNER_RADIUS: Knob = Knob {
    name: "inner_radius",
    flag: "inner-radius",
    short: "r",
    prompt: "Inner radius of the rolling circle",
    kind: KnobKind::Real {
        minimum: 5.0,
        maximum: 250.0,
    },
    default: "75.0",
};

/// The distance of the pen from the center of the rolling circle.
pub static PEN_OFFSET: Knob = Knob {
    name: "pen_offset",
    flag: "pen-offset",
    short: "d",
    prompt: "Distance of the pen from the rolling circle center",
    kind: KnobKind::Real {
        minimum: 1.0,
        maximum: 250.0,
    },
    default: "40.0",
};

/// The angle (in radians) between consecutive samples.
pub static THETA_STEP: Knob = Knob {
    name: "theta_step",
    flag: "theta-step",
    short: "t",
    prompt: "Angle step between points (smaller = smoother)",
    kind: KnobKind::Real {
        minimum: 0.001,
        maximum: 0.2,
    },
    default: "0.02",
};

/// How many full turns of the angle to trace.
pub static CYCLES: Knob = Knob {
    name: "cycles",
    flag: "cycles",
    short: "c",
    prompt: "Number of rotations to complete",
    kind: KnobKind::Real {
        minimum: 1.0,
        maximum: 60.0,
    },
    default: "20.0",
};

/// The width of the drawn line.
pub static STROKE_WIDTH: Knob = Knob {
    name: "stroke_width",
    flag: "stroke-width",
    short: "w",
    prompt: "Stroke width of the curve",
    kind: KnobKind::Real {
        minimum: 0.1,
        maximum: 10.0,
    },
    default: "2.0",
};

/// The width and height of the square canvas, in pixels.
pub static CANVAS_SIZE: Knob = Knob {
    name: "canvas_size",
    flag: "canvas-size",
    short: "s",
    prompt: "Canvas size in pixels",
    kind: KnobKind::Integer {
        minimum: 200,
        maximum: 3000,
    },
    default: "900",
};

/// The color of the drawn line.
pub static STROKE_COLOR: Knob = Knob {
    name: "stroke_color",
    flag: "stroke-color",
    short: "C",
    prompt: "Stroke color (hex)",
    kind: KnobKind::Color,
    default: "#1f77b4",
};

/// Whether the circle rolls inside or outside the fixed circle.
pub static SPIRO_TYPE: Knob = Knob {
    name: "spiro_type",
    flag: "spiro-type",
    short: "T",
    prompt: "Spirograph type",
    kind: KnobKind::Choice(&CurveKind::NAMES),
    default: "hypotrochoid",
};

/// All the knobs, in the order they are prompted for and drawn at random.
pub static KNOBS: [&Knob; 9] = [
    &OUTER_RADIUS,
    &INNER_RADIUS,
    &PEN_OFFSET,
    &THETA_STEP,
    &CYCLES,
    &STROKE_WIDTH,
    &CANVAS_SIZE,
    &STROKE_COLOR,
    &SPIRO_TYPE,
];

fn invalid(message: String) -> SpiroError {
    SpiroError::InvalidConfiguration(message)
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    knob: &Knob,
    value: T,
    minimum: T,
    maximum: T,
) -> Result<T> {
    if value < minimum {
        return Err(invalid(format!("{} must be >= {}", knob.name, minimum)));
    }
    if value > maximum {
        return Err(invalid(format!("{} must be <= {}", knob.name, maximum)));
    }
    Ok(value)
}

/// Parse and validate the text of a real knob.
pub fn parse_real(knob: &Knob, text: &str) -> Result<f64> {
    let (minimum, maximum) = match knob.kind {
        KnobKind::Real { minimum, maximum } => (minimum, maximum),
        _ => unreachable!("{} is not a real knob", knob.name),
    };
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|error| invalid(format!("{} in {}: {}", error, knob.name, text)))?;
    if !value.is_finite() {
        return Err(invalid(format!("{} is not finite: {}", knob.name, text)));
    }
    check_range(knob, value, minimum, maximum)
}

/// Parse and validate the text of an integer knob.
pub fn parse_integer(knob: &Knob, text: &str) -> Result<u32> {
    let (minimum, maximum) = match knob.kind {
        KnobKind::Integer { minimum, maximum } => (minimum, maximum),
        _ => unreachable!("{} is not an integer knob", knob.name),
    };
    let value = text
        .trim()
        .parse::<u32>()
        .map_err(|error| invalid(format!("{} in {}: {}", error, knob.name, text)))?;
    check_range(knob, value, minimum, maximum)
}

/// Parse and normalize (lowercase) the text of a color knob.
pub fn parse_color(knob: &Knob, text: &str) -> Result<String> {
    let color = text.trim();
    let is_valid = color.starts_with('#')
        && (color.len() == 4 || color.len() == 7)
        && color[1..].chars().all(|digit| digit.is_ascii_hexdigit());
    if !is_valid {
        return Err(invalid(format!(
            "{} must be a hex value like #ff00aa: {}",
            knob.name, text
        )));
    }
    Ok(color.to_lowercase())
}

/// Parse the text of a choice knob.
pub fn parse_choice(knob: &Knob, text: &str) -> Result<&'static str> {
    let choices = match knob.kind {
        KnobKind::Choice(choices) => choices,
        _ => unreachable!("{} is not a choice knob", knob.name),
    };
    let text = text.trim();
    choices
        .iter()
        .copied()
        .find(|choice| *choice == text)
        .ok_or_else(|| invalid(format!("invalid choice {} for {}", text, knob.name)))
}

/// Validate the text of any knob, returning its canonical text.
pub fn normalize(knob: &Knob, text: &str) -> Result<String> {
    match knob.kind {
        KnobKind::Real { .. } => parse_real(knob, text).map(|value| value.to_string()),
        KnobKind::Integer { .. } => parse_integer(knob, text).map(|value| value.to_string()),
        KnobKind::Color => parse_color(knob, text),
        KnobKind::Choice(_) => parse_choice(knob, text).map(str::to_string),
    }
}

#[cfg(test)]
#[test]
fn test_normalize() {
    assert_eq!(normalize(&OUTER_RADIUS, " 10 ").unwrap(), "10");
    assert_eq!(normalize(&OUTER_RADIUS, "400").unwrap(), "400");
    assert_eq!(
        normalize(&OUTER_RADIUS, "9.99").unwrap_err().to_string(),
        "invalid configuration: outer_radius must be >= 10"
    );
    assert_eq!(
        normalize(&THETA_STEP, "0.5").unwrap_err().to_string(),
        "invalid configuration: theta_step must be <= 0.2"
    );
    assert!(normalize(&CYCLES, "NaN").is_err());
    assert!(normalize(&CYCLES, "many").is_err());

    assert_eq!(normalize(&CANVAS_SIZE, "200").unwrap(), "200");
    assert!(normalize(&CANVAS_SIZE, "199").is_err());
    assert!(normalize(&CANVAS_SIZE, "900.5").is_err());
    assert!(normalize(&CANVAS_SIZE, "-900").is_err());

    assert_eq!(normalize(&STROKE_COLOR, " #FF00aa ").unwrap(), "#ff00aa");
    assert_eq!(normalize(&STROKE_COLOR, "#AbC").unwrap(), "#abc");
    assert!(normalize(&STROKE_COLOR, "ff00aa").is_err());
    assert!(normalize(&STROKE_COLOR, "#ff00a").is_err());
    assert!(normalize(&STROKE_COLOR, "#gg00aa").is_err());

    assert_eq!(normalize(&SPIRO_TYPE, "epitrochoid").unwrap(), "epitrochoid");
    assert!(normalize(&SPIRO_TYPE, "cycloid").is_err());
}

/// Draw a random (valid) value for a knob.
pub fn random_value<R: Rng>(knob: &Knob, rng: &mut R) -> String {
    match knob.kind {
        KnobKind::Real { minimum, maximum } => {
            let value: f64 = rng.gen_range(minimum..=maximum);
            ((value * 10_000.0).round() / 10_000.0).to_string()
        }
        KnobKind::Integer { minimum, maximum } => rng.gen_range(minimum..=maximum).to_string(),
        KnobKind::Color => format!("#{:06x}", rng.gen_range(0..=0xff_ffff_u32)),
        KnobKind::Choice(choices) => choices[rng.gen_range(0..choices.len())].to_string(),
    }
}

/// Draw random values for all the knobs, in a fixed order.
pub fn random_values<R: Rng>(rng: &mut R) -> HashMap<&'static str, String> {
    KNOBS
        .iter()
        .map(|knob| (knob.name, random_value(knob, rng)))
        .collect()
}

#[cfg(test)]
#[test]
fn test_random_values() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let values = random_values(&mut StdRng::seed_from_u64(7));
    assert_eq!(values.len(), KNOBS.len());
    for knob in KNOBS.iter() {
        normalize(knob, &values[knob.name]).unwrap();
    }

    assert_eq!(values, random_values(&mut StdRng::seed_from_u64(7)));
}

/// Ask a question until the answer passes a check.
///
/// An empty answer selects the default. Running out of input is an error.
pub fn ask<T, F>(
    question: &str,
    default: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    mut check: F,
) -> Result<T>
where
    F: FnMut(&str) -> Result<T>,
{
    loop {
        write!(output, "{} [{}]: ", question, default)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(SpiroError::Input(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer for: {}", question),
            )));
        }

        let answer = match line.trim() {
            "" => default,
            answer => answer,
        };
        match check(answer) {
            Ok(value) => return Ok(value),
            Err(error) => writeln!(output, "{}", error)?,
        }
    }
}

/// Prompt for the value of a knob.
pub fn prompt_value(knob: &Knob, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<String> {
    let question = match knob.kind {
        KnobKind::Choice(choices) => format!("{} ({})", knob.prompt, choices.join("/")),
        _ => knob.prompt.to_string(),
    };
    ask(&question, knob.default, input, output, |answer| {
        normalize(knob, answer)
    })
}

#[cfg(test)]
#[test]
fn test_prompt_value() {
    let mut input = "\n".as_bytes();
    let mut output: Vec<u8> = vec![];
    assert_eq!(
        prompt_value(&CYCLES, &mut input, &mut output).unwrap(),
        "20"
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Number of rotations to complete [20.0]: "
    );

    let mut input = "cycloid\nepitrochoid\n".as_bytes();
    let mut output: Vec<u8> = vec![];
    assert_eq!(
        prompt_value(&SPIRO_TYPE, &mut input, &mut output).unwrap(),
        "epitrochoid"
    );
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Spirograph type (hypotrochoid/epitrochoid) [hypotrochoid]: \
         invalid configuration: invalid choice cycloid for spiro_type\n\
         Spirograph type (hypotrochoid/epitrochoid) [hypotrochoid]: "
    );

    let mut input = "".as_bytes();
    let mut output: Vec<u8> = vec![];
    assert!(matches!(
        prompt_value(&CANVAS_SIZE, &mut input, &mut output),
        Err(SpiroError::Input(_))
    ));
}

/// Build a validated configuration, asking a source for the text of each knob (in order).
pub fn collect_config<F>(mut source: F) -> Result<SpiroConfig>
where
    F: FnMut(&'static Knob) -> Result<String>,
{
    let mut values: HashMap<&'static str, String> = HashMap::new();
    for knob in KNOBS.iter().copied() {
        let text = source(knob)?;
        values.insert(knob.name, normalize(knob, &text)?);
    }
    let value = |knob: &Knob| values[knob.name].as_str();

    Ok(SpiroConfig {
        outer_radius: parse_real(&OUTER_RADIUS, value(&OUTER_RADIUS))?,
        inner_radius: parse_real(&INNER_RADIUS, value(&INNER_RADIUS))?,
        pen_offset: parse_real(&PEN_OFFSET, value(&PEN_OFFSET))?,
        theta_step: parse_real(&THETA_STEP, value(&THETA_STEP))?,
        cycles: parse_real(&CYCLES, value(&CYCLES))?,
        stroke_width: parse_real(&STROKE_WIDTH, value(&STROKE_WIDTH))?,
        canvas_size: parse_integer(&CANVAS_SIZE, value(&CANVAS_SIZE))?,
        stroke_color: value(&STROKE_COLOR).to_string(),
        curve_kind: value(&SPIRO_TYPE).parse()?,
    })
}

#[cfg(test)]
#[test]
fn test_collect_config() {
    let defaults = collect_config(|knob| Ok(knob.default.to_string())).unwrap();
    assert_eq!(defaults, SpiroConfig::default());

    let mut asked: Vec<&str> = vec![];
    let epitrochoid = collect_config(|knob| {
        asked.push(knob.name);
        Ok(match knob.name {
            "spiro_type" => "epitrochoid".to_string(),
            "stroke_color" => "#ABCDEF".to_string(),
            _ => knob.default.to_string(),
        })
    })
    .unwrap();
    assert_eq!(epitrochoid.curve_kind, CurveKind::Epitrochoid);
    assert_eq!(epitrochoid.stroke_color, "#abcdef");
    assert_eq!(
        asked,
        KNOBS.iter().map(|knob| knob.name).collect::<Vec<_>>()
    );

    let error = collect_config(|knob| {
        Ok(if knob.name == "inner_radius" {
            "0".to_string()
        } else {
            knob.default.to_string()
        })
    })
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid configuration: inner_radius must be >= 5"
    );
}
