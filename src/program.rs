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

//! Functions for implementing the executable spirograph program.

use crate::config::SpiroConfig;
use crate::document::build_svg;
use crate::document::save_svg;
use crate::document::write_svg;
use crate::error::SpiroError;
use crate::knobs::ask;
use crate::knobs::collect_config;
use crate::knobs::prompt_value;
use crate::knobs::random_values;
use crate::knobs::KnobKind;
use crate::knobs::KNOBS;
use anyhow::Context;
use chrono::DateTime;
use chrono::Utc;
use clap::crate_version;
use clap::App;
use clap::Arg;
use clap::ArgMatches;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::io;
use std::io::BufRead;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The largest design number drawn for a random run.
const MAX_RANDOM_DESIGN_NUMBER: u64 = (1 << 31) - 1;

/// A complete main function for the spirograph program.
///
/// Prompts (in interactive mode) and the final summary go to the standard error.
pub fn main(flags: &[String]) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut standard_output = BufWriter::new(stdout.lock());
    let mut messages = io::stderr();
    run(flags, &mut input, &mut standard_output, &mut messages)
}

/// Run the program with explicit input (for answering prompts), standard output (used by `-o -`)
/// and message output.
pub fn run(
    flags: &[String],
    input: &mut dyn BufRead,
    standard_output: &mut dyn Write,
    messages: &mut dyn Write,
) -> anyhow::Result<()> {
    let arg_matches = app().get_matches_from(flags);

    let timestamp = parse_timestamp(&arg_matches)?;
    let random = arg_matches.is_present("random");
    let interactive = arg_matches.is_present("interactive");

    let design_number = design_number(&arg_matches, random, interactive, input, messages)?;
    let mut rng = StdRng::seed_from_u64(design_number);
    let drawn_values = if random {
        info!(design_number, "random mode enabled");
        Some(random_values(&mut rng))
    } else {
        None
    };

    let config = collect_config(|knob| {
        if arg_matches.occurrences_of(knob.flag) > 0 {
            Ok(arg_value(&arg_matches, knob.flag).to_string())
        } else if let Some(values) = &drawn_values {
            Ok(values[knob.name].clone())
        } else if interactive {
            prompt_value(knob, input, messages)
        } else {
            Ok(arg_value(&arg_matches, knob.flag).to_string())
        }
    })?;

    info!(
        design_number,
        kind = %config.curve_kind,
        canvas_size = config.canvas_size,
        "generating design"
    );
    let svg = build_svg(&config, design_number, timestamp)?;

    let output_path = arg_matches.value_of("output");
    let output = if output_path == Some("-") {
        write_svg(&svg, standard_output).context("writing to stdout")?;
        "<stdout>".to_string()
    } else {
        let path = save_svg(&svg, output_path.map(Path::new), timestamp)?;
        path.display().to_string()
    };

    print_summary(&config, design_number, &output, messages).context("printing summary")?;
    Ok(())
}

fn app() -> App<'static, 'static> {
    let app = App::new("spirograph")
        .about("\nGenerate Spirograph mandala SVG artwork.")
        .after_help(
            "\
            PROCESS:\n\
            \n\
            - Collect the knobs; each knob is taken from the command line,\n  \
              otherwise drawn at random (--random), otherwise asked for\n  \
              (--interactive), otherwise set to its default.\n\
            \n\
            - Trace a hypotrochoid (pen on a circle rolling inside the fixed circle)\n  \
              or an epitrochoid (pen on a circle rolling outside the fixed circle),\n  \
              sampling the angle in theta-step increments for the given cycles.\n\
            \n\
            - Scale the curve so its theoretical extent fits the canvas,\n  \
              centered on the canvas.\n\
            \n\
            - Print this as an SVG file.\
            ",
        )
        .version(crate_version!())
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .value_name("FILE")
                .help(
                    "SVG file to write the design into;\n\
                     specify \"-\" for STDOUT;\n\
                     defaults to a timestamped file name\n",
                ),
        )
        .arg(
            Arg::with_name("design-number")
                .long("design-number")
                .short("n")
                .value_name("NUMBER")
                .help("Design number, used as the random seed"),
        )
        .arg(
            Arg::with_name("random")
                .long("random")
                .help("Draw all knobs not given on the command line at random"),
        )
        .arg(
            Arg::with_name("interactive")
                .long("interactive")
                .short("i")
                .conflicts_with("random")
                .help("Ask for all knobs not given on the command line"),
        )
        .arg(
            Arg::with_name("timestamp")
                .long("timestamp")
                .value_name("RFC3339")
                .help("Generation time to use instead of the current time"),
        );

    KNOBS.iter().fold(app, |app, knob| {
        let arg = Arg::with_name(knob.flag)
            .long(knob.flag)
            .short(knob.short)
            .value_name(value_name(knob.kind))
            .help(knob.prompt)
            .default_value(knob.default);
        match knob.kind {
            KnobKind::Choice(choices) => app.arg(arg.possible_values(choices)),
            _ => app.arg(arg),
        }
    })
}

fn value_name(kind: KnobKind) -> &'static str {
    match kind {
        KnobKind::Real { .. } => "REAL",
        KnobKind::Integer { .. } => "COUNT",
        KnobKind::Color => "#RGB",
        KnobKind::Choice(_) => "TYPE",
    }
}

fn arg_value<'a>(arg_matches: &'a ArgMatches, name: &str) -> &'a str {
    arg_matches
        .value_of(name)
        .unwrap_or_else(|| unreachable!("{} has a default value", name))
}

fn parse_timestamp(arg_matches: &ArgMatches) -> anyhow::Result<DateTime<Utc>> {
    match arg_matches.value_of("timestamp") {
        None => Ok(Utc::now()),
        Some(text) => Ok(DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid timestamp: {}", text))?
            .with_timezone(&Utc)),
    }
}

fn parse_design_number(text: &str) -> Result<u64, SpiroError> {
    text.trim().parse::<u64>().map_err(|error| {
        SpiroError::InvalidConfiguration(format!("{} in design-number: {}", error, text))
    })
}

fn design_number(
    arg_matches: &ArgMatches,
    random: bool,
    interactive: bool,
    input: &mut dyn BufRead,
    messages: &mut dyn Write,
) -> Result<u64, SpiroError> {
    if let Some(text) = arg_matches.value_of("design-number") {
        parse_design_number(text)
    } else if random {
        let design_number = rand::thread_rng().gen_range(1..=MAX_RANDOM_DESIGN_NUMBER);
        info!(design_number, "generated design number for this random run");
        Ok(design_number)
    } else if interactive {
        ask("Design number (seed)", "1", input, messages, parse_design_number)
    } else {
        Ok(1)
    }
}

/// Print a table summarizing a design.
pub fn print_summary(
    config: &SpiroConfig,
    design_number: u64,
    output: &str,
    messages: &mut dyn Write,
) -> io::Result<()> {
    let rows = vec![
        ("Design number", design_number.to_string()),
        ("Type", config.curve_kind.to_string()),
        ("Outer radius", format!("{:.2}", config.outer_radius)),
        ("Inner radius", format!("{:.2}", config.inner_radius)),
        ("Pen offset", format!("{:.2}", config.pen_offset)),
        ("Theta step", format!("{:.4}", config.theta_step)),
        ("Cycles", format!("{:.2}", config.cycles)),
        ("Stroke width", format!("{:.2}", config.stroke_width)),
        ("Stroke color", config.stroke_color.clone()),
        ("Canvas size", format!("{}px", config.canvas_size)),
        ("Output", output.to_string()),
    ];

    let name_width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max("Value".len());

    writeln!(messages, "Spirograph Design Summary")?;
    writeln!(
        messages,
        "{:<name_width$}  {:>value_width$}",
        "Knob",
        "Value",
        name_width = name_width,
        value_width = value_width
    )?;
    for (name, value) in rows.iter() {
        writeln!(
            messages,
            "{:<name_width$}  {:>value_width$}",
            name,
            value,
            name_width = name_width,
            value_width = value_width
        )?;
    }
    messages.flush()
}

#[cfg(test)]
#[test]
fn test_print_summary() {
    let mut messages: Vec<u8> = vec![];
    print_summary(&SpiroConfig::default(), 42, "out.svg", &mut messages).unwrap();
    assert_eq!(
        String::from_utf8(messages).unwrap(),
        "\
        Spirograph Design Summary\n\
        Knob                  Value\n\
        Design number            42\n\
        Type           hypotrochoid\n\
        Outer radius         180.00\n\
        Inner radius          75.00\n\
        Pen offset            40.00\n\
        Theta step           0.0200\n\
        Cycles                20.00\n\
        Stroke width           2.00\n\
        Stroke color        #1f77b4\n\
        Canvas size           900px\n\
        Output              out.svg\n\
        "
    );
}
