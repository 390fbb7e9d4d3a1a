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

//! Generate Spirograph mandala SVG artwork.
//!
//! A [`config::SpiroConfig`] flows through [`library::generate_points`],
//! [`library::scale_points`] and [`library::points_to_path`] to produce an SVG path, which
//! [`document::build_svg`] wraps into a complete document.

#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod config;
pub mod document;
pub mod error;
pub mod knobs;
pub mod library;
pub mod program;

pub use config::CurveKind;
pub use config::SpiroConfig;
pub use error::SpiroError;

/// Initialize logging to the standard error.
///
/// The `RUST_LOG` environment variable overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
