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

//! Errors reported while generating a design.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting knobs or generating a design.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpiroError {
    /// A knob value is missing, malformed or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The path encoder was given no points at all.
    #[error("cannot build a path from an empty sequence of points")]
    EmptyCurve,

    /// Writing the SVG document failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Where we tried to write.
        path: PathBuf,

        /// What went wrong.
        #[source]
        source: io::Error,
    },

    /// Reading an interactive answer failed.
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}

/// Shorthand for results of this crate.
pub type Result<T> = std::result::Result<T, SpiroError>;
