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

//! Wrap a curve path in an SVG document and store it.

use crate::config::SpiroConfig;
use crate::error::Result;
use crate::error::SpiroError;
use crate::library::generate_path;
use chrono::DateTime;
use chrono::Utc;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;

/// Format an SVG document containing a single (already generated) curve path.
pub fn svg_document(
    path: &str,
    config: &SpiroConfig,
    design_number: u64,
    timestamp: DateTime<Utc>,
) -> String {
    let size = config.canvas_size;
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n  \
           <title>Spirograph Design {design_number}</title>\n  \
           <desc>Generated on {timestamp}</desc>\n  \
           <rect x=\"0\" y=\"0\" width=\"{size}\" height=\"{size}\" fill=\"white\" />\n  \
           <path d=\"{path}\" fill=\"none\" stroke=\"{stroke_color}\" stroke-width=\"{stroke_width:?}\" \
         stroke-linecap=\"round\" stroke-linejoin=\"round\" />\n\
         </svg>\n",
        size = size,
        design_number = design_number,
        timestamp = timestamp.format("%Y-%m-%dT%H:%M:%S"),
        path = path,
        stroke_color = config.stroke_color,
        stroke_width = config.stroke_width,
    )
}

/// Generate the curve of a configuration and wrap it in an SVG document.
pub fn build_svg(config: &SpiroConfig, design_number: u64, timestamp: DateTime<Utc>) -> Result<String> {
    let path = generate_path(config)?;
    Ok(svg_document(&path, config, design_number, timestamp))
}

/// The file name used when no output is specified.
pub fn default_output_path(timestamp: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "spirograph-{}.svg",
        timestamp.format("%Y%m%d-%H%M%S")
    ))
}

/// Write an SVG document to some output.
pub fn write_svg(svg: &str, output: &mut dyn Write) -> std::io::Result<()> {
    output.write_all(svg.as_bytes())?;
    output.flush()
}

/// Store an SVG document in a file, returning the path of the file.
pub fn save_svg(svg: &str, output: Option<&Path>, timestamp: DateTime<Utc>) -> Result<PathBuf> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(timestamp),
    };

    let write_error = |source: std::io::Error| SpiroError::Write {
        path: output_path.clone(),
        source,
    };
    let file = File::create(&output_path).map_err(write_error)?;
    write_svg(svg, &mut BufWriter::new(file)).map_err(write_error)?;

    info!(path = %output_path.display(), bytes = svg.len(), "saved design");
    Ok(output_path)
}
