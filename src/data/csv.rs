//! CSV loaders for labelled image data.
//!
//! Two formats are supported:
//! - labelled pixels: `label,p0,p1,...` with integer pixels in `[0, 255]`
//!   (the MNIST-style export), normalized to `[0, 1]` on load;
//! - bit strings: `input_bits,output_bits`, each a run of `0`/`1`
//!   characters, with a one-hot output.
//!
//! A header row is skipped when its first line contains any non-numeric cell.

use std::path::Path;

use tracing::info;

use crate::data::sample::Sample;
use crate::error::{NetError, Result};
use crate::network::network::largest_index;

/// Raw pixel values are divided by this on load.
pub const PIXEL_MAX: f64 = 255.0;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads a labelled-pixel CSV file; every row must carry `input_size` pixels.
pub fn load_labelled_csv<P: AsRef<Path>>(path: P, input_size: usize) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let samples = parse_labelled_csv(&text, input_size)?;
    info!(path = %path.display(), samples = samples.len(), "loaded labelled samples");
    Ok(samples)
}

/// Parses labelled-pixel CSV text.
pub fn parse_labelled_csv(text: &str, input_size: usize) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (line_no, cells) in data_rows(text) {
        if cells.len() != input_size + 1 {
            return Err(NetError::Dataset(format!(
                "line {}: expected label + {} pixels, got {} cells",
                line_no,
                input_size,
                cells.len()
            )));
        }

        let label = cells[0].trim().parse::<usize>().map_err(|_| {
            NetError::Dataset(format!(
                "line {}: label '{}' is not a non-negative integer",
                line_no, cells[0]
            ))
        })?;

        let pixels = cells[1..]
            .iter()
            .map(|c| parse_float(c, line_no).map(|p| p / PIXEL_MAX))
            .collect::<Result<Vec<_>>>()?;

        samples.push(Sample::new(label, pixels));
    }

    if samples.is_empty() {
        return Err(NetError::Dataset("CSV contains no data rows".into()));
    }
    Ok(samples)
}

/// Reads a bit-string CSV file.
pub fn load_bitstring_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let samples = parse_bitstring_csv(&text)?;
    info!(path = %path.display(), samples = samples.len(), "loaded bit-string samples");
    Ok(samples)
}

/// Parses bit-string CSV text. The label is the position of the highest
/// output bit; all rows must agree on the input width.
pub fn parse_bitstring_csv(text: &str) -> Result<Vec<Sample>> {
    let mut samples: Vec<Sample> = Vec::new();

    for (line_no, cells) in data_rows(text) {
        if cells.len() != 2 {
            return Err(NetError::Dataset(format!(
                "line {}: expected 'input_bits,output_bits', got {} cells",
                line_no,
                cells.len()
            )));
        }

        let input = parse_bits(&cells[0], line_no)?;
        let output = parse_bits(&cells[1], line_no)?;

        if let Some(first) = samples.first() {
            if first.pixels.len() != input.len() {
                return Err(NetError::Dataset(format!(
                    "line {}: {} input bits, earlier rows have {}",
                    line_no,
                    input.len(),
                    first.pixels.len()
                )));
            }
        }

        samples.push(Sample::new(largest_index(&output), input));
    }

    if samples.is_empty() {
        return Err(NetError::Dataset("CSV contains no data rows".into()));
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Non-empty rows with their 1-based line numbers, header skipped.
fn data_rows(text: &str) -> impl Iterator<Item = (usize, Vec<String>)> + '_ {
    let skip_header = text.lines().next().map_or(false, is_header);
    text.lines()
        .enumerate()
        .skip(usize::from(skip_header))
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| (line_no, parse_csv_row(line)))
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    parse_csv_row(line).iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Splits a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_float(cell: &str, line_no: usize) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| NetError::Dataset(format!("line {}: '{}' is not a valid number", line_no, cell)))
}

fn parse_bits(cell: &str, line_no: usize) -> Result<Vec<f64>> {
    cell.trim()
        .chars()
        .map(|c| match c {
            '0' => Ok(0.0),
            '1' => Ok(1.0),
            other => Err(NetError::Dataset(format!(
                "line {}: '{}' is not a bit in '{}'",
                line_no, other, cell
            ))),
        })
        .collect()
}
