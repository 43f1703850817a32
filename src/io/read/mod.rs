// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read whitespace-delimited numeric tables, as written by the
//! simulation codes that produce kilonova models (and by this crate).

#[cfg(test)]
mod tests;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::trace;
use ndarray::prelude::*;
use thiserror::Error;

use crate::filters::NUM_BANDS;

/// Read the raw lines of a text file.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ReadError> {
    if !path.exists() {
        return Err(ReadError::DoesNotExist(path.to_path_buf()));
    }
    let io_err = |err| ReadError::IO {
        path: path.to_path_buf(),
        err,
    };
    let f = BufReader::new(File::open(path).map_err(io_err)?);
    f.lines().collect::<Result<Vec<_>, _>>().map_err(io_err)
}

/// Parse a single line of whitespace-separated floats. `line_num` is 1-based
/// and only used for error reporting.
pub fn parse_row(path: &Path, line_num: usize, line: &str) -> Result<Vec<f64>, ReadError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ReadError::Parse {
                path: path.to_path_buf(),
                line: line_num,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Read a numeric table. The first `skip_rows` lines are ignored, as are any
/// blank lines or lines starting with `#`. Every remaining row must have the
/// same number of columns. `nan` and `inf` are accepted.
pub fn read_table(path: &Path, skip_rows: usize) -> Result<Array2<f64>, ReadError> {
    trace!("Reading table {} (skipping {skip_rows} rows)", path.display());
    let lines = read_lines(path)?;

    let mut num_cols = None;
    let mut values = vec![];
    let mut num_rows = 0;
    for (i, line) in lines.iter().enumerate().skip(skip_rows) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = parse_row(path, i + 1, trimmed)?;
        match num_cols {
            None => num_cols = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(ReadError::Ragged {
                    path: path.to_path_buf(),
                    line: i + 1,
                    expected: n,
                    got: row.len(),
                })
            }
            Some(_) => (),
        }
        values.extend(row);
        num_rows += 1;
    }

    let num_cols = num_cols.ok_or_else(|| ReadError::Empty(path.to_path_buf()))?;
    Ok(Array2::from_shape_fn((num_rows, num_cols), |(r, c)| {
        values[r * num_cols + c]
    }))
}

/// Read a table and ensure it has at least `min_cols` columns.
pub fn read_table_with_columns(
    path: &Path,
    skip_rows: usize,
    min_cols: usize,
) -> Result<Array2<f64>, ReadError> {
    let table = read_table(path, skip_rows)?;
    if table.ncols() < min_cols {
        return Err(ReadError::TooFewColumns {
            path: path.to_path_buf(),
            expected: min_cols,
            got: table.ncols(),
        });
    }
    Ok(table)
}

/// Read a magnitude table written by [`crate::io::write::write_mag_table`].
/// Returns the times [days] and the magnitudes (`[time][band]`).
pub fn read_mag_table(path: &Path) -> Result<(Vec<f64>, Array2<f64>), ReadError> {
    let table = read_table_with_columns(path, 0, NUM_BANDS + 1)?;
    let t = table.column(0).to_vec();
    let mags = table.slice(s![.., 1..NUM_BANDS + 1]).to_owned();
    Ok((t, mags))
}

/// Read a bolometric luminosity table written by
/// [`crate::io::write::write_lbol_table`]. Returns the times [days] and the
/// luminosities [erg/s].
pub fn read_lbol_table(path: &Path) -> Result<(Vec<f64>, Vec<f64>), ReadError> {
    let table = read_table_with_columns(path, 0, 2)?;
    Ok((table.column(0).to_vec(), table.column(1).to_vec()))
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File {} does not exist", .0.display())]
    DoesNotExist(PathBuf),

    #[error("File {} contains no data rows", .0.display())]
    Empty(PathBuf),

    #[error("{}:{line}: couldn't parse '{token}' as a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected {expected} columns like the rows before it, but got {got}", .path.display())]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("File {} has {got} columns, but at least {expected} are required", .path.display())]
    TooFewColumns {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    #[error("IO error when reading {}: {err}", .path.display())]
    IO {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
