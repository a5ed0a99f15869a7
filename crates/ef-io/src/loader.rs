//! Whitespace-delimited table loader.
//!
//! ```text
//! LATA   2015  2016  2017
//! KI     100
//! twKI   1.0   1.1   1.2
//! ```
//!
//! The first non-blank line is the year header. Every other non-blank line
//! is `<name> <v1> ... <vk>` with `k <= LL`; unspecified trailing periods
//! are forward-filled.

use std::path::Path;

use ef_core::{MISSING, Real, TimeSeriesTable, YEARS, is_missing};

use crate::{DataError, DataResult, FormatError};

/// Read and parse a table file.
pub fn load_table(path: &Path) -> DataResult<TimeSeriesTable> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&content)?;
    tracing::debug!(
        path = %path.display(),
        periods = table.period_count(),
        series = table.series_count(),
        "loaded table"
    );
    Ok(table)
}

/// Parse table text. Duplicate names keep their first position and the
/// values of their last occurrence.
pub fn parse_table(text: &str) -> Result<TimeSeriesTable, FormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_no, header)) = lines.next() else {
        return Err(FormatError::new(1, "", "missing year header"));
    };
    let mut tokens = header.split_whitespace();
    if tokens.next() != Some(YEARS) {
        return Err(FormatError::new(header_no, header, "missing year header"));
    }
    let years = tokens
        .map(|token| parse_value(token, header_no, header))
        .collect::<Result<Vec<_>, _>>()?;
    let periods = years.len();
    let mut table = TimeSeriesTable::new(years);

    for (line_no, line) in lines {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        if name == YEARS {
            return Err(FormatError::new(line_no, line, "year header may only appear once"));
        }
        let mut values = vec![MISSING; periods];
        for (i, token) in tokens.enumerate() {
            if i >= periods {
                return Err(FormatError::new(
                    line_no,
                    line,
                    format!("row has more than {periods} values"),
                ));
            }
            values[i] = parse_value(token, line_no, line)?;
        }
        forward_fill(&mut values);
        table
            .insert(name, values)
            .map_err(|e| FormatError::new(line_no, line, e.to_string()))?;
    }

    Ok(table)
}

/// Single left-to-right pass: a missing value at position `t >= 1` takes
/// the value at `t - 1`. Position 0 is never filled.
pub fn forward_fill(values: &mut [Real]) {
    for t in 1..values.len() {
        if is_missing(values[t]) {
            values[t] = values[t - 1];
        }
    }
}

fn parse_value(token: &str, line_no: usize, line: &str) -> Result<Real, FormatError> {
    token
        .parse::<Real>()
        .map_err(|_| FormatError::new(line_no, line, format!("invalid number '{token}'")))
}
