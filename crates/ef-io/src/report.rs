//! Report writers.
//!
//! Row order is fixed: the year header, then the descriptor's series slots
//! in declaration order, then every other table entry in insertion order.

use std::fmt::Write as _;
use std::path::Path;

use ef_core::{Real, TimeSeriesTable, YEARS};
use ef_model::ModelDescriptor;
use serde::Serialize;

use crate::{DataError, DataResult};

/// Series names in report order, year axis excluded.
pub fn ordered_names<'t>(table: &'t TimeSeriesTable, descriptor: &ModelDescriptor) -> Vec<&'t str> {
    let mut names: Vec<&'t str> = Vec::with_capacity(table.series_count());
    for slot in descriptor.series_slots() {
        if let Some(name) = table.names().find(|name| *name == slot.name) {
            names.push(name);
        }
    }
    for name in table.names() {
        if !descriptor.declares_series(name) {
            names.push(name);
        }
    }
    names
}

/// Tab-separated report, one `\n`-terminated line per row.
pub fn format_report(table: &TimeSeriesTable, descriptor: &ModelDescriptor) -> String {
    let mut out = String::new();
    push_row(&mut out, YEARS, table.years());
    for name in ordered_names(table, descriptor) {
        if let Some(values) = table.get(name) {
            push_row(&mut out, name, values);
        }
    }
    out
}

fn push_row(out: &mut String, name: &str, values: &[Real]) {
    out.push_str(name);
    for v in values {
        // writing into a String cannot fail
        let _ = write!(out, "\t{v}");
    }
    out.push('\n');
}

/// Serializable form of a report. Missing values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub model: String,
    pub years: Vec<Real>,
    pub series: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub declared: bool,
    pub values: Vec<Real>,
}

impl ReportDocument {
    pub fn new(table: &TimeSeriesTable, descriptor: &ModelDescriptor) -> Self {
        let series = ordered_names(table, descriptor)
            .into_iter()
            .filter_map(|name| {
                table.get(name).map(|values| ReportRow {
                    name: name.to_string(),
                    declared: descriptor.declares_series(name),
                    values: values.to_vec(),
                })
            })
            .collect();
        Self {
            model: descriptor.id().to_string(),
            years: table.years().to_vec(),
            series,
        }
    }
}

/// Pretty-printed JSON report with the same row order as the TSV form.
pub fn format_json(table: &TimeSeriesTable, descriptor: &ModelDescriptor) -> DataResult<String> {
    Ok(serde_json::to_string_pretty(&ReportDocument::new(table, descriptor))?)
}

pub fn write_report(path: &Path, report: &str) -> DataResult<()> {
    std::fs::write(path, report).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = report.len(), "wrote report");
    Ok(())
}
