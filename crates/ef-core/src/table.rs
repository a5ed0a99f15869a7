//! In-memory store of equal-length named series.
//!
//! The table is created from the year axis (`LATA`), which is always the
//! first entry and fixes the period count `LL` for the table's lifetime.
//! Lookup is by name; iteration follows first-insertion order. Overwriting
//! an existing name replaces its values but keeps its position.

use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use crate::series::TimeSeries;

/// Reserved name of the year axis.
pub const YEARS: &str = "LATA";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSeriesTable {
    periods: usize,
    series: IndexMap<String, Vec<Real>>,
}

impl TimeSeriesTable {
    /// Create a table whose year axis holds `years`; `LL` is `years.len()`.
    pub fn new(years: Vec<Real>) -> Self {
        let periods = years.len();
        let mut series = IndexMap::new();
        series.insert(YEARS.to_string(), years);
        Self { periods, series }
    }

    /// Number of periods (`LL`).
    pub fn period_count(&self) -> usize {
        self.periods
    }

    /// Period labels stored under `LATA`.
    pub fn years(&self) -> &[Real] {
        self.series.get(YEARS).map(Vec::as_slice).unwrap_or_default()
    }

    /// Insert or overwrite a series. Returns the previous values, if any.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<Real>) -> CoreResult<Option<Vec<Real>>> {
        let name = name.into();
        self.check(&name, values.len())?;
        Ok(self.series.insert(name, values))
    }

    /// Apply a batch of overwrite-wins updates.
    ///
    /// Every update is checked before any is applied, so a rejected batch
    /// leaves the table unchanged. Returns the number of series written.
    pub fn merge<I>(&mut self, updates: I) -> CoreResult<usize>
    where
        I: IntoIterator<Item = TimeSeries>,
    {
        let updates: Vec<TimeSeries> = updates.into_iter().collect();
        for update in &updates {
            self.check(&update.name, update.values.len())?;
        }
        let count = updates.len();
        for update in updates {
            self.series.insert(update.name, update.values);
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&[Real]> {
        self.series.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Copy of one series, if present.
    pub fn snapshot(&self, name: &str) -> Option<TimeSeries> {
        self.series
            .get(name)
            .map(|values| TimeSeries::new(name, values.clone()))
    }

    /// Number of series excluding the year axis.
    pub fn series_count(&self) -> usize {
        self.series.len() - 1
    }

    /// All entries in insertion order, year axis first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Real])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Entries other than the year axis, in insertion order.
    pub fn data_series(&self) -> impl Iterator<Item = (&str, &[Real])> {
        self.iter().filter(|(name, _)| *name != YEARS)
    }

    /// Names other than the year axis, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.data_series().map(|(name, _)| name)
    }

    fn check(&self, name: &str, len: usize) -> CoreResult<()> {
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        if name == YEARS {
            return Err(CoreError::ReservedName {
                name: name.to_string(),
            });
        }
        if len != self.periods {
            return Err(CoreError::LengthMismatch {
                name: name.to_string(),
                len,
                expected: self.periods,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TimeSeriesTable {
        TimeSeriesTable::new(vec![2015.0, 2016.0, 2017.0])
    }

    #[test]
    fn year_axis_is_first() {
        let mut t = table();
        t.insert("KI", vec![1.0, 2.0, 3.0]).unwrap();
        let first = t.iter().next().unwrap();
        assert_eq!(first.0, YEARS);
        assert_eq!(t.period_count(), 3);
        assert_eq!(t.years(), &[2015.0, 2016.0, 2017.0]);
        assert_eq!(t.series_count(), 1);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut t = table();
        t.insert("A", vec![1.0; 3]).unwrap();
        t.insert("B", vec![2.0; 3]).unwrap();
        let previous = t.insert("A", vec![9.0; 3]).unwrap();
        assert_eq!(previous, Some(vec![1.0; 3]));
        let names: Vec<&str> = t.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(t.get("A"), Some(&[9.0, 9.0, 9.0][..]));
    }

    #[test]
    fn rejects_wrong_length() {
        let mut t = table();
        let err = t.insert("A", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            CoreError::LengthMismatch {
                name: "A".to_string(),
                len: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn rejects_reserved_and_empty_names() {
        let mut t = table();
        assert!(matches!(
            t.insert(YEARS, vec![0.0; 3]),
            Err(CoreError::ReservedName { .. })
        ));
        assert!(matches!(t.insert("", vec![0.0; 3]), Err(CoreError::EmptyName)));
    }

    #[test]
    fn merge_is_all_or_nothing() {
        let mut t = table();
        t.insert("A", vec![1.0; 3]).unwrap();
        let err = t.merge(vec![
            TimeSeries::new("A", vec![5.0; 3]),
            TimeSeries::new("bad", vec![5.0; 2]),
        ]);
        assert!(err.is_err());
        assert_eq!(t.get("A"), Some(&[1.0, 1.0, 1.0][..]));
        assert!(!t.contains("bad"));

        let written = t
            .merge(vec![
                TimeSeries::new("A", vec![5.0; 3]),
                TimeSeries::new("C", vec![6.0; 3]),
            ])
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(t.names().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rejected_merge_leaves_table_unchanged(
                lengths in prop::collection::vec(0usize..6, 1..8),
                start in -1.0e3f64..1.0e3,
            ) {
                let mut t = table();
                t.insert("A", vec![start; 3]).unwrap();
                let before = t.clone();

                let updates: Vec<TimeSeries> = lengths
                    .iter()
                    .enumerate()
                    .map(|(i, len)| TimeSeries::new(format!("s{i}"), vec![start; *len]))
                    .collect();
                let all_fit = lengths.iter().all(|len| *len == 3);

                match t.merge(updates) {
                    Ok(written) => {
                        prop_assert!(all_fit);
                        prop_assert_eq!(written, lengths.len());
                        prop_assert_eq!(t.series_count(), lengths.len() + 1);
                    }
                    Err(_) => {
                        prop_assert!(!all_fit);
                        prop_assert_eq!(&t, &before);
                    }
                }
            }

            #[test]
            fn names_keep_first_insertion_order(picks in prop::collection::vec(0usize..5, 1..20)) {
                let mut t = table();
                let mut expected: Vec<String> = Vec::new();
                for (round, pick) in picks.iter().enumerate() {
                    let name = format!("n{pick}");
                    t.insert(name.as_str(), vec![round as f64; 3]).unwrap();
                    if !expected.contains(&name) {
                        expected.push(name);
                    }
                }
                let names: Vec<&str> = t.names().collect();
                prop_assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
            }
        }
    }
}
