//! Copying values between a `TimeSeriesTable` and a live model.
//!
//! The descriptor is the only contract: nothing is discovered from the
//! model itself.

use ef_core::{CoreResult, TimeSeries, TimeSeriesTable};

use crate::descriptor::{ModelDescriptor, SlotKind};
use crate::error::ModelResult;
use crate::model::Model;

/// Outcome of [`bind_into`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Series slots that received a table series.
    pub bound: Vec<String>,
    /// Series slots with no table entry; left at their prior value.
    pub unmatched: Vec<String>,
}

impl BindReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Copy table values into the model's declared slots.
///
/// Series slots without a matching table entry are left untouched and
/// reported as unmatched. The year-count slot receives `LL`.
pub fn bind_into(
    table: &TimeSeriesTable,
    model: &mut dyn Model,
    descriptor: &ModelDescriptor,
) -> ModelResult<BindReport> {
    let mut report = BindReport::default();
    for slot in descriptor.slots() {
        match slot.kind {
            SlotKind::YearCount => model.set_year_count(table.period_count()),
            SlotKind::Series => match table.get(&slot.name) {
                Some(values) => {
                    model.set_series(&slot.name, values.to_vec())?;
                    report.bound.push(slot.name.clone());
                }
                None => {
                    tracing::warn!(
                        model = descriptor.id(),
                        slot = %slot.name,
                        "binding mismatch: no table series for declared slot"
                    );
                    report.unmatched.push(slot.name.clone());
                }
            },
        }
    }
    Ok(report)
}

/// Snapshot every assigned series slot, in declaration order.
pub fn collect_series(model: &dyn Model, descriptor: &ModelDescriptor) -> Vec<TimeSeries> {
    descriptor
        .series_slots()
        .filter_map(|slot| {
            model
                .series(&slot.name)
                .map(|values| TimeSeries::new(slot.name.clone(), values.to_vec()))
        })
        .collect()
}

/// Write every assigned series slot into `table`, overwriting unconditionally.
///
/// Returns the number of series written. A series whose length differs
/// from the table's `LL` rejects the whole harvest.
pub fn harvest_from(
    model: &dyn Model,
    descriptor: &ModelDescriptor,
    table: &mut TimeSeriesTable,
) -> CoreResult<usize> {
    table.merge(collect_series(model, descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use ef_core::Real;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapModel {
        periods: usize,
        slots: HashMap<String, Vec<Real>>,
    }

    impl Model for MapModel {
        fn set_year_count(&mut self, periods: usize) {
            self.periods = periods;
        }

        fn year_count(&self) -> usize {
            self.periods
        }

        fn series(&self, slot: &str) -> Option<&[Real]> {
            self.slots.get(slot).map(Vec::as_slice)
        }

        fn set_series(&mut self, slot: &str, values: Vec<Real>) -> ModelResult<()> {
            if slot == "forbidden" {
                return Err(ModelError::UnknownSlot {
                    slot: slot.to_string(),
                });
            }
            self.slots.insert(slot.to_string(), values);
            Ok(())
        }

        fn run(&mut self) -> ModelResult<()> {
            Ok(())
        }
    }

    fn descriptor() -> ModelDescriptor {
        ModelDescriptor::builder("map")
            .year_count("LL")
            .series_all(["a", "b", "internal"])
            .build()
            .unwrap()
    }

    fn table() -> TimeSeriesTable {
        let mut t = TimeSeriesTable::new(vec![1.0, 2.0]);
        t.insert("b", vec![3.0, 4.0]).unwrap();
        t.insert("a", vec![1.0, 2.0]).unwrap();
        t.insert("extra", vec![0.0, 0.0]).unwrap();
        t
    }

    #[test]
    fn binds_matching_slots_and_year_count() {
        let mut model = MapModel::default();
        let report = bind_into(&table(), &mut model, &descriptor()).unwrap();
        assert_eq!(model.year_count(), 2);
        assert_eq!(report.bound, vec!["a", "b"]);
        assert_eq!(report.unmatched, vec!["internal"]);
        assert!(!report.is_complete());
        assert!(model.series("extra").is_none());
    }

    #[test]
    fn unmatched_slot_keeps_prior_value() {
        let mut model = MapModel::default();
        model.slots.insert("internal".into(), vec![7.0, 7.0]);
        bind_into(&table(), &mut model, &descriptor()).unwrap();
        assert_eq!(model.series("internal"), Some(&[7.0, 7.0][..]));
    }

    #[test]
    fn collect_follows_declaration_order_and_skips_unset() {
        let mut model = MapModel::default();
        bind_into(&table(), &mut model, &descriptor()).unwrap();
        let names: Vec<String> = collect_series(&model, &descriptor())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn harvest_overwrites_table() {
        let mut t = table();
        let mut model = MapModel::default();
        bind_into(&t, &mut model, &descriptor()).unwrap();
        model.slots.insert("a".into(), vec![10.0, 20.0]);
        model.slots.insert("internal".into(), vec![5.0, 6.0]);
        let written = harvest_from(&model, &descriptor(), &mut t).unwrap();
        assert_eq!(written, 3);
        assert_eq!(t.get("a"), Some(&[10.0, 20.0][..]));
        assert_eq!(t.get("internal"), Some(&[5.0, 6.0][..]));
    }

    #[test]
    fn model_rejection_surfaces() {
        let d = ModelDescriptor::builder("map")
            .series("forbidden")
            .build()
            .unwrap();
        let mut t = TimeSeriesTable::new(vec![1.0]);
        t.insert("forbidden", vec![1.0]).unwrap();
        let mut model = MapModel::default();
        let err = bind_into(&t, &mut model, &d).unwrap_err();
        assert!(matches!(err, ModelError::UnknownSlot { .. }));
    }
}
