//! Loader and report behave as inverses on the declared rows.

use ef_core::{MISSING, Real, TimeSeriesTable};
use ef_io::{DataError, forward_fill, format_report, load_table, parse_table, write_report};
use ef_model::ModelDescriptor;
use proptest::prelude::*;

fn descriptor() -> ModelDescriptor {
    ModelDescriptor::builder("pair")
        .year_count("LL")
        .series_all(["X", "Y"])
        .build()
        .unwrap()
}

fn maybe_missing() -> impl Strategy<Value = Real> {
    prop_oneof![
        3 => -1.0e9f64..1.0e9,
        1 => Just(MISSING),
    ]
}

proptest! {
    #[test]
    fn forward_fill_matches_single_pass(values in prop::collection::vec(maybe_missing(), 0..12)) {
        let mut filled = values.clone();
        forward_fill(&mut filled);

        prop_assert_eq!(filled.len(), values.len());
        if let (Some(a), Some(b)) = (values.first(), filled.first()) {
            prop_assert!(a.to_bits() == b.to_bits());
        }
        for t in 1..values.len() {
            let expected = if values[t].is_nan() { filled[t - 1] } else { values[t] };
            prop_assert!(expected.to_bits() == filled[t].to_bits());
        }
        // missing values survive only as a leading run
        let leading = filled.iter().take_while(|v| v.is_nan()).count();
        prop_assert!(filled[leading..].iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn report_reparses_to_the_same_values(
        x in prop::collection::vec(-1.0e12f64..1.0e12, 1..8),
        y_scale in -100.0f64..100.0,
    ) {
        let periods = x.len();
        let years: Vec<Real> = (0..periods).map(|i| 1990.0 + i as Real).collect();
        let mut table = TimeSeriesTable::new(years.clone());
        table.insert("extra", vec![0.25; periods]).unwrap();
        table.insert("Y", x.iter().map(|v| v * y_scale).collect()).unwrap();
        table.insert("X", x.clone()).unwrap();

        let text = format_report(&table, &descriptor());
        let parsed = parse_table(&text).unwrap();

        prop_assert_eq!(parsed.period_count(), periods);
        prop_assert_eq!(parsed.years(), years.as_slice());
        prop_assert_eq!(parsed.get("X"), table.get("X"));
        prop_assert_eq!(parsed.get("Y"), table.get("Y"));
        let names: Vec<&str> = parsed.names().collect();
        prop_assert_eq!(names, vec!["X", "Y", "extra"]);
    }

    #[test]
    fn every_loaded_series_has_header_length(
        periods in 1usize..10,
        lens in prop::collection::vec(0usize..10, 1..6),
    ) {
        let mut text = String::from("LATA");
        for p in 0..periods {
            text.push_str(&format!(" {}", 2000 + p));
        }
        text.push('\n');
        for (i, len) in lens.iter().enumerate() {
            text.push_str(&format!("S{i}"));
            for v in 0..(*len).min(periods) {
                text.push_str(&format!(" {v}"));
            }
            text.push('\n');
        }

        let table = parse_table(&text).unwrap();
        prop_assert_eq!(table.period_count(), periods);
        for (_, values) in table.iter() {
            prop_assert_eq!(values.len(), periods);
        }
    }
}

#[test]
fn declared_order_ignores_insertion_order() {
    let table = parse_table("LATA 1 2\nY 2\nfree 0\nX 1\n").unwrap();
    assert_eq!(
        format_report(&table, &descriptor()),
        "LATA\t1\t2\nX\t1\t1\nY\t2\t2\nfree\t0\t0\n"
    );
}

#[test]
fn report_file_loads_back() {
    let table = parse_table("LATA 2015 2016 2017\nX 1.5 2.5\n").unwrap();
    let path = std::env::temp_dir().join("ef_io_report_roundtrip.tsv");
    write_report(&path, &format_report(&table, &descriptor())).unwrap();

    let loaded = load_table(&path).unwrap();
    assert_eq!(loaded, table);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_into_missing_directory_fails() {
    let err = write_report(std::path::Path::new("/no/such/dir/out.tsv"), "LATA\n").unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}
