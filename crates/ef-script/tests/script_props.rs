//! Broadcasting and harvest-order properties of the script runtime.

use ef_core::TimeSeriesTable;
use ef_model::{ModelRegistry, ModelRuntime};
use ef_script::ScriptRuntime;
use ef_script::ast::BinaryOp;
use ef_script::value::Value;
use proptest::prelude::*;

const OPS: [BinaryOp; 5] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Pow,
];

fn bound_gdp(periods: usize) -> (TimeSeriesTable, ModelRuntime) {
    let years = (0..periods).map(|i| 2000.0 + i as f64).collect();
    let mut table = TimeSeriesTable::new(years);
    table.insert("KI", vec![10.0; periods]).unwrap();
    let registry = ModelRegistry::builtin().unwrap();
    let mut runtime = registry.instantiate("gdp").unwrap();
    runtime.bind(&table).unwrap();
    (table, runtime)
}

fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

proptest! {
    #[test]
    fn scalar_broadcasts_element_wise(
        values in prop::collection::vec(-100.0f64..100.0, 0..12),
        scalar in -10.0f64..10.0,
        op in 0usize..OPS.len(),
    ) {
        let op = OPS[op];
        let array = Value::Array(values.clone());

        let right = array.binary(op, &Value::Scalar(scalar)).unwrap();
        let left = Value::Scalar(scalar).binary(op, &array).unwrap();
        let right = right.as_array().unwrap();
        let left = left.as_array().unwrap();

        prop_assert_eq!(right.len(), values.len());
        prop_assert_eq!(left.len(), values.len());
        for (i, x) in values.iter().enumerate() {
            prop_assert!(same(right[i], op.apply(*x, scalar)));
            prop_assert!(same(left[i], op.apply(scalar, *x)));
        }
    }

    #[test]
    fn arrays_of_different_lengths_never_combine(
        a in prop::collection::vec(-1.0f64..1.0, 0..8),
        b in prop::collection::vec(-1.0f64..1.0, 0..8),
    ) {
        let result = Value::Array(a.clone()).binary(BinaryOp::Add, &Value::Array(b.clone()));
        prop_assert_eq!(result.is_ok(), a.len() == b.len());
    }

    #[test]
    fn new_series_are_harvested_in_creation_order(
        order in Just((0..6).collect::<Vec<usize>>()).prop_shuffle(),
        periods in 1usize..5,
    ) {
        let (mut table, runtime) = bound_gdp(periods);
        let source: String = order
            .iter()
            .map(|i| format!("v{i} = KI * {i}\n"))
            .collect();

        let outcome = ScriptRuntime::new()
            .run_script(&source, &mut table, runtime.descriptor(), runtime.model())
            .unwrap();

        let expected: Vec<String> = order.iter().map(|i| format!("v{i}")).collect();
        prop_assert_eq!(&outcome.created, &expected);
        let tail: Vec<&str> = table.names().skip(1).collect();
        prop_assert_eq!(tail, expected.iter().map(String::as_str).collect::<Vec<_>>());
        for i in &order {
            let values = table.get(&format!("v{i}")).unwrap();
            prop_assert!(values.iter().all(|v| *v == 10.0 * *i as f64));
        }
    }
}
