//! Builtin functions available to scripts.

use ef_core::{MISSING, Real};

use crate::error::EvalError;
use crate::value::Value;

/// Names of every builtin, for diagnostics and listings.
pub const BUILTINS: &[&str] = &[
    "zeros", "ones", "fill", "len", "sum", "mean", "min", "max", "abs", "sqrt", "exp", "ln",
    "round", "cumsum", "lag", "growth", "copy",
];

/// Call builtin `name` with already evaluated arguments.
///
/// Constructors refuse to build arrays longer than `max_len`.
pub fn call(name: &str, args: &[Value], max_len: usize) -> Result<Value, EvalError> {
    match name {
        "zeros" => {
            let [n] = arity::<1>(name, args)?;
            Ok(Value::Array(vec![0.0; length(name, n, max_len)?]))
        }
        "ones" => {
            let [n] = arity::<1>(name, args)?;
            Ok(Value::Array(vec![1.0; length(name, n, max_len)?]))
        }
        "fill" => {
            let [n, v] = arity::<2>(name, args)?;
            Ok(Value::Array(vec![v.as_scalar()?; length(name, n, max_len)?]))
        }
        "len" => {
            let [v] = arity::<1>(name, args)?;
            let len = match v {
                Value::Array(values) => values.len(),
                Value::Str(s) => s.chars().count(),
                Value::Scalar(_) => return Err(unexpected("array or string", v)),
            };
            Ok(Value::Scalar(len as Real))
        }
        "sum" => reduce(name, args, |values| values.iter().sum()),
        "mean" => reduce(name, args, |values| {
            if values.is_empty() {
                MISSING
            } else {
                values.iter().sum::<Real>() / values.len() as Real
            }
        }),
        "min" => reduce(name, args, |values| {
            values.iter().copied().fold(Real::INFINITY, Real::min)
        }),
        "max" => reduce(name, args, |values| {
            values.iter().copied().fold(Real::NEG_INFINITY, Real::max)
        }),
        "abs" => elementwise(name, args, Real::abs),
        "sqrt" => elementwise(name, args, Real::sqrt),
        "exp" => elementwise(name, args, Real::exp),
        "ln" => elementwise(name, args, Real::ln),
        "round" => elementwise(name, args, Real::round),
        "cumsum" => {
            let values = single_array(name, args)?;
            let mut total = 0.0;
            Ok(Value::Array(
                values
                    .iter()
                    .map(|v| {
                        total += v;
                        total
                    })
                    .collect(),
            ))
        }
        "lag" => {
            let [a, k] = arity::<2>(name, args)?;
            let values = a.as_array().ok_or_else(|| unexpected("array", a))?;
            let k = k.as_count()?;
            let shifted = (0..values.len())
                .map(|t| if t < k { MISSING } else { values[t - k] })
                .collect();
            Ok(Value::Array(shifted))
        }
        "growth" => {
            let values = single_array(name, args)?;
            let rates = (0..values.len())
                .map(|t| if t == 0 { MISSING } else { values[t] / values[t - 1] })
                .collect();
            Ok(Value::Array(rates))
        }
        "copy" => {
            let [v] = arity::<1>(name, args)?;
            Ok(v.clone())
        }
        _ => Err(EvalError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

fn arity<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N], EvalError> {
    args.try_into().map_err(|_| EvalError::Arity {
        name: name.to_string(),
        expected: match N {
            1 => "1",
            2 => "2",
            _ => "a different number of",
        },
        found: args.len(),
    })
}

fn length(name: &str, n: &Value, max_len: usize) -> Result<usize, EvalError> {
    let n = n.as_count()?;
    if n > max_len {
        return Err(EvalError::InvalidArgument {
            name: name.to_string(),
            what: format!("length {n} exceeds the limit of {max_len}"),
        });
    }
    Ok(n)
}

fn unexpected(expected: &'static str, found: &Value) -> EvalError {
    EvalError::UnexpectedType {
        expected,
        found: found.type_name(),
    }
}

fn single_array<'a>(name: &str, args: &'a [Value]) -> Result<&'a [Real], EvalError> {
    let [v] = arity::<1>(name, args)?;
    v.as_array().ok_or_else(|| unexpected("array", v))
}

fn reduce(name: &str, args: &[Value], f: impl Fn(&[Real]) -> Real) -> Result<Value, EvalError> {
    Ok(Value::Scalar(f(single_array(name, args)?)))
}

fn elementwise(name: &str, args: &[Value], f: fn(Real) -> Real) -> Result<Value, EvalError> {
    let [v] = arity::<1>(name, args)?;
    v.map(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::DEFAULT_LENGTH_LIMIT;

    fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
        super::call(name, args, DEFAULT_LENGTH_LIMIT)
    }

    fn arr(values: &[Real]) -> Value {
        Value::Array(values.to_vec())
    }

    #[test]
    fn constructors() {
        assert_eq!(call("zeros", &[Value::Scalar(2.0)]).unwrap(), arr(&[0.0, 0.0]));
        assert_eq!(
            call("fill", &[Value::Scalar(3.0), Value::Scalar(1.5)]).unwrap(),
            arr(&[1.5, 1.5, 1.5])
        );
        assert!(call("ones", &[Value::Scalar(-1.0)]).is_err());
    }

    #[test]
    fn constructors_respect_length_limit() {
        assert!(matches!(
            call("zeros", &[Value::Scalar(1e15)]),
            Err(EvalError::InvalidArgument { .. })
        ));
        assert!(matches!(
            super::call("fill", &[Value::Scalar(4.0), Value::Scalar(0.0)], 3),
            Err(EvalError::InvalidArgument { .. })
        ));
        assert_eq!(
            super::call("ones", &[Value::Scalar(3.0)], 3).unwrap(),
            arr(&[1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn reductions() {
        let a = arr(&[1.0, 4.0, 2.0]);
        assert_eq!(call("sum", &[a.clone()]).unwrap(), Value::Scalar(7.0));
        assert_eq!(call("max", &[a.clone()]).unwrap(), Value::Scalar(4.0));
        assert_eq!(call("min", &[a.clone()]).unwrap(), Value::Scalar(1.0));
        assert_eq!(call("len", &[a]).unwrap(), Value::Scalar(3.0));
    }

    #[test]
    fn lag_and_growth_lead_with_missing() {
        let a = arr(&[2.0, 4.0, 8.0]);
        let Value::Array(lagged) = call("lag", &[a.clone(), Value::Scalar(1.0)]).unwrap() else {
            panic!("lag returns an array");
        };
        assert!(lagged[0].is_nan());
        assert_eq!(&lagged[1..], &[2.0, 4.0]);

        let Value::Array(rates) = call("growth", &[a]).unwrap() else {
            panic!("growth returns an array");
        };
        assert!(rates[0].is_nan());
        assert_eq!(&rates[1..], &[2.0, 2.0]);
    }

    #[test]
    fn cumsum_and_elementwise() {
        assert_eq!(
            call("cumsum", &[arr(&[1.0, 2.0, 3.0])]).unwrap(),
            arr(&[1.0, 3.0, 6.0])
        );
        assert_eq!(call("abs", &[Value::Scalar(-2.0)]).unwrap(), Value::Scalar(2.0));
        assert_eq!(call("round", &[arr(&[1.4, 1.6])]).unwrap(), arr(&[1.0, 2.0]));
    }

    #[test]
    fn arity_and_unknown() {
        assert!(matches!(
            call("sum", &[]),
            Err(EvalError::Arity { found: 0, .. })
        ));
        assert!(matches!(
            call("sum", &[Value::Scalar(1.0)]),
            Err(EvalError::UnexpectedType { .. })
        ));
        assert!(matches!(
            call("system", &[]),
            Err(EvalError::UnknownFunction { .. })
        ));
    }
}
