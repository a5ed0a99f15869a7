//! Script values and element-wise arithmetic.

use ef_core::Real;

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::EvalError;

/// A script binding. Arrays are values: assignment copies.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Real),
    Array(Vec<Real>),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Array(_) => "array",
            Value::Str(_) => "string",
        }
    }

    pub fn as_array(&self) -> Option<&[Real]> {
        match self {
            Value::Array(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Result<Real, EvalError> {
        match self {
            Value::Scalar(v) => Ok(*v),
            other => Err(EvalError::UnexpectedType {
                expected: "scalar",
                found: other.type_name(),
            }),
        }
    }

    /// Interpret a scalar as a non-negative whole number.
    pub fn as_count(&self) -> Result<usize, EvalError> {
        let v = self.as_scalar()?;
        if v.fract() != 0.0 || v < 0.0 || !v.is_finite() {
            return Err(EvalError::InvalidIndex { value: v });
        }
        Ok(v as usize)
    }

    /// Apply `f` to a scalar or to every element of an array.
    pub fn map(&self, f: impl Fn(Real) -> Real) -> Result<Value, EvalError> {
        match self {
            Value::Scalar(v) => Ok(Value::Scalar(f(*v))),
            Value::Array(values) => Ok(Value::Array(values.iter().map(|v| f(*v)).collect())),
            Value::Str(_) => Err(EvalError::UnexpectedType {
                expected: "scalar or array",
                found: self.type_name(),
            }),
        }
    }

    pub fn unary(&self, op: UnaryOp) -> Result<Value, EvalError> {
        match op {
            UnaryOp::Neg => self.map(|v| -v),
        }
    }

    /// Element-wise binary operation; a scalar operand is broadcast.
    pub fn binary(&self, op: BinaryOp, rhs: &Value) -> Result<Value, EvalError> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(op.apply(*a, *b))),
            (Value::Array(a), Value::Scalar(b)) => {
                Ok(Value::Array(a.iter().map(|x| op.apply(*x, *b)).collect()))
            }
            (Value::Scalar(a), Value::Array(b)) => {
                Ok(Value::Array(b.iter().map(|y| op.apply(*a, *y)).collect()))
            }
            (Value::Array(a), Value::Array(b)) => {
                if a.len() != b.len() {
                    return Err(EvalError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                Ok(Value::Array(
                    a.iter().zip(b).map(|(x, y)| op.apply(*x, *y)).collect(),
                ))
            }
            (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
                Ok(Value::Str(format!("{a}{b}")))
            }
            (l, r) => Err(EvalError::TypeMismatch {
                op: op.symbol(),
                left: l.type_name(),
                right: r.type_name(),
            }),
        }
    }
}

/// Resolve a scalar index against a length.
pub fn checked_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let raw = index.as_scalar()?;
    if raw.fract() != 0.0 || !raw.is_finite() {
        return Err(EvalError::InvalidIndex { value: raw });
    }
    let i = raw as i64;
    if i < 0 || i as usize >= len {
        return Err(EvalError::IndexOutOfRange { index: i, len });
    }
    Ok(i as usize)
}
