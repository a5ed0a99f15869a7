//! Tree-walking evaluator over an ordered binding environment.

use ef_core::Real;
use indexmap::IndexMap;

use crate::ast::{Expr, Program, Stmt, StmtKind};
use crate::error::{EvalError, ScriptError, ScriptResult};
use crate::functions;
use crate::value::{Value, checked_index};

/// Upper bound on the iterations of a single `for` loop.
pub const DEFAULT_LOOP_LIMIT: u64 = 1_000_000;

/// Upper bound on the length of any array or string a script builds.
pub const DEFAULT_LENGTH_LIMIT: usize = 1_000_000;

/// Named script bindings in creation order.
///
/// Reassigning an existing name keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bindings holding numeric arrays, in creation order.
    pub fn arrays(&self) -> impl Iterator<Item = (&str, &[Real])> {
        self.iter()
            .filter_map(|(name, value)| value.as_array().map(|values| (name, values)))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.bindings.get_mut(name)
    }
}

/// Executes parsed programs.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    loop_limit: u64,
    length_limit: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            loop_limit: DEFAULT_LOOP_LIMIT,
            length_limit: DEFAULT_LENGTH_LIMIT,
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loop_limit(loop_limit: u64) -> Self {
        Self {
            loop_limit,
            ..Self::default()
        }
    }

    pub fn with_length_limit(mut self, length_limit: usize) -> Self {
        self.length_limit = length_limit;
        self
    }

    /// Run `program` against `env`. On error `env` may be partially updated.
    pub fn execute(&self, program: &Program, env: &mut Environment) -> ScriptResult<()> {
        self.exec_block(&program.stmts, env)
            .map_err(|(line, source)| ScriptError::Eval { line, source })
    }

    fn exec_block(&self, stmts: &[Stmt], env: &mut Environment) -> Result<(), (usize, EvalError)> {
        for stmt in stmts {
            self.exec_stmt(stmt, env)?;
        }
        Ok(())
    }

    fn exec_stmt(&self, stmt: &Stmt, env: &mut Environment) -> Result<(), (usize, EvalError)> {
        let at_line = |e: EvalError| (stmt.line, e);
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let value = self.eval(value, env).map_err(at_line)?;
                env.set(name.as_str(), value);
            }
            StmtKind::AssignIndex { name, index, value } => {
                let index = self.eval(index, env).map_err(at_line)?;
                let value = self
                    .eval(value, env)
                    .and_then(|v| v.as_scalar())
                    .map_err(at_line)?;
                match env.get_mut(name) {
                    Some(Value::Array(values)) => {
                        let i = checked_index(&index, values.len()).map_err(at_line)?;
                        values[i] = value;
                    }
                    Some(other) => {
                        return Err(at_line(EvalError::UnexpectedType {
                            expected: "array",
                            found: other.type_name(),
                        }));
                    }
                    None => {
                        return Err(at_line(EvalError::UndefinedVariable { name: name.clone() }));
                    }
                }
            }
            StmtKind::For {
                var,
                start,
                end,
                body,
            } => {
                let start = self.loop_bound(start, env).map_err(at_line)?;
                let end = self.loop_bound(end, env).map_err(at_line)?;
                let iterations = end.saturating_sub(start).max(0) as u64;
                if iterations > self.loop_limit {
                    return Err(at_line(EvalError::LoopTooLong {
                        iterations,
                        limit: self.loop_limit,
                    }));
                }
                for t in start..end {
                    env.set(var.as_str(), Value::Scalar(t as Real));
                    self.exec_block(body, env)?;
                }
            }
        }
        Ok(())
    }

    fn loop_bound(&self, expr: &Expr, env: &Environment) -> Result<i64, EvalError> {
        let v = self.eval(expr, env)?.as_scalar()?;
        if v.fract() != 0.0 || !v.is_finite() {
            return Err(EvalError::InvalidIndex { value: v });
        }
        Ok(v as i64)
    }

    pub fn eval(&self, expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
        match expr {
            Expr::Number(v) => Ok(Value::Scalar(*v)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Var(name) => env
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }),
            Expr::Array(items) => items
                .iter()
                .map(|item| self.eval(item, env)?.as_scalar())
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Expr::Index { target, index } => {
                let target = self.eval(target, env)?;
                let index = self.eval(index, env)?;
                match &target {
                    Value::Array(values) => Ok(Value::Scalar(values[checked_index(&index, values.len())?])),
                    other => Err(EvalError::UnexpectedType {
                        expected: "array",
                        found: other.type_name(),
                    }),
                }
            }
            Expr::Unary { op, operand } => self.eval(operand, env)?.unary(*op),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                match left.binary(*op, &right)? {
                    Value::Str(s) if s.len() > self.length_limit => Err(EvalError::InvalidArgument {
                        name: op.symbol().to_string(),
                        what: format!("string of {} bytes exceeds the limit of {}", s.len(), self.length_limit),
                    }),
                    value => Ok(value),
                }
            }
            Expr::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                functions::call(name, &args, self.length_limit)
            }
        }
    }
}
