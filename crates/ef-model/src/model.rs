//! Model trait for pluggable projection models.

use ef_core::Real;

use crate::error::ModelResult;

/// A stateful projection model.
///
/// A model exposes the slots named by its [`ModelDescriptor`](crate::ModelDescriptor)
/// for assignment and reading, plus a single projection step. The runtime
/// fills input slots before `run` and reads every series slot afterwards.
pub trait Model {
    /// Assign the period count `LL`.
    fn set_year_count(&mut self, periods: usize);

    fn year_count(&self) -> usize;

    /// Current value of a series slot; `None` when it was never assigned.
    fn series(&self, slot: &str) -> Option<&[Real]>;

    /// Assign a series slot. Fails with `UnknownSlot` for undeclared names.
    fn set_series(&mut self, slot: &str, values: Vec<Real>) -> ModelResult<()>;

    /// Project the series in place.
    ///
    /// Reads its input slots and overwrites its output slots, typically
    /// computing period 0 directly and then applying a recurrence on t-1.
    fn run(&mut self) -> ModelResult<()>;
}
