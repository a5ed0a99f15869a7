//! Explicit slot schema declared by each model.
//!
//! Slot order is the declaration order and drives report ordering, so it is
//! part of a model's observable contract.

use std::collections::HashSet;

use ef_core::YEARS;

use crate::error::{ModelError, ModelResult};

/// What a slot binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotKind {
    /// Bound to the table's period count `LL`.
    YearCount,
    /// Bound to the table series with the same name.
    Series,
}

/// A named, typed binding point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub name: String,
    pub kind: SlotKind,
}

impl Slot {
    pub fn is_series(&self) -> bool {
        self.kind == SlotKind::Series
    }
}

/// Ordered, immutable set of slots a model declares.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelDescriptor {
    id: String,
    description: String,
    slots: Vec<Slot>,
}

impl ModelDescriptor {
    /// Start declaring the slots of model `id`.
    pub fn builder(id: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            id: id.into(),
            description: String::new(),
            slots: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All slots in declaration order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// `SERIES` slots in declaration order.
    pub fn series_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.is_series())
    }

    /// The `YEAR_COUNT` slot, if declared.
    pub fn year_count_slot(&self) -> Option<&Slot> {
        self.slots.iter().find(|s| s.kind == SlotKind::YearCount)
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// True when `name` is declared as a `SERIES` slot.
    pub fn declares_series(&self, name: &str) -> bool {
        self.slot(name).is_some_and(Slot::is_series)
    }
}

/// Builder for a [`ModelDescriptor`].
///
/// Slots are recorded in call order; `build()` validates and freezes them.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    id: String,
    description: String,
    slots: Vec<Slot>,
}

impl DescriptorBuilder {
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Declare the slot that receives the period count.
    pub fn year_count(self, name: impl Into<String>) -> Self {
        self.slot(name, SlotKind::YearCount)
    }

    /// Declare one series slot.
    pub fn series(self, name: impl Into<String>) -> Self {
        self.slot(name, SlotKind::Series)
    }

    /// Declare several series slots in order.
    pub fn series_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.series(name);
        }
        self
    }

    pub fn slot(mut self, name: impl Into<String>, kind: SlotKind) -> Self {
        self.slots.push(Slot {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn build(self) -> ModelResult<ModelDescriptor> {
        if self.id.trim().is_empty() {
            return Err(invalid("model id must not be empty"));
        }

        let mut seen = HashSet::new();
        let mut year_counts = 0;
        for slot in &self.slots {
            if slot.name.is_empty() || slot.name.chars().any(char::is_whitespace) {
                return Err(invalid(format!(
                    "slot name '{}' must be non-empty and contain no whitespace",
                    slot.name
                )));
            }
            if !seen.insert(slot.name.as_str()) {
                return Err(invalid(format!("slot '{}' declared twice", slot.name)));
            }
            match slot.kind {
                SlotKind::YearCount => year_counts += 1,
                SlotKind::Series if slot.name == YEARS => {
                    return Err(invalid(format!("'{YEARS}' is reserved for the year axis")));
                }
                SlotKind::Series => {}
            }
        }
        if year_counts > 1 {
            return Err(invalid("at most one year-count slot may be declared"));
        }

        Ok(ModelDescriptor {
            id: self.id,
            description: self.description,
            slots: self.slots,
        })
    }
}

fn invalid(what: impl Into<String>) -> ModelError {
    ModelError::InvalidDescriptor { what: what.into() }
}
