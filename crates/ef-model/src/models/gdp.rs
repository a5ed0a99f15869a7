//! Expenditure-side GDP projection.
//!
//! Each demand component grows by its own yearly factor and GDP is the
//! identity `PKB = KI + KS + INW + EKS - IMP`.

use ef_core::Real;

use crate::descriptor::ModelDescriptor;
use crate::error::{ModelError, ModelResult};
use crate::model::Model;

pub const ID: &str = "gdp";

/// Name the model was historically selected by.
pub const LEGACY_ALIAS: &str = "Model1";

/// (growth factor slot, level slot) pairs, in declaration order.
const COMPONENTS: [(&str, &str); 5] = [
    ("twKI", "KI"),
    ("twKS", "KS"),
    ("twINW", "INW"),
    ("twEKS", "EKS"),
    ("twIMP", "IMP"),
];

#[derive(Debug, Clone, Default)]
pub struct GdpModel {
    periods: usize,
    /// Growth factors, same order as `COMPONENTS`.
    growth: [Vec<Real>; 5],
    /// Levels: private consumption, public consumption, investment, export, import.
    levels: [Vec<Real>; 5],
    gdp: Vec<Real>,
}

impl GdpModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Box<dyn Model> {
        Box::new(Self::new())
    }

    pub fn descriptor() -> ModelResult<ModelDescriptor> {
        ModelDescriptor::builder(ID)
            .description("GDP from private and public consumption, investment, export and import")
            .year_count("LL")
            .series_all(COMPONENTS.iter().map(|(growth, _)| *growth))
            .series_all(COMPONENTS.iter().map(|(_, level)| *level))
            .series("PKB")
            .build()
    }

    fn slot(&self, name: &str) -> Option<&Vec<Real>> {
        if name == "PKB" {
            return Some(&self.gdp);
        }
        COMPONENTS.iter().enumerate().find_map(|(i, (growth, level))| {
            if name == *growth {
                Some(&self.growth[i])
            } else if name == *level {
                Some(&self.levels[i])
            } else {
                None
            }
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Vec<Real>> {
        if name == "PKB" {
            return Some(&mut self.gdp);
        }
        let (i, is_growth) = COMPONENTS
            .iter()
            .enumerate()
            .find_map(|(i, (growth, level))| {
                if name == *growth {
                    Some((i, true))
                } else if name == *level {
                    Some((i, false))
                } else {
                    None
                }
            })?;
        Some(if is_growth {
            &mut self.growth[i]
        } else {
            &mut self.levels[i]
        })
    }

    fn require(&self, name: &str, needed: usize) -> ModelResult<()> {
        let len = self.slot(name).map_or(0, Vec::len);
        if len == 0 && needed > 0 {
            return Err(ModelError::MissingInput {
                slot: name.to_string(),
            });
        }
        if len < needed {
            return Err(ModelError::ShortSeries {
                slot: name.to_string(),
                len,
                needed,
            });
        }
        Ok(())
    }
}

impl Model for GdpModel {
    fn set_year_count(&mut self, periods: usize) {
        self.periods = periods;
    }

    fn year_count(&self) -> usize {
        self.periods
    }

    fn series(&self, slot: &str) -> Option<&[Real]> {
        self.slot(slot)
            .filter(|values| !values.is_empty())
            .map(Vec::as_slice)
    }

    fn set_series(&mut self, slot: &str, values: Vec<Real>) -> ModelResult<()> {
        let target = self.slot_mut(slot).ok_or_else(|| ModelError::UnknownSlot {
            slot: slot.to_string(),
        })?;
        *target = values;
        Ok(())
    }

    fn run(&mut self) -> ModelResult<()> {
        let ll = self.periods;
        for (growth, level) in COMPONENTS {
            self.require(level, ll)?;
            // growth factors are only read from period 1 on
            if ll > 1 {
                self.require(growth, ll)?;
            }
        }

        let mut gdp = vec![0.0; ll];
        if ll > 0 {
            gdp[0] = identity(&self.levels, 0);
        }
        for t in 1..ll {
            for (level, growth) in self.levels.iter_mut().zip(&self.growth) {
                level[t] = growth[t] * level[t - 1];
            }
            gdp[t] = identity(&self.levels, t);
        }
        self.gdp = gdp;
        Ok(())
    }
}

fn identity(levels: &[Vec<Real>; 5], t: usize) -> Real {
    let [ki, ks, inw, eks, imp] = levels;
    ki[t] + ks[t] + inw[t] + eks[t] - imp[t]
}
