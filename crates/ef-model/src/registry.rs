//! Model id -> constructor registry.

use std::sync::Arc;

use crate::descriptor::ModelDescriptor;
use crate::error::{ModelResult, RuntimeError, RuntimeResult};
use crate::model::Model;
use crate::models::gdp;
use crate::runtime::ModelRuntime;

/// Constructor for a fresh model instance.
pub type ModelFactory = fn() -> Box<dyn Model>;

/// One registered model.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub descriptor: Arc<ModelDescriptor>,
    pub factory: ModelFactory,
    pub aliases: Vec<String>,
}

impl ModelEntry {
    pub fn id(&self) -> &str {
        self.descriptor.id()
    }

    fn answers_to(&self, name: &str) -> bool {
        self.id() == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Registry of selectable models, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bundled model.
    pub fn builtin() -> RuntimeResult<Self> {
        let mut registry = Self::new();
        registry.register_with(gdp::GdpModel::descriptor(), gdp::GdpModel::boxed)?;
        registry.alias(gdp::LEGACY_ALIAS, gdp::ID)?;
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ModelDescriptor, factory: ModelFactory) -> RuntimeResult<()> {
        if self.find(descriptor.id()).is_some() {
            return Err(RuntimeError::DuplicateModel {
                id: descriptor.id().to_string(),
            });
        }
        tracing::debug!(model = descriptor.id(), "registered model");
        self.entries.push(ModelEntry {
            descriptor: Arc::new(descriptor),
            factory,
            aliases: Vec::new(),
        });
        Ok(())
    }

    /// Register a model whose descriptor is still being validated.
    pub fn register_with(
        &mut self,
        descriptor: ModelResult<ModelDescriptor>,
        factory: ModelFactory,
    ) -> RuntimeResult<()> {
        let descriptor = descriptor.map_err(|source| RuntimeError::InvalidModel {
            id: "<unnamed>".to_string(),
            source,
        })?;
        self.register(descriptor, factory)
    }

    /// Make `alias` resolve to the model registered as `id`.
    pub fn alias(&mut self, alias: &str, id: &str) -> RuntimeResult<()> {
        if self.find(alias).is_some() {
            return Err(RuntimeError::DuplicateModel {
                id: alias.to_string(),
            });
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| RuntimeError::UnknownModel {
                name: id.to_string(),
            })?;
        entry.aliases.push(alias.to_string());
        Ok(())
    }

    /// Look up a model by id or alias.
    pub fn find(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.answers_to(name))
    }

    pub fn get(&self, name: &str) -> RuntimeResult<&ModelEntry> {
        self.find(name).ok_or_else(|| RuntimeError::UnknownModel {
            name: name.to_string(),
        })
    }

    /// Create an unbound runtime around a fresh instance of `name`.
    pub fn instantiate(&self, name: &str) -> RuntimeResult<ModelRuntime> {
        let entry = self.get(name)?;
        Ok(ModelRuntime::new(Arc::clone(&entry.descriptor), (entry.factory)()))
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ModelEntry::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RunState;

    #[test]
    fn builtin_resolves_id_and_alias() {
        let registry = ModelRegistry::builtin().unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["gdp"]);
        assert_eq!(registry.get("Model1").unwrap().id(), "gdp");
        let runtime = registry.instantiate("gdp").unwrap();
        assert_eq!(runtime.state(), RunState::Unbound);
        assert_eq!(runtime.descriptor().id(), "gdp");
    }

    #[test]
    fn unknown_model() {
        let registry = ModelRegistry::builtin().unwrap();
        assert!(matches!(
            registry.instantiate("nope"),
            Err(RuntimeError::UnknownModel { .. })
        ));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = ModelRegistry::builtin().unwrap();
        let err = registry
            .register_with(gdp::GdpModel::descriptor(), gdp::GdpModel::boxed)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateModel { .. }));
        assert!(registry.alias("gdp", "gdp").is_err());
        assert!(registry.alias("x", "missing").is_err());
    }
}
