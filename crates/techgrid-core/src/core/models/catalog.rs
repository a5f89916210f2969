use super::ids::ModuleKey;
use super::module::Module;
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogError {
    #[error("Duplicate module id '{0}' in catalog")]
    DuplicateId(String),
}

/// Owns the module descriptors participating in a solve.
///
/// The catalog is built once per solve request from host input and passed
/// explicitly wherever module data is needed; there is no global module
/// registry. Modules are stored in a slot map; grid cells reference them
/// by [`ModuleKey`] only.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: SlotMap<ModuleKey, Module>,
    /// Lookup map from host-assigned module id to its key.
    id_map: HashMap<String, ModuleKey>,
}

impl ModuleCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module descriptor, returning its key.
    ///
    /// Fails if another module with the same id is already registered.
    pub fn insert(&mut self, module: Module) -> Result<ModuleKey, CatalogError> {
        if self.id_map.contains_key(&module.id) {
            return Err(CatalogError::DuplicateId(module.id));
        }
        let id = module.id.clone();
        let key = self.modules.insert(module);
        self.id_map.insert(id, key);
        Ok(key)
    }

    /// Retrieves a module by its key.
    pub fn get(&self, key: ModuleKey) -> Option<&Module> {
        self.modules.get(key)
    }

    /// Looks up the key for a host-assigned module id.
    pub fn key_for_id(&self, id: &str) -> Option<ModuleKey> {
        self.id_map.get(id).copied()
    }

    /// Returns an iterator over all `(ModuleKey, &Module)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleKey, &Module)> {
        self.modules.iter()
    }

    /// Keys of all modules currently selected for placement, in id order.
    ///
    /// The deterministic ordering keeps fresh initial placements reproducible
    /// for a fixed random seed.
    pub fn active_keys(&self) -> Vec<ModuleKey> {
        let mut entries: Vec<(&str, ModuleKey)> = self
            .modules
            .iter()
            .filter(|(_, m)| m.active)
            .map(|(k, m)| (m.id.as_str(), k))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, k)| k).collect()
    }

    /// Keys of active modules belonging to the given tech group, in id order.
    pub fn active_keys_for_tech(&self, tech: &str) -> Vec<ModuleKey> {
        let mut entries: Vec<(&str, ModuleKey)> = self
            .modules
            .iter()
            .filter(|(_, m)| m.active && m.tech == tech)
            .map(|(k, m)| (m.id.as_str(), k))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, k)| k).collect()
    }

    /// Number of modules in the catalog.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if the catalog holds no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
