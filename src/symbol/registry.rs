//! Process-wide registry of interning dictionaries
//!
//! Each tag type selects its own [`Dictionary`]; the registry creates it on
//! first use and keeps it until process exit. Access is serialized through a
//! single mutex, so interning from several threads is safe, though the codes
//! handed out then depend on the order in which threads reach the lock.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::symbol::dictionary::Dictionary;

/// Registry mapping a namespace tag to its dictionary
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    dictionaries: Mutex<HashMap<TypeId, Dictionary>>,
}

impl SymbolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Dictionary>> {
        // Dictionary updates cannot leave a half-written entry behind
        self.dictionaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Intern `s` under namespace `Tag`
    ///
    /// `limit` is the largest code the caller can represent. Interning a new
    /// string once the namespace already holds `limit` entries fails with
    /// [`Error::CodeRangeOverflow`] and leaves the dictionary unchanged.
    pub fn intern<Tag: 'static>(&self, s: &str, limit: usize) -> Result<usize> {
        let mut dictionaries = self.lock();
        let dict = dictionaries.entry(TypeId::of::<Tag>()).or_insert_with(|| {
            log::debug!("creating symbol namespace {}", type_name::<Tag>());
            Dictionary::new()
        });

        if let Some(code) = dict.code_of(s) {
            return Ok(code);
        }

        if dict.len() >= limit {
            log::warn!(
                "symbol namespace {} is full ({} categories)",
                type_name::<Tag>(),
                limit
            );
            return Err(Error::CodeRangeOverflow {
                namespace: type_name::<Tag>().to_string(),
                limit,
            });
        }

        Ok(dict.intern(s))
    }

    /// Code already assigned to `s` under `Tag`, if any
    pub fn code_of<Tag: 'static>(&self, s: &str) -> Option<usize> {
        self.lock()
            .get(&TypeId::of::<Tag>())
            .and_then(|dict| dict.code_of(s))
    }

    /// String interned under `Tag` with the given code
    pub fn resolve<Tag: 'static>(&self, code: usize) -> Option<Arc<str>> {
        self.lock()
            .get(&TypeId::of::<Tag>())
            .and_then(|dict| dict.resolve(code).cloned())
    }

    /// Number of strings interned under `Tag`
    pub fn len<Tag: 'static>(&self) -> usize {
        self.lock()
            .get(&TypeId::of::<Tag>())
            .map_or(0, Dictionary::len)
    }

    /// Copy of the current dictionary for `Tag` (empty if never used)
    pub fn snapshot<Tag: 'static>(&self) -> Dictionary {
        self.lock()
            .get(&TypeId::of::<Tag>())
            .cloned()
            .unwrap_or_default()
    }

    /// Number of namespaces created so far
    pub fn namespace_count(&self) -> usize {
        self.lock().len()
    }
}

lazy_static::lazy_static! {
    /// Global symbol registry instance
    static ref GLOBAL_REGISTRY: SymbolRegistry = SymbolRegistry::new();
}

/// Get the global symbol registry
pub fn registry() -> &'static SymbolRegistry {
    &GLOBAL_REGISTRY
}
