//! Process-wide cache for loaded artifacts.
//!
//! Artifacts are loaded once per configuration and shared immutably through
//! `Arc` afterwards. Building a second pipeline for the same artifact paths
//! reuses the already parsed models instead of reading the files again.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Trait implemented by option types to generate a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache of loaded models keyed by type and option key.
pub struct ModelCache {
    cache: Mutex<CacheStorage>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get a cached model or load it with `loader`.
    ///
    /// A failing loader leaves the cache untouched, so a later call retries
    /// the load instead of observing a half-initialised entry.
    pub fn get_or_create<M, F>(&self, key: &str, loader: F) -> anyhow::Result<Arc<M>>
    where
        M: Send + Sync + 'static,
        F: FnOnce() -> anyhow::Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        if let Some(model) = self.lookup::<M>(&cache_key) {
            return Ok(model);
        }

        // Loading happens outside the lock; artifact parsing can be slow.
        let model = Arc::new(loader()?);

        let mut cache = self.lock();
        let entry = cache
            .entry(cache_key)
            .or_insert_with(|| model.clone() as Arc<dyn Any + Send + Sync>);
        Ok(entry.clone().downcast::<M>().unwrap_or(model))
    }

    fn lookup<M: Send + Sync + 'static>(&self, key: &(TypeId, String)) -> Option<Arc<M>> {
        let cache = self.lock();
        cache
            .get(key)
            .and_then(|cached| cached.clone().downcast::<M>().ok())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheStorage> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

/// Get a reference to the global model cache.
pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestModel {
        id: String,
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let cache = ModelCache::new();

        let model1 = cache
            .get_or_create::<TestModel, _>("test-model", || {
                Ok(TestModel {
                    id: "original".to_string(),
                })
            })
            .unwrap();

        let model2 = cache
            .get_or_create::<TestModel, _>("test-model", || {
                // This should not be called
                Ok(TestModel {
                    id: "new".to_string(),
                })
            })
            .unwrap();

        assert!(Arc::ptr_eq(&model1, &model2));
        assert_eq!(model2.id, "original");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = ModelCache::new();

        let err = cache.get_or_create::<TestModel, _>("broken", || anyhow::bail!("missing file"));
        assert!(err.is_err());
        assert!(cache.is_empty());

        let model = cache
            .get_or_create::<TestModel, _>("broken", || {
                Ok(TestModel {
                    id: "fixed".to_string(),
                })
            })
            .unwrap();
        assert_eq!(model.id, "fixed");
    }

    #[test]
    fn test_same_key_different_types_are_separate() {
        let cache = ModelCache::new();
        cache
            .get_or_create::<TestModel, _>("k", || Ok(TestModel { id: "a".into() }))
            .unwrap();
        let n = cache.get_or_create::<u32, _>("k", || Ok(7)).unwrap();
        assert_eq!(*n, 7);
        assert_eq!(cache.len(), 2);
    }
}
