//! Metadata cache
//!
//! Descriptors are derived once per record type and shared afterwards.
//! Schemas are static for the process lifetime, so entries are never
//! invalidated. Lookups take a read lock; a miss re-checks under the write
//! lock so concurrent first access derives the descriptor exactly once.

use crate::errors::{MappingError, Result};
use crate::mapping::descriptor::EntityDescriptor;
use crate::mapping::schema::Record;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

/// Type-keyed store of derived entity descriptors
#[derive(Default)]
pub struct MetadataCache {
    entries: RwLock<HashMap<TypeId, Entry>>,
}

static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by repositories that are not given their own
    pub fn global() -> &'static MetadataCache {
        GLOBAL.get_or_init(MetadataCache::new)
    }

    /// Descriptor for `T`, deriving and caching it on first use
    ///
    /// Failed derivations are not cached; every call reports the error.
    ///
    /// # Errors
    ///
    /// Any `MappingError` raised by `EntityDescriptor::derive`.
    pub fn resolve<T: Record>(&self) -> Result<Arc<EntityDescriptor<T>>> {
        let key = TypeId::of::<T>();

        // Poisoning cannot leave the map half-written: inserts are single calls
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(entry) = cached {
            return downcast::<T>(entry);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(&key) {
            return downcast::<T>(entry.clone());
        }

        let descriptor = Arc::new(EntityDescriptor::<T>::derive()?);
        entries.insert(key, descriptor.clone());
        tracing::trace!(
            record_type = descriptor.record_type(),
            cached = entries.len(),
            "metadata cache miss"
        );
        Ok(descriptor)
    }

    /// Whether a descriptor for `T` has been cached
    pub fn contains<T: Record>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("entries", &self.len())
            .finish()
    }
}

fn downcast<T: Record>(entry: Entry) -> Result<Arc<EntityDescriptor<T>>> {
    entry
        .downcast::<EntityDescriptor<T>>()
        .map_err(|_| MappingError::CacheTypeMismatch {
            record_type: std::any::type_name::<T>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SchemaBuilder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counted {
        key: String,
    }

    impl Record for Counted {
        fn declare(schema: &mut SchemaBuilder<Self>) {
            DECLARATIONS.fetch_add(1, Ordering::SeqCst);
            schema
                .table("counted")
                .constructor(Self::default)
                .id("key", |c| &c.key, |c| &mut c.key);
        }
    }

    #[derive(Default)]
    struct Broken {
        value: i32,
    }

    impl Record for Broken {
        fn declare(schema: &mut SchemaBuilder<Self>) {
            schema.column("value", |b| &b.value, |b| &mut b.value);
        }
    }

    #[test]
    fn test_concurrent_first_access_derives_once() {
        let cache = Arc::new(MetadataCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.resolve::<Counted>().unwrap())
            })
            .collect();

        let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(DECLARATIONS.load(Ordering::SeqCst), 1);
        assert!(descriptors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_derivation_is_not_cached() {
        let cache = MetadataCache::new();
        let err = cache.resolve::<Broken>().unwrap_err();
        assert!(matches!(err, MappingError::NoConstructor { .. }));
        assert!(!cache.contains::<Broken>());
        assert!(cache.is_empty());
    }
}
