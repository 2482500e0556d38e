//! Name-keyed asset storage
//!
//! Deduplicates loads so each named resource is decoded at most once.

use rustc_hash::FxHashMap;

use super::handle::AssetHandle;

/// Loaded assets of one type, indexed by resource name
#[derive(Debug)]
pub struct Assets<T> {
    by_name: FxHashMap<String, AssetHandle<T>>,
}

impl<T> Assets<T> {
    /// Create a new empty asset storage
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: FxHashMap::default(),
        }
    }

    /// Return the handle for `name`, loading it with `load` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error; nothing is cached on failure.
    pub fn get_or_try_load<E>(
        &mut self,
        name: &str,
        load: impl FnOnce() -> Result<T, E>,
    ) -> Result<AssetHandle<T>, E> {
        if let Some(handle) = self.by_name.get(name) {
            return Ok(handle.clone());
        }
        let handle = AssetHandle::new(load()?);
        self.by_name.insert(name.to_owned(), handle.clone());
        Ok(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl<T> Default for Assets<T> {
    fn default() -> Self {
        Self::new()
    }
}
