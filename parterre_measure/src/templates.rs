// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Off-screen measuring templates, one per element kind.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

/// Keeps one reusable measuring template per key.
///
/// A template is built the first time its key is requested and then reconfigured
/// for every measurement. Templates are never evicted by data mutations; only
/// [`clear`](Self::clear) drops them.
#[derive(Clone)]
pub struct TemplatePool<K, T> {
    templates: HashMap<K, T>,
    created: u64,
}

impl<K, T> Debug for TemplatePool<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemplatePool")
            .field("templates", &self.templates.len())
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<K, T> Default for TemplatePool<K, T> {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
            created: 0,
        }
    }
}

impl<K: Eq + Hash + Debug, T> TemplatePool<K, T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The template for `key`, built with `make` if the pool has none yet.
    pub fn get_or_create(&mut self, key: K, make: impl FnOnce(&K) -> T) -> &mut T {
        let created = &mut self.created;
        self.templates.entry(key).or_insert_with_key(|key| {
            *created += 1;
            log::trace!("created measuring template for {key:?}");
            make(key)
        })
    }

    /// The template for `key`, if one was built.
    pub fn get(&self, key: &K) -> Option<&T> {
        self.templates.get(key)
    }

    /// Number of templates held.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no template was built yet.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Total number of templates built over the pool's lifetime.
    pub const fn created(&self) -> u64 {
        self.created
    }

    /// Drops every template. The next request for each key builds a new one.
    pub fn clear(&mut self) {
        self.templates.clear();
    }
}
