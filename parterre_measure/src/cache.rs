// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized cell, header and footer heights.

use hashbrown::HashMap;
use parterre_flow::Coordinate;

/// Counters describing how a [`MeasurementCache`] has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the measurement.
    pub misses: u64,
    /// Calls to [`MeasurementCache::invalidate_all`].
    pub invalidations: u64,
}

/// Memoizes heights that can only be found by measuring a configured template.
///
/// Cell heights are keyed by [`Coordinate`]; header and footer heights by section.
/// Entries are created lazily on the first lookup and dropped all at once by
/// [`invalidate_all`](Self::invalidate_all), which the owning list calls on every
/// reload, insert or delete. No per-coordinate invalidation is attempted.
///
/// Caching is disabled by default. While disabled every lookup measures and
/// nothing is stored.
///
/// ```rust
/// use parterre_flow::Coordinate;
/// use parterre_measure::MeasurementCache;
///
/// let mut cache = MeasurementCache::new();
/// cache.set_enabled(true);
///
/// let at = Coordinate::new(0, 3);
/// assert_eq!(cache.height_for(at, || 44.0), 44.0);
/// // Served from the cache: the closure is not called.
/// assert_eq!(cache.height_for(at, || unreachable!()), 44.0);
///
/// cache.invalidate_all();
/// assert_eq!(cache.height_for(at, || 52.0), 52.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeasurementCache {
    enabled: bool,
    cells: HashMap<Coordinate, f64>,
    headers: HashMap<usize, f64>,
    footers: HashMap<usize, f64>,
    stats: CacheStats,
}

impl MeasurementCache {
    /// Creates an empty, disabled cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with caching switched on or off.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Returns `true` if lookups may be served from the cache.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switches caching on or off. Switching off drops every entry.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.clear_tables();
        }
        self.enabled = enabled;
    }

    /// Height of the cell at `coordinate`, measuring on a miss.
    pub fn height_for(&mut self, coordinate: Coordinate, measure: impl FnOnce() -> f64) -> f64 {
        lookup(
            self.enabled,
            &mut self.stats,
            &mut self.cells,
            coordinate,
            measure,
        )
    }

    /// Height of the header of `section`, measuring on a miss.
    pub fn header_height_for(&mut self, section: usize, measure: impl FnOnce() -> f64) -> f64 {
        lookup(
            self.enabled,
            &mut self.stats,
            &mut self.headers,
            section,
            measure,
        )
    }

    /// Height of the footer of `section`, measuring on a miss.
    pub fn footer_height_for(&mut self, section: usize, measure: impl FnOnce() -> f64) -> f64 {
        lookup(
            self.enabled,
            &mut self.stats,
            &mut self.footers,
            section,
            measure,
        )
    }

    /// The stored cell height, without measuring.
    pub fn cached_height(&self, coordinate: Coordinate) -> Option<f64> {
        self.cells.get(&coordinate).copied()
    }

    /// The stored header height, without measuring.
    pub fn cached_header_height(&self, section: usize) -> Option<f64> {
        self.headers.get(&section).copied()
    }

    /// The stored footer height, without measuring.
    pub fn cached_footer_height(&self, section: usize) -> Option<f64> {
        self.footers.get(&section).copied()
    }

    /// Drops every cell, header and footer entry.
    pub fn invalidate_all(&mut self) {
        let dropped = self.len();
        self.clear_tables();
        self.stats.invalidations += 1;
        log::trace!("measurement cache invalidated, {dropped} entries dropped");
    }

    /// Total number of stored entries across all tables.
    pub fn len(&self) -> usize {
        self.cells.len() + self.headers.len() + self.footers.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Usage counters.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn clear_tables(&mut self) {
        self.cells.clear();
        self.headers.clear();
        self.footers.clear();
    }
}

fn lookup<K>(
    enabled: bool,
    stats: &mut CacheStats,
    table: &mut HashMap<K, f64>,
    key: K,
    measure: impl FnOnce() -> f64,
) -> f64
where
    K: Eq + core::hash::Hash + core::fmt::Debug,
{
    if enabled && let Some(&height) = table.get(&key) {
        stats.hits += 1;
        return height;
    }
    stats.misses += 1;
    let height = measure();
    debug_assert!(
        height.is_finite(),
        "measured heights must be finite; got {height} for {key:?}"
    );
    if enabled {
        table.insert(key, height);
    }
    height
}
