// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid over the frames of one layout epoch.
//!
//! Frames are bucketed into square cells so a rectangle query only touches the cells
//! it overlaps. The index is rebuilt from scratch every epoch; there are no
//! incremental updates.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::types::{
    Coordinate, ElementFrame, ElementKind, ElementKinds, ITEM_Z_INDEX, SUPPLEMENTARY_Z_INDEX,
    SectionLayout,
};

/// Default edge length of one grid cell, in content units.
pub const DEFAULT_CELL_SIZE: f64 = 256.0;

#[derive(Default)]
struct Cell {
    slots: SmallVec<[usize; 8]>,
}

/// Frames spanning more cells than this are kept out of the grid and scanned linearly.
const MAX_CELLS_PER_FRAME: u64 = 64;

/// Inclusive range of occupied cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CellBounds {
    x: (i32, i32),
    y: (i32, i32),
}

impl CellBounds {
    fn include(&mut self, x: (i32, i32), y: (i32, i32)) {
        self.x = (self.x.0.min(x.0), self.x.1.max(x.1));
        self.y = (self.y.0.min(y.0), self.y.1.max(y.1));
    }
}

/// Spatial index over every element frame of a layout.
pub(crate) struct FrameIndex {
    cell_size: f64,
    entries: Vec<ElementFrame>,
    cells: HashMap<(i32, i32), Cell>,
    bounds: Option<CellBounds>,
    /// Slots of frames too large to bucket.
    oversized: Vec<usize>,
}

impl Debug for FrameIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameIndex")
            .field("cell_size", &self.cell_size)
            .field("entries", &self.entries.len())
            .field("cells", &self.cells.len())
            .field("bounds", &self.bounds)
            .field("oversized", &self.oversized.len())
            .finish_non_exhaustive()
    }
}

/// Map a coordinate to a cell along one axis, rounding towards negative infinity.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell indices are intentionally i32; out-of-range values are saturated."
)]
#[inline]
fn cell_coord(value: f64, cell_size: f64) -> i32 {
    let t = value / cell_size;
    let coord = t as i32;
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

/// Number of cells in an inclusive range.
#[inline]
fn span((lo, hi): (i32, i32)) -> u64 {
    (i64::from(hi) - i64::from(lo) + 1).unsigned_abs()
}

/// Strict overlap: shared edges and zero-area rectangles do not intersect.
#[inline]
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

impl FrameIndex {
    /// # Panics
    ///
    /// Panics if `cell_size` is not finite and strictly positive.
    pub(crate) fn new(cell_size: f64) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "index cell size must be finite and strictly positive; got {cell_size}"
        );
        Self {
            cell_size,
            entries: Vec::new(),
            cells: HashMap::new(),
            bounds: None,
            oversized: Vec::new(),
        }
    }

    /// Rebuild from a freshly computed section table.
    ///
    /// Entries are stored per section as decoration, header, items, footer, so slot
    /// order matches back-to-front paint order within a section.
    pub(crate) fn rebuild(&mut self, sections: &[SectionLayout]) {
        self.entries.clear();
        self.cells.clear();
        self.bounds = None;
        self.oversized.clear();
        for (section, layout) in sections.iter().enumerate() {
            let anchor = Coordinate::new(section, 0);
            if let Some(decoration) = layout.decoration() {
                self.push(ElementFrame {
                    kind: ElementKind::Decoration,
                    coordinate: anchor,
                    frame: decoration.frame,
                    z_index: decoration.z_index,
                });
            }
            if let Some(header) = layout.header() {
                self.push(ElementFrame {
                    kind: ElementKind::Header,
                    coordinate: anchor,
                    frame: header,
                    z_index: SUPPLEMENTARY_Z_INDEX,
                });
            }
            for (item, frame) in layout.items().iter().enumerate() {
                self.push(ElementFrame {
                    kind: ElementKind::Item,
                    coordinate: Coordinate::new(section, item),
                    frame: *frame,
                    z_index: ITEM_Z_INDEX,
                });
            }
            if let Some(footer) = layout.footer() {
                self.push(ElementFrame {
                    kind: ElementKind::Footer,
                    coordinate: anchor,
                    frame: footer,
                    z_index: SUPPLEMENTARY_Z_INDEX,
                });
            }
        }
    }

    fn push(&mut self, entry: ElementFrame) {
        let slot = self.entries.len();
        let frame = entry.frame;
        self.entries.push(entry);
        // Zero-area frames can never satisfy a strict overlap test.
        if frame.width() <= 0.0 || frame.height() <= 0.0 {
            return;
        }
        let (ix0, ix1) = self.cell_range(frame.x0, frame.x1);
        let (iy0, iy1) = self.cell_range(frame.y0, frame.y1);
        if span((ix0, ix1)).saturating_mul(span((iy0, iy1))) > MAX_CELLS_PER_FRAME {
            self.oversized.push(slot);
            return;
        }
        match &mut self.bounds {
            Some(bounds) => bounds.include((ix0, ix1), (iy0, iy1)),
            None => {
                self.bounds = Some(CellBounds {
                    x: (ix0, ix1),
                    y: (iy0, iy1),
                });
            }
        }
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                self.cells.entry((ix, iy)).or_default().slots.push(slot);
            }
        }
    }

    fn cell_range(&self, min: f64, max: f64) -> (i32, i32) {
        let c0 = cell_coord(min, self.cell_size);
        let c1 = cell_coord(max, self.cell_size);
        if c0 <= c1 { (c0, c1) } else { (c1, c0) }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Frames of the requested kinds that overlap `rect`, in slot order.
    pub(crate) fn query(&self, rect: Rect, kinds: ElementKinds) -> Vec<ElementFrame> {
        let rect = rect.abs();
        if rect.width() <= 0.0 || rect.height() <= 0.0 || kinds.is_empty() {
            return Vec::new();
        }
        let hit = |slot: &usize| {
            let entry = &self.entries[*slot];
            kinds.contains(entry.kind.as_filter()) && overlaps(&entry.frame, &rect)
        };
        let mut slots: Vec<usize> = self.oversized.iter().copied().filter(hit).collect();

        // Only cells that hold something are visited.
        if let Some(bounds) = self.bounds {
            let (qx0, qx1) = self.cell_range(rect.x0, rect.x1);
            let (qy0, qy1) = self.cell_range(rect.y0, rect.y1);
            let (ix0, ix1) = (qx0.max(bounds.x.0), qx1.min(bounds.x.1));
            let (iy0, iy1) = (qy0.max(bounds.y.0), qy1.min(bounds.y.1));
            if ix0 <= ix1 && iy0 <= iy1 {
                let visited = span((ix0, ix1)).saturating_mul(span((iy0, iy1)));
                if visited > u64::try_from(self.entries.len()).unwrap_or(u64::MAX) {
                    return self.scan(&hit);
                }
                for ix in ix0..=ix1 {
                    for iy in iy0..=iy1 {
                        if let Some(cell) = self.cells.get(&(ix, iy)) {
                            slots.extend(cell.slots.iter().copied().filter(hit));
                        }
                    }
                }
            }
        }
        // Frames spanning several cells are reported once.
        slots.sort_unstable();
        slots.dedup();
        slots.into_iter().map(|slot| self.entries[slot]).collect()
    }

    /// Linear scan over every entry, for queries covering more cells than there are frames.
    fn scan(&self, hit: &impl Fn(&usize) -> bool) -> Vec<ElementFrame> {
        (0..self.entries.len())
            .filter(hit)
            .map(|slot| self.entries[slot])
            .collect()
    }
}
