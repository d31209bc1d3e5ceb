// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parterre Flow: sectioned item layout for virtualized, recyclable item grids.
//!
//! This crate computes where every element of a sectioned collection goes, without
//! knowing anything about views, widgets, or rendering. A host list reuses a small
//! pool of visual cells and asks this crate which frames are visible.
//!
//! The core concepts are:
//!
//! - [`GeometryProvider`]: the abstract data source. It reports section and item
//!   counts, intrinsic sizes, insets, global spacings, and backdrop settings.
//! - [`flow_wrap_layout`]: places variably sized items left to right, wrapping onto
//!   new rows top to bottom (chip or tag lists), with a centered header above and a
//!   centered footer below each section.
//! - [`decoration_region`]: computes one backdrop rectangle per section that bounds
//!   its items and can extend to enclose the header and footer (grouped cards).
//! - [`LayoutSession`]: owns a provider and a container size, runs both passes once
//!   per epoch, and answers lookups by [`Coordinate`] and by rectangle.
//!
//! All geometry uses [`kurbo`]: frames are [`kurbo::Rect`]s, sizes are
//! [`kurbo::Size`]s, and insets are [`kurbo::Insets`] (`x0` left, `y0` top,
//! `x1` right, `y1` bottom). Origins are top-left in content space.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Rect, Size};
//! use parterre_flow::{Coordinate, LayoutSession, SectionSpec, SectionedGeometry};
//!
//! // Container 300 wide, 10 units of horizontal inset, 5 units of spacing.
//! let geometry = SectionedGeometry::new()
//!     .with_spacing(5.0, 5.0)
//!     .with_section(SectionSpec {
//!         insets: Insets::new(10.0, 0.0, 10.0, 0.0),
//!         ..SectionSpec::with_items([100.0, 100.0, 100.0, 50.0].map(|w| Size::new(w, 30.0)))
//!     });
//! let mut session = LayoutSession::new(geometry, 300.0);
//!
//! assert_eq!(session.frame_for(Coordinate::new(0, 1)), Rect::new(115.0, 0.0, 215.0, 30.0));
//! // The third chip does not fit and wraps onto the second row.
//! assert_eq!(session.frame_for(Coordinate::new(0, 2)), Rect::new(10.0, 35.0, 110.0, 65.0));
//! assert_eq!(session.frame_for(Coordinate::new(0, 3)), Rect::new(115.0, 35.0, 165.0, 65.0));
//! ```
//!
//! ## Invalidation
//!
//! Frame tables are valid for one epoch. A container resize, a data mutation, or an
//! explicit request discards them whole; there is no incremental re-wrap, because
//! every wrap decision depends on the container width and on all earlier items.
//!
//! ## Features
//!
//! - `std` *(default)*: enables `kurbo/std`.
//! - `libm`: enables `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod decoration;
mod flow;
mod frame_index;
mod provider;
mod session;
mod types;

pub use decoration::{apply_decorations, decoration_region};
pub use flow::{flow_wrap_layout, layout_section};
pub use frame_index::DEFAULT_CELL_SIZE;
pub use provider::{DecorationSpec, GeometryProvider, SectionSpec, SectionedGeometry};
pub use session::{BoundsInvalidation, LayoutSession, SessionOptions, SessionState};
pub use types::{
    BackgroundStyle, Coordinate, Corners, DECORATION_Z_INDEX, DecorationFrame, ElementFrame,
    ElementKind, ElementKinds, ITEM_Z_INDEX, SUPPLEMENTARY_Z_INDEX, SectionLayout,
};
