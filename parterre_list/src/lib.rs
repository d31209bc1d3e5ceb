// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parterre List: a self-sizing sectioned list on top of [`parterre_flow`].
//!
//! [`parterre_flow`] lays out elements whose sizes are known. Lists of tags, chips
//! or cards usually only know a width for each element and have to measure the
//! height by configuring an off-screen template. This crate connects the two:
//!
//! - [`ListSource`]: the host's data. It picks widths, builds one template per
//!   element kind, and measures heights with it.
//! - [`MeasuredGeometry`]: a [`GeometryProvider`](parterre_flow::GeometryProvider)
//!   over a [`ListSource`] that consults a
//!   [`MeasurementCache`](parterre_measure::MeasurementCache) before measuring.
//! - [`SectionedList`]: owns both plus a
//!   [`LayoutSession`](parterre_flow::LayoutSession), and turns every
//!   [`ListMutation`] into a cache flush and a full relayout.
//!
//! Caching is disabled by default; enable it with
//! [`SectionedList::set_caching_enabled`] when measuring is expensive.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod list;
mod source;

pub use geometry::MeasuredGeometry;
pub use list::{ListMutation, SectionedList};
pub use source::ListSource;
