// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parterre Measure: memoized template measurements for sectioned lists.
//!
//! Some item heights can only be found by configuring an off-screen template for
//! the item and asking it how tall it wants to be. This crate keeps:
//!
//! - [`MeasurementCache`]: heights for cells by [`Coordinate`](parterre_flow::Coordinate)
//!   and for headers and footers by section, switched off by default and dropped
//!   wholesale on any data mutation.
//! - [`TemplatePool`]: one measuring template per key, built on first use and kept
//!   across mutations.
//!
//! Both are plain containers. The hosting list decides when to consult them and
//! when to invalidate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod templates;

pub use cache::{CacheStats, MeasurementCache};
pub use templates::TemplatePool;
