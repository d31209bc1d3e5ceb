// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`ListSource`] trait.

use kurbo::Insets;
use parterre_flow::{Coordinate, DecorationSpec, ElementKind};

/// Data and measuring logic behind a [`SectionedList`](crate::SectionedList).
///
/// Unlike a [`GeometryProvider`](parterre_flow::GeometryProvider), a source does not
/// know its element heights up front. It chooses a width for each element, and the
/// list measures the height by configuring a reusable [`Template`](Self::Template)
/// for that element. Those heights are memoized when caching is enabled.
///
/// Measurements must only depend on the source's data and the width handed in.
pub trait ListSource {
    /// Off-screen element used to measure natural heights.
    type Template;

    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Builds a fresh template for elements of `kind`.
    ///
    /// Called at most once per kind for the lifetime of the list.
    fn new_template(&self, kind: ElementKind) -> Self::Template;

    /// Width of one item, given the width between the section's side insets.
    fn item_width(&self, _coordinate: Coordinate, available: f64) -> f64 {
        available
    }

    /// Configures `template` for the item at `coordinate` and returns its height at `width`.
    fn measure_item(
        &self,
        template: &mut Self::Template,
        coordinate: Coordinate,
        width: f64,
    ) -> f64;

    /// Width of the header of `section`, or `None` if the section has no header.
    ///
    /// `available` is the full container width.
    fn header_width(&self, _section: usize, _available: f64) -> Option<f64> {
        None
    }

    /// Configures `template` for the header of `section` and returns its height.
    fn measure_header(&self, _template: &mut Self::Template, _section: usize, _width: f64) -> f64 {
        0.0
    }

    /// Width of the footer of `section`, or `None` if the section has no footer.
    fn footer_width(&self, _section: usize, _available: f64) -> Option<f64> {
        None
    }

    /// Configures `template` for the footer of `section` and returns its height.
    fn measure_footer(&self, _template: &mut Self::Template, _section: usize, _width: f64) -> f64 {
        0.0
    }

    /// Insets around the items of `section`.
    fn section_insets(&self, _section: usize) -> Insets {
        Insets::ZERO
    }

    /// Horizontal gap between neighbours in a row.
    fn interitem_spacing(&self) -> f64 {
        0.0
    }

    /// Vertical gap between rows.
    fn line_spacing(&self) -> f64 {
        0.0
    }

    /// Backdrop settings for `section`; `None` for no backdrop.
    fn decoration(&self, _section: usize) -> Option<DecorationSpec> {
        None
    }
}
