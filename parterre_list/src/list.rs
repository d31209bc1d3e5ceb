// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`SectionedList`]: a layout session over a measured [`ListSource`].

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use parterre_flow::{
    Coordinate, DecorationFrame, ElementFrame, ElementKinds, LayoutSession, SectionLayout,
    SessionOptions, SessionState,
};
use parterre_measure::MeasurementCache;

use crate::geometry::MeasuredGeometry;
use crate::source::ListSource;

/// A change to the data behind a [`SectionedList`].
///
/// Item coordinates and section indices refer to the data after the change for
/// insertions and reloads, and before the change for deletions. They are recorded
/// for logging only: every mutation drops all cached measurements and the whole
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMutation<'a> {
    /// Everything may have changed.
    ReloadData,
    /// The content of these items changed.
    ReloadItems(&'a [Coordinate]),
    /// The content of these sections changed.
    ReloadSections(&'a [usize]),
    /// Items were inserted at these coordinates.
    InsertItems(&'a [Coordinate]),
    /// Items were removed from these coordinates.
    DeleteItems(&'a [Coordinate]),
    /// Sections were inserted at these indices.
    InsertSections(&'a [usize]),
    /// Sections were removed from these indices.
    DeleteSections(&'a [usize]),
}

impl ListMutation<'_> {
    /// Number of items or sections named by the mutation; zero for a full reload.
    pub fn len(&self) -> usize {
        match self {
            Self::ReloadData => 0,
            Self::ReloadItems(items) | Self::InsertItems(items) | Self::DeleteItems(items) => {
                items.len()
            }
            Self::ReloadSections(sections)
            | Self::InsertSections(sections)
            | Self::DeleteSections(sections) => sections.len(),
        }
    }

    /// Returns `true` if the mutation names no item or section.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A self-sizing sectioned list.
///
/// The list owns a [`ListSource`], a [`MeasurementCache`], one measuring template
/// per element kind and a [`LayoutSession`] that lays everything out with
/// flow-wrap rows and optional backdrop regions.
///
/// Data changes must go through [`apply`](Self::apply) (or one of the named
/// mutation methods, or [`edit`](Self::edit)). Each of them drops every cached
/// height and marks the layout stale, so the next query re-measures what it
/// needs. Container resizes mark the layout stale but keep cached heights.
///
/// ```rust
/// use kurbo::Insets;
/// use parterre_flow::{Coordinate, ElementKind};
/// use parterre_list::{ListSource, SectionedList};
///
/// struct Tags(Vec<&'static str>);
///
/// impl ListSource for Tags {
///     type Template = ();
///
///     fn section_count(&self) -> usize {
///         1
///     }
///     fn item_count(&self, _: usize) -> usize {
///         self.0.len()
///     }
///     fn new_template(&self, _: ElementKind) {}
///     fn item_width(&self, at: Coordinate, available: f64) -> f64 {
///         (10.0 * self.0[at.item].len() as f64).min(available)
///     }
///     fn measure_item(&self, _: &mut (), _: Coordinate, _: f64) -> f64 {
///         20.0
///     }
///     fn interitem_spacing(&self) -> f64 {
///         5.0
///     }
///     fn line_spacing(&self) -> f64 {
///         5.0
///     }
/// }
///
/// let mut list = SectionedList::new(Tags(vec!["rust", "kurbo", "layout"]), 100.0);
/// list.set_caching_enabled(true);
/// assert_eq!(list.frame_for(Coordinate::new(0, 1)).x0, 45.0);
/// // "layout" does not fit after "kurbo" and wraps.
/// assert_eq!(list.frame_for(Coordinate::new(0, 2)).y0, 25.0);
///
/// list.edit_source(|tags| tags.0.insert(0, "ui"));
/// list.insert_items(&[Coordinate::new(0, 0)]);
/// assert_eq!(list.frame_for(Coordinate::new(0, 1)).x0, 25.0);
/// ```
pub struct SectionedList<S: ListSource> {
    session: LayoutSession<MeasuredGeometry<S>>,
}

impl<S: ListSource> core::fmt::Debug for SectionedList<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionedList")
            .field("session", &self.session)
            .field("cache", self.cache())
            .finish()
    }
}

impl<S: ListSource> SectionedList<S> {
    /// Creates a list for a container `container_width` wide. Caching starts disabled.
    pub fn new(source: S, container_width: f64) -> Self {
        Self::with_options(
            source,
            Size::new(container_width, 0.0),
            SessionOptions::default(),
        )
    }

    /// Creates a list with explicit container size and session options.
    pub fn with_options(source: S, container: Size, options: SessionOptions) -> Self {
        let geometry = MeasuredGeometry::new(source, container.width);
        Self {
            session: LayoutSession::with_options(geometry, container, options),
        }
    }

    /// The data source.
    pub fn source(&self) -> &S {
        self.session.provider().source()
    }

    /// Consumes the list and returns the data source.
    pub fn into_source(self) -> S {
        self.session.into_provider().into_source()
    }

    /// The underlying layout session.
    pub fn session(&self) -> &LayoutSession<MeasuredGeometry<S>> {
        &self.session
    }

    /// The measurement cache.
    pub fn cache(&self) -> &MeasurementCache {
        self.session.provider().cache()
    }

    /// Returns `true` if measured heights are memoized.
    pub fn caching_enabled(&self) -> bool {
        self.cache().is_enabled()
    }

    /// Switches height memoization on or off. Switching off drops every entry.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        if self.caching_enabled() != enabled {
            self.session.provider_mut().cache_mut().set_enabled(enabled);
        }
    }

    /// Runs `edit` on the source and then reports `mutation`.
    pub fn edit<R>(&mut self, mutation: ListMutation<'_>, edit: impl FnOnce(&mut S) -> R) -> R {
        let result = self.edit_source(edit);
        self.apply(mutation);
        result
    }

    /// Runs `edit` on the source without reporting a mutation.
    ///
    /// Follow up with [`apply`](Self::apply) or a named mutation method whenever
    /// counts or sizes changed; until then cached heights may be out of date.
    pub fn edit_source<R>(&mut self, edit: impl FnOnce(&mut S) -> R) -> R {
        edit(self.session.provider_mut().source_mut())
    }

    /// Reports a data change: drops cached heights and marks the layout stale.
    pub fn apply(&mut self, mutation: ListMutation<'_>) {
        let geometry = self.session.provider_mut();
        let dropped = geometry.cache().len();
        geometry.cache_mut().invalidate_all();
        self.session.notify_data_changed();
        log::debug!("{mutation:?}: dropped {dropped} cached heights");
    }

    /// Reports that everything may have changed.
    pub fn reload_data(&mut self) {
        self.apply(ListMutation::ReloadData);
    }

    /// Reports that the content of `items` changed.
    pub fn reload_items(&mut self, items: &[Coordinate]) {
        self.apply(ListMutation::ReloadItems(items));
    }

    /// Reports that the content of `sections` changed.
    pub fn reload_sections(&mut self, sections: &[usize]) {
        self.apply(ListMutation::ReloadSections(sections));
    }

    /// Reports that items were inserted at `items`.
    pub fn insert_items(&mut self, items: &[Coordinate]) {
        self.apply(ListMutation::InsertItems(items));
    }

    /// Reports that items were removed from `items`.
    pub fn delete_items(&mut self, items: &[Coordinate]) {
        self.apply(ListMutation::DeleteItems(items));
    }

    /// Reports that sections were inserted at `sections`.
    pub fn insert_sections(&mut self, sections: &[usize]) {
        self.apply(ListMutation::InsertSections(sections));
    }

    /// Reports that sections were removed from `sections`.
    pub fn delete_sections(&mut self, sections: &[usize]) {
        self.apply(ListMutation::DeleteSections(sections));
    }

    /// Laid out height of the item at `coordinate`, measuring if needed.
    pub fn cell_height(&mut self, coordinate: Coordinate) -> Option<f64> {
        self.session.try_frame_for(coordinate).map(|frame| frame.height())
    }

    /// Laid out header height of `section`; zero when it has no header.
    pub fn header_height(&mut self, section: usize) -> Option<f64> {
        self.session
            .try_section(section)
            .map(|layout| layout.header_slot().height())
    }

    /// Laid out footer height of `section`; zero when it has no footer.
    pub fn footer_height(&mut self, section: usize) -> Option<f64> {
        self.session
            .try_section(section)
            .map(|layout| layout.footer_slot().height())
    }

    /// Returns the current container size.
    pub fn container_size(&self) -> Size {
        self.session.container_size()
    }

    /// Resizes the container. Cached heights are kept.
    pub fn set_container_size(&mut self, size: Size) {
        let width_changed = size.width.max(0.0) != self.session.container_size().width;
        self.session.set_container_size(size);
        if width_changed {
            self.session.provider_mut().set_container_width(size.width);
        }
    }

    /// Sets the container width, keeping the current height.
    pub fn set_container_width(&mut self, width: f64) {
        let height = self.container_size().height;
        self.set_container_size(Size::new(width, height));
    }

    /// Discards the current layout without touching cached heights.
    pub fn invalidate(&mut self) {
        self.session.invalidate();
    }

    /// Returns the layout state without computing anything.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Number of layout passes run so far.
    pub fn epoch(&self) -> u64 {
        self.session.epoch()
    }

    /// Runs a layout pass if stale.
    pub fn layout(&mut self) {
        self.session.layout();
    }

    /// All section tables.
    pub fn sections(&mut self) -> &[SectionLayout] {
        self.session.sections()
    }

    /// The frame of one item.
    ///
    /// # Panics
    ///
    /// Panics if `coordinate` is out of range.
    pub fn frame_for(&mut self, coordinate: Coordinate) -> Rect {
        self.session.frame_for(coordinate)
    }

    /// The frame of one item, or `None` if out of range.
    pub fn try_frame_for(&mut self, coordinate: Coordinate) -> Option<Rect> {
        self.session.try_frame_for(coordinate)
    }

    /// The header frame of `section`, if it has a visible header.
    pub fn header_frame(&mut self, section: usize) -> Option<Rect> {
        self.session.header_frame(section)
    }

    /// The footer frame of `section`, if it has a visible footer.
    pub fn footer_frame(&mut self, section: usize) -> Option<Rect> {
        self.session.footer_frame(section)
    }

    /// The backdrop region of `section`, if any.
    pub fn decoration(&mut self, section: usize) -> Option<&DecorationFrame> {
        self.session.decoration(section)
    }

    /// Frames of the requested kinds overlapping `rect`.
    pub fn frames_intersecting(&mut self, rect: Rect, kinds: ElementKinds) -> Vec<ElementFrame> {
        self.session.frames_intersecting(rect, kinds)
    }

    /// Size of the laid out content.
    pub fn content_size(&mut self) -> Size {
        self.session.content_size()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::{Insets, Rect, Size};
    use parterre_flow::{
        BoundsInvalidation, Coordinate, DecorationSpec, ElementKind, ElementKinds, SessionOptions,
        SessionState,
    };

    use super::{ListMutation, SectionedList};
    use crate::ListSource;

    /// Sections of chips; each chip is `len * 10` wide and 20 tall.
    #[derive(Default)]
    struct Chips {
        sections: Vec<Vec<u32>>,
        titled: bool,
        measured: Cell<u32>,
    }

    impl Chips {
        fn new(sections: Vec<Vec<u32>>) -> Self {
            Self {
                sections,
                ..Self::default()
            }
        }
    }

    impl ListSource for Chips {
        type Template = ();

        fn section_count(&self) -> usize {
            self.sections.len()
        }

        fn item_count(&self, section: usize) -> usize {
            self.sections[section].len()
        }

        fn new_template(&self, _kind: ElementKind) {}

        fn item_width(&self, at: Coordinate, available: f64) -> f64 {
            f64::from(self.sections[at.section][at.item] * 10).min(available)
        }

        fn measure_item(&self, _: &mut (), _: Coordinate, _: f64) -> f64 {
            self.measured.set(self.measured.get() + 1);
            20.0
        }

        fn header_width(&self, _section: usize, available: f64) -> Option<f64> {
            self.titled.then_some(available / 2.0)
        }

        fn measure_header(&self, _: &mut (), _: usize, _: f64) -> f64 {
            16.0
        }

        fn section_insets(&self, _section: usize) -> Insets {
            Insets::new(10.0, 4.0, 10.0, 4.0)
        }

        fn interitem_spacing(&self) -> f64 {
            5.0
        }

        fn line_spacing(&self) -> f64 {
            5.0
        }

        fn decoration(&self, _section: usize) -> Option<DecorationSpec> {
            self.titled.then(|| DecorationSpec {
                extends_to_header: true,
                ..DecorationSpec::default()
            })
        }
    }

    #[test]
    fn lays_out_measured_chips() {
        let mut list = SectionedList::new(Chips::new(vec![vec![10, 10, 10, 5]]), 300.0);
        let frames: Vec<Rect> = (0..4)
            .map(|i| list.frame_for(Coordinate::new(0, i)))
            .collect();
        assert_eq!(
            frames,
            vec![
                Rect::new(10.0, 4.0, 110.0, 24.0),
                Rect::new(115.0, 4.0, 215.0, 24.0),
                Rect::new(10.0, 29.0, 110.0, 49.0),
                Rect::new(115.0, 29.0, 165.0, 49.0),
            ]
        );
        assert_eq!(list.cell_height(Coordinate::new(0, 3)), Some(20.0));
        assert_eq!(list.cell_height(Coordinate::new(0, 4)), None);
        assert_eq!(list.content_size(), Size::new(300.0, 53.0));
    }

    #[test]
    fn caching_is_off_by_default() {
        let mut list = SectionedList::new(Chips::new(vec![vec![3, 4]]), 200.0);
        assert!(!list.caching_enabled());
        list.layout();
        list.invalidate();
        list.layout();
        assert_eq!(list.source().measured.get(), 4);
        assert!(list.cache().is_empty());
    }

    #[test]
    fn cached_heights_survive_relayout_and_resize() {
        let mut list = SectionedList::new(Chips::new(vec![vec![3, 4, 5]]), 200.0);
        list.set_caching_enabled(true);
        list.layout();
        list.invalidate();
        list.set_container_width(120.0);
        list.layout();
        assert_eq!(list.epoch(), 2);
        assert_eq!(list.source().measured.get(), 3);
        assert_eq!(list.cache().len(), 3);
    }

    #[test]
    fn every_mutation_drops_the_cache_and_the_layout() {
        let mut list = SectionedList::new(Chips::new(vec![vec![3, 4], vec![5]]), 200.0);
        list.set_caching_enabled(true);
        let at = [Coordinate::new(0, 0)];
        let sections = [1];
        let mutations = [
            ListMutation::ReloadData,
            ListMutation::ReloadItems(&at),
            ListMutation::ReloadSections(&sections),
            ListMutation::InsertItems(&at),
            ListMutation::DeleteItems(&at),
            ListMutation::InsertSections(&sections),
            ListMutation::DeleteSections(&sections),
        ];
        for mutation in mutations {
            list.layout();
            assert_eq!(list.cache().len(), 3);
            list.apply(mutation);
            assert!(list.cache().is_empty(), "{mutation:?} kept cached heights");
            assert_eq!(list.state(), SessionState::Stale);
        }
        assert_eq!(list.cache().stats().invalidations, 7);
    }

    #[test]
    fn edit_applies_data_then_notifies() {
        let mut list = SectionedList::new(Chips::new(vec![vec![3, 4]]), 200.0);
        list.set_caching_enabled(true);
        assert_eq!(list.frame_for(Coordinate::new(0, 1)).x0, 45.0);
        let removed = list.edit(ListMutation::DeleteItems(&[Coordinate::new(0, 0)]), |chips| {
            chips.sections[0].remove(0)
        });
        assert_eq!(removed, 3);
        assert_eq!(list.frame_for(Coordinate::new(0, 0)), Rect::new(10.0, 4.0, 50.0, 24.0));
        assert_eq!(list.try_frame_for(Coordinate::new(0, 1)), None);
    }

    #[test]
    fn headers_measured_once_and_decorated() {
        let chips = Chips {
            titled: true,
            ..Chips::new(vec![vec![4, 4], vec![4]])
        };
        let mut list = SectionedList::new(chips, 200.0);
        list.set_caching_enabled(true);
        assert_eq!(list.header_frame(0), Some(Rect::new(50.0, 0.0, 150.0, 16.0)));
        assert_eq!(list.header_height(1), Some(16.0));
        assert_eq!(list.footer_height(1), Some(0.0));
        assert_eq!(list.footer_frame(1), None);
        assert_eq!(list.header_height(2), None);
        let decoration = list.decoration(0).map(|d| d.frame);
        assert_eq!(decoration, Some(Rect::new(0.0, 0.0, 200.0, 40.0)));
        assert_eq!(list.cache().cached_header_height(1), Some(16.0));
        assert_eq!(list.session().provider().templates().len(), 2);
    }

    #[test]
    fn visible_frames_include_backdrops() {
        let chips = Chips {
            titled: true,
            ..Chips::new(vec![vec![4, 4]])
        };
        let mut list = SectionedList::new(chips, 200.0);
        let kinds: Vec<ElementKind> = list
            .frames_intersecting(Rect::new(0.0, 0.0, 200.0, 100.0), ElementKinds::all())
            .iter()
            .map(|frame| frame.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Decoration,
                ElementKind::Header,
                ElementKind::Item,
                ElementKind::Item
            ]
        );
    }

    #[test]
    fn height_only_resize_respects_the_policy() {
        let options = SessionOptions {
            bounds_invalidation: BoundsInvalidation::WidthOnly,
            ..SessionOptions::default()
        };
        let mut list =
            SectionedList::with_options(Chips::new(vec![vec![4]]), Size::new(200.0, 50.0), options);
        list.layout();
        list.set_container_size(Size::new(200.0, 400.0));
        assert_eq!(list.state(), SessionState::Fresh);
        list.set_container_width(100.0);
        assert_eq!(list.state(), SessionState::Stale);
        assert_eq!(list.session().provider().container_width(), 100.0);
    }

    #[test]
    fn disabling_caching_drops_entries() {
        let mut list = SectionedList::new(Chips::new(vec![vec![4, 4]]), 200.0);
        list.set_caching_enabled(true);
        list.layout();
        assert_eq!(list.cache().len(), 2);
        list.set_caching_enabled(false);
        assert!(list.cache().is_empty());
    }

    #[test]
    fn mutation_len_counts_named_targets() {
        assert!(ListMutation::ReloadData.is_empty());
        assert_eq!(ListMutation::DeleteSections(&[0, 2]).len(), 2);
        assert_eq!(
            ListMutation::InsertItems(&[Coordinate::new(0, 0), Coordinate::new(0, 1)]).len(),
            2
        );
    }
}
