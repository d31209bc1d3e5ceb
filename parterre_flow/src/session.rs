// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller that owns a [`GeometryProvider`] and the frame tables of the current epoch.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::decoration::apply_decorations;
use crate::flow::flow_wrap_layout;
use crate::frame_index::{DEFAULT_CELL_SIZE, FrameIndex};
use crate::provider::GeometryProvider;
use crate::types::{Coordinate, DecorationFrame, ElementFrame, ElementKinds, SectionLayout};

/// Whether the session's frame tables match the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No valid tables; the next query recomputes.
    Stale,
    /// Tables computed for the current container size and provider data.
    Fresh,
}

/// Which container size changes invalidate the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundsInvalidation {
    /// Any change to the container size invalidates.
    #[default]
    AnyChange,
    /// Only width changes invalidate. Height does not take part in wrapping, so
    /// height-only resizes keep the current tables.
    WidthOnly,
}

/// Tuning knobs for a [`LayoutSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    /// Container resize policy.
    pub bounds_invalidation: BoundsInvalidation,
    /// Edge length of the grid cells used for rectangle queries. Must be finite and
    /// strictly positive.
    pub index_cell_size: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            bounds_invalidation: BoundsInvalidation::AnyChange,
            index_cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Drives the flow-wrap and decoration passes once per epoch and answers frame queries.
///
/// This type:
/// - owns a [`GeometryProvider`] and the container size,
/// - caches the per-section frame tables and a spatial index over them,
/// - becomes [`SessionState::Stale`] on container resizes, data mutations,
///   [`provider_mut`](Self::provider_mut) and explicit invalidation,
/// - recomputes lazily: every query on a stale session runs a full layout pass
///   first, so stale frames are never returned.
///
/// Queries take `&mut self` for that reason. Invalidation is always whole-table.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use parterre_flow::{Coordinate, ElementKinds, LayoutSession, SectionSpec, SectionedGeometry};
///
/// let geometry = SectionedGeometry::new()
///     .with_spacing(4.0, 4.0)
///     .with_section(SectionSpec::with_items([Size::new(60.0, 20.0); 5]));
/// let mut session = LayoutSession::new(geometry, 200.0);
///
/// // Three chips fit on the first row, the rest wrap.
/// assert_eq!(session.frame_for(Coordinate::new(0, 3)), Rect::new(0.0, 24.0, 60.0, 44.0));
///
/// let visible = session.frames_intersecting(Rect::new(0.0, 0.0, 200.0, 10.0), ElementKinds::ITEMS);
/// assert_eq!(visible.len(), 3);
///
/// // Narrowing the container rewraps on the next query.
/// session.set_container_width(130.0);
/// assert_eq!(session.frame_for(Coordinate::new(0, 2)).origin().y, 24.0);
/// ```
pub struct LayoutSession<P: GeometryProvider> {
    provider: P,
    container: Size,
    options: SessionOptions,
    state: SessionState,
    epoch: u64,
    sections: Vec<SectionLayout>,
    index: FrameIndex,
}

impl<P: GeometryProvider> core::fmt::Debug for LayoutSession<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutSession")
            .field("container", &self.container)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("sections", &self.sections.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<P: GeometryProvider> LayoutSession<P> {
    /// Creates a stale session for a container `container_width` wide.
    #[must_use]
    pub fn new(provider: P, container_width: f64) -> Self {
        Self::with_options(
            provider,
            Size::new(container_width, 0.0),
            SessionOptions::default(),
        )
    }

    /// Creates a stale session with explicit container size and options.
    ///
    /// # Panics
    ///
    /// Panics if `options.index_cell_size` is not finite and strictly positive.
    #[must_use]
    pub fn with_options(provider: P, container: Size, options: SessionOptions) -> Self {
        Self {
            provider,
            container: clamp_size(container),
            options,
            state: SessionState::Stale,
            epoch: 0,
            sections: Vec::new(),
            index: FrameIndex::new(options.index_cell_size),
        }
    }

    /// Returns a shared reference to the provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns a mutable reference to the provider, marking the session stale.
    pub fn provider_mut(&mut self) -> &mut P {
        self.mark_stale("provider access");
        &mut self.provider
    }

    /// Consumes the session and returns the provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Returns the options this session was created with.
    #[must_use]
    pub const fn options(&self) -> SessionOptions {
        self.options
    }

    /// Returns the current container size.
    #[must_use]
    pub const fn container_size(&self) -> Size {
        self.container
    }

    /// Sets the container size, invalidating according to [`BoundsInvalidation`].
    pub fn set_container_size(&mut self, size: Size) {
        let size = clamp_size(size);
        if size == self.container {
            return;
        }
        let width_changed = size.width != self.container.width;
        self.container = size;
        match self.options.bounds_invalidation {
            BoundsInvalidation::AnyChange => self.mark_stale("bounds change"),
            BoundsInvalidation::WidthOnly if width_changed => self.mark_stale("width change"),
            BoundsInvalidation::WidthOnly => {}
        }
    }

    /// Sets the container width, keeping the current height.
    pub fn set_container_width(&mut self, width: f64) {
        self.set_container_size(Size::new(width, self.container.height));
    }

    /// Discards the current tables.
    pub fn invalidate(&mut self) {
        self.mark_stale("explicit request");
    }

    /// Records that the provider's data changed (reload, insert, delete, ...).
    pub fn notify_data_changed(&mut self) {
        self.mark_stale("data mutation");
    }

    /// Returns the current state without computing anything.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` if the tables are valid for the current inputs.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.state == SessionState::Fresh
    }

    /// Number of layout passes run so far.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Runs a layout pass if stale.
    pub fn layout(&mut self) {
        if self.state == SessionState::Fresh {
            return;
        }
        let width = self.container.width;
        let mut sections = flow_wrap_layout(&mut self.provider, width);
        apply_decorations(&self.provider, &mut sections, width);
        self.index.rebuild(&sections);
        self.sections = sections;
        self.epoch += 1;
        self.state = SessionState::Fresh;
        log::debug!(
            "layout pass {}: {} sections, {} frames, width {}",
            self.epoch,
            self.sections.len(),
            self.index.len(),
            width
        );
    }

    /// All section tables.
    pub fn sections(&mut self) -> &[SectionLayout] {
        self.layout();
        &self.sections
    }

    /// The table of one section.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of range.
    pub fn section(&mut self, section: usize) -> &SectionLayout {
        self.try_section(section).unwrap_or_else(|| {
            panic!("section {section} out of range");
        })
    }

    /// The table of one section, or `None` if out of range.
    pub fn try_section(&mut self, section: usize) -> Option<&SectionLayout> {
        self.layout();
        self.sections.get(section)
    }

    /// The frame of one item.
    ///
    /// # Panics
    ///
    /// Panics if `coordinate` is out of range; a wrong frame would only surface as a
    /// broken layout much later.
    pub fn frame_for(&mut self, coordinate: Coordinate) -> Rect {
        self.try_frame_for(coordinate).unwrap_or_else(|| {
            panic!(
                "no item at section {} item {}",
                coordinate.section, coordinate.item
            )
        })
    }

    /// The frame of one item, or `None` if out of range.
    pub fn try_frame_for(&mut self, coordinate: Coordinate) -> Option<Rect> {
        self.try_section(coordinate.section)?.item(coordinate.item)
    }

    /// The header frame of `section`, if it has a visible header.
    pub fn header_frame(&mut self, section: usize) -> Option<Rect> {
        self.try_section(section)?.header()
    }

    /// The footer frame of `section`, if it has a visible footer.
    pub fn footer_frame(&mut self, section: usize) -> Option<Rect> {
        self.try_section(section)?.footer()
    }

    /// The backdrop region of `section`, if any.
    pub fn decoration(&mut self, section: usize) -> Option<&DecorationFrame> {
        self.try_section(section)?.decoration()
    }

    /// Frames of the requested kinds overlapping `rect`.
    ///
    /// Results come back section by section, each as decoration, header, items,
    /// footer. Frames that only touch `rect` along an edge are excluded.
    pub fn frames_intersecting(&mut self, rect: Rect, kinds: ElementKinds) -> Vec<ElementFrame> {
        self.layout();
        self.index.query(rect, kinds)
    }

    /// Size of the laid out content: the container width by the last section's bottom.
    pub fn content_size(&mut self) -> Size {
        self.layout();
        let height = self.sections.last().map_or(0.0, SectionLayout::bottom);
        Size::new(self.container.width, height)
    }

    fn mark_stale(&mut self, reason: &str) {
        if self.state == SessionState::Fresh {
            log::trace!("layout invalidated after epoch {}: {reason}", self.epoch);
        }
        self.state = SessionState::Stale;
    }
}

fn clamp_size(size: Size) -> Size {
    debug_assert!(
        size.width.is_finite() && size.height.is_finite(),
        "container size must be finite; got {size:?}"
    );
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Insets, Rect, Size};

    use super::{BoundsInvalidation, LayoutSession, SessionOptions, SessionState};
    use crate::{
        Coordinate, DecorationSpec, ElementKind, ElementKinds, GeometryProvider, SectionSpec,
        SectionedGeometry,
    };

    fn chips() -> SectionedGeometry {
        SectionedGeometry::new()
            .with_spacing(5.0, 5.0)
            .with_section(SectionSpec {
                insets: Insets::new(10.0, 0.0, 10.0, 0.0),
                decoration: Some(DecorationSpec::default()),
                ..SectionSpec::with_items([100.0, 100.0, 100.0, 50.0].map(|w| Size::new(w, 30.0)))
            })
    }

    /// Counts item size queries to observe recomputation.
    struct Counting {
        inner: SectionedGeometry,
        item_queries: usize,
    }

    impl GeometryProvider for Counting {
        fn section_count(&self) -> usize {
            self.inner.section_count()
        }
        fn item_count(&self, section: usize) -> usize {
            self.inner.item_count(section)
        }
        fn item_size(&mut self, coordinate: Coordinate) -> Size {
            self.item_queries += 1;
            self.inner.item_size(coordinate)
        }
    }

    #[test]
    fn starts_stale_and_computes_lazily() {
        let mut session = LayoutSession::new(chips(), 300.0);
        assert_eq!(session.state(), SessionState::Stale);
        assert_eq!(session.epoch(), 0);
        assert_eq!(
            session.frame_for(Coordinate::new(0, 3)),
            Rect::new(115.0, 35.0, 165.0, 65.0)
        );
        assert!(session.is_fresh());
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn repeated_queries_do_not_recompute() {
        let provider = Counting {
            inner: chips(),
            item_queries: 0,
        };
        let mut session = LayoutSession::new(provider, 300.0);
        let first = session.frame_for(Coordinate::new(0, 2));
        let second = session.frame_for(Coordinate::new(0, 2));
        assert_eq!(first.x0.to_bits(), second.x0.to_bits());
        assert_eq!(first.y1.to_bits(), second.y1.to_bits());
        assert_eq!(session.provider().item_queries, 4);
        assert_eq!(session.epoch(), 1);
    }

    #[test]
    fn width_change_rewraps() {
        let mut session = LayoutSession::new(chips(), 300.0);
        assert_eq!(session.frame_for(Coordinate::new(0, 1)).y0, 0.0);
        session.set_container_width(200.0);
        assert_eq!(session.state(), SessionState::Stale);
        assert_eq!(
            session.frame_for(Coordinate::new(0, 1)),
            Rect::new(10.0, 35.0, 110.0, 65.0)
        );
        assert_eq!(session.decoration(0).unwrap().frame.x1, 200.0);
    }

    #[test]
    fn height_only_change_follows_policy() {
        let mut session = LayoutSession::new(chips(), 300.0);
        session.layout();
        session.set_container_size(Size::new(300.0, 500.0));
        assert_eq!(session.state(), SessionState::Stale);

        let options = SessionOptions {
            bounds_invalidation: BoundsInvalidation::WidthOnly,
            ..SessionOptions::default()
        };
        let mut session = LayoutSession::with_options(chips(), Size::new(300.0, 100.0), options);
        session.layout();
        session.set_container_size(Size::new(300.0, 500.0));
        assert!(session.is_fresh());
        session.set_container_size(Size::new(250.0, 500.0));
        assert_eq!(session.state(), SessionState::Stale);
    }

    #[test]
    fn unchanged_size_keeps_tables() {
        let mut session = LayoutSession::new(chips(), 300.0);
        session.layout();
        session.set_container_width(300.0);
        assert!(session.is_fresh());
    }

    #[test]
    fn mutation_through_provider_mut_is_observed() {
        let mut session = LayoutSession::new(chips(), 300.0);
        assert_eq!(session.content_size(), Size::new(300.0, 65.0));
        session.provider_mut().sections_mut()[0]
            .items
            .push(Size::new(200.0, 30.0));
        assert_eq!(session.state(), SessionState::Stale);
        assert_eq!(
            session.frame_for(Coordinate::new(0, 4)),
            Rect::new(10.0, 70.0, 210.0, 100.0)
        );
        assert_eq!(session.content_size(), Size::new(300.0, 100.0));
        assert_eq!(session.epoch(), 2);
    }

    #[test]
    fn notify_and_invalidate_mark_stale() {
        let mut session = LayoutSession::new(chips(), 300.0);
        session.layout();
        session.notify_data_changed();
        assert!(!session.is_fresh());
        session.layout();
        session.invalidate();
        assert!(!session.is_fresh());
    }

    #[test]
    fn rect_queries_include_decoration_below_items() {
        let mut session = LayoutSession::new(chips(), 300.0);
        let hits = session.frames_intersecting(Rect::new(0.0, 0.0, 300.0, 20.0), ElementKinds::all());
        let kinds: Vec<_> = hits.iter().map(|h| (h.kind, h.coordinate.item)).collect();
        assert_eq!(
            kinds,
            [
                (ElementKind::Decoration, 0),
                (ElementKind::Item, 0),
                (ElementKind::Item, 1)
            ]
        );
        assert!(hits[0].z_index < hits[1].z_index);
    }

    #[test]
    fn borrowed_provider_works() {
        let mut geometry = chips();
        let mut session = LayoutSession::new(&mut geometry, 300.0);
        assert_eq!(session.sections().len(), 1);
        assert_eq!(session.try_frame_for(Coordinate::new(0, 9)), None);
        assert_eq!(session.try_frame_for(Coordinate::new(3, 0)), None);
        assert_eq!(session.header_frame(0), None);
    }

    #[test]
    #[should_panic(expected = "no item at section 0 item 9")]
    fn out_of_range_frame_panics() {
        let mut session = LayoutSession::new(chips(), 300.0);
        let _ = session.frame_for(Coordinate::new(0, 9));
    }

    #[test]
    fn everything_query_returns_all_frames() {
        let mut session = LayoutSession::new(chips(), 300.0);
        let everything = Rect::new(0.0, 0.0, f64::MAX, f64::MAX);
        assert_eq!(session.frames_intersecting(everything, ElementKinds::ITEMS).len(), 4);
    }

    #[test]
    #[should_panic(expected = "index cell size must be finite and strictly positive")]
    fn non_positive_index_cell_size_is_rejected() {
        let options = SessionOptions {
            index_cell_size: -1.0,
            ..SessionOptions::default()
        };
        let _ = LayoutSession::with_options(chips(), Size::new(300.0, 0.0), options);
    }
}
