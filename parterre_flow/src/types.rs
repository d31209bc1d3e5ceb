// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: coordinates, element kinds, decoration frames, and per-section results.

use alloc::vec::Vec;

use kurbo::{Rect, RoundedRect, RoundedRectRadii};

/// Z-index of item frames.
pub const ITEM_Z_INDEX: i32 = 0;

/// Z-index of header and footer frames.
pub const SUPPLEMENTARY_Z_INDEX: i32 = 0;

/// Z-index of decoration regions. Always below item content so the region renders as a backdrop.
pub const DECORATION_Z_INDEX: i32 = -1;

/// Identifies one item in a sectioned collection.
///
/// Ordering is by section, then by item, which is also the layout scan order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl Coordinate {
    /// Create a coordinate from a section and item index.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// The kind of element a frame belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A regular item (cell).
    Item,
    /// A section header.
    Header,
    /// A section footer.
    Footer,
    /// A section's backdrop region.
    Decoration,
}

impl ElementKind {
    /// The filter bit matching this kind.
    pub const fn as_filter(self) -> ElementKinds {
        match self {
            Self::Item => ElementKinds::ITEMS,
            Self::Header => ElementKinds::HEADERS,
            Self::Footer => ElementKinds::FOOTERS,
            Self::Decoration => ElementKinds::DECORATIONS,
        }
    }
}

bitflags::bitflags! {
    /// Element kinds included in a rectangle query.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementKinds: u8 {
        /// Item frames.
        const ITEMS       = 0b0000_0001;
        /// Header frames.
        const HEADERS     = 0b0000_0010;
        /// Footer frames.
        const FOOTERS     = 0b0000_0100;
        /// Decoration regions.
        const DECORATIONS = 0b0000_1000;
    }
}

impl Default for ElementKinds {
    fn default() -> Self {
        Self::all()
    }
}

bitflags::bitflags! {
    /// Corners of a decoration region that receive the corner radius.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Top-left corner.
        const TOP_LEFT     = 0b0000_0001;
        /// Top-right corner.
        const TOP_RIGHT    = 0b0000_0010;
        /// Bottom-left corner.
        const BOTTOM_LEFT  = 0b0000_0100;
        /// Bottom-right corner.
        const BOTTOM_RIGHT = 0b0000_1000;
        /// Both top corners.
        const TOP    = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Both bottom corners.
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

/// Visual style carried by a decoration region.
///
/// The layout engine never interprets the style; it is handed through to the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
    /// Fill color as straight RGBA.
    pub fill: [u8; 4],
    /// Radius applied to each corner in `corners`.
    pub corner_radius: f64,
    /// Which corners are rounded.
    pub corners: Corners,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            fill: [0, 0, 0, 0],
            corner_radius: 0.0,
            corners: Corners::empty(),
        }
    }
}

impl BackgroundStyle {
    /// Per-corner radii, zero for corners not in `corners`.
    pub fn radii(&self) -> RoundedRectRadii {
        let r = |corner: Corners| {
            if self.corners.contains(corner) {
                self.corner_radius.max(0.0)
            } else {
                0.0
            }
        };
        RoundedRectRadii::new(
            r(Corners::TOP_LEFT),
            r(Corners::TOP_RIGHT),
            r(Corners::BOTTOM_RIGHT),
            r(Corners::BOTTOM_LEFT),
        )
    }
}

/// A section's backdrop region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecorationFrame {
    /// Region rectangle in content space.
    pub frame: Rect,
    /// Stacking order; always [`DECORATION_Z_INDEX`].
    pub z_index: i32,
    /// Style handed through to the renderer.
    pub style: BackgroundStyle,
}

impl DecorationFrame {
    /// The region as a rounded rectangle with the style's masked corners applied.
    ///
    /// kurbo caps every radius at half the shorter side of the frame, so a short
    /// region gets smaller corners than [`BackgroundStyle::radii`] reports.
    pub fn shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.frame, self.style.radii())
    }
}

/// One result of a rectangle query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementFrame {
    /// What the frame belongs to.
    pub kind: ElementKind,
    /// Owning coordinate. Headers, footers and decorations use `item = 0`.
    pub coordinate: Coordinate,
    /// Frame in content space.
    pub frame: Rect,
    /// Stacking order.
    pub z_index: i32,
}

/// Computed frames for one section.
///
/// Header and footer slots are always recorded so later sections and decoration
/// regions can be positioned relative to them; [`SectionLayout::header`] and
/// [`SectionLayout::footer`] report them only when they have a non-zero height.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub(crate) header: Rect,
    pub(crate) items: Vec<Rect>,
    pub(crate) footer: Rect,
    pub(crate) content_top: f64,
    pub(crate) decoration: Option<DecorationFrame>,
}

impl SectionLayout {
    /// The header frame, if the header has a height.
    pub fn header(&self) -> Option<Rect> {
        (self.header.height() > 0.0).then_some(self.header)
    }

    /// The header slot, recorded even when the header is absent.
    pub fn header_slot(&self) -> Rect {
        self.header
    }

    /// Item frames in item order.
    pub fn items(&self) -> &[Rect] {
        &self.items
    }

    /// The frame of one item.
    pub fn item(&self, item: usize) -> Option<Rect> {
        self.items.get(item).copied()
    }

    /// Number of items in the section.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The footer frame, if the footer has a height.
    pub fn footer(&self) -> Option<Rect> {
        (self.footer.height() > 0.0).then_some(self.footer)
    }

    /// The footer slot, recorded even when the footer is absent.
    pub fn footer_slot(&self) -> Rect {
        self.footer
    }

    /// The backdrop region, if the section has one.
    pub fn decoration(&self) -> Option<&DecorationFrame> {
        self.decoration.as_ref()
    }

    /// Y coordinate where the first row starts (header bottom plus the top inset, or
    /// the header bottom alone when the section has no items).
    pub fn content_top(&self) -> f64 {
        self.content_top
    }

    /// Bottom of the last item (or [`content_top`](Self::content_top) when empty).
    ///
    /// Earlier items in the last row may reach further down.
    pub fn content_bottom(&self) -> f64 {
        self.items.last().map_or(self.content_top, |r| r.y1)
    }

    /// Top of the section (header slot top).
    pub fn top(&self) -> f64 {
        self.header.y0
    }

    /// Bottom of the section (footer slot bottom); the next section starts here.
    pub fn bottom(&self) -> f64 {
        self.footer.y1
    }
}
