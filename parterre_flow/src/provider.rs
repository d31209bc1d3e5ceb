// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`GeometryProvider`] trait and an in-memory implementation.

use alloc::vec::Vec;

use kurbo::{Insets, Size};

use crate::types::{BackgroundStyle, Coordinate};

/// Read-only source of everything the layout algorithms need.
///
/// Insets use kurbo's edge naming: `x0` is left, `y0` is top, `x1` is right and
/// `y1` is bottom. Positive values move content inwards.
///
/// Size queries take `&mut self` so implementations are free to memoize expensive
/// measurements without interior mutability. They must still be deterministic for
/// as long as the layout stays fresh. Counts and settings take `&self`.
///
/// Asking for a section or item outside the reported counts is a contract
/// violation; implementations may panic.
pub trait GeometryProvider {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Intrinsic size of one item. Must be finite and non-negative.
    fn item_size(&mut self, coordinate: Coordinate) -> Size;

    /// Intrinsic header size. A zero height means the header is absent.
    fn header_size(&mut self, _section: usize) -> Size {
        Size::ZERO
    }

    /// Intrinsic footer size. A zero height means the footer is absent.
    fn footer_size(&mut self, _section: usize) -> Size {
        Size::ZERO
    }

    /// Insets around the section's items.
    fn section_insets(&self, _section: usize) -> Insets {
        Insets::ZERO
    }

    /// Horizontal gap between neighbours in a row. Shared by all sections.
    fn interitem_spacing(&self) -> f64 {
        0.0
    }

    /// Vertical gap between rows. Shared by all sections.
    fn line_spacing(&self) -> f64 {
        0.0
    }

    /// Whether `section` gets a backdrop region.
    fn has_decoration(&self, _section: usize) -> bool {
        false
    }

    /// Insets applied to the backdrop region. Negative values expand it.
    fn decoration_insets(&self, _section: usize) -> Insets {
        Insets::ZERO
    }

    /// Whether the backdrop region grows upwards to enclose the header.
    fn decoration_extends_to_header(&self, _section: usize) -> bool {
        false
    }

    /// Whether the backdrop region grows downwards to enclose the footer.
    fn decoration_extends_to_footer(&self, _section: usize) -> bool {
        false
    }

    /// Style handed through to the backdrop renderer.
    fn decoration_style(&self, _section: usize) -> BackgroundStyle {
        BackgroundStyle::default()
    }
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for &mut P {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }
    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }
    fn item_size(&mut self, coordinate: Coordinate) -> Size {
        (**self).item_size(coordinate)
    }
    fn header_size(&mut self, section: usize) -> Size {
        (**self).header_size(section)
    }
    fn footer_size(&mut self, section: usize) -> Size {
        (**self).footer_size(section)
    }
    fn section_insets(&self, section: usize) -> Insets {
        (**self).section_insets(section)
    }
    fn interitem_spacing(&self) -> f64 {
        (**self).interitem_spacing()
    }
    fn line_spacing(&self) -> f64 {
        (**self).line_spacing()
    }
    fn has_decoration(&self, section: usize) -> bool {
        (**self).has_decoration(section)
    }
    fn decoration_insets(&self, section: usize) -> Insets {
        (**self).decoration_insets(section)
    }
    fn decoration_extends_to_header(&self, section: usize) -> bool {
        (**self).decoration_extends_to_header(section)
    }
    fn decoration_extends_to_footer(&self, section: usize) -> bool {
        (**self).decoration_extends_to_footer(section)
    }
    fn decoration_style(&self, section: usize) -> BackgroundStyle {
        (**self).decoration_style(section)
    }
}

/// Backdrop settings for one section of a [`SectionedGeometry`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DecorationSpec {
    /// Insets applied to the region.
    pub insets: Insets,
    /// Grow the region to enclose the header.
    pub extends_to_header: bool,
    /// Grow the region to enclose the footer.
    pub extends_to_footer: bool,
    /// Renderer style.
    pub style: BackgroundStyle,
}

/// One section of a [`SectionedGeometry`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionSpec {
    /// Intrinsic item sizes in order.
    pub items: Vec<Size>,
    /// Header size; zero height for none.
    pub header: Size,
    /// Footer size; zero height for none.
    pub footer: Size,
    /// Insets around the items.
    pub insets: Insets,
    /// Backdrop settings; `None` for no backdrop.
    pub decoration: Option<DecorationSpec>,
}

impl SectionSpec {
    /// A section with the given item sizes and nothing else.
    pub fn with_items(items: impl IntoIterator<Item = Size>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// A [`GeometryProvider`] over sizes that are known up front.
///
/// ```rust
/// use kurbo::{Insets, Size};
/// use parterre_flow::{LayoutSession, SectionSpec, SectionedGeometry, Coordinate};
///
/// let geometry = SectionedGeometry::new()
///     .with_spacing(5.0, 5.0)
///     .with_section(SectionSpec {
///         insets: Insets::new(10.0, 0.0, 10.0, 0.0),
///         ..SectionSpec::with_items([Size::new(100.0, 30.0); 4])
///     });
/// let mut session = LayoutSession::new(geometry, 300.0);
/// assert_eq!(session.frame_for(Coordinate::new(0, 2)).origin().y, 35.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionedGeometry {
    sections: Vec<SectionSpec>,
    interitem_spacing: f64,
    line_spacing: f64,
}

impl SectionedGeometry {
    /// An empty geometry with zero spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interitem and line spacing.
    #[must_use]
    pub fn with_spacing(mut self, interitem: f64, line: f64) -> Self {
        self.interitem_spacing = interitem;
        self.line_spacing = line;
        self
    }

    /// Append a section.
    #[must_use]
    pub fn with_section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    /// All sections.
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Mutable access to the sections, for inserting, deleting and resizing.
    pub fn sections_mut(&mut self) -> &mut Vec<SectionSpec> {
        &mut self.sections
    }

    /// Update the interitem and line spacing.
    pub fn set_spacing(&mut self, interitem: f64, line: f64) {
        self.interitem_spacing = interitem;
        self.line_spacing = line;
    }

    fn spec(&self, section: usize) -> &SectionSpec {
        self.sections.get(section).unwrap_or_else(|| {
            panic!(
                "section {section} out of range ({} sections)",
                self.sections.len()
            )
        })
    }
}

impl GeometryProvider for SectionedGeometry {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.spec(section).items.len()
    }

    fn item_size(&mut self, coordinate: Coordinate) -> Size {
        let spec = self.spec(coordinate.section);
        *spec.items.get(coordinate.item).unwrap_or_else(|| {
            panic!(
                "item {} out of range in section {} ({} items)",
                coordinate.item,
                coordinate.section,
                spec.items.len()
            )
        })
    }

    fn header_size(&mut self, section: usize) -> Size {
        self.spec(section).header
    }

    fn footer_size(&mut self, section: usize) -> Size {
        self.spec(section).footer
    }

    fn section_insets(&self, section: usize) -> Insets {
        self.spec(section).insets
    }

    fn interitem_spacing(&self) -> f64 {
        self.interitem_spacing
    }

    fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    fn has_decoration(&self, section: usize) -> bool {
        self.spec(section).decoration.is_some()
    }

    fn decoration_insets(&self, section: usize) -> Insets {
        self.spec(section)
            .decoration
            .map(|d| d.insets)
            .unwrap_or(Insets::ZERO)
    }

    fn decoration_extends_to_header(&self, section: usize) -> bool {
        self.spec(section)
            .decoration
            .is_some_and(|d| d.extends_to_header)
    }

    fn decoration_extends_to_footer(&self, section: usize) -> bool {
        self.spec(section)
            .decoration
            .is_some_and(|d| d.extends_to_footer)
    }

    fn decoration_style(&self, section: usize) -> BackgroundStyle {
        self.spec(section)
            .decoration
            .map(|d| d.style)
            .unwrap_or_default()
    }
}
