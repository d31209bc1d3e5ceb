// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backdrop regions that group a section's content into a single card.

use kurbo::Rect;

use crate::provider::GeometryProvider;
use crate::types::{DECORATION_Z_INDEX, DecorationFrame, SectionLayout};

/// Compute the backdrop region of one section from its already placed frames.
///
/// Returns `None` when the provider does not request a backdrop, or when the section
/// has no items and the region extends to neither header nor footer.
///
/// The region:
/// - vertically bounds the union of the item frames (a zero-height band at
///   [`SectionLayout::content_top`] when there are no items),
/// - grows up to the header slot top when extended to the header, and down to the
///   footer slot bottom when extended to the footer (it never shrinks, so a tall
///   item in the last row stays covered),
/// - spans the full container width horizontally,
/// - is then shrunk by the decoration insets (negative insets expand it), collapsing
///   to zero width or height rather than inverting.
pub fn decoration_region<P>(
    provider: &P,
    section: usize,
    layout: &SectionLayout,
    container_width: f64,
) -> Option<DecorationFrame>
where
    P: GeometryProvider + ?Sized,
{
    if !provider.has_decoration(section) {
        return None;
    }
    let to_header = provider.decoration_extends_to_header(section);
    let to_footer = provider.decoration_extends_to_footer(section);
    if layout.items.is_empty() && !to_header && !to_footer {
        return None;
    }

    let union = layout.items.iter().copied().reduce(|acc, r| acc.union(r)).unwrap_or(
        Rect::new(0.0, layout.content_top, container_width, layout.content_top),
    );

    let insets = provider.decoration_insets(section);
    let top = if to_header { layout.header.y0.min(union.y0) } else { union.y0 } + insets.y0;
    let bottom = if to_footer { layout.footer.y1.max(union.y1) } else { union.y1 } - insets.y1;

    Some(DecorationFrame {
        frame: Rect::new(
            insets.x0,
            top,
            (container_width - insets.x1).max(insets.x0),
            bottom.max(top),
        ),
        z_index: DECORATION_Z_INDEX,
        style: provider.decoration_style(section),
    })
}

/// Fill in [`SectionLayout::decoration`] for every section.
pub fn apply_decorations<P>(provider: &P, sections: &mut [SectionLayout], container_width: f64)
where
    P: GeometryProvider + ?Sized,
{
    for (section, layout) in sections.iter_mut().enumerate() {
        layout.decoration = decoration_region(provider, section, layout, container_width);
    }
}
