// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow-wrap placement: items run left to right and wrap onto new rows top to bottom.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::provider::GeometryProvider;
use crate::types::{Coordinate, SectionLayout};

/// Lay out every section of `provider` inside a container `container_width` wide.
///
/// Sections are processed in order because each one starts where the previous one
/// ended; items are processed in order because every wrap decision depends on the
/// previous item's frame. Decoration regions are not computed here, see
/// [`apply_decorations`](crate::apply_decorations).
///
/// For each section:
/// - the header is centered horizontally at the section origin,
/// - the first item sits at `(inset.left, header.bottom + inset.top)`,
/// - each following item continues the row after `interitem_spacing`, or wraps to
///   `(inset.left, previous.bottom + line_spacing)` when it would cross
///   `container_width - inset.right`,
/// - the footer is centered at `content_bottom + inset.bottom`, where the content
///   bottom is the bottom of the last item.
///
/// A section without items ends at its header's bottom: its insets are ignored and
/// the footer, if any, follows the header directly.
///
/// An item wider than the row is placed at the left edge and allowed to overflow.
pub fn flow_wrap_layout<P>(provider: &mut P, container_width: f64) -> Vec<SectionLayout>
where
    P: GeometryProvider + ?Sized,
{
    let section_count = provider.section_count();
    let (sections, _) = (0..section_count).fold(
        (Vec::with_capacity(section_count), 0.0_f64),
        |(mut sections, origin_y), section| {
            let layout = layout_section(provider, section, origin_y, container_width);
            let next_origin = layout.bottom();
            sections.push(layout);
            (sections, next_origin)
        },
    );
    sections
}

/// Lay out a single section whose header starts at `origin_y`.
pub fn layout_section<P>(
    provider: &mut P,
    section: usize,
    origin_y: f64,
    container_width: f64,
) -> SectionLayout
where
    P: GeometryProvider + ?Sized,
{
    let insets = provider.section_insets(section);
    let interitem = provider.interitem_spacing();
    let line = provider.line_spacing();

    let header = centered(sanitize(provider.header_size(section)), origin_y, container_width);

    let min_x = insets.x0;
    let max_x = container_width - insets.x1;
    let item_count = provider.item_count(section);
    // Without rows the insets have nothing to pad.
    let content_top = if item_count == 0 {
        header.y1
    } else {
        header.y1 + insets.y0
    };

    let items = (0..item_count).fold(
        Vec::with_capacity(item_count),
        |mut items: Vec<Rect>, item| {
            let size = sanitize(provider.item_size(Coordinate::new(section, item)));
            let origin = match items.last() {
                None => Point::new(min_x, content_top),
                Some(prev) => {
                    let candidate_x = prev.x1 + interitem;
                    if candidate_x + size.width > max_x {
                        Point::new(min_x, prev.y1 + line)
                    } else {
                        Point::new(candidate_x, prev.y0)
                    }
                }
            };
            items.push(Rect::from_origin_size(origin, size));
            items
        },
    );

    let footer_y = items.last().map_or(header.y1, |r| r.y1 + insets.y1);
    let footer = centered(
        sanitize(provider.footer_size(section)),
        footer_y,
        container_width,
    );

    SectionLayout {
        header,
        items,
        footer,
        content_top,
        decoration: None,
    }
}

fn centered(size: Size, y: f64, container_width: f64) -> Rect {
    let x = (container_width - size.width) / 2.0;
    Rect::from_origin_size(Point::new(x, y), size)
}

fn sanitize(size: Size) -> Size {
    debug_assert!(
        size.width.is_finite() && size.height.is_finite(),
        "intrinsic sizes must be finite; got {size:?}"
    );
    Size::new(size.width.max(0.0), size.height.max(0.0))
}
