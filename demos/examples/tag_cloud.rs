// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A search screen's tag cloud: history and trending sections as rounded cards.
//!
//! This example shows how to:
//! - describe data, widths and measured heights with a `ListSource`,
//! - let `SectionedList` wrap chips into rows and draw one backdrop per section,
//! - cull frames to a viewport and react to insertions and resizes.
//!
//! Run:
//! - `cargo run -p parterre_demos --example tag_cloud`

use kurbo::{Insets, Rect};
use parterre_flow::{
    BackgroundStyle, Coordinate, Corners, DecorationSpec, ElementFrame, ElementKind, ElementKinds,
};
use parterre_list::{ListSource, SectionedList};

/// Approximate advance of one glyph.
const GLYPH: f64 = 7.5;

/// A text label reused to measure every element of one kind.
#[derive(Debug, Default)]
struct Label {
    text: String,
    padding: f64,
}

impl Label {
    /// Height for the current text when laid out at `width`, wrapping by glyph count.
    fn fitting_height(&self, width: f64, line_height: f64) -> f64 {
        let per_line = ((width - 2.0 * self.padding) / GLYPH).floor().max(1.0);
        let lines = (self.text.chars().count() as f64 / per_line).ceil().max(1.0);
        lines * line_height + 2.0 * self.padding
    }
}

struct SearchKeys {
    sections: Vec<(&'static str, Vec<String>)>,
}

impl ListSource for SearchKeys {
    type Template = Label;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections[section].1.len()
    }

    fn new_template(&self, kind: ElementKind) -> Label {
        let padding = if kind == ElementKind::Item { 6.0 } else { 4.0 };
        Label {
            text: String::new(),
            padding,
        }
    }

    fn item_width(&self, at: Coordinate, available: f64) -> f64 {
        let text = &self.sections[at.section].1[at.item];
        (text.chars().count() as f64 * GLYPH + 12.0).min(available)
    }

    fn measure_item(&self, template: &mut Label, at: Coordinate, width: f64) -> f64 {
        template.text.clone_from(&self.sections[at.section].1[at.item]);
        template.fitting_height(width, 16.0)
    }

    fn header_width(&self, _section: usize, available: f64) -> Option<f64> {
        Some(available - 24.0)
    }

    fn measure_header(&self, template: &mut Label, section: usize, width: f64) -> f64 {
        template.text = self.sections[section].0.to_owned();
        template.fitting_height(width, 20.0)
    }

    fn section_insets(&self, _section: usize) -> Insets {
        Insets::new(20.0, 8.0, 20.0, 16.0)
    }

    fn interitem_spacing(&self) -> f64 {
        8.0
    }

    fn line_spacing(&self) -> f64 {
        8.0
    }

    fn decoration(&self, _section: usize) -> Option<DecorationSpec> {
        Some(DecorationSpec {
            insets: Insets::new(10.0, 0.0, 10.0, 6.0),
            extends_to_header: true,
            extends_to_footer: false,
            style: BackgroundStyle {
                fill: [0xf2, 0xf3, 0xf5, 0xff],
                corner_radius: 12.0,
                corners: Corners::all(),
            },
        })
    }
}

fn print_frames(title: &str, frames: &[ElementFrame]) {
    println!("{title}");
    for frame in frames {
        let Rect { x0, y0, x1, y1 } = frame.frame;
        println!(
            "  {:<10} s{} i{:<2} z{:>2}  ({x0:>6.1}, {y0:>6.1}) - ({x1:>6.1}, {y1:>6.1})",
            format!("{:?}", frame.kind),
            frame.coordinate.section,
            frame.coordinate.item,
            frame.z_index,
        );
    }
}

fn main() {
    let words = |list: &[&str]| list.iter().map(|w| (*w).to_owned()).collect::<Vec<_>>();
    let source = SearchKeys {
        sections: vec![
            ("Recent searches", words(&["kurbo", "flow layout", "chips", "rust"])),
            (
                "Trending",
                words(&[
                    "no_std",
                    "virtualized lists",
                    "rounded cards",
                    "grids",
                    "a long query that will need to wrap onto a second line",
                ]),
            ),
        ],
    };

    let mut list = SectionedList::new(source, 360.0);
    list.set_caching_enabled(true);

    let everything = Rect::from_origin_size((0.0, 0.0), list.content_size());
    print_frames(
        "Initial layout:",
        &list.frames_intersecting(everything, ElementKinds::all()),
    );

    let viewport = Rect::new(0.0, 0.0, 360.0, 120.0);
    print_frames(
        "Visible chips in the first 120 units:",
        &list.frames_intersecting(viewport, ElementKinds::ITEMS),
    );

    // A new search lands at the front of the history.
    list.edit_source(|keys| keys.sections[0].1.insert(0, "parterre".to_owned()));
    list.insert_items(&[Coordinate::new(0, 0)]);
    println!(
        "After insert: first row ends at x = {:.1}, content height {:.1}",
        list.frame_for(Coordinate::new(0, 1)).x1,
        list.content_size().height,
    );

    // Resizes keep cached heights. Wrapped labels change height with width, so
    // ask for a remeasure.
    list.set_container_width(240.0);
    list.reload_data();
    let stats = list.cache().stats();
    println!(
        "At width 240: content height {:.1}, cache hits {} misses {}",
        list.content_size().height,
        stats.hits,
        stats.misses,
    );
    if let Some(card) = list.decoration(1) {
        println!("Trending card: {:?} radii {:?}", card.frame, card.shape().radii());
    }
}
