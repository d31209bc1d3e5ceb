// Copyright 2025 the Parterre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapts a [`ListSource`] to [`GeometryProvider`] through the measurement cache.

use kurbo::{Insets, Size};
use parterre_flow::{BackgroundStyle, Coordinate, ElementKind, GeometryProvider};
use parterre_measure::{MeasurementCache, TemplatePool};

use crate::source::ListSource;

/// A [`GeometryProvider`] whose sizes come from measuring templates.
///
/// Item widths are chosen by the source from the width between the section's side
/// insets; header and footer widths from the full container width. Heights are
/// looked up in the [`MeasurementCache`] first and measured with the template of
/// the element's kind on a miss.
pub struct MeasuredGeometry<S: ListSource> {
    source: S,
    cache: MeasurementCache,
    templates: TemplatePool<ElementKind, S::Template>,
    container_width: f64,
}

impl<S: ListSource> core::fmt::Debug for MeasuredGeometry<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeasuredGeometry")
            .field("cache", &self.cache)
            .field("templates", &self.templates)
            .field("container_width", &self.container_width)
            .finish_non_exhaustive()
    }
}

impl<S: ListSource> MeasuredGeometry<S> {
    /// Wraps `source` for a container `container_width` wide, with caching disabled.
    pub fn new(source: S, container_width: f64) -> Self {
        Self {
            source,
            cache: MeasurementCache::new(),
            templates: TemplatePool::new(),
            container_width: container_width.max(0.0),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The wrapped source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The measurement cache.
    pub fn cache(&self) -> &MeasurementCache {
        &self.cache
    }

    /// The measurement cache, mutably.
    pub fn cache_mut(&mut self) -> &mut MeasurementCache {
        &mut self.cache
    }

    /// The pool of measuring templates.
    pub fn templates(&self) -> &TemplatePool<ElementKind, S::Template> {
        &self.templates
    }

    /// The container width sizes are chosen against.
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Sets the container width. Cached heights are kept.
    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = width.max(0.0);
    }

    /// Consumes the adapter and returns the source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: ListSource> GeometryProvider for MeasuredGeometry<S> {
    fn section_count(&self) -> usize {
        self.source.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.source.item_count(section)
    }

    fn item_size(&mut self, coordinate: Coordinate) -> Size {
        let insets = self.source.section_insets(coordinate.section);
        let available = (self.container_width - insets.x0 - insets.x1).max(0.0);
        let Self {
            source,
            cache,
            templates,
            ..
        } = self;
        let width = source.item_width(coordinate, available);
        let height = cache.height_for(coordinate, || {
            log::trace!("measuring item {coordinate:?} at width {width}");
            let template = templates.get_or_create(ElementKind::Item, |&kind| source.new_template(kind));
            source.measure_item(template, coordinate, width)
        });
        Size::new(width, height)
    }

    fn header_size(&mut self, section: usize) -> Size {
        let Self {
            source,
            cache,
            templates,
            container_width,
        } = self;
        let Some(width) = source.header_width(section, *container_width) else {
            return Size::ZERO;
        };
        let height = cache.header_height_for(section, || {
            let template =
                templates.get_or_create(ElementKind::Header, |&kind| source.new_template(kind));
            source.measure_header(template, section, width)
        });
        Size::new(width, height)
    }

    fn footer_size(&mut self, section: usize) -> Size {
        let Self {
            source,
            cache,
            templates,
            container_width,
        } = self;
        let Some(width) = source.footer_width(section, *container_width) else {
            return Size::ZERO;
        };
        let height = cache.footer_height_for(section, || {
            let template =
                templates.get_or_create(ElementKind::Footer, |&kind| source.new_template(kind));
            source.measure_footer(template, section, width)
        });
        Size::new(width, height)
    }

    fn section_insets(&self, section: usize) -> Insets {
        self.source.section_insets(section)
    }

    fn interitem_spacing(&self) -> f64 {
        self.source.interitem_spacing()
    }

    fn line_spacing(&self) -> f64 {
        self.source.line_spacing()
    }

    fn has_decoration(&self, section: usize) -> bool {
        self.source.decoration(section).is_some()
    }

    fn decoration_insets(&self, section: usize) -> Insets {
        self.source
            .decoration(section)
            .map_or(Insets::ZERO, |spec| spec.insets)
    }

    fn decoration_extends_to_header(&self, section: usize) -> bool {
        self.source
            .decoration(section)
            .is_some_and(|spec| spec.extends_to_header)
    }

    fn decoration_extends_to_footer(&self, section: usize) -> bool {
        self.source
            .decoration(section)
            .is_some_and(|spec| spec.extends_to_footer)
    }

    fn decoration_style(&self, section: usize) -> BackgroundStyle {
        self.source
            .decoration(section)
            .map(|spec| spec.style)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use kurbo::{Insets, Size};
    use parterre_flow::{Coordinate, ElementKind, GeometryProvider};

    use super::MeasuredGeometry;
    use crate::ListSource;

    /// One section of words; each word is a chip 8 units per letter plus padding.
    #[derive(Default)]
    struct Words {
        words: alloc::vec::Vec<&'static str>,
        measured: Cell<u32>,
    }

    impl ListSource for Words {
        type Template = ElementKind;

        fn section_count(&self) -> usize {
            1
        }

        fn item_count(&self, _section: usize) -> usize {
            self.words.len()
        }

        fn new_template(&self, kind: ElementKind) -> ElementKind {
            kind
        }

        fn item_width(&self, coordinate: Coordinate, available: f64) -> f64 {
            let natural = 8.0 * self.words[coordinate.item].len() as f64 + 16.0;
            natural.min(available)
        }

        fn measure_item(&self, template: &mut ElementKind, _: Coordinate, _: f64) -> f64 {
            assert_eq!(*template, ElementKind::Item, "item measured with wrong template");
            self.measured.set(self.measured.get() + 1);
            24.0
        }

        fn header_width(&self, _section: usize, available: f64) -> Option<f64> {
            Some(available)
        }

        fn measure_header(&self, template: &mut ElementKind, _: usize, _: f64) -> f64 {
            assert_eq!(*template, ElementKind::Header, "header measured with wrong template");
            32.0
        }

        fn section_insets(&self, _section: usize) -> Insets {
            Insets::new(10.0, 0.0, 30.0, 0.0)
        }
    }

    #[test]
    fn item_width_is_clamped_to_the_inset_row() {
        let source = Words {
            words: alloc::vec!["ok", "a-rather-long-word-for-a-chip"],
            ..Words::default()
        };
        let mut geometry = MeasuredGeometry::new(source, 200.0);
        assert_eq!(geometry.item_size(Coordinate::new(0, 0)), Size::new(32.0, 24.0));
        assert_eq!(geometry.item_size(Coordinate::new(0, 1)), Size::new(160.0, 24.0));
    }

    #[test]
    fn headers_span_the_container_and_footers_are_absent() {
        let mut geometry = MeasuredGeometry::new(Words::default(), 200.0);
        assert_eq!(geometry.header_size(0), Size::new(200.0, 32.0));
        assert_eq!(geometry.footer_size(0), Size::ZERO);
        assert_eq!(geometry.templates().len(), 1);
    }

    #[test]
    fn enabled_cache_skips_the_template() {
        let source = Words {
            words: alloc::vec!["one", "two"],
            ..Words::default()
        };
        let mut geometry = MeasuredGeometry::new(source, 200.0);
        geometry.cache_mut().set_enabled(true);
        for _ in 0..3 {
            geometry.item_size(Coordinate::new(0, 0));
            geometry.item_size(Coordinate::new(0, 1));
        }
        assert_eq!(geometry.source().measured.get(), 2);
        assert_eq!(geometry.templates().created(), 1);
    }

    #[test]
    fn width_change_keeps_cached_heights() {
        let source = Words {
            words: alloc::vec!["one"],
            ..Words::default()
        };
        let mut geometry = MeasuredGeometry::new(source, 200.0);
        geometry.cache_mut().set_enabled(true);
        geometry.item_size(Coordinate::new(0, 0));
        geometry.set_container_width(50.0);
        assert_eq!(geometry.item_size(Coordinate::new(0, 0)), Size::new(10.0, 24.0));
        assert_eq!(geometry.source().measured.get(), 1);
    }
}
