//! Geometry facet: bounding box, mass statistics, moments and the
//! deduplication signature.
//!
//! Every value is computed lazily from the current members and cached
//! independently; all of them are cleared together by the aggregate's
//! `invalidate_cache`, so a cached value can never outlive the
//! membership it was derived from.

use log::warn;
use once_cell::unsync::OnceCell;

use crate::geom::{Circle, Point, Rect};
use crate::moments::{ArtMoments, GeometricMoments, PointsCollector};
use crate::section::Lag;
use crate::signature::GlyphSignature;

use super::Glyph;

/// Per-field lazy storage for the geometry facet.  `Option` inside a
/// cell records a computation that failed soft, so the warning is not
/// repeated until the next invalidation.
#[derive(Debug, Clone, Default)]
pub(crate) struct GeometryCache {
    bounds: OnceCell<Rect>,
    weight: OnceCell<i32>,
    geo: OnceCell<Option<GeometricMoments>>,
    art: OnceCell<Option<ArtMoments>>,
    pub(crate) circle: Option<Circle>,
}

impl Glyph {
    /// Gather every absolute foreground pixel of every member section.
    fn collect_points(&self, lag: &Lag) -> PointsCollector {
        let mut collector = PointsCollector::with_capacity(self.weight(lag) as usize);
        for &sid in &self.members {
            lag.section(sid).cumulate(&mut collector);
        }
        collector
    }

    /// Absolute bounding box: union of all member section boxes.
    /// Callers get their own copy; an empty glyph reports a degenerate
    /// box at the origin.
    pub fn bounds(&self, lag: &Lag) -> Rect {
        *self.geometry.bounds.get_or_init(|| {
            let mut boxes = self.members.iter().map(|&sid| lag.section(sid).bounds());
            match boxes.next() {
                Some(first) => boxes.fold(first, |acc, b| acc.union(&b)),
                None => Rect::new(0, 0, 0, 0),
            }
        })
    }

    /// Total pixel weight: always the sum over current members, never
    /// partially updated.
    pub fn weight(&self, lag: &Lag) -> i32 {
        *self
            .geometry
            .weight
            .get_or_init(|| self.members.iter().map(|&sid| lag.section(sid).weight()).sum())
    }

    /// Ratio of weight to enclosing box area.
    pub fn density(&self, lag: &Lag) -> f64 {
        let bounds = self.bounds(lag);
        let area = ((bounds.width + 1) as f64) * ((bounds.height + 1) as f64);
        (self.weight(lag) as f64) / area
    }

    /// Interline-normalized geometric moments, or None when the glyph
    /// has no pixels or no usable interline (fail-soft, warned once per
    /// cache generation).
    pub fn geometric_moments(&self, lag: &Lag) -> Option<&GeometricMoments> {
        self.geometry
            .geo
            .get_or_init(|| {
                let collector = self.collect_points(lag);
                let moments = GeometricMoments::compute(&collector, self.interline());
                if moments.is_none() {
                    warn!(
                        "{}: cannot compute geometric moments (pixels: {}, interline: {})",
                        self.id_string(),
                        collector.count(),
                        self.interline()
                    );
                }
                moments
            })
            .as_ref()
    }

    /// Angular-Radial-Transform moments, or None for an empty glyph.
    pub fn art_moments(&self, lag: &Lag) -> Option<&ArtMoments> {
        self.geometry
            .art
            .get_or_init(|| {
                let collector = self.collect_points(lag);
                let moments = ArtMoments::compute(&collector);
                if moments.is_none() {
                    warn!("{}: cannot compute ART moments (no pixels)", self.id_string());
                }
                moments
            })
            .as_ref()
    }

    /// Mass center from the geometric moments; falls back to the area
    /// center when moments are unavailable.
    pub fn centroid(&self, lag: &Lag) -> Point {
        match self.geometric_moments(lag) {
            Some(moments) => moments.centroid.rounded(),
            None => self.area_center(lag),
        }
    }

    /// Center of the bounding box.
    pub fn area_center(&self, lag: &Lag) -> Point {
        self.bounds(lag).center()
    }

    /// Shape-aware reference point: text shapes use their baseline
    /// (bottom-left of the box); everything else the area center.
    pub fn location(&self, lag: &Lag) -> Point {
        match self.evaluation.map(|e| e.shape) {
            Some(shape) if shape.is_text() => {
                let bounds = self.bounds(lag);
                Point::new(bounds.x, bounds.y + bounds.height - 1)
            }
            _ => self.area_center(lag),
        }
    }

    /// Weight normalized by interline².
    pub fn normalized_weight(&self, lag: &Lag) -> f64 {
        let il = self.interline() as f64;
        (self.weight(lag) as f64) / (il * il)
    }

    /// Width normalized by interline.
    pub fn normalized_width(&self, lag: &Lag) -> f64 {
        (self.bounds(lag).width as f64) / (self.interline() as f64)
    }

    /// Height normalized by interline.
    pub fn normalized_height(&self, lag: &Lag) -> f64 {
        (self.bounds(lag).height as f64) / (self.interline() as f64)
    }

    /// Live deduplication signature, or None when moments are
    /// unavailable.
    pub fn signature(&self, lag: &Lag) -> Option<GlyphSignature> {
        self.geometric_moments(lag)
            .map(|moments| GlyphSignature::new(self.weight(lag), moments))
    }

    /// Approximating circle, if one has been fitted.
    pub fn circle(&self) -> Option<&Circle> {
        self.geometry.circle.as_ref()
    }

    /// Record a fitted circle; cleared with the rest of the cache.
    pub fn set_circle(&mut self, circle: Circle) {
        self.geometry.circle = Some(circle);
    }
}
