//! Alignment facet: the approximating line of a glyph, its slope, and
//! the orientation-dependent start/stop endpoints.
//!
//! The line is a single least-squares fit merged from the per-section
//! fits, computed lazily and reset by any ledger mutation or forced-
//! endpoint override.

use std::f64::consts::FRAC_PI_4;

use once_cell::unsync::OnceCell;

use crate::constants::PROBE_WIDTH;
use crate::error::GlyphError;
use crate::geom::{Orientation, PointF, Rect};
use crate::line::BasicLine;
use crate::scale::Scale;
use crate::section::Lag;

use super::Glyph;

/// Lazy storage for the alignment facet.  `forced` survives until the
/// next invalidation and overrides the computed endpoints.
#[derive(Debug, Clone, Default)]
pub(crate) struct AlignmentCache {
    info: OnceCell<LineInfo>,
    pub(crate) forced: Option<(PointF, PointF)>,
}

/// The computed line and its endpoints, built in one shot.
#[derive(Debug, Clone)]
struct LineInfo {
    line: BasicLine,
    slope: f64,
    start: PointF,
    stop: PointF,
}

impl Glyph {
    fn line_info(&self, lag: &Lag) -> &LineInfo {
        self.alignment.info.get_or_init(|| self.compute_line(lag))
    }

    /// Build the approximating line and pick its endpoints.
    ///
    /// The rather-vertical test deliberately compares the raw slope
    /// ratio against π/4, reproducing the historical behavior of the
    /// surrounding pipeline.
    fn compute_line(&self, lag: &Lag) -> LineInfo {
        let mut line = BasicLine::new();
        for &sid in &self.members {
            line.include_line(lag.section(sid).line());
        }

        let bounds = self.bounds(lag);

        // Single pixel (or empty): no line is mathematically defined.
        // Start = stop = box origin, slope 0 by convention.
        if self.weight(lag) <= 1 {
            let origin = PointF::new(bounds.x as f64, bounds.y as f64);
            return self.with_forced(LineInfo {
                line,
                slope: 0.0,
                start: origin,
                stop: origin,
            });
        }

        let slope = line.slope();
        let top = bounds.y as f64;
        let bottom = bounds.bottom() as f64;
        let left = bounds.x as f64;
        let right = bounds.right() as f64;

        let (start, stop) = if slope.abs() > FRAC_PI_4 {
            // Rather vertical: top/bottom edges are primary
            let mut start = PointF::new(line.x_at_y(top), top);
            let mut stop = PointF::new(line.x_at_y(bottom), bottom);

            if !line.is_vertical() {
                // Pull an endpoint inward when a side intersection is
                // more centered; roles depend on the slope sign.
                let y_left = line.y_at_x(left);
                let y_right = line.y_at_x(right);

                if line.inverted_slope() > 0.0 {
                    if y_left > top {
                        start = PointF::new(left, y_left);
                    }
                    if y_right < bottom {
                        stop = PointF::new(right, y_right);
                    }
                } else {
                    if y_right > top {
                        start = PointF::new(right, y_right);
                    }
                    if y_left < bottom {
                        stop = PointF::new(left, y_left);
                    }
                }
            }

            (start, stop)
        } else {
            // Rather horizontal: left/right edges are primary
            let mut start = PointF::new(left, line.y_at_x(left));
            let mut stop = PointF::new(right, line.y_at_x(right));

            if !line.is_horizontal() {
                let x_top = line.x_at_y(top);
                let x_bottom = line.x_at_y(bottom);

                if slope > 0.0 {
                    if x_top > left {
                        start = PointF::new(x_top, top);
                    }
                    if x_bottom < right {
                        stop = PointF::new(x_bottom, bottom);
                    }
                } else {
                    if x_bottom > left {
                        start = PointF::new(x_bottom, bottom);
                    }
                    if x_top < right {
                        stop = PointF::new(x_top, top);
                    }
                }
            }

            (start, stop)
        };

        self.with_forced(LineInfo {
            line,
            slope,
            start,
            stop,
        })
    }

    /// Apply any forced endpoint override.
    fn with_forced(&self, mut info: LineInfo) -> LineInfo {
        if let Some((start, stop)) = self.alignment.forced {
            info.start = start;
            info.stop = stop;
        }
        info
    }

    /// Slope dy/dx of the approximating line (0 for a single pixel).
    pub fn slope(&self, lag: &Lag) -> f64 {
        self.line_info(lag).slope
    }

    /// Inverted slope dx/dy of the approximating line.
    pub fn inverted_slope(&self, lag: &Lag) -> f64 {
        self.line_info(lag).line.inverted_slope()
    }

    /// Quality of fit: RMS distance of the pixels to the line.
    pub fn mean_distance(&self, lag: &Lag) -> f64 {
        self.line_info(lag).line.mean_distance()
    }

    /// Endpoint that comes first along the requested axis: smaller x
    /// for horizontal, smaller y for vertical — independent of how the
    /// raw fit labeled its two points.
    pub fn start_point(&self, lag: &Lag, orientation: Orientation) -> PointF {
        let info = self.line_info(lag);
        match orientation {
            Orientation::Horizontal => {
                if info.start.x <= info.stop.x {
                    info.start
                } else {
                    info.stop
                }
            }
            Orientation::Vertical => {
                if info.start.y <= info.stop.y {
                    info.start
                } else {
                    info.stop
                }
            }
        }
    }

    /// Endpoint that comes last along the requested axis.
    pub fn stop_point(&self, lag: &Lag, orientation: Orientation) -> PointF {
        let info = self.line_info(lag);
        match orientation {
            Orientation::Horizontal => {
                if info.stop.x >= info.start.x {
                    info.stop
                } else {
                    info.start
                }
            }
            Orientation::Vertical => {
                if info.stop.y >= info.start.y {
                    info.stop
                } else {
                    info.start
                }
            }
        }
    }

    /// Bounding-box extent along the requested axis.
    pub fn length(&self, lag: &Lag, orientation: Orientation) -> i32 {
        let bounds = self.bounds(lag);
        match orientation {
            Orientation::Horizontal => bounds.width,
            Orientation::Vertical => bounds.height,
        }
    }

    /// Bounding-box extent across the requested axis.
    pub fn thickness(&self, lag: &Lag, orientation: Orientation) -> i32 {
        self.length(lag, orientation.opposite())
    }

    /// Length over thickness along the requested axis.
    pub fn aspect(&self, lag: &Lag, orientation: Orientation) -> f64 {
        (self.length(lag, orientation) as f64) / (self.thickness(lag, orientation) as f64)
    }

    /// Ordinate (or abscissa, for a vertical view) of the approximating
    /// line at the provided coordinate.
    pub fn position_at(&self, lag: &Lag, coord: f64, orientation: Orientation) -> f64 {
        let line = &self.line_info(lag).line;
        match orientation {
            Orientation::Horizontal => line.y_at_x(coord),
            Orientation::Vertical => line.x_at_y(coord),
        }
    }

    /// Mean local thickness at the provided coordinate, measured with a
    /// probing window half an interline wide (see `constants`).  Zero
    /// when the probe falls entirely in a hole between sections; a
    /// coordinate outside the glyph range fails fast.
    pub fn thickness_at(
        &self,
        lag: &Lag,
        scale: &Scale,
        coord: f64,
        orientation: Orientation,
    ) -> Result<f64, GlyphError> {
        let obounds = orientation.oriented_rect(&self.bounds(lag));

        if coord < obounds.x as f64 || coord >= obounds.right() as f64 {
            return Err(GlyphError::CoordinateOutOfRange {
                coord,
                min: obounds.x,
                max: obounds.right(),
            });
        }

        let half = scale.to_pixels(PROBE_WIDTH) / 2;
        let roi = Rect::new(coord.round() as i32, obounds.y, 0, obounds.height).grown(half, 0);

        // Union of member intersections with the probe window
        let mut common: Option<Rect> = None;
        for &sid in &self.members {
            let sbounds = orientation.oriented_rect(&lag.section(sid).bounds());
            let inter = roi.intersection(&sbounds);
            if !inter.is_empty() {
                common = Some(match common {
                    Some(acc) => acc.union(&inter),
                    None => inter,
                });
            }
        }

        Ok(common.map_or(0.0, |c| c.height as f64))
    }

    /// Pixels shared between member first runs and abutting foreign
    /// sections, at the starting side.
    pub fn first_stuck(&self, lag: &Lag) -> i32 {
        let mut stuck = 0;
        for &sid in &self.members {
            let section = lag.section(sid);
            let run = section.first_run();
            for &src in section.sources() {
                let source = lag.section(src);
                if source.glyph() != Some(self.key()) {
                    stuck += run.common_length(source.last_run());
                }
            }
        }
        stuck
    }

    /// Pixels shared between member last runs and abutting foreign
    /// sections, at the stopping side.
    pub fn last_stuck(&self, lag: &Lag) -> i32 {
        let mut stuck = 0;
        for &sid in &self.members {
            let section = lag.section(sid);
            let run = section.last_run();
            for &tgt in section.targets() {
                let target = lag.section(tgt);
                if target.glyph() != Some(self.key()) {
                    stuck += run.common_length(target.first_run());
                }
            }
        }
        stuck
    }
}
