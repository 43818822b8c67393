//! Incremental least-squares line fitting.
//!
//! `BasicLine` accumulates points (or whole pre-fitted sub-lines) into
//! running sums, so a glyph line can be built by merging the fits of its
//! member sections without revisiting any pixel.  All answers — slope,
//! inverted slope, coordinate evaluation, mean distance — are derived
//! from the sums alone.

/// Variance below this is treated as a degenerate (single-coordinate) axis.
const DEGENERATE_VARIANCE: f64 = 1e-9;

/// Slope magnitude below this is treated as a flat line.
const DEGENERATE_SLOPE: f64 = 1e-9;

/// A straight line fitted by least squares over included points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicLine {
    n: f64,
    sx: f64,
    sy: f64,
    sx2: f64,
    sy2: f64,
    sxy: f64,
}

impl BasicLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include one point with unit weight.
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.sx += x;
        self.sy += y;
        self.sx2 += x * x;
        self.sy2 += y * y;
        self.sxy += x * y;
    }

    /// Merge another fitted line by summing its accumulators.
    pub fn include_line(&mut self, other: &BasicLine) {
        self.n += other.n;
        self.sx += other.sx;
        self.sy += other.sy;
        self.sx2 += other.sx2;
        self.sy2 += other.sy2;
        self.sxy += other.sxy;
    }

    /// Number of points included so far.
    pub fn points(&self) -> usize {
        self.n.round() as usize
    }

    fn mean_x(&self) -> f64 {
        self.sx / self.n
    }

    fn mean_y(&self) -> f64 {
        self.sy / self.n
    }

    /// Variance of the abscissae.
    fn var_x(&self) -> f64 {
        (self.sx2 / self.n) - (self.mean_x() * self.mean_x())
    }

    /// Variance of the ordinates.
    fn var_y(&self) -> f64 {
        (self.sy2 / self.n) - (self.mean_y() * self.mean_y())
    }

    /// True when all points share (almost) one abscissa.
    pub fn is_vertical(&self) -> bool {
        self.n < 2.0 || self.var_x() <= DEGENERATE_VARIANCE
    }

    /// True when the fitted line is flat (which includes the case of
    /// all points sharing one ordinate).
    pub fn is_horizontal(&self) -> bool {
        if self.n < 2.0 {
            return true;
        }
        let slope = self.slope();
        slope.is_finite() && slope.abs() <= DEGENERATE_SLOPE
    }

    /// Slope dy/dx of the fitted line; ±infinity for a vertical fit,
    /// 0 when fewer than two points have been included.
    pub fn slope(&self) -> f64 {
        if self.n < 2.0 {
            return 0.0;
        }
        let den = (self.n * self.sx2) - (self.sx * self.sx);
        let num = (self.n * self.sxy) - (self.sx * self.sy);
        if self.var_x() <= DEGENERATE_VARIANCE {
            // Vertical: sign taken from the covariance
            if num >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            }
        } else {
            num / den
        }
    }

    /// Inverted slope dx/dy — the co-tangent of the same fitted line,
    /// not a second fit.  0 for a vertical fit, ±infinity for a
    /// horizontal one.
    pub fn inverted_slope(&self) -> f64 {
        if self.n < 2.0 || self.is_vertical() {
            return 0.0;
        }
        1.0 / self.slope()
    }

    /// Ordinate of the line at the provided abscissa.  For a vertical
    /// fit the mean ordinate is reported (no better answer exists).
    pub fn y_at_x(&self, x: f64) -> f64 {
        if self.n == 0.0 {
            return 0.0;
        }
        if self.is_vertical() {
            self.mean_y()
        } else {
            self.mean_y() + (self.slope() * (x - self.mean_x()))
        }
    }

    /// Abscissa of the line at the provided ordinate.  For a horizontal
    /// fit the mean abscissa is reported.
    pub fn x_at_y(&self, y: f64) -> f64 {
        if self.n == 0.0 {
            return 0.0;
        }
        if self.is_horizontal() {
            self.mean_x()
        } else {
            self.mean_x() + (self.inverted_slope() * (y - self.mean_y()))
        }
    }

    /// Root-mean-square distance of the included points to the line,
    /// derived from the accumulators only.
    pub fn mean_distance(&self) -> f64 {
        if self.n == 0.0 {
            return 0.0;
        }

        // Line as a·x + b·y + c = 0 with a² + b² = 1
        let (a, b, c) = if self.is_vertical() {
            (1.0, 0.0, -self.mean_x())
        } else {
            let m = self.slope();
            let norm = m.hypot(-1.0);
            let a = m / norm;
            let b = -1.0 / norm;
            (a, b, -(a * self.mean_x()) - (b * self.mean_y()))
        };

        let ms = ((a * a * self.sx2)
            + (b * b * self.sy2)
            + (c * c * self.n)
            + (2.0 * a * b * self.sxy)
            + (2.0 * a * c * self.sx)
            + (2.0 * b * c * self.sy))
            / self.n;

        ms.max(0.0).sqrt()
    }
}
