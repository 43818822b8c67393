//! Moment-based feature extractors.
//!
//! Both extractors consume the raw point cloud of a glyph (every
//! foreground pixel, unit weight) gathered by a `PointsCollector`:
//! `GeometricMoments` produces interline-normalized statistical
//! descriptors for the shape classifier, `ArtMoments` produces
//! rotation/scale-robust Angular-Radial-Transform coefficients.

use std::f64::consts::{PI, SQRT_2};

use crate::geom::PointF;

/// Accumulates absolute pixel coordinates across member sections.
#[derive(Debug, Clone, Default)]
pub struct PointsCollector {
    xs: Vec<i32>,
    ys: Vec<i32>,
}

impl PointsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    pub fn include(&mut self, x: i32, y: i32) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn count(&self) -> usize {
        self.xs.len()
    }

    pub fn xs(&self) -> &[i32] {
        &self.xs
    }

    pub fn ys(&self) -> &[i32] {
        &self.ys
    }
}

/// Interline-normalized geometric moments of a pixel mass.
///
/// Central moments are scale-normalized the standard way
/// (η<sub>pq</sub> = μ<sub>pq</sub> / μ<sub>00</sub><sup>1+(p+q)/2</sup>);
/// weight, width and height are normalized by the interline so values
/// are comparable across sheets scanned at different resolutions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricMoments {
    /// Pixel count / interline²
    pub weight: f64,
    /// Bounding width / interline
    pub width: f64,
    /// Bounding height / interline
    pub height: f64,
    /// Mass center, absolute coordinates
    pub centroid: PointF,
    pub n20: f64,
    pub n11: f64,
    pub n02: f64,
    pub n30: f64,
    pub n21: f64,
    pub n12: f64,
    pub n03: f64,
}

impl GeometricMoments {
    /// Compute moments over the collected points.  Returns None when the
    /// cloud is empty or the interline is unusable — callers treat the
    /// absence as "not yet available", not as an error.
    pub fn compute(collector: &PointsCollector, interline: i32) -> Option<GeometricMoments> {
        let n = collector.count();
        if n == 0 || interline <= 0 {
            return None;
        }

        let xs = collector.xs();
        let ys = collector.ys();
        let nf = n as f64;

        let (mut sx, mut sy) = (0.0, 0.0);
        let (mut x_min, mut x_max) = (i32::MAX, i32::MIN);
        let (mut y_min, mut y_max) = (i32::MAX, i32::MIN);
        for i in 0..n {
            sx += xs[i] as f64;
            sy += ys[i] as f64;
            x_min = x_min.min(xs[i]);
            x_max = x_max.max(xs[i]);
            y_min = y_min.min(ys[i]);
            y_max = y_max.max(ys[i]);
        }
        let xb = sx / nf;
        let yb = sy / nf;

        // Central moments up to order 3
        let (mut m20, mut m11, mut m02) = (0.0, 0.0, 0.0);
        let (mut m30, mut m21, mut m12, mut m03) = (0.0, 0.0, 0.0, 0.0);
        for i in 0..n {
            let dx = xs[i] as f64 - xb;
            let dy = ys[i] as f64 - yb;
            m20 += dx * dx;
            m11 += dx * dy;
            m02 += dy * dy;
            m30 += dx * dx * dx;
            m21 += dx * dx * dy;
            m12 += dx * dy * dy;
            m03 += dy * dy * dy;
        }

        let norm2 = nf * nf; // μ00^(1 + 2/2)
        let norm3 = nf * nf.sqrt() * nf; // μ00^(1 + 3/2)
        let il = interline as f64;

        Some(GeometricMoments {
            weight: nf / (il * il),
            width: ((x_max - x_min + 1) as f64) / il,
            height: ((y_max - y_min + 1) as f64) / il,
            centroid: PointF::new(xb, yb),
            n20: m20 / norm2,
            n11: m11 / norm2,
            n02: m02 / norm2,
            n30: m30 / norm3,
            n21: m21 / norm3,
            n12: m12 / norm3,
            n03: m03 / norm3,
        })
    }
}

/// Number of radial basis functions.
pub const ART_RADIAL: usize = 3;
/// Number of angular basis functions.
pub const ART_ANGULAR: usize = 12;
/// Subsamples per pixel edge when rendering a pixel onto the unit disk.
const ART_SUBGRID: usize = 4;

/// Angular-Radial-Transform moment magnitudes, normalized by |F(0,0)|.
///
/// The basis follows the MPEG-7 region-shape descriptor: the unit disk
/// is centered on the mass center and sized to enclose the rendered
/// pixel squares, so the magnitudes are invariant to translation,
/// rotation and uniform scaling of the pixel set.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtMoments {
    values: [[f64; ART_ANGULAR]; ART_RADIAL],
}

impl ArtMoments {
    /// Compute ART magnitudes over the collected points, or None for an
    /// empty cloud.
    ///
    /// Each pixel is rendered as a grid of subsamples over its unit
    /// square, and the disk radius extends to the outer corner of the
    /// farthest subcell.  Point-sampling the basis at pixel centers
    /// would tie the disk scale to the sampling resolution and make the
    /// magnitudes drift across scales.
    pub fn compute(collector: &PointsCollector) -> Option<ArtMoments> {
        let n = collector.count();
        if n == 0 {
            return None;
        }

        let xs = collector.xs();
        let ys = collector.ys();

        let offsets: Vec<f64> = (0..ART_SUBGRID)
            .map(|s| (((s as f64) + 0.5) / (ART_SUBGRID as f64)) - 0.5)
            .collect();
        let mut samples = Vec::with_capacity(n * ART_SUBGRID * ART_SUBGRID);
        for i in 0..n {
            for &ox in &offsets {
                for &oy in &offsets {
                    samples.push(((xs[i] as f64) + ox, (ys[i] as f64) + oy));
                }
            }
        }

        let nf = samples.len() as f64;
        let xb = samples.iter().map(|s| s.0).sum::<f64>() / nf;
        let yb = samples.iter().map(|s| s.1).sum::<f64>() / nf;

        let mut max_r: f64 = 0.0;
        for &(x, y) in &samples {
            max_r = max_r.max((x - xb).hypot(y - yb));
        }
        // Cover the whole square of the farthest subcell
        max_r += SQRT_2 / (2.0 * (ART_SUBGRID as f64));

        let mut re = [[0.0f64; ART_ANGULAR]; ART_RADIAL];
        let mut im = [[0.0f64; ART_ANGULAR]; ART_RADIAL];

        for &(x, y) in &samples {
            let dx = x - xb;
            let dy = y - yb;
            let r = dx.hypot(dy);

            if r == 0.0 {
                // Angle undefined at the disk center: the sample only
                // reaches the angular DC terms
                for (p, row_re) in re.iter_mut().enumerate() {
                    row_re[0] += if p == 0 { 1.0 } else { 2.0 };
                }
                continue;
            }

            let rho = r / max_r;
            let theta = dy.atan2(dx);
            for (p, row_re) in re.iter_mut().enumerate() {
                // Radial basis: R0 = 1, Rp = 2·cos(π·p·ρ)
                let radial = if p == 0 { 1.0 } else { 2.0 * (PI * p as f64 * rho).cos() };
                for (q, cell) in row_re.iter_mut().enumerate() {
                    let angle = q as f64 * theta;
                    *cell += radial * angle.cos();
                    im[p][q] -= radial * angle.sin();
                }
            }
        }

        let f00 = re[0][0].hypot(im[0][0]);
        if f00 == 0.0 {
            return None;
        }

        let mut values = [[0.0f64; ART_ANGULAR]; ART_RADIAL];
        for p in 0..ART_RADIAL {
            for q in 0..ART_ANGULAR {
                values[p][q] = re[p][q].hypot(im[p][q]) / f00;
            }
        }

        Some(ArtMoments { values })
    }

    /// Magnitude of coefficient (p radial, q angular).
    pub fn moment(&self, p: usize, q: usize) -> f64 {
        self.values[p][q]
    }
}
