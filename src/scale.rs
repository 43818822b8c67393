//! Sheet scale: the interline unit and interline-relative fractions.
//!
//! The interline (pixel distance between two staff lines) is the unit
//! every scale-dependent measurement is expressed in, so thresholds can
//! be written once and applied to sheets scanned at any resolution.

/// A length expressed as a fraction of the interline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction(pub f64);

/// Scaling information of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    interline: i32,
}

impl Scale {
    pub fn new(interline: i32) -> Self {
        Self { interline }
    }

    pub fn interline(&self) -> i32 {
        self.interline
    }

    /// Number of pixels of an interline fraction, rounded.
    pub fn to_pixels(&self, fraction: Fraction) -> i32 {
        self.to_pixels_f64(fraction).round() as i32
    }

    /// Exact pixel value of an interline fraction.
    pub fn to_pixels_f64(&self, fraction: Fraction) -> f64 {
        fraction.0 * (self.interline as f64)
    }
}
