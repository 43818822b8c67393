//! Glyph signatures: deterministic fingerprints used to recognize a
//! previously-seen physical glyph across sessions.
//!
//! A signature combines the raw pixel weight with the interline-
//! normalized moments, quantized to fixed point so equality, ordering
//! and hashing are exact.

use crate::constants::SIG_QUANTUM;
use crate::moments::GeometricMoments;

/// A total-ordered, hashable fingerprint of a glyph's pixel mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphSignature {
    weight: i32,
    moments: [i64; 9],
}

impl GlyphSignature {
    /// Build a signature from the glyph weight and its geometric
    /// moments.  Position-independent: only normalized dimensions and
    /// central moments enter the fingerprint, never the centroid.
    pub fn new(weight: i32, moments: &GeometricMoments) -> Self {
        let quantize = |v: f64| (v * SIG_QUANTUM).round() as i64;
        Self {
            weight,
            moments: [
                quantize(moments.width),
                quantize(moments.height),
                quantize(moments.n20),
                quantize(moments.n11),
                quantize(moments.n02),
                quantize(moments.n30),
                quantize(moments.n21),
                quantize(moments.n12),
                quantize(moments.n03),
            ],
        }
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }
}
