//! Tuning constants shared across the glyph model.

use crate::scale::Fraction;

/// Width of the probing window used to measure local thickness,
/// as a fraction of the interline.
pub const PROBE_WIDTH: Fraction = Fraction(0.5);

/// Minimum grade for a shape evaluation to count as well known.
pub const MIN_WELL_KNOWN_GRADE: f64 = 0.3;

/// Fixed-point quantum applied to normalized moments when building a
/// glyph signature, so signature equality is exact.
pub const SIG_QUANTUM: f64 = 1_000.0;
