use thiserror::Error;

use crate::section::SectionId;

/// Errors raised by glyph model operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GlyphError {
    #[error("unknown section id {0:?}")]
    UnknownSection(SectionId),

    #[error("coordinate {coord} outside glyph range {min}..{max}")]
    CoordinateOutOfRange { coord: f64, min: i32, max: i32 },

    #[error("unknown glyph id {0:?}")]
    UnknownGlyph(crate::glyph::GlyphId),
}
