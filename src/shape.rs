//! Shape taxonomy, classifier evaluations and the time-signature hint.
//!
//! The taxonomy is the subset of recognized symbol shapes the glyph
//! model needs to answer its predicates; the full symbol catalog lives
//! with the classifier.  Set-membership helpers are expressed as plain
//! `match`-based methods rather than precomputed shape sets.

use serde::{Deserialize, Serialize};

/// A recognized symbol shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Marker for a glyph absorbed into a compound; never an active shape.
    GlyphPart,
    /// Pixels too small or too distorted to classify.
    Noise,
    /// Leftover pixels around recognized symbols.
    Clutter,

    // Structural
    Stem,
    Ledger,
    Dot,
    Slur,
    Beam,
    BeamHook,

    // Barlines
    ThinBarline,
    ThickBarline,
    DoubleBarline,
    FinalBarline,
    ReverseFinalBarline,

    // Clefs
    GClef,
    GClefOttavaAlta,
    GClefOttavaBassa,
    FClef,
    CClef,
    PercussionClef,

    // Note heads
    NoteheadBlack,
    NoteheadVoid,
    WholeNote,
    BreveNote,

    // Rests
    WholeRest,
    HalfRest,
    QuarterRest,
    EighthRest,
    SixteenthRest,

    // Accidentals
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    DoubleFlat,

    // Flags
    FlagUp,
    FlagDown,

    // Time signatures
    CommonTime,
    CutTime,
    TimeFourFour,
    TimeThreeFour,
    TimeTwoFour,
    TimeSixEight,
    CustomTime,

    // Text
    Text,
    Character,
}

impl Shape {
    /// True for shapes carrying textual content.
    pub fn is_text(&self) -> bool {
        matches!(self, Shape::Text | Shape::Character)
    }

    /// True for any barline shape.
    pub fn is_bar(&self) -> bool {
        matches!(
            self,
            Shape::ThinBarline
                | Shape::ThickBarline
                | Shape::DoubleBarline
                | Shape::FinalBarline
                | Shape::ReverseFinalBarline
        )
    }

    /// True for any clef shape.
    pub fn is_clef(&self) -> bool {
        matches!(
            self,
            Shape::GClef
                | Shape::GClefOttavaAlta
                | Shape::GClefOttavaBassa
                | Shape::FClef
                | Shape::CClef
                | Shape::PercussionClef
        )
    }

    /// True for any time-signature shape.
    pub fn is_time(&self) -> bool {
        matches!(
            self,
            Shape::CommonTime
                | Shape::CutTime
                | Shape::TimeFourFour
                | Shape::TimeThreeFour
                | Shape::TimeTwoFour
                | Shape::TimeSixEight
                | Shape::CustomTime
        )
    }

    /// The shape whose physical pixel pattern this shape shares.
    /// Predefined whole time signatures all look like a custom one to
    /// the trainer; every other shape is its own physical shape.
    pub fn physical(&self) -> Shape {
        if self.is_time() {
            Shape::CustomTime
        } else {
            *self
        }
    }
}

/// Confidence grades reserved for non-classifier assignments.
pub mod grades {
    /// Grade of a shape assigned manually by the user.
    pub const MANUAL: f64 = 300.0;
    /// Grade of a shape assigned by a deterministic algorithm.
    pub const ALGORITHM: f64 = 200.0;
}

/// An immutable (shape, confidence grade) pair produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub shape: Shape,
    pub grade: f64,
}

impl Evaluation {
    pub fn new(shape: Shape, grade: f64) -> Self {
        Self { shape, grade }
    }

    /// True when the grade marks a manual assignment.
    pub fn is_manual(&self) -> bool {
        self.grade == grades::MANUAL
    }
}

/// Rational value of a time signature (hint attached to a glyph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRational {
    pub num: i32,
    pub den: i32,
}

impl TimeRational {
    pub fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }
}
