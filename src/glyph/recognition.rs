//! Recognition facet: the current shape evaluation, the per-glyph
//! blacklist of rejected shapes, and the derived shape predicates.

use crate::constants::MIN_WELL_KNOWN_GRADE;
use crate::shape::{Evaluation, Shape, TimeRational};

use super::Glyph;

impl Glyph {
    /// Current shape, if one has been assigned.
    pub fn shape(&self) -> Option<Shape> {
        self.evaluation.map(|e| e.shape)
    }

    /// Current confidence grade, if a shape has been assigned.
    pub fn grade(&self) -> Option<f64> {
        self.evaluation.map(|e| e.grade)
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        self.evaluation
    }

    /// Assign a new (shape, grade) pair atomically.
    ///
    /// A replaced shape joins the blacklist — unless it is the new
    /// shape itself or the GlyphPart marker — and the new shape leaves
    /// it.  `set_shape(None, _)` clears the evaluation but still
    /// blacklists the old shape (use [`Glyph::reset_evaluation`] to
    /// clear without blacklisting).
    pub fn set_shape(&mut self, shape: Option<Shape>, grade: f64) {
        if let Some(old) = self.shape() {
            if old != Shape::GlyphPart && Some(old) != shape {
                self.forbidden.insert(old);
            }
        }

        if let Some(new) = shape {
            self.forbidden.remove(&new);
        }

        self.evaluation = shape.map(|s| Evaluation::new(s, grade));
    }

    /// Clear the current evaluation without touching the blacklist.
    pub fn reset_evaluation(&mut self) {
        self.evaluation = None;
    }

    /// Blacklist a shape directly.
    pub fn forbid_shape(&mut self, shape: Shape) {
        self.forbidden.insert(shape);
    }

    /// Remove a shape from the blacklist.
    pub fn allow_shape(&mut self, shape: Shape) {
        self.forbidden.remove(&shape);
    }

    pub fn is_shape_forbidden(&self, shape: Shape) -> bool {
        self.forbidden.contains(&shape)
    }

    // ─── Derived predicates ──────────────────────────────────────────

    /// A shape has been assigned and it is not mere noise.
    pub fn is_known(&self) -> bool {
        matches!(self.shape(), Some(shape) if shape != Shape::Noise)
    }

    /// Known with a grade above the acceptance threshold.
    pub fn is_well_known(&self) -> bool {
        self.is_known() && self.grade().is_some_and(|g| g >= MIN_WELL_KNOWN_GRADE)
    }

    pub fn is_bar(&self) -> bool {
        self.shape().is_some_and(|s| s.is_bar())
    }

    pub fn is_clef(&self) -> bool {
        self.shape().is_some_and(|s| s.is_clef())
    }

    pub fn is_stem(&self) -> bool {
        self.shape() == Some(Shape::Stem)
    }

    pub fn is_text(&self) -> bool {
        self.shape().is_some_and(|s| s.is_text())
    }

    /// Shape assigned by hand rather than by the classifier.
    pub fn is_manual_shape(&self) -> bool {
        self.evaluation.is_some_and(|e| e.is_manual())
    }

    // ─── Time-signature hint ─────────────────────────────────────────

    pub fn time_rational(&self) -> Option<TimeRational> {
        self.time_rational
    }

    pub fn set_time_rational(&mut self, value: Option<TimeRational>) {
        self.time_rational = value;
    }
}
