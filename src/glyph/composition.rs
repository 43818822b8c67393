//! Composition facet: the membership ledger.
//!
//! Owns the canonical, duplicate-free, key-ordered collection of member
//! sections.  Every mutation funnels through the aggregate's
//! centralized cache invalidation.

use crate::error::GlyphError;
use crate::section::{Lag, SectionId};
use crate::shape::Shape;

use super::Glyph;

/// Whether a membership change also updates the section back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linking {
    /// Update the section's back-reference.
    Link,
    /// Membership only; back-reference untouched.
    NoLink,
}

impl Glyph {
    /// Add a section to this glyph.
    ///
    /// The section is inserted into the membership collection BEFORE
    /// its back-reference is written: a concurrent reader computing the
    /// bounding box must never observe a section that claims ownership
    /// by this glyph while absent from the members.
    ///
    /// An id the lag does not know fails fast with
    /// [`GlyphError::UnknownSection`].
    pub fn add_section(
        &mut self,
        lag: &mut Lag,
        sid: SectionId,
        linking: Linking,
    ) -> Result<(), GlyphError> {
        if !lag.contains_id(sid) {
            return Err(GlyphError::UnknownSection(sid));
        }

        let key = lag.section(sid).key();
        match self
            .members
            .binary_search_by(|&m| lag.section(m).key().cmp(&key))
        {
            Ok(_) => {} // already a member
            Err(pos) => self.members.insert(pos, sid),
        }

        if linking == Linking::Link {
            lag.section_mut(sid).set_glyph(Some(self.key()));
        }

        self.invalidate_cache();
        Ok(())
    }

    /// Remove a section from this glyph; reports whether the section
    /// was a member.  With [`Linking::Link`] the back-reference is
    /// cleared regardless.
    pub fn remove_section(&mut self, lag: &mut Lag, sid: SectionId, linking: Linking) -> bool {
        if linking == Linking::Link && lag.contains_id(sid) {
            lag.section_mut(sid).set_glyph(None);
        }

        let removed = match self.members.iter().position(|&m| m == sid) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        };

        self.invalidate_cache();
        removed
    }

    /// Absorb every member section of `other` into this glyph, leaving
    /// `other` addressable but inactive (its members keep answering
    /// historical queries, their back-references now point here).
    pub fn steal_sections(&mut self, lag: &mut Lag, other: &mut Glyph) -> Result<(), GlyphError> {
        for sid in other.members.clone() {
            self.add_section(lag, sid, Linking::Link)?;
        }
        other.set_part_of(Some(self.key()));
        Ok(())
    }

    /// True iff every member section points back to this glyph — and
    /// the shape is not the GlyphPart marker, which is never active by
    /// convention.
    pub fn is_active(&self, lag: &Lag) -> bool {
        if self.evaluation.map(|e| e.shape) == Some(Shape::GlyphPart) {
            return false;
        }
        self.members
            .iter()
            .all(|&sid| lag.section(sid).glyph() == Some(self.key()))
    }

    /// Clear the back-reference of every member still pointing here.
    pub fn cut_all_links(&self, lag: &mut Lag) {
        for &sid in &self.members {
            if lag.section(sid).glyph() == Some(self.key()) {
                lag.section_mut(sid).set_glyph(None);
            }
        }
    }

    /// Re-assert ownership: point every member back to this glyph.
    pub fn link_all_back(&self, lag: &mut Lag) {
        for &sid in &self.members {
            lag.section_mut(sid).set_glyph(Some(self.key()));
        }
    }

    /// Member sections, ordered by their canonical key.
    pub fn members(&self) -> &[SectionId] {
        &self.members
    }

    pub fn contains_section(&self, sid: SectionId) -> bool {
        self.members.contains(&sid)
    }

    pub fn section_count(&self) -> usize {
        self.members.len()
    }

    pub fn first_section(&self) -> Option<SectionId> {
        self.members.first().copied()
    }
}
