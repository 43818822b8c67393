//! The nest: registry that assigns glyph ids and recognizes duplicate
//! physical glyphs through their signatures.
//!
//! A glyph registered with a signature already known — and still valid
//! on the stored original — is not given a new identity: the original
//! wins and the candidate is dropped.  Registered glyphs are never
//! destroyed; a stolen glyph simply stops being active.

use std::collections::HashMap;

use log::debug;

use crate::error::GlyphError;
use crate::glyph::{Glyph, GlyphId, GlyphKey};
use crate::section::Lag;
use crate::signature::GlyphSignature;

/// Registry of glyphs for one sheet.
#[derive(Debug, Default)]
pub struct Nest {
    /// Every glyph ever registered, indexed by id - 1.
    glyphs: Vec<Glyph>,
    /// Process key → public id.
    by_key: HashMap<GlyphKey, GlyphId>,
    /// Signature → original glyph registered with it.
    originals: HashMap<GlyphSignature, GlyphId>,
}

impl Nest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transient glyph: either hand back the id of an
    /// already-known original with the same (still valid) signature —
    /// dropping the candidate — or assign a brand new id.
    pub fn register(&mut self, lag: &Lag, glyph: Glyph) -> GlyphId {
        let signature = glyph.signature(lag);

        if let Some(sig) = signature {
            if let Some(original_id) = self.original(lag, sig) {
                debug!("new avatar of glyph#{original_id}, dropping candidate");
                // The original takes over; it is a top-level glyph again
                if let Some(original) = self.glyph_mut(original_id) {
                    original.set_part_of(None);
                }
                return original_id;
            }
        }

        let id = GlyphId((self.glyphs.len() + 1) as u32);
        let mut glyph = glyph;
        glyph.set_id(id);

        if let Some(sig) = signature {
            self.originals.insert(sig, id);
            glyph.set_registered_signature(sig);
            debug!("registered {} as original {:?}", glyph.id_string(), sig);
        }

        self.by_key.insert(glyph.key(), id);
        self.glyphs.push(glyph);
        id
    }

    /// Refresh the deduplication entry of an already-registered glyph
    /// whose membership (hence signature) has changed.
    pub fn re_register(&mut self, lag: &Lag, id: GlyphId) {
        let Some(glyph) = self.glyph(id) else {
            return;
        };
        let new_sig = glyph.signature(lag);
        let old_sig = glyph.registered_signature();

        if let Some(new_sig) = new_sig {
            if old_sig != Some(new_sig) {
                if let Some(old_sig) = old_sig {
                    if self.originals.remove(&old_sig).is_some() {
                        debug!("updating registration of glyph#{id}");
                    }
                }
                self.originals.insert(new_sig, id);
                if let Some(glyph) = self.glyph_mut(id) {
                    glyph.set_registered_signature(new_sig);
                }
            }
        }
    }

    /// The original glyph registered with this signature, provided its
    /// live signature still matches (membership may have changed since
    /// registration).
    pub fn original(&self, lag: &Lag, signature: GlyphSignature) -> Option<GlyphId> {
        let id = *self.originals.get(&signature)?;
        let glyph = self.glyph(id)?;
        if glyph.signature(lag) == Some(signature) {
            Some(id)
        } else {
            debug!("obsolete signature for {}", glyph.id_string());
            None
        }
    }

    /// Drop the deduplication entry of a glyph (the glyph itself stays
    /// addressable forever).
    pub fn remove(&mut self, lag: &Lag, id: GlyphId) {
        if let Some(glyph) = self.glyph(id) {
            if let Some(sig) = glyph.signature(lag) {
                if self.originals.get(&sig) == Some(&id) {
                    self.originals.remove(&sig);
                }
            }
        }
    }

    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get((id.0 as usize).checked_sub(1)?)
    }

    pub fn glyph_mut(&mut self, id: GlyphId) -> Option<&mut Glyph> {
        self.glyphs.get_mut((id.0 as usize).checked_sub(1)?)
    }

    pub fn glyph_by_key(&self, key: GlyphKey) -> Option<&Glyph> {
        self.glyph(*self.by_key.get(&key)?)
    }

    pub fn id_of(&self, key: GlyphKey) -> Option<GlyphId> {
        self.by_key.get(&key).copied()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }

    /// Topmost compound above this glyph, following `part_of` links.
    /// No cycle guard, like the source pipeline; a link to a glyph
    /// outside this nest ends the walk.
    pub fn ancestor_of(&self, key: GlyphKey) -> GlyphKey {
        let mut current = key;
        while let Some(glyph) = self.glyph_by_key(current) {
            match glyph.part_of() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Let one registered glyph steal the sections of another.
    pub fn steal(
        &mut self,
        lag: &mut Lag,
        winner: GlyphId,
        loser: GlyphId,
    ) -> Result<(), GlyphError> {
        if winner == loser {
            return Ok(());
        }
        for id in [winner, loser] {
            if id.0 == 0 || (id.0 as usize) > self.glyphs.len() {
                return Err(GlyphError::UnknownGlyph(id));
            }
        }
        let wi = (winner.0 as usize) - 1;
        let li = (loser.0 as usize) - 1;
        let (a, b) = if wi < li {
            let (head, tail) = self.glyphs.split_at_mut(li);
            (&mut head[wi], &mut tail[0])
        } else {
            let (head, tail) = self.glyphs.split_at_mut(wi);
            (&mut tail[0], &mut head[li])
        };
        a.steal_sections(lag, b)
    }
}
