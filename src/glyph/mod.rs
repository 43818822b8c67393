//! The glyph aggregate: a connected group of foreground pixels built
//! from member sections, with lazily-cached geometric, alignment and
//! recognition features.
//!
//! The aggregate is split into facets, one submodule per capability:
//! composition (membership ledger), geometry (bounds, moments,
//! signature), alignment (fitted line and endpoints) and recognition
//! (shape evaluation and blacklist).  Reads flow one way (aggregate →
//! caches → extractors); invalidation flows the other way: every
//! structural mutation funnels through [`Glyph::invalidate_cache`],
//! which clears all derived fields at once so no partial cache state is
//! ever observable.

pub mod alignment;
pub mod composition;
pub mod geometry;
pub mod recognition;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::GlyphError;
use crate::geom::{HorizontalSide, PointF};
use crate::section::{Lag, SectionId};
use crate::shape::{grades, Evaluation, Shape, TimeRational};
use crate::signature::GlyphSignature;

use self::alignment::AlignmentCache;
use self::composition::Linking;
use self::geometry::GeometryCache;

/// Process-unique identity of a glyph, drawn at construction.
///
/// This is what section back-references and `part_of` links store, so a
/// transient glyph (not yet registered with any nest) can already own
/// sections.  The nest-scoped public [`GlyphId`] comes later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphKey(u64);

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Public identifier assigned by the nest at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlyphId(pub u32);

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to an externally-owned translated entity.
pub type TranslationId = u64;

/// A named, identifiable aggregate of sections representing one visual
/// symbol candidate.
#[derive(Debug, Clone)]
pub struct Glyph {
    // Identity / administration
    key: GlyphKey,
    id: Option<GlyphId>,
    interline: i32,
    processed: bool,
    vip: bool,

    // Membership and hierarchy
    pub(crate) members: Vec<SectionId>,
    part_of: Option<GlyphKey>,

    // Recognition
    pub(crate) evaluation: Option<Evaluation>,
    pub(crate) forbidden: BTreeSet<Shape>,
    time_rational: Option<TimeRational>,

    // Environment
    pitch_position: f64,
    stems: [Option<GlyphKey>; 2],
    with_ledger: bool,

    // Translation links, cleared independently of the geometry caches
    translations: BTreeSet<TranslationId>,

    // Deduplication
    registered_signature: Option<GlyphSignature>,

    // Lazy caches
    pub(crate) geometry: GeometryCache,
    pub(crate) alignment: AlignmentCache,
}

impl Glyph {
    /// Create a transient glyph (no nest, no public id yet).
    pub fn new(interline: i32) -> Self {
        Self {
            key: GlyphKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed)),
            id: None,
            interline,
            processed: false,
            vip: false,
            members: Vec::new(),
            part_of: None,
            evaluation: None,
            forbidden: BTreeSet::new(),
            time_rational: None,
            pitch_position: 0.0,
            stems: [None, None],
            with_ledger: false,
            translations: BTreeSet::new(),
            registered_signature: None,
            geometry: GeometryCache::default(),
            alignment: AlignmentCache::default(),
        }
    }

    // ─── Identity / administration ───────────────────────────────────

    pub fn key(&self) -> GlyphKey {
        self.key
    }

    pub fn id(&self) -> Option<GlyphId> {
        self.id
    }

    /// Assign the public id.  Done once, by the nest.
    pub fn set_id(&mut self, id: GlyphId) {
        self.id = Some(id);
    }

    /// True until the glyph has been registered with a nest.
    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    /// Short display label built from the public id (0 while transient).
    pub fn id_string(&self) -> String {
        format!("glyph#{}", self.id.map_or(0, |id| id.0))
    }

    pub fn interline(&self) -> i32 {
        self.interline
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn set_processed(&mut self, processed: bool) {
        self.processed = processed;
    }

    /// Debug-trace flag, orthogonal to all functional behavior.
    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub fn set_vip(&mut self) {
        self.vip = true;
    }

    // ─── Hierarchy ───────────────────────────────────────────────────

    /// The compound that absorbed this glyph's sections, if any.
    pub fn part_of(&self) -> Option<GlyphKey> {
        self.part_of
    }

    pub fn set_part_of(&mut self, compound: Option<GlyphKey>) {
        self.part_of = compound;
    }

    // ─── Environment ─────────────────────────────────────────────────

    /// Pitch position relative to the staff (0 = middle line).
    pub fn pitch_position(&self) -> f64 {
        self.pitch_position
    }

    pub fn set_pitch_position(&mut self, pitch_position: f64) {
        self.pitch_position = pitch_position;
    }

    /// Stem attached on the provided side, if any.
    pub fn stem(&self, side: HorizontalSide) -> Option<GlyphKey> {
        self.stems[side.index()]
    }

    pub fn set_stem(&mut self, side: HorizontalSide, stem: Option<GlyphKey>) {
        self.stems[side.index()] = stem;
    }

    /// Number of stems attached (0, 1 or 2).
    pub fn stem_number(&self) -> i32 {
        self.stems.iter().filter(|s| s.is_some()).count() as i32
    }

    pub fn is_with_ledger(&self) -> bool {
        self.with_ledger
    }

    pub fn set_with_ledger(&mut self, with_ledger: bool) {
        self.with_ledger = with_ledger;
    }

    /// Keys of the glyphs whose sections touch this glyph's sections,
    /// discovered by walking member adjacency links.
    pub fn neighbor_keys(&self, lag: &Lag) -> BTreeSet<GlyphKey> {
        let mut neighbors = BTreeSet::new();
        for &sid in &self.members {
            let section = lag.section(sid);
            for &other in section.sources().iter().chain(section.targets()) {
                if let Some(key) = lag.section(other).glyph() {
                    if key != self.key {
                        neighbors.insert(key);
                    }
                }
            }
        }
        neighbors
    }

    // ─── Translations ────────────────────────────────────────────────

    pub fn add_translation(&mut self, entity: TranslationId) {
        self.translations.insert(entity);
    }

    pub fn is_translated(&self) -> bool {
        !self.translations.is_empty()
    }

    pub fn translations(&self) -> impl Iterator<Item = &TranslationId> {
        self.translations.iter()
    }

    /// Clear translation links only; geometry caches are untouched.
    pub fn clear_translations(&mut self) {
        self.translations.clear();
    }

    // ─── Deduplication ───────────────────────────────────────────────

    /// Signature value last used to register this glyph for
    /// deduplication, decoupled from the live signature.
    pub fn registered_signature(&self) -> Option<GlyphSignature> {
        self.registered_signature
    }

    pub fn set_registered_signature(&mut self, signature: GlyphSignature) {
        self.registered_signature = Some(signature);
    }

    // ─── Cache invalidation ──────────────────────────────────────────

    /// Clear every derived geometry and alignment field at once.
    /// Called by any structural mutation; callers never clear an
    /// individual field.
    pub fn invalidate_cache(&mut self) {
        self.geometry = GeometryCache::default();
        self.alignment = AlignmentCache::default();
    }

    /// Force the start and stop points of the approximating line.
    /// Invalidates first, so every other derived field is recomputed
    /// consistently with the forced endpoints.
    pub fn set_ending_points(&mut self, start: PointF, stop: PointF) {
        self.invalidate_cache();
        self.alignment.forced = Some((start, stop));
    }

    // ─── Persistence snapshot ────────────────────────────────────────

    /// The persisted view of this glyph: essential fields only, never
    /// cached derived values.
    pub fn descriptor(&self) -> GlyphDescriptor {
        GlyphDescriptor {
            shape: self.evaluation.map(|e| e.shape),
            interline: self.interline,
            stem_number: self.stem_number(),
            with_ledger: self.with_ledger,
            pitch_position: self.pitch_position,
            members: self.members.clone(),
        }
    }

    /// Rebuild a transient glyph from a persisted descriptor, linking
    /// the member sections back.  Derived fields are recomputed on
    /// demand, as after any reload.
    pub fn from_descriptor(desc: &GlyphDescriptor, lag: &mut Lag) -> Result<Glyph, GlyphError> {
        let mut glyph = Glyph::new(desc.interline);
        for &sid in &desc.members {
            glyph.add_section(lag, sid, Linking::Link)?;
        }
        if let Some(shape) = desc.shape {
            glyph.set_shape(Some(shape), grades::ALGORITHM);
        }
        glyph.pitch_position = desc.pitch_position;
        glyph.with_ledger = desc.with_ledger;
        Ok(glyph)
    }
}

/// The round-tripped essence of a glyph: shape, interline, stem count,
/// ledger flag, pitch position and member section ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphDescriptor {
    pub shape: Option<Shape>,
    pub interline: i32,
    pub stem_number: i32,
    pub with_ledger: bool,
    pub pitch_position: f64,
    pub members: Vec<SectionId>,
}
