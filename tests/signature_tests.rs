//! Integration tests for glyph signatures, nest registration and
//! deduplication, ancestry, and the persisted descriptor.

use pretty_assertions::assert_eq;

use glyphlib::{
    descriptor_from_json, descriptor_to_json, Glyph, GlyphError, GlyphId, Lag, Linking, Nest,
    Orientation, Run, Shape,
};

/// An asymmetric L shape of three strips, top-left corner at (x, y).
fn ell(lag: &mut Lag, x: i32, y: i32) -> Glyph {
    let mut glyph = Glyph::new(16);
    for (dy, width) in [(0, 4), (1, 4), (2, 12)] {
        let sid = lag.add_section(y + dy, vec![Run::new(x, width)]);
        glyph.add_section(lag, sid, Linking::Link).unwrap();
    }
    glyph
}

// ═══════════════════════════════════════════════════════════════════════
// Signature
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn signature_is_translation_invariant() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let a = ell(&mut lag, 0, 0);
    let b = ell(&mut lag, 37, 13);

    let sa = a.signature(&lag).unwrap();
    let sb = b.signature(&lag).unwrap();
    assert_eq!(sa, sb);
    assert_eq!(sa.weight(), 20);
}

#[test]
fn different_shapes_sign_differently() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let a = ell(&mut lag, 0, 0);

    let mut bar = Glyph::new(16);
    let sid = lag.add_section(50, vec![Run::new(0, 20)]);
    bar.add_section(&mut lag, sid, Linking::Link).unwrap();

    // Same weight, different layout
    assert_eq!(bar.weight(&lag), a.weight(&lag));
    assert_ne!(a.signature(&lag), bar.signature(&lag));
}

#[test]
fn empty_glyph_has_no_signature() {
    let lag = Lag::new(Orientation::Horizontal);
    let glyph = Glyph::new(16);
    assert_eq!(glyph.signature(&lag), None);
}

// ═══════════════════════════════════════════════════════════════════════
// Nest registration and deduplication
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn duplicate_registration_returns_the_original() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let first = ell(&mut lag, 0, 0);
    let id1 = nest.register(&lag, first);
    assert_eq!(id1, GlyphId(1));
    assert_eq!(nest.glyph_count(), 1);

    // A translated copy carries the same signature: the candidate is
    // dropped and the original id handed back
    let copy = ell(&mut lag, 40, 7);
    let id2 = nest.register(&lag, copy);
    assert_eq!(id2, id1);
    assert_eq!(nest.glyph_count(), 1);
}

#[test]
fn deduplication_restores_the_original_to_top_level() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let first = ell(&mut lag, 0, 0);
    let id1 = nest.register(&lag, first);

    let parent = Glyph::new(16);
    nest.glyph_mut(id1)
        .unwrap()
        .set_part_of(Some(parent.key()));

    let copy = ell(&mut lag, 40, 7);
    let id2 = nest.register(&lag, copy);
    assert_eq!(id2, id1);
    assert_eq!(nest.glyph(id1).unwrap().part_of(), None);
}

#[test]
fn obsolete_signature_no_longer_deduplicates() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let first = ell(&mut lag, 0, 0);
    let sig = first.signature(&lag).unwrap();
    let id1 = nest.register(&lag, first);
    assert_eq!(nest.original(&lag, sig), Some(id1));

    // Grow the registered glyph: its live signature diverges from the
    // registered one, making the dedup entry stale
    let extra = lag.add_section(10, vec![Run::new(0, 6)]);
    nest.glyph_mut(id1)
        .unwrap()
        .add_section(&mut lag, extra, Linking::Link)
        .unwrap();

    assert_eq!(nest.original(&lag, sig), None);
    assert_eq!(nest.glyph(id1).unwrap().registered_signature(), Some(sig));

    // A fresh glyph with that signature now earns its own id
    let copy = ell(&mut lag, 40, 7);
    let id2 = nest.register(&lag, copy);
    assert_ne!(id2, id1);
    assert_eq!(nest.glyph_count(), 2);
}

#[test]
fn re_register_refreshes_the_dedup_entry() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let first = ell(&mut lag, 0, 0);
    let id1 = nest.register(&lag, first);

    let extra = lag.add_section(10, vec![Run::new(0, 6)]);
    nest.glyph_mut(id1)
        .unwrap()
        .add_section(&mut lag, extra, Linking::Link)
        .unwrap();

    nest.re_register(&lag, id1);
    let new_sig = nest.glyph(id1).unwrap().signature(&lag).unwrap();
    assert_eq!(nest.glyph(id1).unwrap().registered_signature(), Some(new_sig));
    assert_eq!(nest.original(&lag, new_sig), Some(id1));
}

#[test]
fn remove_drops_only_the_dedup_entry() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let first = ell(&mut lag, 0, 0);
    let sig = first.signature(&lag).unwrap();
    let id1 = nest.register(&lag, first);

    nest.remove(&lag, id1);
    assert_eq!(nest.original(&lag, sig), None);
    // The glyph itself stays addressable
    assert!(nest.glyph(id1).is_some());

    // And a look-alike now registers as a new original
    let copy = ell(&mut lag, 40, 7);
    let id2 = nest.register(&lag, copy);
    assert_ne!(id2, id1);
}

// ═══════════════════════════════════════════════════════════════════════
// Ancestry and stealing through the nest
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ancestor_follows_part_of_after_steal() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();

    let winner = ell(&mut lag, 0, 0);
    let winner_id = nest.register(&lag, winner);
    let mut loser = Glyph::new(16);
    let sid = lag.add_section(20, vec![Run::new(0, 5)]);
    loser.add_section(&mut lag, sid, Linking::Link).unwrap();
    let loser_key = loser.key();
    let loser_id = nest.register(&lag, loser);

    nest.steal(&mut lag, winner_id, loser_id).unwrap();

    let winner_key = nest.glyph(winner_id).unwrap().key();
    assert_eq!(nest.ancestor_of(loser_key), winner_key);
    // An unattached glyph is its own ancestor
    assert_eq!(nest.ancestor_of(winner_key), winner_key);

    // The winner now owns the stolen section
    assert!(nest.glyph(winner_id).unwrap().contains_section(sid));
}

#[test]
fn steal_rejects_unknown_ids() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut nest = Nest::new();
    let glyph = ell(&mut lag, 0, 0);
    let id = nest.register(&lag, glyph);

    assert_eq!(
        nest.steal(&mut lag, id, GlyphId(99)),
        Err(GlyphError::UnknownGlyph(GlyphId(99)))
    );
    // Self-steal is a no-op
    assert_eq!(nest.steal(&mut lag, id, id), Ok(()));
}

// ═══════════════════════════════════════════════════════════════════════
// Descriptor round trip
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn descriptor_round_trips_through_json() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut glyph = ell(&mut lag, 0, 0);
    glyph.set_shape(Some(Shape::Flat), 0.8);
    glyph.set_pitch_position(-1.5);
    glyph.set_with_ledger(true);

    let desc = glyph.descriptor();
    let json = descriptor_to_json(&desc).unwrap();
    let back = descriptor_from_json(&json).unwrap();
    assert_eq!(back, desc);

    // Rebuilding produces an equivalent transient glyph
    let rebuilt = Glyph::from_descriptor(&back, &mut lag).unwrap();
    assert!(rebuilt.is_transient());
    assert_eq!(rebuilt.members(), glyph.members());
    assert_eq!(rebuilt.shape(), Some(Shape::Flat));
    assert_eq!(rebuilt.pitch_position(), -1.5);
    assert!(rebuilt.is_with_ledger());
    assert_eq!(rebuilt.weight(&lag), glyph.weight(&lag));
    // Member back-references now follow the rebuilt glyph
    assert!(rebuilt.is_active(&lag));
    assert!(!glyph.is_active(&lag));
}

#[test]
fn descriptor_with_unknown_member_fails_fast() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = ell(&mut lag, 0, 0);
    let desc = glyph.descriptor();

    let mut empty_lag = Lag::new(Orientation::Horizontal);
    let result = Glyph::from_descriptor(&desc, &mut empty_lag);
    assert!(matches!(result, Err(GlyphError::UnknownSection(_))));
}
