//! Integration tests for the alignment facet: line fitting, endpoint
//! selection, oriented lengths, probing and stuck counts.

use pretty_assertions::assert_eq;

use glyphlib::{Glyph, GlyphError, Lag, Linking, Orientation, PointF, Run, Scale};

const EPSILON: f64 = 1e-9;

/// Horizontal glyph filling the box (x, y, width, height).
fn filled_box(lag: &mut Lag, x: i32, y: i32, width: i32, height: i32) -> Glyph {
    let mut glyph = Glyph::new(16);
    for row in 0..height {
        let sid = lag.add_section(y + row, vec![Run::new(x, width)]);
        glyph.add_section(lag, sid, Linking::Link).unwrap();
    }
    glyph
}

/// Perfect diagonal of `n` pixels (i, i), one section per row.
fn diagonal(lag: &mut Lag, n: i32) -> Glyph {
    let mut glyph = Glyph::new(16);
    for i in 0..n {
        let sid = lag.add_section(i, vec![Run::new(i, 1)]);
        glyph.add_section(lag, sid, Linking::Link).unwrap();
    }
    glyph
}

// ═══════════════════════════════════════════════════════════════════════
// Degenerate shapes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn single_pixel_has_flat_line_at_origin() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let sid = lag.add_section(7, vec![Run::new(3, 1)]);
    let mut glyph = Glyph::new(16);
    glyph.add_section(&mut lag, sid, Linking::Link).unwrap();

    assert_eq!(glyph.slope(&lag), 0.0);
    let start = glyph.start_point(&lag, Orientation::Horizontal);
    let stop = glyph.stop_point(&lag, Orientation::Horizontal);
    assert_eq!(start, PointF::new(3.0, 7.0));
    assert_eq!(start, stop);
}

// ═══════════════════════════════════════════════════════════════════════
// Rather-horizontal fits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn filled_box_measures() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = filled_box(&mut lag, 0, 0, 100, 10);

    assert_eq!(glyph.length(&lag, Orientation::Horizontal), 100);
    assert_eq!(glyph.thickness(&lag, Orientation::Horizontal), 10);
    assert_eq!(glyph.length(&lag, Orientation::Vertical), 10);
    assert!((glyph.aspect(&lag, Orientation::Horizontal) - 10.0).abs() < EPSILON);

    // A filled box fits a flat line through its vertical center
    assert!(glyph.slope(&lag).abs() < EPSILON);
    let start = glyph.start_point(&lag, Orientation::Horizontal);
    let stop = glyph.stop_point(&lag, Orientation::Horizontal);
    assert!((start.x - 0.0).abs() < EPSILON);
    assert!((start.y - 4.5).abs() < EPSILON);
    assert!((stop.x - 100.0).abs() < EPSILON);
    assert!((stop.y - 4.5).abs() < EPSILON);
}

#[test]
fn queries_are_idempotent() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = filled_box(&mut lag, 2, 3, 40, 5);

    let s1 = glyph.slope(&lag);
    let p1 = glyph.start_point(&lag, Orientation::Horizontal);
    let s2 = glyph.slope(&lag);
    let p2 = glyph.start_point(&lag, Orientation::Horizontal);
    assert_eq!(s1, s2);
    assert_eq!(p1, p2);
    assert_eq!(glyph.mean_distance(&lag), glyph.mean_distance(&lag));
}

// ═══════════════════════════════════════════════════════════════════════
// Rather-vertical fits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn diagonal_endpoints_at_corners() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = diagonal(&mut lag, 21);

    // Slope 1 exceeds the π/4 threshold: the fit is rather vertical
    assert!((glyph.slope(&lag) - 1.0).abs() < EPSILON);
    assert!((glyph.mean_distance(&lag)).abs() < 1e-6);

    let start = glyph.start_point(&lag, Orientation::Vertical);
    let stop = glyph.stop_point(&lag, Orientation::Vertical);
    assert!((start.x - 0.0).abs() < EPSILON);
    assert!((start.y - 0.0).abs() < EPSILON);
    assert!((stop.x - 21.0).abs() < EPSILON);
    assert!((stop.y - 21.0).abs() < EPSILON);

    // Both orderings pick the same two points for a top-left to
    // bottom-right diagonal
    assert_eq!(start, glyph.start_point(&lag, Orientation::Horizontal));
    assert_eq!(stop, glyph.stop_point(&lag, Orientation::Horizontal));
}

#[test]
fn vertical_stem_has_infinite_slope() {
    let mut lag = Lag::new(Orientation::Vertical);
    let sid = lag.add_section(5, vec![Run::new(0, 40)]);
    let mut stem = Glyph::new(16);
    stem.add_section(&mut lag, sid, Linking::Link).unwrap();

    assert!(stem.slope(&lag).is_infinite());
    assert!(stem.inverted_slope(&lag).abs() < EPSILON);
    assert_eq!(stem.length(&lag, Orientation::Vertical), 40);
    assert_eq!(stem.thickness(&lag, Orientation::Vertical), 1);

    let start = stem.start_point(&lag, Orientation::Vertical);
    let stop = stem.stop_point(&lag, Orientation::Vertical);
    assert!((start.x - 5.0).abs() < EPSILON);
    assert!((start.y - 0.0).abs() < EPSILON);
    assert!((stop.x - 5.0).abs() < EPSILON);
    assert!((stop.y - 40.0).abs() < EPSILON);
}

// ═══════════════════════════════════════════════════════════════════════
// Line queries
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn position_at_follows_the_fit() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = diagonal(&mut lag, 21);

    assert!((glyph.position_at(&lag, 10.0, Orientation::Horizontal) - 10.0).abs() < EPSILON);
    assert!((glyph.position_at(&lag, 10.0, Orientation::Vertical) - 10.0).abs() < EPSILON);

    // Extrapolation beyond the box is allowed
    assert!((glyph.position_at(&lag, 30.0, Orientation::Horizontal) - 30.0).abs() < EPSILON);
}

#[test]
fn thickness_probe_measures_local_extent() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let glyph = filled_box(&mut lag, 0, 0, 100, 10);
    let scale = Scale::new(16);

    let t = glyph
        .thickness_at(&lag, &scale, 50.0, Orientation::Horizontal)
        .unwrap();
    assert!((t - 10.0).abs() < EPSILON);

    // A coordinate outside the glyph range fails fast
    let err = glyph
        .thickness_at(&lag, &scale, 100.0, Orientation::Horizontal)
        .unwrap_err();
    assert_eq!(
        err,
        GlyphError::CoordinateOutOfRange {
            coord: 100.0,
            min: 0,
            max: 100,
        }
    );
}

#[test]
fn thickness_probe_in_a_hole_is_zero() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let left = lag.add_section(0, vec![Run::new(0, 10)]);
    let right = lag.add_section(0, vec![Run::new(40, 10)]);
    let mut glyph = Glyph::new(16);
    glyph.add_section(&mut lag, left, Linking::Link).unwrap();
    glyph.add_section(&mut lag, right, Linking::Link).unwrap();
    let scale = Scale::new(16);

    let t = glyph
        .thickness_at(&lag, &scale, 25.0, Orientation::Horizontal)
        .unwrap();
    assert_eq!(t, 0.0);

    // Inside the left stroke the probe sees the full height
    let t = glyph
        .thickness_at(&lag, &scale, 5.0, Orientation::Horizontal)
        .unwrap();
    assert!((t - 1.0).abs() < EPSILON);
}

// ═══════════════════════════════════════════════════════════════════════
// Stuck counts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn stuck_counts_only_foreign_neighbors() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let above = lag.add_section(0, vec![Run::new(5, 10)]);
    let member = lag.add_section(1, vec![Run::new(0, 10)]);
    let below = lag.add_section(2, vec![Run::new(8, 4)]);
    lag.link(above, member);
    lag.link(member, below);

    let mut glyph = Glyph::new(16);
    glyph.add_section(&mut lag, member, Linking::Link).unwrap();

    // above overlaps [5, 9]: 5 pixels; below overlaps [8, 9]: 2 pixels
    assert_eq!(glyph.first_stuck(&lag), 5);
    assert_eq!(glyph.last_stuck(&lag), 2);

    // Absorbing the neighbor makes it friendly
    glyph.add_section(&mut lag, above, Linking::Link).unwrap();
    assert_eq!(glyph.first_stuck(&lag), 0);
    assert_eq!(glyph.last_stuck(&lag), 2);
}

// ═══════════════════════════════════════════════════════════════════════
// Forced endpoints
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn forced_endpoints_override_until_next_mutation() {
    let mut lag = Lag::new(Orientation::Horizontal);
    let mut glyph = diagonal(&mut lag, 21);

    glyph.set_ending_points(PointF::new(1.0, 1.0), PointF::new(9.0, 9.0));
    assert_eq!(
        glyph.start_point(&lag, Orientation::Horizontal),
        PointF::new(1.0, 1.0)
    );
    assert_eq!(
        glyph.stop_point(&lag, Orientation::Horizontal),
        PointF::new(9.0, 9.0)
    );
    // The underlying fit is untouched
    assert!((glyph.slope(&lag) - 1.0).abs() < EPSILON);

    // Any ledger mutation drops the override
    let extra = lag.add_section(21, vec![Run::new(21, 1)]);
    glyph.add_section(&mut lag, extra, Linking::Link).unwrap();
    let start = glyph.start_point(&lag, Orientation::Vertical);
    assert!((start.x - 0.0).abs() < EPSILON);
    assert!((start.y - 0.0).abs() < EPSILON);
}
