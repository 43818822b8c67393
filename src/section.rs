//! Sections and the lag that owns them.
//!
//! A section is an oriented stack of adjacent pixel runs — the smallest
//! unit a glyph is built from.  Sections are owned by a `Lag` arena and
//! addressed by `SectionId`; a section carries a back-reference to at
//! most one owning glyph, written last-writer-wins with no
//! verification (ownership is only authoritative together with the
//! glyph's own membership check).

use serde::{Deserialize, Serialize};

use crate::geom::{Orientation, Rect};
use crate::glyph::GlyphKey;
use crate::line::BasicLine;
use crate::moments::PointsCollector;
use crate::run::Run;

/// Identifier of a section within its lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(u32);

impl SectionId {
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Canonical ordering key of a section: absolute x, then y, then id.
/// Independent of the section's own orientation.
pub type SectionKey = (i32, i32, u32);

/// An oriented aggregate of parallel pixel runs.
#[derive(Debug, Clone)]
pub struct Section {
    id: SectionId,
    orientation: Orientation,
    /// Position (across the orientation axis) of the first run.
    first_pos: i32,
    runs: Vec<Run>,
    /// Total pixel count.
    weight: i32,
    /// Absolute bounding box.
    bounds: Rect,
    /// Own least-squares fit over every pixel.
    line: BasicLine,
    /// Back-reference to the owning glyph, if any.
    glyph: Option<GlyphKey>,
    /// Sections touching the first run (previous position).
    sources: Vec<SectionId>,
    /// Sections touching the last run (next position).
    targets: Vec<SectionId>,
}

impl Section {
    fn new(id: SectionId, orientation: Orientation, first_pos: i32, runs: Vec<Run>) -> Self {
        let weight: i32 = runs.iter().map(|r| r.length).sum();

        let (coord_min, coord_max) = runs.iter().fold((i32::MAX, i32::MIN), |(lo, hi), r| {
            (lo.min(r.start), hi.max(r.stop()))
        });
        let oriented = Rect::new(
            coord_min,
            first_pos,
            coord_max - coord_min + 1,
            runs.len() as i32,
        );
        let bounds = orientation.absolute_rect(&oriented);

        let mut line = BasicLine::new();
        let mut pos = first_pos;
        for run in &runs {
            for coord in run.start..=run.stop() {
                let p = orientation.absolute(coord, pos);
                line.include_point(p.x as f64, p.y as f64);
            }
            pos += 1;
        }

        Self {
            id,
            orientation,
            first_pos,
            runs,
            weight,
            bounds,
            line,
            glyph: None,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn first_pos(&self) -> i32 {
        self.first_pos
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn first_run(&self) -> &Run {
        &self.runs[0]
    }

    pub fn last_run(&self) -> &Run {
        &self.runs[self.runs.len() - 1]
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Absolute bounding box (cheap copy).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The section's own fitted line.
    pub fn line(&self) -> &BasicLine {
        &self.line
    }

    /// Canonical ordering key (absolute x, then y, then id).
    pub fn key(&self) -> SectionKey {
        (self.bounds.x, self.bounds.y, self.id.0)
    }

    /// The glyph this section claims to belong to, if any.
    pub fn glyph(&self) -> Option<GlyphKey> {
        self.glyph
    }

    /// Set or clear the back-reference.  Last writer wins.
    pub fn set_glyph(&mut self, glyph: Option<GlyphKey>) {
        self.glyph = glyph;
    }

    pub fn sources(&self) -> &[SectionId] {
        &self.sources
    }

    pub fn targets(&self) -> &[SectionId] {
        &self.targets
    }

    /// Stream every absolute foreground pixel into the collector.
    pub fn cumulate(&self, collector: &mut PointsCollector) {
        let mut pos = self.first_pos;
        for run in &self.runs {
            for coord in run.start..=run.stop() {
                let p = self.orientation.absolute(coord, pos);
                collector.include(p.x, p.y);
            }
            pos += 1;
        }
    }
}

/// Arena owning every section of one oriented view.
#[derive(Debug, Clone)]
pub struct Lag {
    orientation: Orientation,
    sections: Vec<Section>,
}

impl Lag {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            sections: Vec::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Create a section from its oriented runs and report its id.
    ///
    /// # Panics
    ///
    /// Panics when `runs` is empty: a section without pixels has no
    /// first or last run to speak of.
    pub fn add_section(&mut self, first_pos: i32, runs: Vec<Run>) -> SectionId {
        assert!(!runs.is_empty(), "a section requires at least one run");
        let id = SectionId(self.sections.len() as u32);
        self.sections
            .push(Section::new(id, self.orientation, first_pos, runs));
        id
    }

    /// Access a section minted by this lag.
    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0 as usize]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0 as usize]
    }

    /// Whether the id designates a section of this lag.
    pub fn contains_id(&self, id: SectionId) -> bool {
        (id.0 as usize) < self.sections.len()
    }

    /// Declare `target` to follow `source` (they touch across positions).
    pub fn link(&mut self, source: SectionId, target: SectionId) {
        self.sections[source.0 as usize].targets.push(target);
        self.sections[target.0 as usize].sources.push(source);
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least one run")]
    fn empty_section_is_rejected() {
        let mut lag = Lag::new(Orientation::Horizontal);
        lag.add_section(0, vec![]);
    }

    #[test]
    fn horizontal_section_geometry() {
        let mut lag = Lag::new(Orientation::Horizontal);
        // Two runs: y=5 covering x 2..=6, y=6 covering x 4..=9
        let id = lag.add_section(5, vec![Run::new(2, 5), Run::new(4, 6)]);
        let s = lag.section(id);
        assert_eq!(s.weight(), 11);
        assert_eq!(s.bounds(), Rect::new(2, 5, 8, 2));
        assert_eq!(s.key(), (2, 5, 0));

        let mut collector = PointsCollector::new();
        s.cumulate(&mut collector);
        assert_eq!(collector.count(), 11);
    }

    #[test]
    fn vertical_section_geometry() {
        let mut lag = Lag::new(Orientation::Vertical);
        // One run at x=3 (pos), covering y 10..=14
        let id = lag.add_section(3, vec![Run::new(10, 5)]);
        let s = lag.section(id);
        assert_eq!(s.bounds(), Rect::new(3, 10, 1, 5));
        assert!(s.line().is_vertical());

        let mut collector = PointsCollector::new();
        s.cumulate(&mut collector);
        assert_eq!(collector.count(), 5);
        assert_eq!(collector.xs()[0], 3);
    }

    #[test]
    fn adjacency_links() {
        let mut lag = Lag::new(Orientation::Horizontal);
        let a = lag.add_section(0, vec![Run::new(0, 4)]);
        let b = lag.add_section(1, vec![Run::new(2, 4)]);
        lag.link(a, b);
        assert_eq!(lag.section(a).targets(), &[b]);
        assert_eq!(lag.section(b).sources(), &[a]);
    }
}
