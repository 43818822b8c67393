//! A run is a contiguous sequence of foreground pixels along the
//! orientation axis of its containing section.

/// One horizontal-or-vertical pixel run, in oriented coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Coordinate of the first pixel along the orientation axis.
    pub start: i32,
    /// Number of pixels (always ≥ 1 for a real run).
    pub length: i32,
}

impl Run {
    pub fn new(start: i32, length: i32) -> Self {
        Self { start, length }
    }

    /// Coordinate of the last pixel.
    pub fn stop(&self) -> i32 {
        self.start + self.length - 1
    }

    /// Number of coordinates shared with another run on the same axis.
    pub fn common_length(&self, other: &Run) -> i32 {
        let lo = self.start.max(other.start);
        let hi = self.stop().min(other.stop());
        (hi - lo + 1).max(0)
    }
}
