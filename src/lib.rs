//! glyphlib — glyph model and feature extraction for optical music
//! recognition.
//!
//! A glyph is a connected group of foreground pixels, built from
//! pixel-run sections owned by a [`Lag`], carrying lazily-computed
//! geometric, alignment and recognition features.  Glyphs are
//! registered with a [`Nest`], which assigns ids and recognizes
//! previously-seen shapes through their signatures.
//!
//! # Example
//! ```
//! use glyphlib::{Glyph, Lag, Linking, Orientation, Run};
//!
//! // A 1×40 vertical section — a stem candidate
//! let mut lag = Lag::new(Orientation::Vertical);
//! let sid = lag.add_section(10, vec![Run::new(0, 40)]);
//!
//! let mut glyph = Glyph::new(20); // interline = 20 pixels
//! glyph.add_section(&mut lag, sid, Linking::Link).unwrap();
//!
//! assert_eq!(glyph.weight(&lag), 40);
//! assert_eq!(glyph.length(&lag, Orientation::Vertical), 40);
//! assert!(glyph.is_active(&lag));
//! ```

pub mod constants;
pub mod error;
pub mod geom;
pub mod glyph;
pub mod line;
pub mod moments;
pub mod nest;
pub mod run;
pub mod scale;
pub mod section;
pub mod shape;
pub mod signature;

pub use error::GlyphError;
pub use geom::{Circle, HorizontalSide, Orientation, Point, PointF, Rect};
pub use glyph::composition::Linking;
pub use glyph::{Glyph, GlyphDescriptor, GlyphId, GlyphKey, TranslationId};
pub use line::BasicLine;
pub use moments::{ArtMoments, GeometricMoments, PointsCollector};
pub use nest::Nest;
pub use run::Run;
pub use scale::{Fraction, Scale};
pub use section::{Lag, Section, SectionId};
pub use shape::{grades, Evaluation, Shape, TimeRational};
pub use signature::GlyphSignature;

/// Serialize a glyph descriptor to a JSON string.
/// Useful for handing glyph essentials to an external marshaller.
pub fn descriptor_to_json(descriptor: &GlyphDescriptor) -> Result<String, String> {
    serde_json::to_string_pretty(descriptor).map_err(|e| format!("JSON serialization error: {e}"))
}

/// Parse a glyph descriptor back from its JSON form.
pub fn descriptor_from_json(json: &str) -> Result<GlyphDescriptor, String> {
    serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))
}
