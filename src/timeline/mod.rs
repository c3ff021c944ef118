//! Caption segments and question payloads in, ordered scene timeline out.

/// Scene planning and the assembled timeline.
pub mod assemble;
/// Question payload decoding.
pub mod payload;
/// Timed caption segments.
pub mod segment;

pub use assemble::{NarrationRef, Timeline, plan_scenes};
pub use payload::QuestionPayload;
pub use segment::{CaptionSegment, SecondsText, SegmentKind, parse_captions};

#[cfg(test)]
#[path = "../../tests/unit/timeline/mod.rs"]
mod tests;
