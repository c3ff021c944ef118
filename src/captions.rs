//! Estimated caption timing for a narration script.
//!
//! Timing assumes a steady speaking rate of [`WORDS_PER_SECOND`]. The spoken countdown is
//! always given exactly five seconds.

use crate::timeline::{CaptionSegment, SegmentKind};

/// Sentence fragment every script style uses for its countdown.
pub const COUNTDOWN_MARKER: &str = "5... 4... 3... 2... 1";
/// Caption text shown for the countdown segment.
pub const COUNTDOWN_TEXT: &str = "5... 4... 3... 2... 1...";
/// Assumed speaking rate.
pub const WORDS_PER_SECOND: f64 = 2.5;
/// Length of the spoken countdown.
pub const COUNTDOWN_SECS: f64 = 5.0;

/// Timed captions for a whole script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionTrack {
    /// Segments in script order.
    pub captions: Vec<CaptionSegment>,
    /// Two-decimal seconds, like the segment times.
    pub total_duration: String,
    /// Whether the script mentions the countdown at all.
    pub has_timer: bool,
}

/// Split `script` at the countdown into question, timer and answer captions.
///
/// Scripts without exactly one countdown get a single `full` caption.
pub fn generate_captions(script: &str) -> CaptionTrack {
    let has_timer = script.contains(COUNTDOWN_MARKER);
    let parts: Vec<&str> = script.split(COUNTDOWN_MARKER).collect();

    let mut captions = Vec::with_capacity(3);
    let mut now = 0.0f64;

    if let [before, after] = parts.as_slice() {
        let before = before.trim();
        let after = after.trim();

        let question_secs = spoken_words(before) as f64 / WORDS_PER_SECOND;
        captions.push(segment(SegmentKind::Question, now, question_secs, before));
        now += question_secs;

        captions.push(segment(SegmentKind::Timer, now, COUNTDOWN_SECS, COUNTDOWN_TEXT));
        now += COUNTDOWN_SECS;

        let answer_secs = spoken_words(after) as f64 / WORDS_PER_SECOND;
        captions.push(segment(SegmentKind::Answer, now, answer_secs, after));
        now += answer_secs;
    } else {
        let words = script.split_whitespace().count();
        now = words as f64 / WORDS_PER_SECOND;
        captions.push(CaptionSegment::new(
            SegmentKind::Other("full".to_string()),
            "0.00",
            secs_text(now).as_str(),
            script,
        ));
    }

    tracing::debug!(segments = captions.len(), total_secs = now, has_timer, "captions timed");
    CaptionTrack {
        captions,
        total_duration: secs_text(now),
        has_timer,
    }
}

// An empty section still counts as one word.
fn spoken_words(section: &str) -> usize {
    section.split_whitespace().count().max(1)
}

fn segment(kind: SegmentKind, start: f64, secs: f64, text: &str) -> CaptionSegment {
    CaptionSegment::new(
        kind,
        secs_text(start).as_str(),
        secs_text(start + secs).as_str(),
        text,
    )
}

fn secs_text(secs: f64) -> String {
    format!("{secs:.2}")
}
