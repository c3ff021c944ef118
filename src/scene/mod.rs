//! Scene composition: backgrounds plus positioned, timed text layers.
//!
//! Everything here is plain data. Nothing in this module touches fonts, pixels or the encoder,
//! so a scene plan can be built and inspected without rendering it.

/// Solid and gradient background fills.
pub mod background;
/// Builders for the question, timer and answer scenes.
pub mod builders;
/// Scene and layer data model.
pub mod model;

pub use background::Background;
pub use builders::{SceneBuilder, TIMER_DIGITS, TIMER_SCENE_SECS, truncate_solution};
pub use model::{HAnchor, Scene, SceneKind, TextAlign, TextLayer, TextStyle, VAnchor};
