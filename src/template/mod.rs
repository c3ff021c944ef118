//! Visual templates: the read-only style table a renderer is built from.
//!
//! The catalog is an ordinary value. Construct it once (usually with
//! [`TemplateCatalog::builtin`]) and hand it to whatever needs to resolve a template id.

mod catalog;

pub use catalog::{
    AnimationStyle, BackgroundKind, DEFAULT_TEMPLATE_ID, LayoutKind, Template, TemplateCatalog,
};
