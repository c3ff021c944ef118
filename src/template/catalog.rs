use crate::foundation::color::hex_to_rgb;
use crate::foundation::core::Rgb8;
use crate::foundation::error::QuizResult;

/// Template id used when a requested id is not in the catalog.
pub const DEFAULT_TEMPLATE_ID: u32 = 1;

/// How the full-frame background is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    /// Uniform primary color.
    Solid,
    /// Static diagonal blend from primary (top-left) to secondary (bottom-right).
    Gradient,
}

/// Layout family a template belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Modern layout.
    Modern,
    /// Classic layout.
    Classic,
    /// Minimal layout.
    Minimal,
}

/// How much motion a template uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Smooth motion; the header fades in.
    Smooth,
    /// Dynamic motion; the header fades in.
    Dynamic,
    /// Subtle motion; the header appears without a fade.
    Subtle,
}

/// Immutable style descriptor for one visual template.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Template {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Background fill kind.
    pub background: BackgroundKind,
    /// `#rrggbb`.
    pub primary_color: &'static str,
    /// `#rrggbb`.
    pub secondary_color: &'static str,
    /// Font family for every text layer.
    pub font_family: &'static str,
    /// Layout family.
    pub layout: LayoutKind,
    /// Animation style.
    pub animation: AnimationStyle,
}

impl Template {
    /// Parsed primary color.
    pub fn primary_rgb(&self) -> QuizResult<Rgb8> {
        hex_to_rgb(self.primary_color)
    }

    /// Parsed secondary color.
    pub fn secondary_rgb(&self) -> QuizResult<Rgb8> {
        hex_to_rgb(self.secondary_color)
    }

    /// Body text color: white over gradients, the secondary color over solid fills.
    pub fn text_color(&self) -> QuizResult<Rgb8> {
        match self.background {
            BackgroundKind::Gradient => Ok(Rgb8::WHITE),
            BackgroundKind::Solid => self.secondary_rgb(),
        }
    }

    /// Header color: white over gradients, the primary color over solid fills.
    pub fn header_color(&self) -> QuizResult<Rgb8> {
        match self.background {
            BackgroundKind::Gradient => Ok(Rgb8::WHITE),
            BackgroundKind::Solid => self.primary_rgb(),
        }
    }
}

const BUILTIN: [Template; 4] = [
    Template {
        id: 1,
        name: "Teal Gradient Professional",
        background: BackgroundKind::Gradient,
        primary_color: "#0d9488",
        secondary_color: "#14b8a6",
        font_family: "Inter",
        layout: LayoutKind::Modern,
        animation: AnimationStyle::Smooth,
    },
    Template {
        id: 2,
        name: "Warm Gradient Modern",
        background: BackgroundKind::Gradient,
        primary_color: "#0d9488",
        secondary_color: "#6366f1",
        font_family: "Poppins",
        layout: LayoutKind::Modern,
        animation: AnimationStyle::Dynamic,
    },
    Template {
        id: 3,
        name: "Cool Blue Academic",
        background: BackgroundKind::Gradient,
        primary_color: "#3b82f6",
        secondary_color: "#8b5cf6",
        font_family: "Inter",
        layout: LayoutKind::Classic,
        animation: AnimationStyle::Smooth,
    },
    Template {
        id: 4,
        name: "Clean Minimal",
        background: BackgroundKind::Solid,
        primary_color: "#f3f4f6",
        secondary_color: "#1f2937",
        font_family: "Inter",
        layout: LayoutKind::Minimal,
        animation: AnimationStyle::Subtle,
    },
];

/// Read-only id → [`Template`] table.
///
/// Lookups never fail: an unknown id resolves to the default template.
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    default_idx: usize,
}

impl TemplateCatalog {
    /// The four built-in templates, with id 1 as the default.
    pub fn builtin() -> Self {
        let templates = BUILTIN.to_vec();
        let default_idx = templates
            .iter()
            .position(|t| t.id == DEFAULT_TEMPLATE_ID)
            .unwrap_or(0);
        Self {
            templates,
            default_idx,
        }
    }

    /// Resolve `id`, falling back to the default template for unknown ids.
    pub fn get(&self, id: u32) -> &Template {
        self.find(id).unwrap_or_else(|| self.default_template())
    }

    /// Exact lookup without fallback.
    pub fn find(&self, id: u32) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The template returned for unknown ids.
    pub fn default_template(&self) -> &Template {
        &self.templates[self.default_idx]
    }

    /// Templates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/catalog.rs"]
mod tests;
