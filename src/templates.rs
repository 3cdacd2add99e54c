//! Template registry: the fixed set of visual themes a card can use.
//!
//! Templates are static data. The application holds a `&'static Template`
//! for the active selection and looks templates up by [`Template::id`] when
//! a shared link names one.
//!
//! | id | name | accent | pattern |
//! |---|---|---|---|
//! | `elegant` | Elegant Blue | `#d4af37` | [`PatternKind::IslamicA`] |
//! | `royal` | Royal Purple | `#ffd700` | [`PatternKind::IslamicB`] |
//! | `emerald` | Emerald Green | `#50c878` | [`PatternKind::Stars`] |
//! | `warm` | Warm Gold | `#f4a830` | [`PatternKind::Geometric`] |

use serde::Serialize;

/// Decorative pattern drawn behind the card content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// Diamond-and-circle lattice, faint.
    IslamicA,
    /// Same lattice as `IslamicA`, slightly stronger.
    IslamicB,
    /// Scattered five-point stars.
    Stars,
    /// 45° hatching.
    Geometric,
}

impl PatternKind {
    /// Opacity the pattern layer is drawn with.
    pub fn opacity(self) -> f32 {
        match self {
            PatternKind::IslamicA => 0.08,
            PatternKind::IslamicB => 0.1,
            PatternKind::Stars => 0.15,
            PatternKind::Geometric => 0.05,
        }
    }
}

/// A three-stop diagonal (135°) gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub start: &'static str,
    pub middle: &'static str,
    pub end: &'static str,
}

impl Gradient {
    /// CSS `background` value for the HTML page.
    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 50%, {} 100%)",
            self.start, self.middle, self.end
        )
    }
}

/// A named visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Stable identifier used in shareable links (`?template=<id>`).
    pub id: &'static str,
    /// Display name shown in the template picker.
    pub name: &'static str,
    pub background: Gradient,
    /// Accent color for text, ornaments and the pattern.
    pub accent: &'static str,
    pub pattern: PatternKind,
}

pub static TEMPLATES: [Template; 4] = [
    Template {
        id: "elegant",
        name: "Elegant Blue",
        background: Gradient {
            start: "#1a1a2e",
            middle: "#16213e",
            end: "#0f3460",
        },
        accent: "#d4af37",
        pattern: PatternKind::IslamicA,
    },
    Template {
        id: "royal",
        name: "Royal Purple",
        background: Gradient {
            start: "#1a0a2e",
            middle: "#2d1b4e",
            end: "#0f0530",
        },
        accent: "#ffd700",
        pattern: PatternKind::IslamicB,
    },
    Template {
        id: "emerald",
        name: "Emerald Green",
        background: Gradient {
            start: "#0a2e1a",
            middle: "#1b4e2d",
            end: "#05301a",
        },
        accent: "#50c878",
        pattern: PatternKind::Stars,
    },
    Template {
        id: "warm",
        name: "Warm Gold",
        background: Gradient {
            start: "#2a1f0a",
            middle: "#3d2e14",
            end: "#1a1405",
        },
        accent: "#f4a830",
        pattern: PatternKind::Geometric,
    },
];

/// All templates in picker order.
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// The template selected before the user picks one.
pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

/// Look up a template by id. Matching is exact (case-sensitive).
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
