//! Figure shapes
//!
//! Two shapes are recognized by the host: a `StaticFigure` (rendered,
//! non-interactive, restyled by the normalizer before display) and an
//! `InteractiveSpec` (a structured, re-navigable chart description that
//! self-styles). Units hand back a `UnitOutput`, which may also be raw
//! JSON that still needs classification.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 24-bit RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend between two colors, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgb(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}'")))
    }
}

/// Drawn content inside one axes panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum Mark {
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        /// Per-point marker areas
        sizes: Vec<f64>,
        colors: Vec<Color>,
        /// Hover labels, one per point
        labels: Vec<String>,
    },
    Segments {
        segments: Vec<((f64, f64), (f64, f64))>,
        color: Color,
        width: f64,
    },
    Heatmap {
        /// Row-major cell values
        values: Vec<Vec<f64>>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    },
    Annotations {
        points: Vec<(f64, f64)>,
        texts: Vec<String>,
        color: Color,
    },
}

/// One axes panel of a static figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title_color: Color,
    pub label_color: Color,
    pub tick_color: Color,
    pub face: Color,
    pub marks: Vec<Mark>,
}

impl Axes {
    pub fn new() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            title_color: Color::BLACK,
            label_color: Color::BLACK,
            tick_color: Color::BLACK,
            face: Color::WHITE,
            marks: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

/// Auxiliary scale panel attached to a static figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    pub label: Option<String>,
    pub label_color: Color,
    pub tick_color: Color,
    pub face: Color,
}

impl Colorbar {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            label_color: Color::BLACK,
            tick_color: Color::BLACK,
            face: Color::WHITE,
        }
    }
}

/// Fully rendered, non-interactive figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFigure {
    /// Figure size in inches
    pub width_in: f64,
    pub height_in: f64,
    pub background: Color,
    pub axes: Vec<Axes>,
    pub colorbar: Option<Colorbar>,
}

impl StaticFigure {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            background: Color::WHITE,
            axes: Vec::new(),
            colorbar: None,
        }
    }

    pub fn with_axes(mut self, axes: Axes) -> Self {
        self.axes.push(axes);
        self
    }

    pub fn with_colorbar(mut self, colorbar: Colorbar) -> Self {
        self.colorbar = Some(colorbar);
        self
    }
}

/// Structured, re-navigable chart description.
///
/// `data` holds one JSON object per trace, `layout` the chart-wide
/// options. Interactive figures self-style and pass through the
/// normalizer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveSpec {
    pub data: Vec<JsonValue>,
    pub layout: JsonValue,
}

impl InteractiveSpec {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            layout: JsonValue::Object(Default::default()),
        }
    }

    pub fn with_trace(mut self, trace: JsonValue) -> Self {
        self.data.push(trace);
        self
    }

    pub fn with_layout(mut self, layout: JsonValue) -> Self {
        self.layout = layout;
        self
    }

    /// Structural classification of a raw value: an object carrying a
    /// `data` array and a `layout` object is an interactive chart.
    pub fn classify(value: &JsonValue) -> Option<InteractiveSpec> {
        let obj = value.as_object()?;
        let data = obj.get("data")?.as_array()?;
        let layout = obj.get("layout")?;
        if !layout.is_object() {
            return None;
        }
        Some(InteractiveSpec {
            data: data.clone(),
            layout: layout.clone(),
        })
    }
}

impl Default for InteractiveSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// What a unit hands back before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UnitOutput {
    Static(StaticFigure),
    Interactive(InteractiveSpec),
    /// Unclassified payload; the normalizer decides whether it is a
    /// figure shape at all
    Raw(JsonValue),
}

/// Figure kind tag the host branches on to pick a display path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Static,
    Interactive,
}

/// Normalized output: always one of the two recognized shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "figure", rename_all = "snake_case")]
pub enum RenderableFigure {
    Static(StaticFigure),
    Interactive(InteractiveSpec),
}

impl RenderableFigure {
    pub fn kind(&self) -> FigureKind {
        match self {
            RenderableFigure::Static(_) => FigureKind::Static,
            RenderableFigure::Interactive(_) => FigureKind::Interactive,
        }
    }

    pub fn as_static(&self) -> Option<&StaticFigure> {
        match self {
            RenderableFigure::Static(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_interactive(&self) -> Option<&InteractiveSpec> {
        match self {
            RenderableFigure::Interactive(s) => Some(s),
            _ => None,
        }
    }
}
