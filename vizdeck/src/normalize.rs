//! Output normalization
//!
//! Classifies a unit's output into one of the two recognized figure
//! shapes and applies kind-specific post-processing. Static figures are
//! forced onto a light background with high-contrast text, colorbar
//! panel included, so they stay legible regardless of how the unit
//! styled them. Interactive figures self-style and pass through
//! unchanged. Anything else is an `UnrecognizedOutput`.

use vizdeck_core::{
    Color, InteractiveSpec, RenderError, RenderResult, RenderableFigure, StaticFigure, UnitOutput,
};

const READABLE_BG: Color = Color::WHITE;
const READABLE_FG: Color = Color::BLACK;

pub(crate) fn normalize(name: &str, output: UnitOutput) -> RenderResult<RenderableFigure> {
    match output {
        UnitOutput::Static(mut figure) => {
            apply_readable_theme(&mut figure);
            Ok(RenderableFigure::Static(figure))
        }
        UnitOutput::Interactive(spec) => Ok(RenderableFigure::Interactive(spec)),
        UnitOutput::Raw(value) => match InteractiveSpec::classify(&value) {
            Some(spec) => Ok(RenderableFigure::Interactive(spec)),
            None => Err(RenderError::unrecognized_output(
                name,
                format!("unit returned neither figure shape: {}", shape_of(&value)),
            )),
        },
    }
}

/// Force a light background and high-contrast text everywhere,
/// including the attached colorbar panel.
fn apply_readable_theme(figure: &mut StaticFigure) {
    figure.background = READABLE_BG;
    for axes in &mut figure.axes {
        axes.face = READABLE_BG;
        axes.title_color = READABLE_FG;
        axes.label_color = READABLE_FG;
        axes.tick_color = READABLE_FG;
    }
    if let Some(colorbar) = &mut figure.colorbar {
        colorbar.face = READABLE_BG;
        colorbar.label_color = READABLE_FG;
        colorbar.tick_color = READABLE_FG;
    }
}

fn shape_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object without data/layout",
    }
}
