//! Vizdeck Core - Fundamental types
//!
//! This crate provides the core types used throughout Vizdeck:
//! - `StaticFigure` / `InteractiveSpec`: the two recognized figure shapes
//! - `Dataset`: the immutable tabular context shared by all units
//! - `RenderError`: structured errors handed to the host, never a crash

mod dataset;
mod error;
mod figure;

pub use dataset::{CellValue, Dataset};
pub use error::{RenderError, RenderErrorKind, RenderResult, UnitError};
pub use figure::{
    Axes, Color, Colorbar, FigureKind, InteractiveSpec, Mark, RenderableFigure, StaticFigure,
    UnitOutput,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Axes, CellValue, Color, Colorbar, Dataset, FigureKind, InteractiveSpec, Mark,
        RenderError, RenderErrorKind, RenderResult, RenderableFigure, StaticFigure, UnitError,
        UnitOutput,
    };
}
