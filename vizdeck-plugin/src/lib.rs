//! Vizdeck Plugin System
//!
//! Provides the pieces the render facade composes:
//! - `VizUnit`: the trait a visualization unit implements
//! - `UnitRegistry`: explicit name -> unit-definition table
//! - `UnitLoader`: single-flight, write-once-per-name unit loading
//! - `SharedData` / `AmbientCanvas`: the shared and ambient context
//!
//! Units declare their calling contract instead of being introspected
//! for it, and ambient plotting state is a per-load / per-call scoped
//! canvas rather than a process-wide global.

mod context;
mod loader;
mod registry;
mod traits;

pub use context::{AmbientCanvas, DataSource, SharedData};
pub use loader::{panic_text, LoadedUnit, UnitLoader};
pub use registry::{UnitDef, UnitRegistry};
pub use traits::{CallContract, ProducerKind, UnitMeta, VizUnit};

/// Re-export core types for unit authors
pub mod prelude {
    pub use crate::{
        AmbientCanvas, CallContract, DataSource, ProducerKind, SharedData, UnitMeta, UnitRegistry,
        VizUnit,
    };
    pub use vizdeck_core::prelude::*;
}
