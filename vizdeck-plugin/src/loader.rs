//! Unit Loader
//!
//! Turns a registry definition into a live unit. Construction and the
//! load hook run inside a panic boundary so a broken unit reports a
//! structured `LoadFailure` instead of taking the host down. Successful
//! loads are cached per name for the process lifetime with single-flight
//! semantics; failed loads are not cached and may be retried.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use vizdeck_core::{RenderError, RenderResult, UnitOutput};

use crate::{AmbientCanvas, UnitDef, VizUnit};

/// A successfully loaded unit plus whatever it left on its load-scoped
/// canvas, kept for the ambient-state fallback.
pub struct LoadedUnit {
    pub unit: Box<dyn VizUnit>,
    pub load_ambient: Option<UnitOutput>,
}

impl std::fmt::Debug for LoadedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedUnit")
            .field("unit", &self.unit.meta().name)
            .field("load_ambient", &self.load_ambient.is_some())
            .finish_non_exhaustive()
    }
}

type UnitSlot = Arc<Mutex<Option<Arc<LoadedUnit>>>>;

/// Write-once-per-name unit cache.
#[derive(Default)]
pub struct UnitLoader {
    slots: Mutex<HashMap<String, UnitSlot>>,
}

impl UnitLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a unit, reusing the cached instance after the first success.
    ///
    /// Concurrent first loads of the same name serialize on a per-name
    /// slot: one execution wins, the others wait and reuse its result.
    pub fn load(&self, def: &UnitDef) -> RenderResult<Arc<LoadedUnit>> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(def.name().to_string()).or_default())
        };

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = guard.as_ref() {
            debug!(unit = def.name(), "unit cache hit");
            return Ok(Arc::clone(loaded));
        }

        let loaded = Arc::new(self.execute(def)?);
        *guard = Some(Arc::clone(&loaded));
        debug!(unit = def.name(), location = def.location(), "unit loaded");
        Ok(loaded)
    }

    /// Whether a unit is already cached, without loading it.
    pub fn is_loaded(&self, name: &str) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(name)
            .map(|slot| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .is_some()
            })
            .unwrap_or(false)
    }

    fn execute(&self, def: &UnitDef) -> RenderResult<LoadedUnit> {
        let constructed = panic::catch_unwind(AssertUnwindSafe(|| def.construct()));
        let unit = match constructed {
            Ok(Ok(unit)) => unit,
            Ok(Err(err)) => {
                warn!(unit = def.name(), error = %err, "unit construction failed");
                return Err(RenderError::load_failure(
                    def.name(),
                    format!("construction failed at {}: {err}", def.location()),
                ));
            }
            Err(payload) => {
                let diagnostic = panic_text(payload);
                warn!(unit = def.name(), panic = %diagnostic, "unit construction panicked");
                return Err(RenderError::load_failure(
                    def.name(),
                    format!("panic while constructing {}: {diagnostic}", def.location()),
                ));
            }
        };

        let mut canvas = AmbientCanvas::new();
        let hook = panic::catch_unwind(AssertUnwindSafe(|| unit.on_load(&mut canvas)));
        match hook {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(unit = def.name(), error = %err, "unit load hook failed");
                return Err(RenderError::load_failure(
                    def.name(),
                    format!("load hook failed: {err}"),
                ));
            }
            Err(payload) => {
                let diagnostic = panic_text(payload);
                warn!(unit = def.name(), panic = %diagnostic, "unit load hook panicked");
                return Err(RenderError::load_failure(
                    def.name(),
                    format!("panic in load hook: {diagnostic}"),
                ));
            }
        }

        Ok(LoadedUnit {
            unit,
            load_ambient: canvas.take(),
        })
    }
}

/// Best-effort text of a panic payload.
pub fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
