//! Contract resolution
//!
//! Given a loaded unit, obtain a figure from it: declared producer
//! first, then a declared static value, then ambient state as the last
//! resort. Resolution is deterministic and total; anything a unit
//! raises or panics during invocation is contained here and reported as
//! a `CallFailure`.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use vizdeck_core::{RenderError, RenderResult, UnitOutput};
use vizdeck_plugin::{
    panic_text, AmbientCanvas, CallContract, LoadedUnit, ProducerKind, SharedData,
};

/// Resolve the unit's contract and obtain its raw output.
pub(crate) fn obtain_output(
    name: &str,
    loaded: &LoadedUnit,
    data: &SharedData,
) -> RenderResult<UnitOutput> {
    let contract = CallContract::for_unit(loaded.unit.as_ref());
    debug!(unit = name, contract = ?contract, "resolved call contract");

    match contract {
        CallContract::OneArgProducer => {
            invoke_producer(name, loaded, data, ProducerKind::TakesData)
        }
        CallContract::ZeroArgProducer => {
            invoke_producer(name, loaded, data, ProducerKind::TakesNothing)
        }
        CallContract::StaticValue => loaded.unit.static_output().ok_or_else(|| {
            RenderError::call_failure(name, "declared static figure was empty on read")
        }),
        // no producer, no static value: whatever the unit drew while
        // loading is all we have
        CallContract::AmbientState => loaded.load_ambient.clone().ok_or_else(|| {
            RenderError::call_failure(
                name,
                "unit exposes no producer, no static figure, and left nothing in ambient state",
            )
        }),
    }
}

fn invoke_producer(
    name: &str,
    loaded: &LoadedUnit,
    data: &SharedData,
    kind: ProducerKind,
) -> RenderResult<UnitOutput> {
    let dataset = match kind {
        ProducerKind::TakesData => Some(data.get().map_err(|err| {
            RenderError::call_failure(name, format!("shared dataset unavailable: {err}"))
        })?),
        ProducerKind::TakesNothing => None,
    };

    let mut canvas = AmbientCanvas::new();
    let call = panic::catch_unwind(AssertUnwindSafe(|| match dataset.as_deref() {
        Some(ds) => loaded.unit.produce_with_data(ds, &mut canvas),
        None => loaded.unit.produce(&mut canvas),
    }));

    let returned = match call {
        Ok(Ok(returned)) => returned,
        Ok(Err(err)) => {
            return Err(RenderError::call_failure(
                name,
                format!("producer raised: {err}"),
            ));
        }
        Err(payload) => {
            return Err(RenderError::call_failure(
                name,
                format!("panic in producer: {}", panic_text(payload)),
            ));
        }
    };

    if let Some(output) = returned {
        return Ok(output);
    }

    // Legacy double-fallback: a producer that forgets to return is not
    // penalized if it drew into ambient state. The call-scoped canvas is
    // checked first, then the load-time capture.
    if let Some(output) = canvas.take() {
        debug!(unit = name, "producer returned nothing; using call-scoped ambient figure");
        return Ok(output);
    }
    if let Some(output) = loaded.load_ambient.clone() {
        debug!(unit = name, "producer returned nothing; using load-time ambient figure");
        return Ok(output);
    }

    Err(RenderError::call_failure(
        name,
        "producer returned no figure and left nothing in ambient state",
    ))
}
