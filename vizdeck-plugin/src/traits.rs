//! Unit trait and calling contracts

use serde::Serialize;
use vizdeck_core::{Dataset, UnitError, UnitOutput};

use crate::AmbientCanvas;

/// Metadata about a visualization unit
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnitMeta {
    /// Stable registry key
    pub name: &'static str,
    /// Menu label shown by the host
    pub title: &'static str,
    pub description: &'static str,
}

/// Declared producer shape.
///
/// The legacy host inspected the producer's parameter count at call
/// time; here the unit states it up front. A producer taking more than
/// the shared dataset is not a supported contract and cannot be
/// declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerKind {
    /// Producer consumes the shared dataset
    TakesData,
    /// Producer takes no arguments
    TakesNothing,
}

/// How a figure is obtained from a loaded unit. Exactly one contract
/// applies per unit, resolved deterministically: a declared producer
/// wins, then a declared static value, then ambient state as the total
/// last resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallContract {
    OneArgProducer,
    ZeroArgProducer,
    StaticValue,
    AmbientState,
}

impl CallContract {
    pub fn for_unit(unit: &dyn VizUnit) -> CallContract {
        match unit.producer() {
            Some(ProducerKind::TakesData) => CallContract::OneArgProducer,
            Some(ProducerKind::TakesNothing) => CallContract::ZeroArgProducer,
            None if unit.static_output().is_some() => CallContract::StaticValue,
            None => CallContract::AmbientState,
        }
    }
}

/// A named, independently loadable unit expected to produce one figure.
///
/// A unit exposes at most one of: a producer (declared via
/// [`VizUnit::producer`], implemented by the matching `produce_*`
/// method), a pre-built static output, or nothing at all, in which
/// case whatever it drew on the canvas during [`VizUnit::on_load`] is
/// used. Producers may also return `Ok(None)` and leave their figure on
/// the canvas they were handed.
pub trait VizUnit: Send + Sync {
    fn meta(&self) -> UnitMeta;

    /// Declared producer contract, if the unit has a producer.
    fn producer(&self) -> Option<ProducerKind> {
        None
    }

    /// Producer body for [`ProducerKind::TakesData`].
    fn produce_with_data(
        &self,
        _data: &Dataset,
        _canvas: &mut AmbientCanvas,
    ) -> Result<Option<UnitOutput>, UnitError> {
        Ok(None)
    }

    /// Producer body for [`ProducerKind::TakesNothing`].
    fn produce(&self, _canvas: &mut AmbientCanvas) -> Result<Option<UnitOutput>, UnitError> {
        Ok(None)
    }

    /// Pre-built figure value, for units with no producer.
    fn static_output(&self) -> Option<UnitOutput> {
        None
    }

    /// Runs once when the unit is first loaded. May draw on the canvas;
    /// the capture is kept for the ambient-state fallback.
    fn on_load(&self, _canvas: &mut AmbientCanvas) -> Result<(), UnitError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizdeck_core::{InteractiveSpec, UnitOutput};

    struct WithDataUnit;
    impl VizUnit for WithDataUnit {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "d", title: "d", description: "" }
        }
        fn producer(&self) -> Option<ProducerKind> {
            Some(ProducerKind::TakesData)
        }
    }

    struct NoArgUnit;
    impl VizUnit for NoArgUnit {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "n", title: "n", description: "" }
        }
        fn producer(&self) -> Option<ProducerKind> {
            Some(ProducerKind::TakesNothing)
        }
    }

    struct StaticUnit;
    impl VizUnit for StaticUnit {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "s", title: "s", description: "" }
        }
        fn static_output(&self) -> Option<UnitOutput> {
            Some(UnitOutput::Interactive(InteractiveSpec::new()))
        }
    }

    struct BareUnit;
    impl VizUnit for BareUnit {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "b", title: "b", description: "" }
        }
    }

    #[test]
    fn test_contract_resolution_is_deterministic_and_total() {
        assert_eq!(CallContract::for_unit(&WithDataUnit), CallContract::OneArgProducer);
        assert_eq!(CallContract::for_unit(&NoArgUnit), CallContract::ZeroArgProducer);
        assert_eq!(CallContract::for_unit(&StaticUnit), CallContract::StaticValue);
        assert_eq!(CallContract::for_unit(&BareUnit), CallContract::AmbientState);
    }

    #[test]
    fn test_producer_wins_over_static_value() {
        struct Both;
        impl VizUnit for Both {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "both", title: "both", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesNothing)
            }
            fn static_output(&self) -> Option<UnitOutput> {
                Some(UnitOutput::Interactive(InteractiveSpec::new()))
            }
        }
        assert_eq!(CallContract::for_unit(&Both), CallContract::ZeroArgProducer);
    }
}
