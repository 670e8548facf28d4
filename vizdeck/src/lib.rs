//! Vizdeck - plugin-driven dashboard render core
//!
//! The host picks a unit by name; `Dashboard::render` resolves it in the
//! registry, loads it (once), works out its calling contract, and hands
//! back a normalized figure ready for display - or a structured error
//! that names the unit and what went wrong. One broken unit never takes
//! the dashboard down.

mod normalize;
mod resolve;
pub mod telemetry;

pub use vizdeck_core::{
    Axes, CellValue, Color, Colorbar, Dataset, FigureKind, InteractiveSpec, Mark, RenderError,
    RenderErrorKind, RenderResult, RenderableFigure, StaticFigure, UnitError, UnitOutput,
};
pub use vizdeck_plugin::{
    AmbientCanvas, CallContract, DataSource, ProducerKind, SharedData, UnitLoader, UnitMeta,
    UnitRegistry, VizUnit,
};

use std::sync::Arc;

use tracing::{debug, warn};

/// Render dispatcher: the facade the host UI calls.
pub struct Dashboard {
    registry: Arc<UnitRegistry>,
    loader: UnitLoader,
    data: SharedData,
}

impl Dashboard {
    pub fn new(registry: UnitRegistry, source: impl DataSource + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            loader: UnitLoader::new(),
            data: SharedData::new(source),
        }
    }

    /// Dashboard with the built-in visualization units registered.
    pub fn with_standard_units(source: impl DataSource + 'static) -> Self {
        Self::new(vizdeck_std::standard_registry(), source)
    }

    /// Registered unit names in menu order.
    pub fn unit_names(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Render one unit: registry lookup, load, contract resolution,
    /// normalization - short-circuiting at the first error. No retries;
    /// a fresh call re-attempts a failed load.
    pub fn render(&self, name: &str) -> Result<RenderableFigure, RenderError> {
        debug!(unit = name, "render requested");
        let result = self.render_inner(name);
        match &result {
            Ok(figure) => debug!(unit = name, kind = ?figure.kind(), "render succeeded"),
            Err(err) => warn!(unit = name, error = %err, "render failed"),
        }
        result
    }

    fn render_inner(&self, name: &str) -> Result<RenderableFigure, RenderError> {
        let def = self
            .registry
            .resolve(name)
            .ok_or_else(|| RenderError::not_found(name))?;
        let loaded = self.loader.load(def)?;
        let output = resolve::obtain_output(name, &loaded, &self.data)?;
        normalize::normalize(name, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vizdeck_core::UnitOutput;

    fn fixture_dataset() -> Dataset {
        Dataset::from_json_records(
            r#"[
                {"产品名称": "基金A", "年化收益2025": "12.5%", "夏普比率": "1.2"},
                {"产品名称": "基金B", "年化收益2025": "8.0%", "夏普比率": "0.8"}
            ]"#,
        )
        .unwrap()
    }

    fn fixture_source() -> impl DataSource {
        || Ok::<Dataset, UnitError>(fixture_dataset())
    }

    fn dark_static_output() -> UnitOutput {
        let mut figure = StaticFigure::new(10.0, 8.0).with_axes(Axes::new().with_title("t"));
        figure.background = Color::rgb(0x10, 0x10, 0x18);
        figure.axes[0].title_color = Color::rgb(0xee, 0xee, 0xee);
        UnitOutput::Static(figure)
    }

    struct ZeroArgDark;
    impl VizUnit for ZeroArgDark {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "a", title: "模型 ①", description: "" }
        }
        fn producer(&self) -> Option<ProducerKind> {
            Some(ProducerKind::TakesNothing)
        }
        fn produce(&self, _canvas: &mut AmbientCanvas) -> Result<Option<UnitOutput>, UnitError> {
            Ok(Some(dark_static_output()))
        }
    }

    struct Raising;
    impl VizUnit for Raising {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: "b", title: "模型 ②", description: "" }
        }
        fn producer(&self) -> Option<ProducerKind> {
            Some(ProducerKind::TakesNothing)
        }
        fn produce(&self, _canvas: &mut AmbientCanvas) -> Result<Option<UnitOutput>, UnitError> {
            Err(UnitError::failed("value out of range"))
        }
    }

    fn scenario_dashboard() -> Dashboard {
        let registry = UnitRegistry::new()
            .with_unit("a", "models::a", || Ok(Box::new(ZeroArgDark)))
            .with_unit("b", "models::b", || Ok(Box::new(Raising)));
        Dashboard::new(registry, fixture_source())
    }

    #[test]
    fn test_scenario_zero_arg_static_gets_light_background() {
        let dashboard = scenario_dashboard();
        let figure = dashboard.render("a").unwrap();
        assert_eq!(figure.kind(), FigureKind::Static);
        let inner = figure.as_static().unwrap();
        assert_eq!(inner.background, Color::WHITE);
        assert_eq!(inner.axes[0].title_color, Color::BLACK);
    }

    #[test]
    fn test_scenario_unknown_name_is_not_found() {
        let dashboard = scenario_dashboard();
        let err = dashboard.render("c").unwrap_err();
        assert_eq!(err.kind, RenderErrorKind::NotFound);
        assert_eq!(err.unit, "c");
    }

    #[test]
    fn test_scenario_raising_producer_does_not_poison_other_units() {
        let dashboard = scenario_dashboard();
        let err = dashboard.render("b").unwrap_err();
        assert_eq!(err.kind, RenderErrorKind::CallFailure);
        assert_eq!(err.unit, "b");
        assert!(!err.diagnostic.is_empty());
        // a later render of "a" still succeeds
        assert!(dashboard.render("a").is_ok());
        // and "b" fails the same way again - deterministic, no caching of failures
        assert_eq!(dashboard.render("b").unwrap_err().kind, RenderErrorKind::CallFailure);
    }

    #[test]
    fn test_one_arg_producer_receives_the_shared_dataset() {
        struct SeesData;
        impl VizUnit for SeesData {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "sees", title: "sees", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesData)
            }
            fn produce_with_data(
                &self,
                data: &Dataset,
                _canvas: &mut AmbientCanvas,
            ) -> Result<Option<UnitOutput>, UnitError> {
                let sharpe = data.numeric("夏普比率")?;
                let spec = InteractiveSpec::new()
                    .with_trace(serde_json::json!({"type": "scatter", "n": sharpe.len()}));
                Ok(Some(UnitOutput::Interactive(spec)))
            }
        }

        let registry =
            UnitRegistry::new().with_unit("sees", "tests::sees", || Ok(Box::new(SeesData)));
        let dashboard = Dashboard::new(registry, fixture_source());
        let figure = dashboard.render("sees").unwrap();
        assert_eq!(figure.as_interactive().unwrap().data[0]["n"], 2);
    }

    #[test]
    fn test_ambient_only_unit_yields_its_load_time_figure() {
        struct AmbientOnly;
        impl VizUnit for AmbientOnly {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "ambient", title: "ambient", description: "" }
            }
            fn on_load(&self, canvas: &mut AmbientCanvas) -> Result<(), UnitError> {
                canvas.record(dark_static_output());
                Ok(())
            }
        }

        let registry = UnitRegistry::new()
            .with_unit("ambient", "tests::ambient", || Ok(Box::new(AmbientOnly)));
        let dashboard = Dashboard::new(registry, fixture_source());
        let figure = dashboard.render("ambient").unwrap();
        // still goes through normalization
        assert_eq!(figure.as_static().unwrap().background, Color::WHITE);
    }

    #[test]
    fn test_static_value_unit_renders_its_declared_figure() {
        struct StaticOnly;
        impl VizUnit for StaticOnly {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "fixed", title: "fixed", description: "" }
            }
            fn static_output(&self) -> Option<UnitOutput> {
                Some(dark_static_output())
            }
        }

        let registry = UnitRegistry::new()
            .with_unit("fixed", "tests::fixed", || Ok(Box::new(StaticOnly)));
        let dashboard = Dashboard::new(registry, fixture_source());
        let figure = dashboard.render("fixed").unwrap();
        assert_eq!(figure.as_static().unwrap().background, Color::WHITE);
    }

    #[test]
    fn test_producer_that_forgets_to_return_falls_back_to_its_canvas() {
        struct DrawsButForgets;
        impl VizUnit for DrawsButForgets {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "forgets", title: "forgets", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesNothing)
            }
            fn produce(
                &self,
                canvas: &mut AmbientCanvas,
            ) -> Result<Option<UnitOutput>, UnitError> {
                canvas.record(UnitOutput::Interactive(InteractiveSpec::new()));
                Ok(None)
            }
        }

        let registry = UnitRegistry::new()
            .with_unit("forgets", "tests::forgets", || Ok(Box::new(DrawsButForgets)));
        let dashboard = Dashboard::new(registry, fixture_source());
        assert_eq!(
            dashboard.render("forgets").unwrap().kind(),
            FigureKind::Interactive
        );
    }

    #[test]
    fn test_empty_handed_producer_is_a_call_failure() {
        struct EmptyHanded;
        impl VizUnit for EmptyHanded {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "empty", title: "empty", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesNothing)
            }
        }

        let registry = UnitRegistry::new()
            .with_unit("empty", "tests::empty", || Ok(Box::new(EmptyHanded)));
        let dashboard = Dashboard::new(registry, fixture_source());
        let err = dashboard.render("empty").unwrap_err();
        assert_eq!(err.kind, RenderErrorKind::CallFailure);
        assert!(err.diagnostic.contains("ambient"));
    }

    #[test]
    fn test_panicking_producer_is_contained() {
        struct Panics;
        impl VizUnit for Panics {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "panics", title: "panics", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesNothing)
            }
            fn produce(
                &self,
                _canvas: &mut AmbientCanvas,
            ) -> Result<Option<UnitOutput>, UnitError> {
                panic!("index out of bounds simulation")
            }
        }

        let registry = UnitRegistry::new()
            .with_unit("panics", "tests::panics", || Ok(Box::new(Panics)))
            .with_unit("a", "models::a", || Ok(Box::new(ZeroArgDark)));
        let dashboard = Dashboard::new(registry, fixture_source());
        let err = dashboard.render("panics").unwrap_err();
        assert_eq!(err.kind, RenderErrorKind::CallFailure);
        assert!(err.diagnostic.contains("index out of bounds simulation"));
        assert!(dashboard.render("a").is_ok());
    }

    #[test]
    fn test_second_render_reuses_the_loaded_unit() {
        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);
        let registry = UnitRegistry::new().with_unit("counted", "tests::counted", || {
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ZeroArgDark))
        });
        let dashboard = Dashboard::new(registry, fixture_source());
        dashboard.render("counted").unwrap();
        dashboard.render("counted").unwrap();
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dataset_load_failure_surfaces_as_call_failure_and_is_retried() {
        struct NeedsData;
        impl VizUnit for NeedsData {
            fn meta(&self) -> UnitMeta {
                UnitMeta { name: "needs", title: "needs", description: "" }
            }
            fn producer(&self) -> Option<ProducerKind> {
                Some(ProducerKind::TakesData)
            }
            fn produce_with_data(
                &self,
                _data: &Dataset,
                _canvas: &mut AmbientCanvas,
            ) -> Result<Option<UnitOutput>, UnitError> {
                Ok(Some(UnitOutput::Interactive(InteractiveSpec::new())))
            }
        }

        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let registry = UnitRegistry::new()
            .with_unit("needs", "tests::needs", || Ok(Box::new(NeedsData)));
        let dashboard = Dashboard::new(registry, move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(UnitError::DataUnavailable("spreadsheet missing".into()))
            } else {
                Ok(fixture_dataset())
            }
        });

        let err = dashboard.render("needs").unwrap_err();
        assert_eq!(err.kind, RenderErrorKind::CallFailure);
        assert!(err.diagnostic.contains("spreadsheet missing"));
        assert!(dashboard.render("needs").is_ok());
    }

    #[test]
    fn test_unit_names_follow_menu_order() {
        let dashboard = scenario_dashboard();
        assert_eq!(dashboard.unit_names(), vec!["a", "b"]);
    }
}
