//! Interactive 3-D correlation surface
//!
//! The same Pearson matrix as the heatmap, as a re-navigable surface
//! chart: one `surface` trace plus a scene layout that ticks both
//! factor axes with the short aliases.

use serde_json::json;

use vizdeck_core::{Dataset, InteractiveSpec, UnitError, UnitOutput};
use vizdeck_plugin::{AmbientCanvas, ProducerKind, UnitMeta, VizUnit};

use crate::columns;
use crate::helpers::{complete_rows, correlation_matrix};

pub struct CorrelationSurface3d;

impl VizUnit for CorrelationSurface3d {
    fn meta(&self) -> UnitMeta {
        UnitMeta {
            name: "correlation_surface",
            title: "模型 ③",
            description: "各因子皮尔逊相关系数 — 3D 立体热力图",
        }
    }

    fn producer(&self) -> Option<ProducerKind> {
        Some(ProducerKind::TakesData)
    }

    fn produce_with_data(
        &self,
        data: &Dataset,
        _canvas: &mut AmbientCanvas,
    ) -> Result<Option<UnitOutput>, UnitError> {
        let raw: Vec<&str> = columns::FACTOR_COLUMNS.iter().map(|(r, _)| *r).collect();
        let aliases: Vec<&str> = columns::FACTOR_COLUMNS.iter().map(|(_, a)| *a).collect();

        let (values, _kept) = complete_rows(data, &raw)?;
        let corr = correlation_matrix(&values);
        let n = corr.len();
        let ticks: Vec<usize> = (0..n).collect();

        let factor_axis = json!({
            "title": "因子",
            "tickmode": "array",
            "tickvals": ticks,
            "ticktext": aliases,
        });
        let spec = InteractiveSpec::new()
            .with_trace(json!({
                "type": "surface",
                "z": corr,
                "x": ticks,
                "y": ticks,
                "colorscale": "RdBu",
                "cmin": -1.0,
                "cmax": 1.0,
                "colorbar": {"title": "相关系数"},
            }))
            .with_layout(json!({
                "title": "各因子皮尔逊相关系数 — 3D 立体热力图",
                "scene": {
                    "xaxis": factor_axis.clone(),
                    "yaxis": factor_axis,
                    "zaxis": {"title": "相关系数", "range": [-1.0, 1.0]},
                },
                "margin": {"l": 0, "r": 0, "t": 50, "b": 0},
            }));
        Ok(Some(UnitOutput::Interactive(spec)))
    }
}
