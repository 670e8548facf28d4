//! Factor correlation heatmap
//!
//! Pairwise Pearson correlation over the factor columns, rendered as an
//! annotated matrix with the short column aliases on both axes.

use vizdeck_core::{Axes, Colorbar, Dataset, Mark, StaticFigure, UnitError, UnitOutput};
use vizdeck_plugin::{AmbientCanvas, ProducerKind, UnitMeta, VizUnit};

use crate::columns;
use crate::helpers::{complete_rows, correlation_matrix};

pub struct FactorCorrelationHeatmap;

impl VizUnit for FactorCorrelationHeatmap {
    fn meta(&self) -> UnitMeta {
        UnitMeta {
            name: "factor_heatmap",
            title: "模型 ②",
            description: "各因子皮尔逊相关系数矩阵",
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
        let aliases: Vec<String> = columns::FACTOR_COLUMNS
            .iter()
            .map(|(_, a)| (*a).to_string())
            .collect();

        let (values, _kept) = complete_rows(data, &raw)?;
        let corr = correlation_matrix(&values);

        let axes = Axes::new()
            .with_title("各因子皮尔逊相关系数矩阵")
            .with_mark(Mark::Heatmap {
                values: corr,
                row_labels: aliases.clone(),
                col_labels: aliases,
            });

        let figure = StaticFigure::new(14.0, 12.0)
            .with_axes(axes)
            .with_colorbar(Colorbar::labeled("相关系数"));
        Ok(Some(UnitOutput::Static(figure)))
    }
}
