//! Return/risk scatter
//!
//! Latest-year annualized return against the 3-year average, point
//! color mapped from the Sharpe ratio, point size from the standard
//! deviation, product names as hover labels.

use vizdeck_core::{Axes, Colorbar, Dataset, Mark, StaticFigure, UnitError, UnitOutput};
use vizdeck_plugin::{AmbientCanvas, ProducerKind, UnitMeta, VizUnit};

use crate::columns;
use crate::helpers::{complete_rows, unit_scale, viridis};

/// Marker area multiplier applied to the dispersion column.
const SIZE_FACTOR: f64 = 20.0;

pub struct ReturnRiskScatter;

impl VizUnit for ReturnRiskScatter {
    fn meta(&self) -> UnitMeta {
        UnitMeta {
            name: "return_risk_scatter",
            title: "模型 ①",
            description: "收益-波动散点图（点色=夏普，点大小=波动率）",
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
        let wanted = [
            columns::LATEST_RETURN,
            columns::AVG_RETURN_3Y,
            columns::SHARPE,
            columns::STD_DEV,
        ];
        let (values, kept) = complete_rows(data, &wanted)?;
        let names = data.text(columns::PRODUCT_NAME)?;

        let x = values[0].clone();
        let y = values[1].clone();
        let colors = unit_scale(&values[2]).into_iter().map(viridis).collect();
        let sizes = values[3].iter().map(|s| s * SIZE_FACTOR).collect();
        let labels = kept
            .iter()
            .map(|&row| names.get(row).cloned().unwrap_or_default())
            .collect();

        let axes = Axes::new()
            .with_title("最近一年年化 vs 过去3年平均年化（点色=夏普，点大小=波动率）")
            .with_x_label("最近一年年化（%）")
            .with_y_label("过去3年平均年化（%）")
            .with_mark(Mark::Scatter {
                x,
                y,
                sizes,
                colors,
                labels,
            });

        let figure = StaticFigure::new(10.0, 8.0)
            .with_axes(axes)
            .with_colorbar(Colorbar::labeled("Sharpe Ratio"));
        Ok(Some(UnitOutput::Static(figure)))
    }
}
