//! Vizdeck Standard Units
//!
//! The built-in dashboard charts for the fund-analysis spreadsheet:
//! a return/risk scatter, a factor correlation heatmap, an interactive
//! 3-D correlation surface, and a cosine-similarity product network.

pub mod columns;
pub mod helpers;

mod heatmap;
mod network;
mod scatter;
mod surface;

pub use heatmap::FactorCorrelationHeatmap;
pub use network::SimilarityNetwork;
pub use scatter::ReturnRiskScatter;
pub use surface::CorrelationSurface3d;

use vizdeck_plugin::UnitRegistry;

/// Register the built-in units, in menu order.
pub fn load_standard_units(registry: UnitRegistry) -> UnitRegistry {
    registry
        .with_unit("return_risk_scatter", "vizdeck_std::scatter", || {
            Ok(Box::new(ReturnRiskScatter))
        })
        .with_unit("factor_heatmap", "vizdeck_std::heatmap", || {
            Ok(Box::new(FactorCorrelationHeatmap))
        })
        .with_unit("correlation_surface", "vizdeck_std::surface", || {
            Ok(Box::new(CorrelationSurface3d))
        })
        .with_unit("similarity_network", "vizdeck_std::network", || {
            Ok(Box::new(SimilarityNetwork))
        })
}

/// Create a registry with the built-in units.
pub fn standard_registry() -> UnitRegistry {
    load_standard_units(UnitRegistry::new())
}
