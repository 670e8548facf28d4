//! Unit Registry
//!
//! Explicit table mapping a stable unit name to a loadable definition.
//! Registration is static configuration done at startup; the registry
//! itself is pure lookup and never executes a unit.

use indexmap::IndexMap;

use vizdeck_core::UnitError;

use crate::VizUnit;

type UnitFactory = Box<dyn Fn() -> Result<Box<dyn VizUnit>, UnitError> + Send + Sync>;

/// A registered, not-yet-loaded unit.
pub struct UnitDef {
    name: String,
    /// Origin identifier used in diagnostics, e.g. a module path
    location: String,
    factory: UnitFactory,
}

impl UnitDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub(crate) fn construct(&self) -> Result<Box<dyn VizUnit>, UnitError> {
        (self.factory)()
    }
}

impl std::fmt::Debug for UnitDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitDef")
            .field("name", &self.name)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Central unit registry. Keeps registration order, which the host uses
/// as its menu order.
#[derive(Default)]
pub struct UnitRegistry {
    units: IndexMap<String, UnitDef>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit<F>(
        mut self,
        name: impl Into<String>,
        location: impl Into<String>,
        factory: F,
    ) -> Self
    where
        F: Fn() -> Result<Box<dyn VizUnit>, UnitError> + Send + Sync + 'static,
    {
        let name = name.into();
        let def = UnitDef {
            name: name.clone(),
            location: location.into(),
            factory: Box::new(factory),
        };
        self.units.insert(name, def);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&UnitDef> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Registered names in registration (menu) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitMeta;

    struct Stub(&'static str);
    impl VizUnit for Stub {
        fn meta(&self) -> UnitMeta {
            UnitMeta { name: self.0, title: self.0, description: "" }
        }
    }

    fn registry() -> UnitRegistry {
        UnitRegistry::new()
            .with_unit("scatter", "demo::scatter", || Ok(Box::new(Stub("scatter"))))
            .with_unit("heatmap", "demo::heatmap", || Ok(Box::new(Stub("heatmap"))))
            .with_unit("network", "demo::network", || Ok(Box::new(Stub("network"))))
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let reg = registry();
        assert!(reg.resolve("heatmap").is_some());
        assert_eq!(reg.resolve("heatmap").unwrap().location(), "demo::heatmap");
        assert!(reg.resolve("missing").is_none());
    }

    #[test]
    fn test_names_preserve_registration_order() {
        let reg = registry();
        let names: Vec<&str> = reg.names().collect();
        assert_eq!(names, vec!["scatter", "heatmap", "network"]);
    }

    #[test]
    fn test_reregistration_replaces_definition() {
        let reg = registry().with_unit("heatmap", "demo::heatmap_v2", || {
            Ok(Box::new(Stub("heatmap")))
        });
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.resolve("heatmap").unwrap().location(), "demo::heatmap_v2");
    }
}
