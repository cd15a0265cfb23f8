//! Name -> family lookup.
//!
//! The registry is built once (usually at startup) from [`ModelFamily::ALL`] and
//! is read-only afterwards; callers pass it to wherever curves are constructed
//! from names (curve files, CLI).

use std::collections::{BTreeMap, HashMap};

use crate::error::ModelError;
use crate::models::{FittedCurve, ModelFamily};

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    by_name: HashMap<&'static str, ModelFamily>,
}

impl ModelRegistry {
    /// Registry with every built-in family.
    pub fn standard() -> Self {
        Self::with_families(&ModelFamily::ALL)
    }

    pub fn with_families(families: &[ModelFamily]) -> Self {
        Self {
            by_name: families.iter().map(|f| (f.name(), *f)).collect(),
        }
    }

    /// Look up a family by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<ModelFamily, ModelError> {
        let key = name.trim().to_ascii_lowercase();
        self.by_name
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ModelError::UnknownModel(name.to_string()))
    }

    /// Registered families in name order.
    pub fn families(&self) -> Vec<ModelFamily> {
        let mut out: Vec<ModelFamily> = self.by_name.values().copied().collect();
        out.sort_by_key(|f| f.name());
        out
    }

    /// Build a fitted curve for a named family.
    pub fn build(
        &self,
        name: &str,
        params: BTreeMap<String, f64>,
        temps: Vec<f64>,
    ) -> Result<FittedCurve, ModelError> {
        FittedCurve::new(self.get(name)?, params, temps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_resolves_all_families() {
        let reg = ModelRegistry::standard();
        for family in ModelFamily::ALL {
            assert_eq!(reg.get(family.name()).unwrap(), family);
        }
        assert_eq!(reg.get(" Pawar_2018 ").unwrap(), ModelFamily::Pawar2018);
        assert_eq!(reg.families().len(), ModelFamily::ALL.len());
    }

    #[test]
    fn unknown_names_are_errors() {
        let reg = ModelRegistry::with_families(&[ModelFamily::Gaussian1987]);
        assert_eq!(
            reg.get("pawar_2018").unwrap_err(),
            ModelError::UnknownModel("pawar_2018".to_string())
        );
    }
}
