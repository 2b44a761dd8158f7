//! Join of the state aggregate onto a GeoJSON boundary collection.
//!
//! Boundary names go through the same trim/title-case rule as the table,
//! so `"TAMIL NADU "` in the GeoJSON matches `Tamil Nadu` rows.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::analyzers::types::GroupAggregate;
use crate::error::{PipelineError, Result};
use crate::normalize::normalize_name;

/// Feature property holding the state name in Indian state boundary files.
pub const DEFAULT_NAME_PROPERTY: &str = "ST_NM";

/// Normalized region names in feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySet {
    names: Vec<String>,
}

/// A boundary and the aggregate value joined to it, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub name: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJoin {
    pub regions: Vec<RegionValue>,
    /// Aggregate keys with no matching boundary.
    pub unmatched_states: Vec<String>,
}

impl BoundarySet {
    /// Reads region names from a GeoJSON `FeatureCollection`.
    ///
    /// Features without a string `name_property` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::GeoJson`] if `value` has no `features` array.
    pub fn from_geojson(value: &Value, name_property: &str) -> Result<Self> {
        let features = value
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| PipelineError::GeoJson("no `features` array".to_string()))?;

        let mut names = Vec::with_capacity(features.len());
        let mut skipped = 0usize;
        for feature in features {
            let name = feature
                .get("properties")
                .and_then(|p| p.get(name_property))
                .and_then(Value::as_str);
            match normalize_name(name) {
                Some(name) => names.push(name),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, name_property, "Features without a region name");
        }
        debug!(regions = names.len(), "Loaded boundaries");

        Ok(Self { names })
    }

    pub fn load(path: impl AsRef<Path>, name_property: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_geojson(&value, name_property)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Attaches aggregate values to boundaries by name.
    ///
    /// Boundaries with no matching state keep `value: None` so they can be
    /// drawn as "no data" rather than as zero registrations.
    pub fn join(&self, aggregate: &GroupAggregate) -> GeoJoin {
        let regions = self
            .names
            .iter()
            .map(|name| RegionValue {
                name: name.clone(),
                value: aggregate.get(name),
            })
            .collect();

        let unmatched_states = aggregate
            .groups
            .iter()
            .filter(|g| !self.names.contains(&g.key))
            .map(|g| g.key.clone())
            .collect();

        GeoJoin {
            regions,
            unmatched_states,
        }
    }
}
