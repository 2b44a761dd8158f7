use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzers::types::{Rule, Threshold};
use crate::error::Result;

/// Threshold rules for the school and city classifications.
///
/// Stored as a JSON object on disk; a missing list falls back to its default:
/// ```json
/// {
///   "school": [
///     { "name": "zero", "threshold": { "op": "equals", "value": 0 } },
///     { "name": "mid_range", "threshold": { "op": "between", "min": 3, "max": 10 }, "with_share": true }
///   ],
///   "city": [
///     { "name": "low_participation", "threshold": { "op": "at_most", "value": 2 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Applied to teacher totals per school.
    #[serde(default = "default_school_rules")]
    pub school: Vec<Rule>,
    /// Applied to distinct schools per city.
    #[serde(default = "default_city_rules")]
    pub city: Vec<Rule>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            school: default_school_rules(),
            city: default_city_rules(),
        }
    }
}

fn default_school_rules() -> Vec<Rule> {
    vec![
        Rule::new("zero", Threshold::Equals { value: 0.0 }),
        Rule::new("mid_range", Threshold::Between { min: 3.0, max: 10.0 }).with_share(),
        Rule::new("high_outlier", Threshold::Above { value: 100.0 }),
    ]
}

fn default_city_rules() -> Vec<Rule> {
    vec![Rule::new(
        "low_participation",
        Threshold::AtMost { value: 2.0 },
    )]
}

impl RulesConfig {
    /// Loads the rules from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
