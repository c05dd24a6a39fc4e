// 📏 Distance Metric
// Euclidean distance over percent-normalized attributes, so that a 24-bit color
// and a size measured in meters land on comparable scales.

use crate::attributes::Attribute;
use crate::error::{ClassifError, Result};
use crate::monkey::Monkey;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FEATURE SET
// ============================================================================

/// Non-empty ordered list of attributes that span the classification space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct FeatureSet(Vec<Attribute>);

impl FeatureSet {
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(ClassifError::validation(
                "at least one attribute is required to measure distance",
            ));
        }
        Ok(FeatureSet(attributes))
    }

    /// Build from attribute names, failing on the first unknown one
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let attributes = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<Attribute>>>()?;
        FeatureSet::new(attributes)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Attribute>> for FeatureSet {
    type Error = ClassifError;

    fn try_from(attributes: Vec<Attribute>) -> Result<Self> {
        FeatureSet::new(attributes)
    }
}

impl From<FeatureSet> for Vec<Attribute> {
    fn from(features: FeatureSet) -> Self {
        features.0
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|a| a.name()).collect();
        f.write_str(&names.join(", "))
    }
}

// ============================================================================
// DISTANCE
// ============================================================================

/// `sqrt(sum((a[attr]% - b[attr]%)^2))` over the feature set
pub fn distance(a: &Monkey, b: &Monkey, features: &FeatureSet) -> f64 {
    features
        .attributes()
        .iter()
        .map(|&attr| {
            let delta = a.get(attr, true) - b.get(attr, true);
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

/// Same as [`distance`] with attributes given by name
pub fn distance_by_names<S: AsRef<str>>(a: &Monkey, b: &Monkey, attributes: &[S]) -> Result<f64> {
    let features = FeatureSet::from_names(attributes)?;
    Ok(distance(a, b, &features))
}

// ============================================================================
// TESTS
// ============================================================================
