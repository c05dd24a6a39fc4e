// 🏛️ Attribute Catalog
// Every measurable axis of a monkey, resolved by an exhaustive match instead of by name lookup

use crate::error::{ClassifError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ATTRIBUTE KINDS
// ============================================================================

/// A numeric attribute that can be read from a [`crate::Monkey`].
///
/// `size`, `weight` and `fur_color` are measured; everything else is derived
/// from them on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Size,
    Weight,
    Bmi,
    FurColor,
    FurColorRed,
    FurColorGreen,
    FurColorBlue,
    FurColorIntensity,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Size,
        Attribute::Weight,
        Attribute::Bmi,
        Attribute::FurColor,
        Attribute::FurColorRed,
        Attribute::FurColorGreen,
        Attribute::FurColorBlue,
        Attribute::FurColorIntensity,
    ];

    /// Axes accepted by the scatter plot
    pub const PLOTTABLE: [Attribute; 3] = [Attribute::Size, Attribute::Weight, Attribute::FurColor];

    /// Column/CLI name
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Size => "size",
            Attribute::Weight => "weight",
            Attribute::Bmi => "bmi",
            Attribute::FurColor => "fur_color",
            Attribute::FurColorRed => "fur_color_red",
            Attribute::FurColorGreen => "fur_color_green",
            Attribute::FurColorBlue => "fur_color_blue",
            Attribute::FurColorIntensity => "fur_color_intensity",
        }
    }

    /// Constant a raw value is divided by before being expressed in percent.
    ///
    /// Every current attribute has one; `None` would mean the percent form
    /// is the raw value.
    pub fn normalization(&self) -> Option<f64> {
        let norm = match self {
            Attribute::FurColor => 0xff_ffff as f64,
            Attribute::Size => 2.0,
            Attribute::Weight => 1.0,
            Attribute::Bmi => 100.0,
            Attribute::FurColorRed | Attribute::FurColorGreen | Attribute::FurColorBlue => 255.0,
            Attribute::FurColorIntensity => 1.0,
        };
        Some(norm)
    }

    /// What does this attribute mean?
    pub fn description(&self) -> &'static str {
        match self {
            Attribute::Size => "Measured size",
            Attribute::Weight => "Measured weight",
            Attribute::Bmi => "Body mass index: weight / size^2",
            Attribute::FurColor => "Fur color as a 24-bit integer",
            Attribute::FurColorRed => "Red channel of the fur color (0-255)",
            Attribute::FurColorGreen => "Green channel of the fur color (0-255)",
            Attribute::FurColorBlue => "Blue channel of the fur color (0-255)",
            Attribute::FurColorIntensity => "Fur color saturation: (max - min) / max over RGB",
        }
    }

    pub fn is_plottable(&self) -> bool {
        Attribute::PLOTTABLE.contains(self)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = ClassifError;

    fn from_str(s: &str) -> Result<Self> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| ClassifError::invalid_attribute(s))
    }
}

// ============================================================================
// TESTS
// ============================================================================
