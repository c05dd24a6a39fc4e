// 🐒 Monkey Entity
// Measured values are fixed at construction; derived values are computed on demand.
// Species is the only mutable field and is set by a classification pass.

use crate::attributes::Attribute;
use crate::error::{ClassifError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// FUR COLOR
// ============================================================================

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| Regex::new(r"^#[0-9a-f]{6}$").expect("hex color pattern compiles"))
}

/// Return true if the string is a lowercase hex color: `#xxxxxx`
pub fn is_hex_color(value: &str) -> bool {
    hex_color_regex().is_match(value)
}

/// Validated `#rrggbb` color string (lowercase only)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FurColor(String);

impl FurColor {
    pub fn parse(value: &str) -> Result<Self> {
        if !is_hex_color(value) {
            return Err(ClassifError::validation(format!(
                "fur_color needs to be a hexadecimal color string like '#1a2b3c', got '{}'",
                value
            )));
        }
        Ok(FurColor(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whole color as a 24-bit integer
    pub fn value(&self) -> u32 {
        // The pattern guarantees six hex digits after '#'
        u32::from_str_radix(&self.0[1..], 16).unwrap_or_default()
    }

    pub fn red(&self) -> u8 {
        (self.value() >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.value() >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.value() as u8
    }
}

impl fmt::Display for FurColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// MONKEY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Monkey {
    size: f64,
    weight: f64,
    fur_color: FurColor,

    /// Empty means unlabeled
    species: String,
}

impl Monkey {
    /// Create a monkey, failing if `fur_color` is not `#[0-9a-f]{6}`
    pub fn new(size: f64, weight: f64, fur_color: &str, species: impl Into<String>) -> Result<Self> {
        Ok(Monkey {
            size,
            weight,
            fur_color: FurColor::parse(fur_color)?,
            species: species.into(),
        })
    }

    /// Create a monkey with no species
    pub fn unlabeled(size: f64, weight: f64, fur_color: &str) -> Result<Self> {
        Monkey::new(size, weight, fur_color, String::new())
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn fur_color(&self) -> &FurColor {
        &self.fur_color
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn is_labeled(&self) -> bool {
        !self.species.is_empty()
    }

    /// Record the species chosen by a classifier
    pub fn assign_species(&mut self, species: impl Into<String>) {
        self.species = species.into();
    }

    // ========================================================================
    // DERIVED VALUES
    // ========================================================================

    pub fn compute_size(&self) -> f64 {
        self.size
    }

    pub fn compute_weight(&self) -> f64 {
        self.weight
    }

    pub fn compute_bmi(&self) -> f64 {
        self.weight / (self.size * self.size)
    }

    pub fn compute_fur_color(&self) -> u32 {
        self.fur_color.value()
    }

    pub fn compute_fur_color_red(&self) -> u8 {
        self.fur_color.red()
    }

    pub fn compute_fur_color_green(&self) -> u8 {
        self.fur_color.green()
    }

    pub fn compute_fur_color_blue(&self) -> u8 {
        self.fur_color.blue()
    }

    /// `(max - min) / max` over the RGB channels, 0 for pure black
    pub fn compute_fur_color_intensity(&self) -> f64 {
        let channels = [
            self.compute_fur_color_red(),
            self.compute_fur_color_green(),
            self.compute_fur_color_blue(),
        ];
        let c_max = channels.iter().copied().max().unwrap_or(0);
        if c_max == 0 {
            return 0.0;
        }
        let c_min = channels.iter().copied().min().unwrap_or(0);

        f64::from(c_max - c_min) / f64::from(c_max)
    }

    /// Read an attribute, optionally rescaled to percent of its normalization constant.
    ///
    /// Percent values are not clamped: a size of 3 is 150%.
    pub fn get(&self, attribute: Attribute, percent: bool) -> f64 {
        let value = match attribute {
            Attribute::Size => self.compute_size(),
            Attribute::Weight => self.compute_weight(),
            Attribute::Bmi => self.compute_bmi(),
            Attribute::FurColor => f64::from(self.compute_fur_color()),
            Attribute::FurColorRed => f64::from(self.compute_fur_color_red()),
            Attribute::FurColorGreen => f64::from(self.compute_fur_color_green()),
            Attribute::FurColorBlue => f64::from(self.compute_fur_color_blue()),
            Attribute::FurColorIntensity => self.compute_fur_color_intensity(),
        };

        match attribute.normalization() {
            Some(norm) if percent => value / norm * 100.0,
            _ => value,
        }
    }

    /// Same as [`Monkey::get`] for an attribute given by name
    pub fn get_by_name(&self, attribute: &str, percent: bool) -> Result<f64> {
        Ok(self.get(attribute.parse()?, percent))
    }
}

impl fmt::Display for Monkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.size, self.weight, self.fur_color, self.species
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
