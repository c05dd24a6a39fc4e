// 📈 Scatter plot data
// (x, y) points grouped by species, ready to hand to a renderer

use crate::attributes::Attribute;
use crate::dataset::Dataset;
use crate::error::{ClassifError, Result};

/// Group name for monkeys without a species
pub const UNLABELED: &str = "unlabeled";

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesGroup {
    pub species: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub x: Attribute,
    pub y: Attribute,

    /// Groups in order of first appearance in the dataset
    pub groups: Vec<SpeciesGroup>,
}

impl ScatterPlot {
    /// Both axes must be one of `size`, `weight`, `fur_color`; colors are plotted as integers
    pub fn from_dataset(dataset: &Dataset, x: Attribute, y: Attribute) -> Result<Self> {
        for axis in [x, y] {
            if !axis.is_plottable() {
                return Err(ClassifError::validation(format!(
                    "'{}' cannot be plotted, choose one of size, weight, fur_color",
                    axis
                )));
            }
        }

        let xs = dataset.series(x);
        let ys = dataset.series(y);
        let labels = dataset.species_series();

        let mut groups: Vec<SpeciesGroup> = Vec::new();
        for ((px, py), label) in xs.into_iter().zip(ys).zip(labels) {
            let species = if label.is_empty() { UNLABELED } else { label };
            match groups.iter_mut().find(|g| g.species == species) {
                Some(group) => group.points.push((px, py)),
                None => groups.push(SpeciesGroup {
                    species: species.to_string(),
                    points: vec![(px, py)],
                }),
            }
        }

        Ok(ScatterPlot { x, y, groups })
    }

    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }

    /// `[min, max]` over every x value, `[0, 0]` when empty
    pub fn x_bounds(&self) -> [f64; 2] {
        self.bounds(|&(x, _)| x)
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.bounds(|&(_, y)| y)
    }

    fn bounds<F: Fn(&(f64, f64)) -> f64>(&self, axis: F) -> [f64; 2] {
        let mut values = self.groups.iter().flat_map(|g| g.points.iter()).map(axis);
        let first = match values.next() {
            Some(v) => v,
            None => return [0.0, 0.0],
        };
        values.fold([first, first], |[lo, hi], v| [lo.min(v), hi.max(v)])
    }

    /// One line per species: count and mean position
    pub fn summary(&self) -> Vec<String> {
        self.groups
            .iter()
            .map(|g| {
                let n = g.points.len() as f64;
                let mean_x = g.points.iter().map(|p| p.0).sum::<f64>() / n;
                let mean_y = g.points.iter().map(|p| p.1).sum::<f64>() / n;
                format!(
                    "{}: {} points, mean {} = {:.3}, mean {} = {:.3}",
                    g.species,
                    g.points.len(),
                    self.x,
                    mean_x,
                    self.y,
                    mean_y
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monkey::Monkey;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Monkey::new(1.0, 2.0, "#000010", "A").unwrap(),
            Monkey::new(3.0, 4.0, "#000020", "B").unwrap(),
            Monkey::unlabeled(0.5, 6.0, "#000030").unwrap(),
            Monkey::new(2.0, 1.0, "#000040", "A").unwrap(),
        ])
    }

    #[test]
    fn test_groups_by_species() {
        let plot = ScatterPlot::from_dataset(&dataset(), Attribute::Size, Attribute::Weight).unwrap();

        let names: Vec<&str> = plot.groups.iter().map(|g| g.species.as_str()).collect();
        assert_eq!(names, vec!["A", "B", UNLABELED]);
        assert_eq!(plot.groups[0].points, vec![(1.0, 2.0), (2.0, 1.0)]);
        assert_eq!(plot.point_count(), 4);
    }

    #[test]
    fn test_fur_color_plotted_as_integer() {
        let plot = ScatterPlot::from_dataset(&dataset(), Attribute::FurColor, Attribute::Size).unwrap();

        assert_eq!(plot.groups[1].points, vec![(32.0, 3.0)]);
    }

    #[test]
    fn test_bounds() {
        let plot = ScatterPlot::from_dataset(&dataset(), Attribute::Size, Attribute::Weight).unwrap();

        assert_eq!(plot.x_bounds(), [0.5, 3.0]);
        assert_eq!(plot.y_bounds(), [1.0, 6.0]);

        let empty = ScatterPlot::from_dataset(&Dataset::default(), Attribute::Size, Attribute::Weight).unwrap();
        assert_eq!(empty.x_bounds(), [0.0, 0.0]);
    }

    #[test]
    fn test_rejects_derived_axes() {
        let err = ScatterPlot::from_dataset(&dataset(), Attribute::Bmi, Attribute::Size).unwrap_err();
        assert!(matches!(err, ClassifError::Validation(_)));
    }

    #[test]
    fn test_summary_lines() {
        let plot = ScatterPlot::from_dataset(&dataset(), Attribute::Size, Attribute::Weight).unwrap();
        let lines = plot.summary();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "A: 2 points, mean size = 1.500, mean weight = 1.500");
    }
}
