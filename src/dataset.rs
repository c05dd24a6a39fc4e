// 📚 Dataset
// Ordered collection of monkeys. The labeled/unlabeled split is read from the
// species field every time; nothing is cached.

use crate::attributes::Attribute;
use crate::monkey::Monkey;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    monkeys: Vec<Monkey>,
}

impl Dataset {
    pub fn new(monkeys: Vec<Monkey>) -> Self {
        Dataset { monkeys }
    }

    pub fn monkeys(&self) -> &[Monkey] {
        &self.monkeys
    }

    pub fn len(&self) -> usize {
        self.monkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monkeys.is_empty()
    }

    pub fn push(&mut self, monkey: Monkey) {
        self.monkeys.push(monkey);
    }

    pub fn get(&self, index: usize) -> Option<&Monkey> {
        self.monkeys.get(index)
    }

    /// Monkeys with a non-empty species, in dataset order
    pub fn labeled(&self) -> Vec<&Monkey> {
        self.monkeys.iter().filter(|m| m.is_labeled()).collect()
    }

    /// Positions of monkeys with an empty species
    pub fn unlabeled_indices(&self) -> Vec<usize> {
        self.monkeys
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_labeled())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn labeled_count(&self) -> usize {
        self.monkeys.iter().filter(|m| m.is_labeled()).count()
    }

    pub fn unlabeled_count(&self) -> usize {
        self.len() - self.labeled_count()
    }

    /// Set the species of the monkey at `index`; returns false if out of range
    pub fn assign_label(&mut self, index: usize, species: impl Into<String>) -> bool {
        match self.monkeys.get_mut(index) {
            Some(monkey) => {
                monkey.assign_species(species);
                true
            }
            None => false,
        }
    }

    /// Raw values of one attribute, in dataset order
    pub fn series(&self, attribute: Attribute) -> Vec<f64> {
        self.monkeys.iter().map(|m| m.get(attribute, false)).collect()
    }

    pub fn species_series(&self) -> Vec<&str> {
        self.monkeys.iter().map(|m| m.species()).collect()
    }

    /// Distinct non-empty species in order of first appearance
    pub fn species(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for species in self.monkeys.iter().map(|m| m.species()) {
            if !species.is_empty() && !seen.contains(&species) {
                seen.push(species);
            }
        }
        seen
    }
}

impl From<Vec<Monkey>> for Dataset {
    fn from(monkeys: Vec<Monkey>) -> Self {
        Dataset::new(monkeys)
    }
}

impl IntoIterator for Dataset {
    type Item = Monkey;
    type IntoIter = std::vec::IntoIter<Monkey>;

    fn into_iter(self) -> Self::IntoIter {
        self.monkeys.into_iter()
    }
}
