// 🏷️ k-Nearest-Neighbor Classification
// Plurality and distance-weighted votes among the k closest labeled monkeys

use crate::dataset::Dataset;
use crate::distance::{distance, FeatureSet};
use crate::error::{ClassifError, Result};
use crate::monkey::Monkey;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One neighbor, one vote
    #[default]
    Plurality,
    /// Votes weighted by closeness relative to the (k+1)-th neighbor
    Weighted,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Plurality => "plurality",
            Strategy::Weighted => "weighted",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ClassifError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plurality" => Ok(Strategy::Plurality),
            "weighted" => Ok(Strategy::Weighted),
            other => Err(ClassifError::validation(format!(
                "unknown strategy '{}', expected 'plurality' or 'weighted'",
                other
            ))),
        }
    }
}

pub const DEFAULT_K: usize = 5;

fn default_k() -> usize {
    DEFAULT_K
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Number of voting neighbors
    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default)]
    pub strategy: Strategy,

    /// Axes of the classification space
    pub features: FeatureSet,
}

impl KnnConfig {
    pub fn new(features: FeatureSet) -> Self {
        KnnConfig {
            k: DEFAULT_K,
            strategy: Strategy::default(),
            features,
        }
    }

    /// Builder: set neighbor count
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Builder: set voting strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_k(self.k)
    }
}

/// On-disk form of [`KnnConfig`]; every field may be left to the command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnnSettings {
    #[serde(default)]
    pub k: Option<usize>,

    #[serde(default)]
    pub strategy: Option<Strategy>,

    #[serde(default)]
    pub features: Option<FeatureSet>,
}

impl KnnSettings {
    /// Load settings from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: KnnSettings = serde_json::from_str(&content)?;
        if let Some(k) = settings.k {
            check_k(k)?;
        }
        Ok(settings)
    }

    /// Fill a config; `features` wins over the file's features, defaults fill the rest
    pub fn into_config(self, features: Option<FeatureSet>) -> Result<KnnConfig> {
        let features = features.or(self.features).ok_or_else(|| {
            ClassifError::validation("no features given on the command line or in the config file")
        })?;

        let config = KnnConfig {
            k: self.k.unwrap_or(DEFAULT_K),
            strategy: self.strategy.unwrap_or_default(),
            features,
        };
        config.validate()?;
        Ok(config)
    }
}

fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(ClassifError::validation("k must be at least 1"));
    }
    Ok(())
}

// ============================================================================
// PREDICTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub species: String,

    /// Vote count (plurality) or summed weight (weighted) of the winner
    pub score: f64,

    /// Every species that received a vote, ordered by its nearest member
    pub tally: Vec<(String, f64)>,

    /// Number of neighbors that voted
    pub neighbors: usize,
}

struct Neighbor<'a> {
    monkey: &'a Monkey,
    distance: f64,
}

/// Pool sorted by ascending distance to target; equal distances keep pool order.
///
/// An undefined distance (NaN, e.g. from a 0/0 bmi) ranks as infinitely far.
fn rank_neighbors<'a>(target: &Monkey, pool: &[&'a Monkey], features: &FeatureSet) -> Vec<Neighbor<'a>> {
    let mut ranked: Vec<Neighbor<'a>> = pool
        .iter()
        .map(|&monkey| {
            let d = distance(target, monkey, features);
            Neighbor {
                monkey,
                distance: if d.is_nan() { f64::INFINITY } else { d },
            }
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

/// Sum votes per species, keyed in order of first appearance
fn tally_votes<'a, I>(votes: I) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut tally: Vec<(&'a str, f64)> = Vec::new();
    for (species, vote) in votes {
        match tally.iter_mut().find(|(s, _)| *s == species) {
            Some(entry) => entry.1 += vote,
            None => tally.push((species, vote)),
        }
    }
    tally
}

/// Highest score wins; on a tie the earliest entry (nearest member) wins
fn elect(tally: Vec<(&str, f64)>, neighbors: usize) -> Result<Prediction> {
    let (species, score) = tally
        .iter()
        .fold(None::<(&str, f64)>, |best, &(species, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((species, score)),
        })
        .ok_or_else(|| ClassifError::validation("no neighbors voted"))?;

    Ok(Prediction {
        species: species.to_string(),
        score,
        tally: tally
            .into_iter()
            .map(|(s, v)| (s.to_string(), v))
            .collect(),
        neighbors,
    })
}

// ============================================================================
// VOTES
// ============================================================================

/// Majority species among the `k` nearest labeled monkeys.
///
/// A pool smaller than `k` votes in full.
pub fn classify_plurality(
    target: &Monkey,
    labeled_pool: &[&Monkey],
    k: usize,
    features: &FeatureSet,
) -> Result<Prediction> {
    check_k(k)?;
    if labeled_pool.is_empty() {
        return Err(ClassifError::validation(
            "labeled pool is empty, nothing to vote with",
        ));
    }

    let ranked = rank_neighbors(target, labeled_pool, features);
    let voters = &ranked[..k.min(ranked.len())];

    let tally = tally_votes(voters.iter().map(|n| (n.monkey.species(), 1.0)));
    elect(tally, voters.len())
}

/// Species with the largest summed weight among the `k` nearest labeled monkeys.
///
/// Each voter weighs `1 - d(voter) / d(k+1-th neighbor)`, so the pool needs at
/// least `k + 1` members. When the (k+1)-th neighbor sits on the target every
/// voter weighs 1; a voter at infinite or undefined distance weighs 0.
pub fn classify_weighted(
    target: &Monkey,
    labeled_pool: &[&Monkey],
    k: usize,
    features: &FeatureSet,
) -> Result<Prediction> {
    check_k(k)?;
    if labeled_pool.len() < k + 1 {
        return Err(ClassifError::validation(format!(
            "insufficient neighbors: weighted vote with k={} needs at least {} labeled monkeys, got {}",
            k,
            k + 1,
            labeled_pool.len()
        )));
    }

    let ranked = rank_neighbors(target, labeled_pool, features);
    let norm = ranked[k].distance;
    let voters = &ranked[..k];

    let tally = tally_votes(voters.iter().map(|n| {
        let weight = if n.distance.is_infinite() {
            0.0
        } else if norm == 0.0 {
            1.0
        } else {
            1.0 - n.distance / norm
        };
        (n.monkey.species(), weight)
    }));
    elect(tally, voters.len())
}

// ============================================================================
// KNN ENGINE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSummary {
    pub strategy: Strategy,
    pub k: usize,
    pub labeled: usize,
    pub classified: usize,

    /// Newly assigned labels per species, in order of first assignment
    pub by_species: Vec<(String, usize)>,
}

impl ClassificationSummary {
    pub fn summary(&self) -> String {
        let species: Vec<String> = self
            .by_species
            .iter()
            .map(|(s, n)| format!("{}: {}", s, n))
            .collect();
        format!(
            "{} vote (k={}): classified {} monkeys against {} labeled [{}]",
            self.strategy,
            self.k,
            self.classified,
            self.labeled,
            species.join(", ")
        )
    }
}

pub struct KnnEngine {
    config: KnnConfig,
}

impl KnnEngine {
    pub fn new(config: KnnConfig) -> Result<Self> {
        config.validate()?;
        Ok(KnnEngine { config })
    }

    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    /// Vote for one target with the configured strategy
    pub fn classify(&self, target: &Monkey, labeled_pool: &[&Monkey]) -> Result<Prediction> {
        let KnnConfig { k, strategy, features } = &self.config;
        match strategy {
            Strategy::Plurality => classify_plurality(target, labeled_pool, *k, features),
            Strategy::Weighted => classify_weighted(target, labeled_pool, *k, features),
        }
    }

    /// Predictions for every unlabeled monkey, keyed by dataset index.
    ///
    /// Targets only read the labeled pool, so they are voted in parallel.
    pub fn predict(&self, dataset: &Dataset) -> Result<Vec<(usize, Prediction)>> {
        let pool = dataset.labeled();
        let targets = dataset.unlabeled_indices();

        targets
            .par_iter()
            .map(|&index| {
                let target = &dataset.monkeys()[index];
                let prediction = self.classify(target, &pool)?;
                debug!(
                    "{} -> {} (score {:.3}, {} neighbors)",
                    target, prediction.species, prediction.score, prediction.neighbors
                );
                Ok((index, prediction))
            })
            .collect()
    }

    /// Label every unlabeled monkey in place.
    ///
    /// Nothing is written unless every target could be classified.
    pub fn classify_dataset(&self, dataset: &mut Dataset) -> Result<ClassificationSummary> {
        let labeled = dataset.labeled_count();
        let predictions = self.predict(dataset)?;

        let mut by_species: Vec<(String, usize)> = Vec::new();
        for (index, prediction) in &predictions {
            dataset.assign_label(*index, prediction.species.clone());
            match by_species.iter_mut().find(|(s, _)| *s == prediction.species) {
                Some(entry) => entry.1 += 1,
                None => by_species.push((prediction.species.clone(), 1)),
            }
        }

        let summary = ClassificationSummary {
            strategy: self.config.strategy,
            k: self.config.k,
            labeled,
            classified: predictions.len(),
            by_species,
        };
        info!("{}", summary.summary());
        Ok(summary)
    }
}

// ============================================================================
// TESTS
// ============================================================================
