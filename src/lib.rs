// Monkey Classification - Core Library
// k-nearest-neighbor species inference over measured monkeys

pub mod error;
pub mod attributes;
pub mod monkey;
pub mod distance;
pub mod dataset;
pub mod classifier;
pub mod ingest;
pub mod export;
pub mod scatter;

// Re-export commonly used types
pub use error::{ClassifError, Result};
pub use attributes::Attribute;
pub use monkey::{is_hex_color, FurColor, Monkey};
pub use distance::{distance, distance_by_names, FeatureSet};
pub use dataset::Dataset;
pub use classifier::{
    classify_plurality, classify_weighted,
    ClassificationSummary, KnnConfig, KnnEngine, KnnSettings, Prediction, Strategy, DEFAULT_K,
};
pub use ingest::{
    load_monkeys, read_monkeys,
    DropReason, DroppedRow, IngestOptions, IngestReport,
};
pub use export::{save_monkeys, write_monkeys};
pub use scatter::{ScatterPlot, SpeciesGroup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
