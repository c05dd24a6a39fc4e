// Integration test for the whole pipeline (CSV → ingestion → knn → CSV)
use monkey_classif::{
    load_monkeys, read_monkeys, save_monkeys, Attribute, ClassifError, FeatureSet, IngestOptions,
    KnnConfig, KnnEngine, KnnSettings, ScatterPlot, Strategy,
};
use std::fs;

const INPUT: &str = "\
species,size,weight,fur_color
A,1.0,1.0,#000000
B,1.0,1.0,#ffffff
A,1.0,1.0,#080808
,1.0,1.0,#050505
,-1,1.0,#050505
,1.0,1.0,#zzzzzz
";

#[test]
fn test_color_knn_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("monkeys.csv");
    let output = dir.path().join("classified.csv");
    fs::write(&input, INPUT).unwrap();

    let report = load_monkeys(&input, IngestOptions::lenient()).unwrap();
    println!("{}", report.summary());
    assert_eq!(report.total_rows, 6);
    assert_eq!(report.dropped.len(), 2);

    let mut dataset = report.dataset;
    let features = FeatureSet::new(vec![Attribute::FurColor]).unwrap();
    let engine = KnnEngine::new(KnnConfig::new(features).with_k(2)).unwrap();

    let summary = engine.classify_dataset(&mut dataset).unwrap();
    println!("{}", summary.summary());
    assert_eq!(summary.classified, 1);
    assert_eq!(dataset.get(3).unwrap().species(), "A");

    save_monkeys(&output, &dataset).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(lines[0], "species,fur_color,size,weight");
    // One row per surviving input row, every one labeled
    assert_eq!(lines.len(), 1 + 4);
    assert!(lines[1..].iter().all(|l| !l.starts_with(',')));
    assert_eq!(lines[4], "A,#050505,1.0,1.0");
}

#[test]
fn test_output_reloads_as_fully_labeled() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("classified.csv");

    let mut dataset = read_monkeys(INPUT.as_bytes(), IngestOptions::lenient())
        .unwrap()
        .dataset;
    let features = FeatureSet::from_names(&["fur_color", "size"]).unwrap();
    let engine = KnnEngine::new(KnnConfig::new(features).with_k(3)).unwrap();
    engine.classify_dataset(&mut dataset).unwrap();
    save_monkeys(&output, &dataset).unwrap();

    let reloaded = load_monkeys(&output, IngestOptions::strict()).unwrap();
    assert_eq!(reloaded.dataset, dataset);
    assert_eq!(reloaded.dataset.unlabeled_count(), 0);
}

#[test]
fn test_weighted_pipeline_needs_k_plus_one_labels() {
    let mut dataset = read_monkeys(INPUT.as_bytes(), IngestOptions::lenient())
        .unwrap()
        .dataset;
    let features = FeatureSet::new(vec![Attribute::FurColor, Attribute::Weight]).unwrap();

    // 3 labeled monkeys: k=3 is one short
    let engine = KnnEngine::new(
        KnnConfig::new(features.clone())
            .with_k(3)
            .with_strategy(Strategy::Weighted),
    )
    .unwrap();
    let err = engine.classify_dataset(&mut dataset).unwrap_err();
    assert!(matches!(err, ClassifError::Validation(_)));
    assert_eq!(dataset.unlabeled_count(), 1);

    let engine = KnnEngine::new(
        KnnConfig::new(features)
            .with_k(2)
            .with_strategy(Strategy::Weighted),
    )
    .unwrap();
    engine.classify_dataset(&mut dataset).unwrap();
    assert_eq!(dataset.get(3).unwrap().species(), "A");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knn.json");

    // k/strategy only; features come from the command line
    fs::write(&path, r#"{"k": 3, "strategy": "weighted"}"#).unwrap();
    let settings = KnnSettings::from_file(&path).unwrap();
    let features = FeatureSet::new(vec![Attribute::Size, Attribute::Weight]).unwrap();
    let config = settings.into_config(Some(features.clone())).unwrap();
    assert_eq!(config.k, 3);
    assert_eq!(config.strategy, Strategy::Weighted);
    assert_eq!(config.features, features);

    fs::write(
        &path,
        r#"{"k": 7, "strategy": "weighted", "features": ["bmi", "fur_color_intensity"]}"#,
    )
    .unwrap();
    let config = KnnSettings::from_file(&path).unwrap().into_config(None).unwrap();
    assert_eq!(config.k, 7);
    assert_eq!(
        config.features.attributes(),
        &[Attribute::Bmi, Attribute::FurColorIntensity]
    );

    fs::write(&path, r#"{"k": 0}"#).unwrap();
    assert!(matches!(
        KnnSettings::from_file(&path),
        Err(ClassifError::Validation(_))
    ));

    fs::write(&path, r#"{"features": ["tail"]}"#).unwrap();
    assert!(matches!(
        KnnSettings::from_file(&path),
        Err(ClassifError::Config(_))
    ));
}

#[test]
fn test_schema_error_aborts_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "species,size,weight\nA,1,1\n").unwrap();

    let err = load_monkeys(&input, IngestOptions::lenient()).unwrap_err();
    assert!(matches!(err, ClassifError::Schema(_)));
}

#[test]
fn test_visualize_requires_complete_table() {
    assert!(read_monkeys(INPUT.as_bytes(), IngestOptions::strict()).is_err());

    let complete = "species,size,weight,fur_color\nA,1,2,#000000\nB,3,4,#ffffff\n";
    let dataset = read_monkeys(complete.as_bytes(), IngestOptions::strict())
        .unwrap()
        .dataset;

    let plot = ScatterPlot::from_dataset(&dataset, Attribute::Size, Attribute::FurColor).unwrap();
    assert_eq!(plot.groups.len(), 2);
    assert_eq!(plot.groups[1].points, vec![(3.0, 16_777_215.0)]);
}
