//! End-to-end pipeline tests: exclusion, fit, predict, save/load.

use std::num::NonZeroUsize;

use approx::assert_abs_diff_eq;
use rstest::rstest;

use taspm::model::gbdt::label_for;
use taspm::testing::{synthetic_incidents, tiny_config};
use taspm::{BoostingConfig, ExclusionPolicy, Pipeline, PipelineError, Record, RecordFrame, SchemaError, LABEL_COLUMN};

fn fitted(rows: usize, config: &BoostingConfig) -> (Pipeline, RecordFrame) {
    let raw = synthetic_incidents(rows, 11);
    let (features, labels) = ExclusionPolicy::default().split(&raw, LABEL_COLUMN).unwrap();
    (Pipeline::fit(&features, &labels, config).unwrap(), features)
}

fn five_column_record(attack: &str) -> Record {
    Record::new()
        .with("year", 2015)
        .with("country", "Iraq")
        .with("primary_attack_type", attack)
        .with("suicide_attack", 0)
        .with("group_name", "Taliban")
}

#[test]
fn twenty_rows_train_and_survive_save_load() {
    let (pipeline, features) = fitted(20, &tiny_config());
    assert_eq!(features.n_columns(), 5);
    assert!(pipeline.transform().schema().column("num_killed").is_none());

    let record = five_column_record("Bombing/Explosion");
    let before = pipeline.predict(&record).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("final_model.json");
    pipeline.save(&path).unwrap();
    let loaded = Pipeline::load(&path).unwrap();

    assert_eq!(loaded, pipeline);
    assert_eq!(loaded.predict(&record).unwrap(), before);
}

#[test]
fn separating_feature_is_learned() {
    let (pipeline, _) = fitted(40, &tiny_config());
    let positive = pipeline.predict(&five_column_record("Bombing/Explosion")).unwrap();
    let negative = pipeline.predict(&five_column_record("Hostage Taking")).unwrap();
    assert_eq!(positive.label, 1);
    assert_eq!(negative.label, 0);
    assert!(positive.probability > negative.probability);
}

#[test]
fn unseen_categories_predict() {
    let (pipeline, _) = fitted(20, &tiny_config());
    let record = Record::new()
        .with("year", 2015)
        .with("country", "Atlantis")
        .with("primary_attack_type", "Teleportation")
        .with("suicide_attack", 1)
        .with("group_name", "Nobody");
    let pred = pipeline.predict(&record).unwrap();
    assert!((0.0..=1.0).contains(&pred.probability));
    assert_eq!(pred.label, label_for(pred.probability));
    let [p0, p1] = pipeline.predict_proba(&record).unwrap();
    assert_abs_diff_eq!(p0 + p1, 1.0, epsilon = 1e-6);
}

#[test]
fn inference_is_repeatable() {
    let (pipeline, _) = fitted(20, &tiny_config());
    let record = five_column_record("Assassination");
    assert_eq!(pipeline.predict(&record).unwrap(), pipeline.predict(&record).unwrap());
}

#[rstest]
#[case(2)]
#[case(4)]
fn training_is_independent_of_thread_count(#[case] threads: usize) {
    let mut config = tiny_config();
    config.sampling.subsample = 0.8;
    config.sampling.colsample_bytree = 0.8;
    let (sequential, _) = fitted(40, &config);

    config.n_threads = NonZeroUsize::new(threads);
    let (parallel, _) = fitted(40, &config);
    assert_eq!(sequential.to_json().unwrap(), parallel.to_json().unwrap());
}

#[test]
fn schema_violations_are_reported() {
    let (pipeline, _) = fitted(20, &tiny_config());

    let full = five_column_record("Assassination");
    let missing: Record = full
        .iter()
        .filter(|(name, _)| *name != "group_name")
        .map(|(name, value)| (name, value.clone()))
        .collect();
    assert!(matches!(
        pipeline.predict(&missing),
        Err(PipelineError::Schema(SchemaError::MissingColumn(name))) if name == "group_name"
    ));

    let extra = five_column_record("Assassination").with("region", "Europe");
    assert!(matches!(
        pipeline.predict(&extra),
        Err(PipelineError::Schema(SchemaError::UnexpectedColumn(name))) if name == "region"
    ));

    let bad_number = five_column_record("Assassination").with("year", "last year");
    assert!(matches!(
        pipeline.predict(&bad_number),
        Err(PipelineError::Schema(SchemaError::TypeMismatch { .. }))
    ));
}

#[test]
fn batch_and_single_predictions_agree() {
    let (pipeline, features) = fitted(20, &tiny_config());
    let batch = pipeline.predict_frame(&features).unwrap();
    assert_eq!(batch.len(), 20);
    for (row, pred) in batch.iter().enumerate() {
        assert_eq!(*pred, pipeline.predict(&features.record(row)).unwrap());
    }
}
