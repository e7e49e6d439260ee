//! Synthetic incident data for tests.

use std::num::NonZeroUsize;

use rand::prelude::*;

use crate::data::{Column, RecordFrame};
use crate::exclusion::LABEL_COLUMN;
use crate::incident::catalog::{
    ATTACK_TYPES, COUNTRY_PROVINCES, GROUPS, MULTIPLE_ATTACKS, PRIMARY_WEAPON_TYPES, REGIONS, SECONDARY_TARGET_TYPES,
    SECONDARY_WEAPON_TYPES, TARGET_SUBTYPES, TARGET_TYPES,
};
use crate::model::gbdt::{RegularizationParams, TreeParams};
use crate::model::BoostingConfig;
use crate::training::Verbosity;

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

fn categorical(values: Vec<&str>) -> Column {
    Column::Categorical(values.into_iter().map(|v| Some(v.to_string())).collect())
}

/// Alternating 0/1 labels, so every dataset is balanced.
fn balanced_labels(rows: usize) -> Vec<f64> {
    (0..rows).map(|r| (r % 2) as f64).collect()
}

/// Small balanced dataset with 3 categorical and 2 numeric feature columns.
///
/// `primary_attack_type` separates the classes: positives draw from the
/// first half of [`ATTACK_TYPES`], negatives from the second. A leaky
/// `num_killed` column equal to the label is included so exclusion can be
/// observed.
pub fn synthetic_incidents(rows: usize, seed: u64) -> RecordFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels = balanced_labels(rows);
    let (positive, negative) = ATTACK_TYPES.split_at(ATTACK_TYPES.len() / 2);

    let mut country = Vec::with_capacity(rows);
    let mut attack = Vec::with_capacity(rows);
    let mut group = Vec::with_capacity(rows);
    let mut year = Vec::with_capacity(rows);
    let mut suicide = Vec::with_capacity(rows);
    for &label in &labels {
        country.push(pick(&mut rng, &["Iraq", "Egypt", "India", "Pakistan"]));
        attack.push(pick(&mut rng, if label == 1.0 { positive } else { negative }));
        group.push(pick(&mut rng, GROUPS));
        year.push(rng.gen_range(1970..=2020) as f64);
        suicide.push(rng.gen_range(0..=1) as f64);
    }

    RecordFrame::new()
        .with_column("year", Column::Numeric(year))
        .with_column("country", categorical(country))
        .with_column("primary_attack_type", categorical(attack))
        .with_column("suicide_attack", Column::Numeric(suicide))
        .with_column("group_name", categorical(group))
        .with_column("num_killed", Column::Numeric(labels.clone()))
        .with_column(LABEL_COLUMN, Column::Numeric(labels))
}

/// Balanced dataset with every incident form field, two excluded columns
/// and the label.
///
/// `primary_weapon_type` separates the classes the same way
/// [`synthetic_incidents`] uses the attack type. `multiple_attacks` mixes
/// `"0"`, `"1"` and `"Unknown"`, so it loads as a text column.
pub fn incident_frame(rows: usize, seed: u64) -> RecordFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels = balanced_labels(rows);
    let (positive, negative) = PRIMARY_WEAPON_TYPES.split_at(PRIMARY_WEAPON_TYPES.len() / 2);

    let numeric = |rng: &mut StdRng, lo: i32, hi: i32| -> Column {
        Column::Numeric((0..rows).map(|_| rng.gen_range(lo..=hi) as f64).collect())
    };
    let text = |rng: &mut StdRng, options: &[&str]| -> Column {
        categorical((0..rows).map(|_| pick(rng, options)).collect())
    };

    let mut countries = Vec::with_capacity(rows);
    let mut provinces = Vec::with_capacity(rows);
    for _ in 0..rows {
        let (country, options) = COUNTRY_PROVINCES[rng.gen_range(0..COUNTRY_PROVINCES.len())];
        countries.push(country);
        provinces.push(pick(&mut rng, &options));
    }
    let weapons: Vec<&str> = labels
        .iter()
        .map(|&label| pick(&mut rng, if label == 1.0 { positive } else { negative }))
        .collect();

    RecordFrame::new()
        .with_column("year", numeric(&mut rng, 1970, 2020))
        .with_column("month", numeric(&mut rng, 1, 12))
        .with_column("country", categorical(countries))
        .with_column("region", text(&mut rng, REGIONS))
        .with_column("province_state", categorical(provinces))
        .with_column("criteria_political", numeric(&mut rng, 0, 1))
        .with_column("criteria_economic", numeric(&mut rng, 0, 1))
        .with_column("criteria_religious", numeric(&mut rng, 0, 1))
        .with_column("multiple_attacks", text(&mut rng, MULTIPLE_ATTACKS))
        .with_column("suicide_attack", numeric(&mut rng, 0, 1))
        .with_column("primary_attack_type", text(&mut rng, ATTACK_TYPES))
        .with_column("primary_target_type", text(&mut rng, TARGET_TYPES))
        .with_column("primary_target_subtype", text(&mut rng, TARGET_SUBTYPES))
        .with_column("target_nationality", text(&mut rng, &["Egyptian", "Iraqi", "Indian"]))
        .with_column("secondary_target_type", text(&mut rng, SECONDARY_TARGET_TYPES))
        .with_column("group_name", text(&mut rng, GROUPS))
        .with_column("individual_attack", numeric(&mut rng, 0, 1))
        .with_column("primary_weapon_type", categorical(weapons))
        .with_column("secondary_weapon_type", text(&mut rng, SECONDARY_WEAPON_TYPES))
        .with_column("num_wounded", numeric(&mut rng, 0, 50))
        .with_column("city", text(&mut rng, &["Mosul", "Cairo", "Kabul"]))
        .with_column(LABEL_COLUMN, Column::Numeric(labels))
}

/// A fast, single-threaded config for small datasets.
///
/// `min_child_weight` is zero so that a handful of rows can still split.
pub fn tiny_config() -> BoostingConfig {
    BoostingConfig {
        n_trees: 10,
        tree: TreeParams::depth_wise(3),
        regularization: RegularizationParams {
            min_child_weight: 0.0,
            ..Default::default()
        },
        n_threads: NonZeroUsize::new(1),
        verbosity: Verbosity::Silent,
        ..Default::default()
    }
}
