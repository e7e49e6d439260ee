//! Domain-wide properties of form records scored by a trained pipeline.

use std::sync::OnceLock;

use proptest::prelude::*;
use proptest::sample::select;

use taspm::incident::catalog::{
    ATTACK_TYPES, COUNTRIES, GROUPS, MULTIPLE_ATTACKS, PRIMARY_WEAPON_TYPES, REGIONS, SECONDARY_TARGET_TYPES,
    SECONDARY_WEAPON_TYPES, TARGET_SUBTYPES, TARGET_TYPES,
};
use taspm::incident::{IncidentForm, FIELD_NAMES, OTHER};
use taspm::testing::{incident_frame, tiny_config};
use taspm::{ExclusionPolicy, Pipeline, LABEL_COLUMN, EXCLUDED_COLUMNS};

fn pipeline() -> &'static Pipeline {
    static PIPELINE: OnceLock<Pipeline> = OnceLock::new();
    PIPELINE.get_or_init(|| {
        let raw = incident_frame(60, 21);
        let (features, labels) = ExclusionPolicy::default().split(&raw, LABEL_COLUMN).unwrap();
        Pipeline::fit(&features, &labels, &tiny_config()).unwrap()
    })
}

fn word() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}"
}

prop_compose! {
    /// Attack, target and weapon selects.
    fn arb_attack()(
        attack in select(ATTACK_TYPES.to_vec()),
        target in select(TARGET_TYPES.to_vec()),
        subtype in select(TARGET_SUBTYPES.to_vec()),
        secondary in select(SECONDARY_TARGET_TYPES.to_vec()),
        primary_weapon in select(PRIMARY_WEAPON_TYPES.to_vec()),
        secondary_weapon in select(SECONDARY_WEAPON_TYPES.to_vec()),
    ) -> [&'static str; 6] {
        [attack, target, subtype, secondary, primary_weapon, secondary_weapon]
    }
}

prop_compose! {
    fn arb_form()(
        year in 1970i32..=2030,
        month in 1u8..=12,
        country in select(COUNTRIES.to_vec()),
        region in select(REGIONS.to_vec()),
        province_idx in 0usize..4,
        flags in prop::array::uniform5(0u8..=1),
        multiple_attacks in select(MULTIPLE_ATTACKS.to_vec()),
        group in select(GROUPS.to_vec()),
        attack in arb_attack(),
        free_text in prop::array::uniform4(word()),
    ) -> IncidentForm {
        let [country_other, province_other, group_other, nationality] = free_text;
        let mut form = IncidentForm {
            year,
            month,
            country: country.to_string(),
            country_other,
            region: region.to_string(),
            province_other,
            criteria_political: flags[0],
            criteria_economic: flags[1],
            criteria_religious: flags[2],
            multiple_attacks: multiple_attacks.to_string(),
            suicide_attack: flags[3],
            primary_attack_type: attack[0].to_string(),
            primary_target_type: attack[1].to_string(),
            primary_target_subtype: attack[2].to_string(),
            target_nationality: nationality,
            secondary_target_type: attack[3].to_string(),
            group_name: group.to_string(),
            group_other,
            individual_attack: flags[4],
            primary_weapon_type: attack[4].to_string(),
            secondary_weapon_type: attack[5].to_string(),
            ..Default::default()
        };
        form.province_state = form.province_options()[province_idx].to_string();
        form
    }
}

proptest! {
    #[test]
    fn form_predictions_are_well_formed(form in arb_form()) {
        let record = form.to_record().unwrap();
        prop_assert_eq!(record.names().collect::<Vec<_>>(), FIELD_NAMES.to_vec());

        let pred = pipeline().predict(&record).unwrap();
        prop_assert!(pred.label == 0 || pred.label == 1);
        prop_assert!((0.0..=1.0).contains(&pred.probability));
        prop_assert_eq!(pred.label == 1, pred.probability >= 0.5);
        prop_assert_eq!(pipeline().predict(&record).unwrap(), pred);
    }

    #[test]
    fn region_is_unknown_unless_country_is_other(form in arb_form()) {
        let record = form.to_record().unwrap();
        let region = record.get("region").map(|v| v.to_string());
        if form.country == OTHER {
            prop_assert_eq!(region, Some(form.region.clone()));
        } else {
            prop_assert_eq!(region.as_deref(), Some("Unknown"));
        }
    }
}

#[test]
fn form_fields_are_the_fitted_columns() {
    let names: Vec<&str> = pipeline().transform().schema().input_names().collect();
    assert_eq!(names, FIELD_NAMES.to_vec());
    for name in EXCLUDED_COLUMNS {
        assert!(!FIELD_NAMES.contains(name), "{name} reaches the model");
    }
}

#[test]
fn all_unseen_free_text_still_predicts() {
    let form = IncidentForm {
        country: OTHER.into(),
        country_other: "Atlantis".into(),
        province_state: "Unknown".into(),
        province_other: "Lemuria".into(),
        target_nationality: "Martian".into(),
        group_name: OTHER.into(),
        group_other: "Nobody".into(),
        ..Default::default()
    };
    let pred = pipeline().predict(&form.to_record().unwrap()).unwrap();
    assert!((0.0..=1.0).contains(&pred.probability));
}
