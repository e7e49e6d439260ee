//! Incident form state and its conversion into a model record.

use serde::{Deserialize, Serialize};

use super::catalog::{
    self, ATTACK_TYPES, COUNTRIES, DEFAULT_TARGET_NATIONALITY, DEFAULT_YEAR, GROUPS, MONTHS, MULTIPLE_ATTACKS, OTHER,
    PRIMARY_WEAPON_TYPES, REGIONS, SECONDARY_TARGET_TYPES, SECONDARY_WEAPON_TYPES, TARGET_SUBTYPES, TARGET_TYPES,
    UNKNOWN, YEARS,
};
use crate::data::{Record, Value};

/// A form value outside the closed domains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("year must be between 1970 and 2030, got {0}")]
    YearOutOfRange(i32),

    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u8),

    #[error("{field} must be 0 or 1, got {value}")]
    NotBinary { field: &'static str, value: u8 },

    #[error("{value:?} is not a valid option for {field}")]
    UnknownOption { field: &'static str, value: String },

    #[error("{0} must not be empty")]
    EmptyFreeText(&'static str),
}

/// Widget state of the incident form.
///
/// Selects hold the chosen option text. The `*_other` fields are the free-text
/// inputs that replace a select's value when it is set to `"Other"` (country,
/// group) or `"Unknown"` (province). Missing fields take the widget defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentForm {
    pub year: i32,
    pub month: u8,
    pub country: String,
    pub country_other: String,
    pub region: String,
    pub province_state: String,
    pub province_other: String,
    pub criteria_political: u8,
    pub criteria_economic: u8,
    pub criteria_religious: u8,
    pub multiple_attacks: String,
    pub suicide_attack: u8,
    pub primary_attack_type: String,
    pub primary_target_type: String,
    pub primary_target_subtype: String,
    pub target_nationality: String,
    pub secondary_target_type: String,
    pub group_name: String,
    pub group_other: String,
    pub individual_attack: u8,
    pub primary_weapon_type: String,
    pub secondary_weapon_type: String,
}

fn first(options: &[&str]) -> String {
    options.first().map(|s| s.to_string()).unwrap_or_default()
}

impl Default for IncidentForm {
    fn default() -> Self {
        let country = first(COUNTRIES);
        let province_state = first(catalog::provinces_for(&country));
        Self {
            year: DEFAULT_YEAR,
            month: *MONTHS.start(),
            country,
            country_other: String::new(),
            region: first(REGIONS),
            province_state,
            province_other: String::new(),
            criteria_political: 0,
            criteria_economic: 0,
            criteria_religious: 0,
            multiple_attacks: first(MULTIPLE_ATTACKS),
            suicide_attack: 0,
            primary_attack_type: first(ATTACK_TYPES),
            primary_target_type: first(TARGET_TYPES),
            primary_target_subtype: first(TARGET_SUBTYPES),
            target_nationality: DEFAULT_TARGET_NATIONALITY.to_string(),
            secondary_target_type: first(SECONDARY_TARGET_TYPES),
            group_name: first(GROUPS),
            group_other: String::new(),
            individual_attack: 0,
            primary_weapon_type: first(PRIMARY_WEAPON_TYPES),
            secondary_weapon_type: first(SECONDARY_WEAPON_TYPES),
        }
    }
}

impl IncidentForm {
    /// Whether the free-text country and the region select are shown.
    pub fn country_is_other(&self) -> bool {
        self.country == OTHER
    }

    /// Whether the free-text province is shown.
    pub fn province_is_unknown(&self) -> bool {
        self.province_state == UNKNOWN
    }

    /// Whether the free-text group is shown.
    pub fn group_is_other(&self) -> bool {
        self.group_name == OTHER
    }

    /// Country name after the `"Other"` override.
    pub fn resolved_country(&self) -> &str {
        if self.country_is_other() {
            self.country_other.trim()
        } else {
            &self.country
        }
    }

    /// Province options for the resolved country.
    pub fn province_options(&self) -> &'static [&'static str] {
        catalog::provinces_for(self.resolved_country())
    }

    /// Reset selections that no longer belong to their option list, the way a
    /// rerun resets a select whose options changed.
    pub fn normalize(&mut self) {
        let provinces = self.province_options();
        if !provinces.contains(&self.province_state.as_str()) {
            self.province_state = first(provinces);
        }
        if !REGIONS.contains(&self.region.as_str()) {
            self.region = first(REGIONS);
        }
    }

    /// Validate against the closed domains and assemble the model record.
    ///
    /// Fields appear in [`catalog::FIELD_NAMES`] order. `region` is
    /// `"Unknown"` unless the country select is `"Other"`.
    pub fn to_record(&self) -> Result<Record, FormError> {
        if !YEARS.contains(&self.year) {
            return Err(FormError::YearOutOfRange(self.year));
        }
        if !MONTHS.contains(&self.month) {
            return Err(FormError::MonthOutOfRange(self.month));
        }

        let country = option("country", &self.country, COUNTRIES)?;
        let (country, region) = if country == OTHER {
            let name = free_text("country_other", &self.country_other)?;
            (name, option("region", &self.region, REGIONS)?.to_string())
        } else {
            (country.to_string(), UNKNOWN.to_string())
        };

        let province = option("province_state", &self.province_state, catalog::provinces_for(&country))?;
        let province = if province == UNKNOWN {
            free_text("province_other", &self.province_other)?
        } else {
            province.to_string()
        };

        let multiple_attacks = match option("multiple_attacks", &self.multiple_attacks, MULTIPLE_ATTACKS)? {
            UNKNOWN => Value::from(UNKNOWN),
            flag => Value::from(if flag == "1" { 1u8 } else { 0u8 }),
        };

        let group = option("group_name", &self.group_name, GROUPS)?;
        let group = if group == OTHER {
            free_text("group_other", &self.group_other)?
        } else {
            group.to_string()
        };

        let record = Record::new()
            .with("year", self.year)
            .with("month", self.month)
            .with("country", country)
            .with("region", region)
            .with("province_state", province)
            .with("criteria_political", binary("criteria_political", self.criteria_political)?)
            .with("criteria_economic", binary("criteria_economic", self.criteria_economic)?)
            .with("criteria_religious", binary("criteria_religious", self.criteria_religious)?)
            .with("multiple_attacks", multiple_attacks)
            .with("suicide_attack", binary("suicide_attack", self.suicide_attack)?)
            .with(
                "primary_attack_type",
                option("primary_attack_type", &self.primary_attack_type, ATTACK_TYPES)?,
            )
            .with(
                "primary_target_type",
                option("primary_target_type", &self.primary_target_type, TARGET_TYPES)?,
            )
            .with(
                "primary_target_subtype",
                option("primary_target_subtype", &self.primary_target_subtype, TARGET_SUBTYPES)?,
            )
            .with("target_nationality", free_text("target_nationality", &self.target_nationality)?)
            .with(
                "secondary_target_type",
                option("secondary_target_type", &self.secondary_target_type, SECONDARY_TARGET_TYPES)?,
            )
            .with("group_name", group)
            .with("individual_attack", binary("individual_attack", self.individual_attack)?)
            .with(
                "primary_weapon_type",
                option("primary_weapon_type", &self.primary_weapon_type, PRIMARY_WEAPON_TYPES)?,
            )
            .with(
                "secondary_weapon_type",
                option("secondary_weapon_type", &self.secondary_weapon_type, SECONDARY_WEAPON_TYPES)?,
            );
        Ok(record)
    }
}

/// The catalog entry equal to `value`.
fn option(field: &'static str, value: &str, options: &[&'static str]) -> Result<&'static str, FormError> {
    options
        .iter()
        .copied()
        .find(|o| *o == value)
        .ok_or_else(|| FormError::UnknownOption {
            field,
            value: value.to_string(),
        })
}

fn binary(field: &'static str, value: u8) -> Result<u8, FormError> {
    match value {
        0 | 1 => Ok(value),
        _ => Err(FormError::NotBinary { field, value }),
    }
}

fn free_text(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::EmptyFreeText(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::FIELD_NAMES;

    fn egypt() -> IncidentForm {
        IncidentForm {
            country: "Egypt".into(),
            province_state: "Giza".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_form_is_valid() {
        let record = IncidentForm::default().to_record().unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), FIELD_NAMES.to_vec());
        assert_eq!(record.get("year"), Some(&Value::Number(2020.0)));
        assert_eq!(record.get("target_nationality"), Some(&Value::from("Egyptian")));
        assert_eq!(record.get("secondary_weapon_type"), Some(&Value::from("None")));
    }

    #[test]
    fn region_is_unknown_for_listed_country() {
        let mut form = egypt();
        form.region = "Europe".into();
        let record = form.to_record().unwrap();
        assert_eq!(record.get("country"), Some(&Value::from("Egypt")));
        assert_eq!(record.get("region"), Some(&Value::from(UNKNOWN)));
        assert_eq!(record.get("province_state"), Some(&Value::from("Giza")));
    }

    #[test]
    fn other_country_uses_free_text_and_region() {
        let form = IncidentForm {
            country: OTHER.into(),
            country_other: " Iraq ".into(),
            region: "Middle East & North Africa".into(),
            province_state: "Basra".into(),
            ..Default::default()
        };
        assert_eq!(form.province_options(), &["Baghdad", "Basra", "Mosul", "Kirkuk"]);
        let record = form.to_record().unwrap();
        assert_eq!(record.get("country"), Some(&Value::from("Iraq")));
        assert_eq!(record.get("region"), Some(&Value::from("Middle East & North Africa")));
        assert_eq!(record.get("province_state"), Some(&Value::from("Basra")));
    }

    #[test]
    fn unknown_province_uses_free_text() {
        let mut form = IncidentForm {
            country: "Chad".into(),
            province_state: UNKNOWN.into(),
            ..Default::default()
        };
        assert_eq!(form.to_record().unwrap_err(), FormError::EmptyFreeText("province_other"));
        form.province_other = "Lac".into();
        let record = form.to_record().unwrap();
        assert_eq!(record.get("province_state"), Some(&Value::from("Lac")));
    }

    #[test]
    fn other_group_uses_free_text() {
        let mut form = egypt();
        form.group_name = OTHER.into();
        assert_eq!(form.to_record().unwrap_err(), FormError::EmptyFreeText("group_other"));
        form.group_other = "Boko Haram".into();
        let record = form.to_record().unwrap();
        assert_eq!(record.get("group_name"), Some(&Value::from("Boko Haram")));
    }

    #[test]
    fn multiple_attacks_mixes_numbers_and_text() {
        let mut form = egypt();
        form.multiple_attacks = "1".into();
        assert_eq!(form.to_record().unwrap().get("multiple_attacks"), Some(&Value::Number(1.0)));
        form.multiple_attacks = UNKNOWN.into();
        assert_eq!(form.to_record().unwrap().get("multiple_attacks"), Some(&Value::from(UNKNOWN)));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        let form = IncidentForm { year: 1969, ..egypt() };
        assert_eq!(form.to_record().unwrap_err(), FormError::YearOutOfRange(1969));

        let form = IncidentForm { month: 13, ..egypt() };
        assert_eq!(form.to_record().unwrap_err(), FormError::MonthOutOfRange(13));

        let form = IncidentForm { suicide_attack: 2, ..egypt() };
        assert!(matches!(
            form.to_record(),
            Err(FormError::NotBinary { field: "suicide_attack", value: 2 })
        ));

        let form = IncidentForm {
            primary_weapon_type: "Laser".into(),
            ..egypt()
        };
        assert!(matches!(
            form.to_record(),
            Err(FormError::UnknownOption { field: "primary_weapon_type", .. })
        ));

        let form = IncidentForm {
            province_state: "Kabul".into(),
            ..egypt()
        };
        assert!(matches!(
            form.to_record(),
            Err(FormError::UnknownOption { field: "province_state", .. })
        ));

        let form = IncidentForm {
            target_nationality: "  ".into(),
            ..egypt()
        };
        assert_eq!(form.to_record().unwrap_err(), FormError::EmptyFreeText("target_nationality"));
    }

    #[test]
    fn normalize_follows_country_change() {
        let mut form = IncidentForm {
            country: "India".into(),
            province_state: "Giza".into(),
            region: "Atlantis".into(),
            ..Default::default()
        };
        form.normalize();
        assert_eq!(form.province_state, "Bihar");
        assert_eq!(form.region, REGIONS[0]);
        assert!(form.to_record().is_ok());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let form: IncidentForm = serde_json::from_str(r#"{"country": "Egypt", "province_state": "Cairo"}"#).unwrap();
        assert_eq!(form.year, DEFAULT_YEAR);
        assert_eq!(form.target_nationality, DEFAULT_TARGET_NATIONALITY);
        assert!(form.to_record().is_ok());
    }
}
