//! Closed domains of the incident form.
//!
//! Field order, option lists and defaults are what the trained pipeline was
//! fitted against; changing an option list changes what the form can send.

use std::ops::RangeInclusive;

/// Option that switches a select over to free text.
pub const OTHER: &str = "Other";

/// Placeholder category for unknown values.
pub const UNKNOWN: &str = "Unknown";

/// Input fields in the order the record is assembled.
pub const FIELD_NAMES: [&str; 19] = [
    "year",
    "month",
    "country",
    "region",
    "province_state",
    "criteria_political",
    "criteria_economic",
    "criteria_religious",
    "multiple_attacks",
    "suicide_attack",
    "primary_attack_type",
    "primary_target_type",
    "primary_target_subtype",
    "target_nationality",
    "secondary_target_type",
    "group_name",
    "individual_attack",
    "primary_weapon_type",
    "secondary_weapon_type",
];

pub const YEARS: RangeInclusive<i32> = 1970..=2030;
pub const DEFAULT_YEAR: i32 = 2020;
pub const MONTHS: RangeInclusive<u8> = 1..=12;

/// Options of the 0/1 selects.
pub const BINARY: [u8; 2] = [0, 1];

pub const MULTIPLE_ATTACKS: &[&str] = &["0", "1", UNKNOWN];

pub const DEFAULT_TARGET_NATIONALITY: &str = "Egyptian";

pub const COUNTRIES: &[&str] = &[
    "Pakistan", "Mexico", "El Salvador", "Turkey", "Afghanistan", "Somalia", "Yemen",
    "Ukraine", "Nigeria", "India", "Macedonia", "Philippines", "Iraq", "Cambodia", "Burundi",
    "Saudi Arabia", "Nicaragua", "Cameroon", "Sri Lanka", "France", "West Bank and Gaza Strip",
    "Paraguay", "Italy", "Lebanon", "Nepal", "East Germany (GDR)", "Venezuela", "Thailand",
    "Ecuador", "Kenya", "Mozambique", "South Africa", "United States", "Spain", "Syria",
    "Tajikistan", "Algeria", "Haiti", "West Germany (FRG)", "Jordan", "Russia", "Egypt",
    "Uganda", "Peru", "United Kingdom", "Niger", "Colombia", "Sudan",
    "Democratic Republic of the Congo", "Iran", "Maldives", "Bangladesh", "Austria", "Libya",
    "Greece", "South Korea", "Ireland", "Chile", "Argentina", "Israel", "South Sudan",
    "Myanmar", "Japan", "Mali", "Portugal", "Angola", "Honduras", "Denmark", "Kosovo",
    "Georgia", "Cuba", "Kyrgyzstan", "Germany", "Burkina Faso", "Australia", "Bolivia",
    "Western Sahara", "Central African Republic", "Guatemala", "Liberia", "Indonesia",
    "Switzerland", "Belgium", "Jamaica", "Canada", "Taiwan", "Senegal", "Dominican Republic",
    "Brazil", "Serbia-Montenegro", "Cyprus", "Tanzania", "Ethiopia", "United Arab Emirates",
    "Romania", "Zimbabwe", "Laos", "Armenia", "Panama", "Slovak Republic", "Yugoslavia",
    "Rwanda", "Montenegro", "Sweden", "Hungary", "Namibia", "Bahrain", "Netherlands",
    "New Zealand", "China", "Ivory Coast", "Moldova", "Guadeloupe", "Czech Republic",
    "Albania", "Sierra Leone", "Tunisia", "Chad", "Azerbaijan", "Papua New Guinea", "Malaysia",
    "Guinea", "Latvia", "Suriname", "Morocco", "Vietnam", "Belarus", "Bosnia-Herzegovina",
    "Uruguay", "New Caledonia", "Kuwait", "Serbia", "Brunei", "Macau", "Zaire", "Madagascar",
    "Norway", "Zambia", "Rhodesia", "Djibouti", "Gabon", "Kazakhstan", "Costa Rica",
    "French Guiana", "Poland", "Uzbekistan", "Guyana", "Lithuania", "East Timor", "Bulgaria",
    "Gambia", "Mauritius", "Czechoslovakia", "Croatia", "Belize", "Finland",
    "Republic of the Congo", "Ghana", "North Yemen", "People's Republic of the Congo", "Malta",
    "Luxembourg", "Soviet Union", "Mauritania", "Togo", "Lesotho", "Eritrea", "Hong Kong",
    "Swaziland", "Trinidad and Tobago", "Grenada", "Guinea-Bissau", "Dominica", "Malawi",
    "Andorra", "Estonia", "Vanuatu", "Fiji", "Benin", "Qatar", "Turkmenistan", "Bhutan",
    "French Polynesia", "Bahamas", "Comoros", "Slovenia", "Singapore", "Vatican City", "Other",
];

/// Regions offered only when the country is entered as free text.
pub const REGIONS: &[&str] = &[
    "Middle East & North Africa", "South Asia", "Europe", "Sub-Saharan Africa",
    "North America", "East Asia", "Other",
];

/// Known provinces per country. Countries not listed fall back to
/// [`UNKNOWN_PROVINCES`].
pub const COUNTRY_PROVINCES: &[(&str, [&str; 4])] = &[
    ("Afghanistan", ["Zabul", "Kabul", "Faryab", "Laghman"]),
    ("Albania", ["Tirana", "Durres", "Fier", "Vlore"]),
    ("Algeria", ["Algiers", "Boumerdes", "Tizi Ouzou", "Oran"]),
    ("Egypt", ["Cairo", "Alexandria", "Giza", "North Sinai"]),
    ("Iraq", ["Baghdad", "Basra", "Mosul", "Kirkuk"]),
    ("Andorra", ["Unknown", "Unknown", "Unknown", "Unknown"]),
    ("Angola", ["Luanda", "Bengo", "Huambo", "Cuanza Norte"]),
    ("Argentina", ["Buenos Aires", "Cordoba", "Mendoza", "Santa Fe"]),
    ("Armenia", ["Yerevan", "Shirak", "Aragatsotn", "Kotayk"]),
    ("Australia", ["New South Wales", "Victoria", "Queensland", "Tasmania"]),
    ("Austria", ["Vienna", "Tyrol", "Styria", "Salzburg"]),
    ("Bahrain", ["Central", "Southern", "Northern", "Capital"]),
    ("Bangladesh", ["Dhaka", "Khulna", "Chittagong", "Rajshahi"]),
    ("India", ["Bihar", "Delhi", "Karnataka", "Maharashtra"]),
    ("Pakistan", ["Punjab", "Sindh", "Khyber Pakhtunkhwa", "Balochistan"]),
    ("United States", ["New York", "California", "Texas", "Florida"]),
    ("Other", ["Unknown", "Unknown", "Unknown", "Unknown"]),
];

pub const UNKNOWN_PROVINCES: [&str; 4] = [UNKNOWN; 4];

pub const ATTACK_TYPES: &[&str] = &[
    "Bombing/Explosion", "Assassination", "Armed Assault", "Hijacking", "Hostage Taking",
    "Facility/Infrastructure Attack",
];

pub const TARGET_TYPES: &[&str] = &[
    "Unknown", "Business", "Military", "Private Citizens & Property",
    "Violent Political Party", "Police", "Government (General)",
    "Religious Figures/Institutions", "Journalists & Media", "Airports & Aircraft", "Other",
    "Educational Institution", "Government (Diplomatic)", "Utilities", "Food or Water Supply",
    "Transportation", "NGO", "Abortion Related", "Terrorists/Non-State Militia",
    "Telecommunication", "Maritime", "Tourists",
];

pub const TARGET_SUBTYPES: &[&str] = &[
    "Unknown", "Police Security Forces/Officers",
    "Military Personnel (soldiers, troops, officers, forces)", "Unnamed Civilian/Unspecified",
    "Politician or Political Party Movement/Meeting/Rally",
    "Government Personnel (excluding police, military)", "Village/City/Town/Suburb",
    "Military Barracks/Base/Headquarters/Checkpost", "Military Unit/Patrol/Convoy",
    "Police Building (headquarters, station, school)",
    "Police Patrol (including vehicles and convoys)", "Government Building/Facility/Office",
    "Retail/Grocery/Bakery", "School/University/Educational Building", "Military Checkpoint",
    "Political Party Member/Rally", "House/Apartment/Residence", "Place of Worship",
    "Marketplace/Plaza/Square", "Non-State Militia", "Train/Train Tracks/Trolley",
    "Laborer (General)/Occupation Identified", "Vehicles/Transportation", "Named Civilian",
];

pub const SECONDARY_TARGET_TYPES: &[&str] = &[
    "Unknown", "Private Citizens & Property", "Military", "Police",
    "Terrorists/Non-State Militia", "Business", "Government (General)",
    "Educational Institution", "Transportation", "Religious Figures/Institutions",
    "Government (Diplomatic)", "Journalists & Media", "NGO", "Utilities", "Tourists",
    "Violent Political Party", "Airports & Aircraft", "Telecommunication", "Other", "Maritime",
    "Food or Water Supply",
];

pub const GROUPS: &[&str] = &[
    "Unknown", "Taliban", "Islamic State of Iraq and the Levant (ISIL)",
    "Houthi extremists (Ansar Allah)", "Al-Shabaab", "Other",
];

pub const PRIMARY_WEAPON_TYPES: &[&str] = &[
    "Firearms", "Explosives", "Melee", "Incendiary", "Chemical", "Unknown",
];

pub const SECONDARY_WEAPON_TYPES: &[&str] = &[
    "None", "Firearms", "Explosives", "Melee", "Incendiary", "Chemical", "Unknown",
];

/// Province options for a (resolved) country name.
pub fn provinces_for(country: &str) -> &'static [&'static str] {
    COUNTRY_PROVINCES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, provinces)| provinces.as_slice())
        .unwrap_or(UNKNOWN_PROVINCES.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::{ExclusionPolicy, LABEL_COLUMN};

    #[test]
    fn list_sizes() {
        assert_eq!(COUNTRIES.len(), 189);
        assert_eq!(ATTACK_TYPES.len(), 6);
        assert_eq!(TARGET_TYPES.len(), 22);
        assert_eq!(TARGET_SUBTYPES.len(), 24);
        assert_eq!(SECONDARY_TARGET_TYPES.len(), 21);
        assert_eq!(GROUPS.len(), 6);
        assert_eq!(PRIMARY_WEAPON_TYPES.len(), 6);
        assert_eq!(SECONDARY_WEAPON_TYPES.len(), 7);
        assert_eq!(COUNTRIES.last(), Some(&OTHER));
    }

    #[test]
    fn provinces_follow_country() {
        assert_eq!(provinces_for("Egypt"), &["Cairo", "Alexandria", "Giza", "North Sinai"]);
        assert_eq!(provinces_for("Atlantis"), &UNKNOWN_PROVINCES);
        assert_eq!(provinces_for(OTHER), &UNKNOWN_PROVINCES);
    }

    #[test]
    fn no_field_is_excluded() {
        let policy = ExclusionPolicy::default();
        for name in FIELD_NAMES {
            assert!(!policy.is_excluded(name), "{name} is excluded");
            assert_ne!(name, LABEL_COLUMN);
        }
    }
}
