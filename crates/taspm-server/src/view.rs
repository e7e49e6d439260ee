//! HTML rendering of the incident form and prediction result.

use std::fmt::Write;

use taspm::incident::catalog::{
    ATTACK_TYPES, BINARY, COUNTRIES, GROUPS, MONTHS, MULTIPLE_ATTACKS, PRIMARY_WEAPON_TYPES, REGIONS,
    SECONDARY_TARGET_TYPES, SECONDARY_WEAPON_TYPES, TARGET_SUBTYPES, TARGET_TYPES, YEARS,
};
use taspm::{IncidentForm, Prediction};

pub const TITLE: &str = "Terror Attack Success Predictor";
pub const PREDICT_BUTTON: &str = "Predict Attack Success";

/// Probability as a percentage with two decimals: `0.8` is `"80.00%"`.
pub fn format_percentage(probability: f32) -> String {
    format!("{:.2}%", f64::from(probability) * 100.0)
}

pub fn verdict(label: u8) -> &'static str {
    if label == 1 {
        "Likely Successful Attack"
    } else {
        "Likely Unsuccessful Attack"
    }
}

/// `"<verdict> — Probability: <percentage>"`
pub fn result_message(prediction: &Prediction) -> String {
    format!(
        "{} — Probability: {}",
        verdict(prediction.label),
        format_percentage(prediction.probability)
    )
}

pub fn error_message(error: &impl std::fmt::Display) -> String {
    format!("Error during prediction: {error}")
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// What the result area shows.
pub enum Outcome {
    Prediction(Prediction),
    Error(String),
}

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}\
h1{text-align:center;color:#FF4B4B}\
.tagline{text-align:center;font-size:18px}\
.columns{display:flex;gap:2rem}.columns>div{flex:1}\
label{display:block;margin-top:.6rem}select,input{width:100%}\
.alert{padding:1rem;border-radius:.5rem;margin-top:1rem}\
.error{background:#ffe0e0;color:#7d1a1a}.success{background:#ddf4e4;color:#1e5631}\
footer{text-align:center;font-size:16px;color:#5c636a}";

// Re-submit the widget state to `/` so dependent widgets follow the change.
const RERUN: &str = "location.href='/?'+new URLSearchParams(new FormData(this.form))";

fn select<'a>(
    out: &mut String,
    name: &str,
    label: &str,
    options: impl IntoIterator<Item = &'a str>,
    selected: &str,
    rerun: bool,
) {
    let _ = write!(out, "<label for=\"{name}\">{}</label><select id=\"{name}\" name=\"{name}\"", escape(label));
    if rerun {
        let _ = write!(out, " onchange=\"{RERUN}\"");
    }
    out.push('>');
    let mut shown: Vec<&str> = Vec::new();
    for option in options {
        if shown.contains(&option) {
            continue;
        }
        shown.push(option);
        let attr = if option == selected { " selected" } else { "" };
        let option = escape(option);
        let _ = write!(out, "<option value=\"{option}\"{attr}>{option}</option>");
    }
    out.push_str("</select>");
}

fn binary_select(out: &mut String, name: &str, label: &str, selected: u8) {
    let options: Vec<String> = BINARY.iter().map(u8::to_string).collect();
    select(out, name, label, options.iter().map(String::as_str), &selected.to_string(), false);
}

fn text_input(out: &mut String, name: &str, label: &str, value: &str) {
    let _ = write!(
        out,
        "<label for=\"{name}\">{}</label><input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
        escape(label),
        escape(value)
    );
}

fn hidden(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, "<input type=\"hidden\" name=\"{name}\" value=\"{}\">", escape(value));
}

fn sidebar(out: &mut String) {
    out.push_str(
        "<aside><h2>Model Overview</h2>\
<h3>Terror Attack Success Prediction Model (TASPM)</h3>\
<p>This model estimates the probability of a planned terrorist attack being successful, \
using machine learning trained on historical global terrorism data.</p>\
<p><strong>Objective:</strong><br>Identify patterns, predict operational success, and assist \
intelligence and counterterrorism strategies.</p>\
<p><strong>Key Benefits:</strong></p><ul>\
<li>Early detection of high-risk incidents</li>\
<li>Improved situational awareness for analysts</li>\
<li>Data-driven decision support for law enforcement</li></ul>\
<p><strong>Model Inputs Include:</strong></p><ul>\
<li>Attack year, country, and region</li>\
<li>Target and weapon details</li>\
<li>Attack type and motivation criteria</li></ul><hr>\
<small>Developed as part of the <strong>Global and Egypt Terrorism Analytics</strong> Project.</small>\
</aside>",
    );
}

fn temporal_and_spatial(out: &mut String, form: &IncidentForm) {
    out.push_str("<h3>Temporal and Spatial Information</h3>");
    let _ = write!(
        out,
        "<label for=\"year\">Year</label><input type=\"number\" id=\"year\" name=\"year\" \
min=\"{}\" max=\"{}\" value=\"{}\" title=\"Enter the year of the incident.\">",
        YEARS.start(),
        YEARS.end(),
        form.year
    );
    let months: Vec<String> = MONTHS.map(|m| m.to_string()).collect();
    select(out, "month", "Month", months.iter().map(String::as_str), &form.month.to_string(), false);

    select(out, "country", "Country", COUNTRIES.iter().copied(), &form.country, true);
    if form.country_is_other() {
        text_input(out, "country_other", "Please enter the country name:", &form.country_other);
        select(out, "region", "Region", REGIONS.iter().copied(), &form.region, false);
    } else {
        hidden(out, "country_other", &form.country_other);
        hidden(out, "region", &form.region);
    }

    select(
        out,
        "province_state",
        "Province / State",
        form.province_options().iter().copied(),
        &form.province_state,
        true,
    );
    if form.province_is_unknown() {
        text_input(out, "province_other", "Please enter the province or state name:", &form.province_other);
    } else {
        hidden(out, "province_other", &form.province_other);
    }
}

fn motivational(out: &mut String, form: &IncidentForm) {
    out.push_str("<h3>Motivational Criteria</h3>");
    binary_select(out, "criteria_political", "Political Criteria", form.criteria_political);
    binary_select(out, "criteria_economic", "Economic Criteria", form.criteria_economic);
    binary_select(out, "criteria_religious", "Religious Criteria", form.criteria_religious);
    select(
        out,
        "multiple_attacks",
        "Multiple Attacks",
        MULTIPLE_ATTACKS.iter().copied(),
        &form.multiple_attacks,
        false,
    );
}

fn attack(out: &mut String, form: &IncidentForm) {
    out.push_str("<h3>Attack Characteristics</h3>");
    binary_select(out, "suicide_attack", "Suicide Attack", form.suicide_attack);
    select(
        out,
        "primary_attack_type",
        "Primary Attack Type",
        ATTACK_TYPES.iter().copied(),
        &form.primary_attack_type,
        false,
    );
    select(
        out,
        "primary_target_type",
        "Primary Target Type",
        TARGET_TYPES.iter().copied(),
        &form.primary_target_type,
        false,
    );
    select(
        out,
        "primary_target_subtype",
        "Primary Target Subtype",
        TARGET_SUBTYPES.iter().copied(),
        &form.primary_target_subtype,
        false,
    );
    text_input(out, "target_nationality", "Target Nationality", &form.target_nationality);
    select(
        out,
        "secondary_target_type",
        "Secondary Target Type",
        SECONDARY_TARGET_TYPES.iter().copied(),
        &form.secondary_target_type,
        false,
    );
}

fn perpetrator(out: &mut String, form: &IncidentForm) {
    out.push_str("<h3>Perpetrator Information</h3>");
    select(out, "group_name", "Group Name", GROUPS.iter().copied(), &form.group_name, true);
    if form.group_is_other() {
        text_input(out, "group_other", "Please enter the group name:", &form.group_other);
    } else {
        hidden(out, "group_other", &form.group_other);
    }
    binary_select(out, "individual_attack", "Individual Attack", form.individual_attack);
    select(
        out,
        "primary_weapon_type",
        "Primary Weapon Type",
        PRIMARY_WEAPON_TYPES.iter().copied(),
        &form.primary_weapon_type,
        false,
    );
    select(
        out,
        "secondary_weapon_type",
        "Secondary Weapon Type",
        SECONDARY_WEAPON_TYPES.iter().copied(),
        &form.secondary_weapon_type,
        false,
    );
}

fn outcome(out: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Prediction(prediction) => {
            let class = if prediction.label == 1 { "error" } else { "success" };
            let _ = write!(
                out,
                "<div class=\"alert {class}\"><strong>{}</strong> — Probability: {}</div>",
                verdict(prediction.label),
                format_percentage(prediction.probability)
            );
        }
        Outcome::Error(message) => {
            let _ = write!(out, "<div class=\"alert error\">{}</div>", escape(message));
        }
    }
}

/// The whole page for the given widget state.
pub fn render_page(form: &IncidentForm, result: Option<&Outcome>) -> String {
    let mut out = String::with_capacity(32 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{TITLE}</title>\
<style>{STYLE}</style></head><body>"
    );
    sidebar(&mut out);

    let _ = write!(
        out,
        "<main><h1>{TITLE}</h1><p class=\"tagline\">Empowering intelligence through data — predict, \
analyze, and uncover the factors behind terrorist attack success</p><hr>"
    );
    out.push_str(
        "<h2>Enter Attack Details</h2><p><small>Please provide as much accurate information as possible. \
Fields marked as 'Unknown' can be manually specified if necessary.</small></p>",
    );

    out.push_str("<form method=\"post\" action=\"/predict\"><div class=\"columns\"><div>");
    temporal_and_spatial(&mut out, form);
    motivational(&mut out, form);
    out.push_str("</div><div>");
    attack(&mut out, form);
    perpetrator(&mut out, form);
    out.push_str("</div></div><hr>");

    out.push_str(
        "<h2>Prediction Results</h2><p><small>Click <strong>Predict Attack Success</strong> to estimate \
the probability of success based on your input.</small></p>",
    );
    let _ = write!(out, "<button type=\"submit\">{PREDICT_BUTTON}</button></form>");
    if let Some(result) = result {
        outcome(&mut out, result);
    }

    out.push_str(
        "<hr><footer><i>Turning data into defense — where intelligence meets insight</i></footer></main></body></html>",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(format_percentage(0.8), "80.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.12345), "12.35%");
    }

    #[test]
    fn result_messages() {
        let hit = Prediction {
            label: 1,
            probability: 0.8,
        };
        assert_eq!(result_message(&hit), "Likely Successful Attack — Probability: 80.00%");
        let miss = Prediction {
            label: 0,
            probability: 0.25,
        };
        assert_eq!(result_message(&miss), "Likely Unsuccessful Attack — Probability: 25.00%");
        assert_eq!(error_message(&"boom"), "Error during prediction: boom");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn province_options_follow_country() {
        let form = IncidentForm {
            country: "Egypt".into(),
            province_state: "Giza".into(),
            ..Default::default()
        };
        let page = render_page(&form, None);
        assert!(page.contains("<option value=\"Giza\" selected>Giza</option>"));
        assert!(page.contains("North Sinai"));
        assert!(!page.contains("Please enter the country name:"));
    }

    #[test]
    fn repeated_province_options_are_listed_once() {
        for country in ["Andorra", "Other"] {
            let form = IncidentForm {
                country: country.into(),
                province_state: "Unknown".into(),
                ..Default::default()
            };
            let page = render_page(&form, None);
            let start = page.find("id=\"province_state\"").unwrap();
            let end = start + page[start..].find("</select>").unwrap();
            let options = &page[start..end];
            assert_eq!(options.matches("<option").count(), 1, "{country}: {options}");
            assert!(options.contains("<option value=\"Unknown\" selected>Unknown</option>"));
        }
    }

    #[test]
    fn other_country_shows_free_text_and_region() {
        let form = IncidentForm {
            country: "Other".into(),
            province_state: "Unknown".into(),
            ..Default::default()
        };
        let page = render_page(&form, None);
        assert!(page.contains("Please enter the country name:"));
        assert!(page.contains("<label for=\"region\">Region</label>"));
        assert!(page.contains("Please enter the province or state name:"));
    }

    #[test]
    fn outcome_styles() {
        let form = IncidentForm::default();
        let hit = Outcome::Prediction(Prediction {
            label: 1,
            probability: 0.9,
        });
        assert!(render_page(&form, Some(&hit)).contains("alert error\"><strong>Likely Successful Attack</strong>"));
        let err = Outcome::Error(error_message(&"<missing>"));
        assert!(render_page(&form, Some(&err)).contains("Error during prediction: &lt;missing&gt;"));
    }
}
