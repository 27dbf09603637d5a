//! Field-level normalizers for marketplace listing cells.
//!
//! Every function here is total: unrecognised input maps to `Unknown` (or
//! another fixed placeholder) rather than an error.

use regex::Regex;
use std::sync::OnceLock;

use crate::cleaning::countries::is_country_name;
use crate::matching::batch::NO_REFERENCE;

/// Placeholder for any cleaned field with no usable value
pub const UNKNOWN: &str = "Unknown";

macro_rules! regex {
    ($pattern:literal) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).expect("static pattern is valid"))
    }};
}

/// Model names corrected by exact replacement
const MODEL_REPLACEMENTS: &[(&str, &str)] = &[
    ("Submariner (No Date)", "Submariner"),
    ("6066", "Oysterdate Precision"),
    ("116655", "Yacht-Master 40"),
    ("17013", "Datejust Oysterquartz"),
    ("Cartier Tank", "Tank Must XL Silver Roman Dial"),
    ("15010", "Oyster Perpetual Date"),
    ("16030", "Datejust 36"),
    ("126503", "Datejust 41"),
    ("40 224270", "Explorer II"),
    ("124060", "Submariner"),
    ("116680", "Yacht-Master II"),
    ("69174", "Lady-Datejust"),
    ("169623", "Yacht-Master 37"),
    ("Rolex 1550", "Oyster Perpetual Date"),
    ("18038A", "Day-Date 36"),
    ("Manual winding", "Precision"),
    ("ROLEX", "Explorer I"),
    ("336934", "Rolex Sky-Dweller"),
    (
        "Art Déco",
        "Ladies Cocktail Art Déco silver dial Yellow Gold 14KT",
    ),
    ("1500", "Oyster Perpetual Date"),
    ("Automatic", "Explorer I"),
    ("Explorer", "Explorer I"),
];

/// Accepted case materials
pub const CASE_MATERIALS: &[&str] = &[
    "Steel",
    "Rose gold",
    "Gold/Steel",
    "White gold",
    "Yellow gold",
    "Platinum",
    "Red gold",
    "Titanium",
    "Ceramic",
    "Rubber",
    "Silver",
    "Gold-plated",
    "Leather",
    "Unknown",
];

/// Accepted bracelet materials
pub const BRACELET_MATERIALS: &[&str] = &[
    "Steel",
    "Rose gold",
    "Gold/Steel",
    "White gold",
    "Yellow gold",
    "Platinum",
    "Red gold",
    "Titanium",
    "Ceramic",
    "Rubber",
    "Silver",
    "Gold-plated",
    "Leather",
    "Crocodile skin",
    "Calf skin",
    "Snake skin",
    "Lizard skin",
    "Alligator skin",
    "Unknown",
];

/// Accepted dial colours
pub const DIAL_COLORS: &[&str] = &[
    "Green",
    "Black",
    "White",
    "Silver",
    "Brown",
    "Gold",
    "Blue",
    "Champagne",
    "Grey",
    "Pink",
    "Turquoise",
    "Purple",
    "Mother of pearl",
    "Bronze",
    "Meteorite",
    "Red",
    "Yellow",
    "Lines",
    "Orange",
    "Bordeaux",
    "Skeletonized",
];

/// Accepted dial numeral styles and their short names
const DIAL_NUMERALS: &[(&str, &str)] = &[
    ("No numerals", "None"),
    ("Arabic numerals", "Arabic"),
    ("Roman numerals", "Roman"),
];

/// Missing model becomes `Unknown`; known mislabels are replaced
pub fn normalize_model(value: Option<&str>) -> String {
    let Some(value) = value else {
        return UNKNOWN.to_string();
    };
    MODEL_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == value)
        .map_or(value, |(_, to)| *to)
        .to_string()
}

/// First run of four or more digits plus trailing letters, digits and
/// dashes, else `No Reference`
///
/// ```
/// use watch_ref::cleaning::fields::extract_reference_number;
///
/// assert_eq!(extract_reference_number("Rolex 116610LN Submariner"), "116610LN");
/// assert_eq!(extract_reference_number("40 224270"), "224270");
/// assert_eq!(extract_reference_number("Explorer"), "No Reference");
/// ```
pub fn extract_reference_number(value: &str) -> String {
    regex!(r"\b\d{4,}[A-Za-z0-9\-]*\b")
        .find(value)
        .map_or_else(|| NO_REFERENCE.to_string(), |m| m.as_str().to_string())
}

/// Movement type mentioned in a cell, checked in a fixed order
pub fn movement_in(value: &str) -> Option<&'static str> {
    let patterns: [(&str, &Regex); 3] = [
        ("Automatic", regex!(r"(?i)\bauto(?:matic)?|self-winding\b")),
        ("Manual winding", regex!(r"(?i)\bmanual(?: winding| wind)?\b")),
        ("Quartz", regex!(r"(?i)\bquartz\b")),
    ];
    patterns
        .iter()
        .find(|(_, re)| re.is_match(value))
        .map(|(name, _)| *name)
}

/// Four-digit year between 1900 and 2029
pub fn year_in(value: &str) -> Option<String> {
    regex!(r"\b(19[0-9]{2}|20[0-2][0-9])\b")
        .find(value)
        .map(|m| m.as_str().to_string())
}

/// First line of a condition cell with parenthesised text removed
pub fn condition_main(value: Option<&str>) -> String {
    let Some(value) = value else {
        return UNKNOWN.to_string();
    };
    let first_line = value.split('\n').next().unwrap_or_default().trim();
    let main = regex!(r"\s*\(.*?\)").replace_all(first_line, "");
    if main.eq_ignore_ascii_case("nan") {
        UNKNOWN.to_string()
    } else {
        main.into_owned()
    }
}

/// Text inside the first pair of parentheses
pub fn condition_details(value: &str) -> String {
    regex!(r"\((.*?)\)")
        .captures(value)
        .and_then(|c| c.get(1))
        .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string())
}

pub fn has_original_box(scope_of_delivery: &str) -> bool {
    scope_of_delivery.contains("Original box")
}

pub fn has_original_papers(scope_of_delivery: &str) -> bool {
    scope_of_delivery.contains("original papers")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `Male` or `Female` from the marketplace gender label
pub fn gender_in(value: &str) -> Option<&'static str> {
    regex!(r"Men's watch/Unisex|Women's watch")
        .find(value)
        .map(|m| {
            if m.as_str().contains("Men's watch") {
                "Male"
            } else {
                "Female"
            }
        })
}

/// Split `Country, City` on the first comma; a missing city is `Unknown`
pub fn split_location(value: &str) -> (String, String) {
    match value.split_once(',') {
        Some((country, city)) => (country.trim().to_string(), city.trim().to_string()),
        None => (value.trim().to_string(), UNKNOWN.to_string()),
    }
}

/// Title-cased country name, if the text is an ISO 3166-1 short name
///
/// ```
/// use watch_ref::cleaning::fields::valid_country;
///
/// assert_eq!(valid_country("united states"), Some("United States".to_string()));
/// assert_eq!(valid_country("Sydney"), None);
/// ```
pub fn valid_country(value: &str) -> Option<String> {
    let value = value.trim();
    is_country_name(value).then(|| title_case(&value.to_lowercase()))
}

/// City names need more than two characters
pub fn valid_city(value: &str) -> Option<String> {
    let value = value.trim();
    (value.chars().count() > 2).then(|| value.to_string())
}

/// Digits of a price carrying a currency prefix such as `AU$`, else `Unknown`
pub fn clean_price(value: &str) -> String {
    if regex!(r"^([A-Za-z]+)\$").is_match(value) {
        digits_only(value)
    } else {
        UNKNOWN.to_string()
    }
}

/// Digits of a shipping cost; missing shipping is free
pub fn clean_shipping(value: Option<&str>) -> String {
    value.map_or_else(|| "0".to_string(), digits_only)
}

/// First standalone four-digit number, else `Unknown`
pub fn base_caliber(value: &str) -> String {
    regex!(r"\b\d{4}\b")
        .find(value)
        .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string())
}

pub fn is_dial_color(value: &str) -> bool {
    DIAL_COLORS.contains(&value)
}

/// Short name of a recognised dial numeral style
pub fn dial_numerals_short(value: &str) -> Option<&'static str> {
    DIAL_NUMERALS
        .iter()
        .find(|(long, _)| *long == value)
        .map(|(_, short)| *short)
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Upper-case letters that follow a non-letter, lower-case the rest
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;
    for c in value.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_model() {
        assert_eq!(normalize_model(None), "Unknown");
        assert_eq!(normalize_model(Some("Submariner (No Date)")), "Submariner");
        assert_eq!(normalize_model(Some("Explorer")), "Explorer I");
        assert_eq!(normalize_model(Some("Explorer II")), "Explorer II");
        assert_eq!(normalize_model(Some("40 224270")), "Explorer II");
        assert_eq!(normalize_model(Some("Daytona")), "Daytona");
    }

    #[test]
    fn test_extract_reference_number() {
        assert_eq!(extract_reference_number("116610LN"), "116610LN");
        assert_eq!(extract_reference_number("Ref. 16710-BLNR box"), "16710-BLNR");
        assert_eq!(extract_reference_number("6542/8"), "6542");
        assert_eq!(extract_reference_number("123"), NO_REFERENCE);
        assert_eq!(extract_reference_number(""), NO_REFERENCE);
    }

    #[test]
    fn test_movement_in() {
        assert_eq!(movement_in("Automatic"), Some("Automatic"));
        assert_eq!(movement_in("self-winding movement"), Some("Automatic"));
        assert_eq!(movement_in("Manual Wind"), Some("Manual winding"));
        assert_eq!(movement_in("QUARTZ"), Some("Quartz"));
        assert_eq!(movement_in("Steel"), None);
    }

    #[test]
    fn test_year_in() {
        assert_eq!(year_in("Produced 1987, papers"), Some("1987".to_string()));
        assert_eq!(year_in("2021"), Some("2021".to_string()));
        assert_eq!(year_in("2035"), None);
        assert_eq!(year_in("11987"), None);
    }

    #[test]
    fn test_condition() {
        let value = "Very good (Worn with minor scratches)\nMore text";
        assert_eq!(condition_main(Some(value)), "Very good");
        assert_eq!(condition_details(value), "Worn with minor scratches");
        assert_eq!(condition_main(None), "Unknown");
        assert_eq!(condition_details("New"), "Unknown");
    }

    #[test]
    fn test_box_and_papers() {
        let scope = "Original box, original papers";
        assert!(has_original_box(scope));
        assert!(has_original_papers(scope));
        assert!(!has_original_box("original box"));
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn test_gender_in() {
        assert_eq!(gender_in("Men's watch/Unisex"), Some("Male"));
        assert_eq!(gender_in("Women's watch"), Some("Female"));
        assert_eq!(gender_in("Unisex"), None);
    }

    #[test]
    fn test_location() {
        assert_eq!(
            split_location("Australia, Sydney, NSW"),
            ("Australia".to_string(), "Sydney, NSW".to_string())
        );
        assert_eq!(
            split_location("Japan"),
            ("Japan".to_string(), "Unknown".to_string())
        );
        assert_eq!(valid_country("UNITED STATES"), Some("United States".to_string()));
        assert_eq!(valid_country("côte d'ivoire"), Some("Côte D'Ivoire".to_string()));
        assert_eq!(valid_country(" germany "), Some("Germany".to_string()));
        assert_eq!(valid_country("12345"), None);
        assert_eq!(valid_country(""), None);
        // Cities, state codes and placeholders are not countries
        assert_eq!(valid_country("Sydney"), None);
        assert_eq!(valid_country("Nsw"), None);
        assert_eq!(valid_country("Foo Bar"), None);
        assert_eq!(valid_country("Unknown"), None);
        assert_eq!(valid_city("NY"), None);
        assert_eq!(valid_city(" Sydney "), Some("Sydney".to_string()));
    }

    #[test]
    fn test_prices() {
        assert_eq!(clean_price("AU$12,500"), "12500");
        assert_eq!(clean_price("$12,500"), "Unknown");
        assert_eq!(clean_price("Price on request"), "Unknown");
        assert_eq!(clean_shipping(Some("+ $150 for shipping")), "150");
        assert_eq!(clean_shipping(None), "0");
    }

    #[test]
    fn test_base_caliber() {
        assert_eq!(base_caliber("Cal. 3135"), "3135");
        assert_eq!(base_caliber("31350"), "Unknown");
    }

    #[test]
    fn test_dial_helpers() {
        assert!(is_dial_color("Mother of pearl"));
        assert!(!is_dial_color("Steel"));
        assert_eq!(dial_numerals_short("Roman numerals"), Some("Roman"));
        assert_eq!(dial_numerals_short("Roman"), None);
    }
}
