use tracing::debug;

use crate::cleaning::fields::{self, UNKNOWN};
use crate::parsing::tsv::Table;

/// Columns holding free-text reference numbers
pub const REFERENCE_COLUMNS: [&str; 2] = ["Reference number", "Confirm Reference Number "];

/// Columns removed once cleaning is done
pub const DROPPED_COLUMNS: [&str; 3] = ["Scope of delivery", "Location", "Confirm Reference Number "];

/// One listing row: named cells in column order. Empty cells are missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    fields: Vec<(String, String)>,
}

impl Listing {
    pub fn new(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
            .collect();
        Self { fields }
    }

    /// Cell value; `None` for absent columns and empty cells
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// Overwrite a cell, appending the column if it is new
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, cell)) => *cell = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    pub fn remove(&mut self, column: &str) {
        self.fields.retain(|(name, _)| name != column);
    }

    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some((name, _)) = self.fields.iter_mut().find(|(name, _)| name == from) {
            *name = to.to_string();
        }
    }

    /// First value accepted by `check`, trying `preferred` and then every
    /// column in order
    pub fn first_valid<T>(&self, preferred: &str, check: impl Fn(&str) -> Option<T>) -> Option<T> {
        self.get(preferred)
            .and_then(&check)
            .or_else(|| self.fields.iter().find_map(|(_, value)| check(value)))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn into_values(self) -> Vec<String> {
        self.fields.into_iter().map(|(_, value)| value).collect()
    }
}

/// Run every cleaning step on one listing, in order, then drop and rename
/// columns for export
pub fn clean_listing(listing: &mut Listing) {
    normalize_listing(listing);
    finalize(listing);
}

/// Run every cleaning step but keep the original column set, including the
/// confirmed reference column the batch decoder reads
pub fn normalize_listing(listing: &mut Listing) {
    clean_model(listing);
    clean_reference_numbers(listing);
    clean_movement(listing);
    clean_material(listing, "Case material", fields::CASE_MATERIALS);
    clean_material(listing, "Bracelet material", fields::BRACELET_MATERIALS);
    clean_year(listing);
    clean_condition(listing);
    clean_box_and_papers(listing);
    clean_gender(listing);
    clean_location(listing);
    clean_price(listing);
    clean_shipping(listing);
    fill_seller(listing);
    clean_base_caliber(listing);
    fix_dial(listing);
    fix_dial_numerals(listing);
}

/// Clean every row of a table; the output headers follow the cleaned column
/// layout. With `finalize` off, dropped columns are kept and nothing is renamed.
pub fn clean_table(table: &Table, finalize: bool) -> Table {
    let clean: fn(&mut Listing) = if finalize {
        clean_listing
    } else {
        normalize_listing
    };

    // Column layout depends only on the input headers, so a blank row shows it
    let mut template = Listing::new(&table.headers, &[]);
    clean(&mut template);
    let headers = template.column_names();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut listing = Listing::new(&table.headers, row);
            clean(&mut listing);
            listing.into_values()
        })
        .collect();

    debug!(rows = rows.len(), columns = headers.len(), "cleaned listing table");
    Table { headers, rows }
}

fn clean_model(listing: &mut Listing) {
    let model = fields::normalize_model(listing.get("Model"));
    listing.set("Model", model);
}

fn clean_reference_numbers(listing: &mut Listing) {
    for column in REFERENCE_COLUMNS {
        if listing.has_column(column) {
            let value = fields::extract_reference_number(listing.get(column).unwrap_or_default());
            listing.set(column, value);
        }
    }
}

fn clean_movement(listing: &mut Listing) {
    let movement = listing
        .first_valid("Movement", fields::movement_in)
        .unwrap_or(UNKNOWN);
    listing.set("Movement", movement);
}

fn clean_material(listing: &mut Listing, column: &str, valid: &[&str]) {
    let material = listing
        .first_valid(column, |v| valid.contains(&v).then(|| v.to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string());
    listing.set(column, material);
}

fn clean_year(listing: &mut Listing) {
    let year = listing
        .first_valid("Year of production", fields::year_in)
        .unwrap_or_else(|| UNKNOWN.to_string());
    listing.set("Year of production", year);
}

fn clean_condition(listing: &mut Listing) {
    if !listing.has_column("Condition") {
        return;
    }
    let raw = listing.get("Condition").map(str::to_string);
    let details = raw
        .as_deref()
        .map_or_else(|| UNKNOWN.to_string(), fields::condition_details);
    listing.set("Condition Details", details);
    listing.set("Condition", fields::condition_main(raw.as_deref()));
}

fn clean_box_and_papers(listing: &mut Listing) {
    if !listing.has_column("Scope of delivery") {
        return;
    }
    let scope = listing.get("Scope of delivery").unwrap_or_default().to_string();
    listing.set("Box", fields::yes_no(fields::has_original_box(&scope)));
    listing.set("Papers", fields::yes_no(fields::has_original_papers(&scope)));
}

fn clean_gender(listing: &mut Listing) {
    let gender = listing
        .fields
        .iter()
        .find_map(|(_, value)| fields::gender_in(value))
        .unwrap_or(UNKNOWN);
    listing.set("Gender", gender);
}

fn clean_location(listing: &mut Listing) {
    if !listing.has_column("Location") {
        return;
    }
    let (country, city) = fields::split_location(listing.get("Location").unwrap_or_default());
    listing.set(
        "Country",
        fields::valid_country(&country).unwrap_or_else(|| UNKNOWN.to_string()),
    );
    listing.set(
        "City",
        fields::valid_city(&city).unwrap_or_else(|| UNKNOWN.to_string()),
    );
}

fn clean_price(listing: &mut Listing) {
    if listing.has_column("Price") {
        let price = fields::clean_price(listing.get("Price").unwrap_or_default());
        listing.set("Price", price);
    }
}

fn clean_shipping(listing: &mut Listing) {
    if listing.has_column("shipping") {
        let shipping = fields::clean_shipping(listing.get("shipping"));
        listing.set("shipping", shipping);
    }
}

fn fill_seller(listing: &mut Listing) {
    if listing.has_column("Seller Information") && listing.get("Seller Information").is_none() {
        listing.set("Seller Information", UNKNOWN);
    }
}

fn clean_base_caliber(listing: &mut Listing) {
    if listing.has_column("Base caliber") {
        let caliber = fields::base_caliber(listing.get("Base caliber").unwrap_or_default());
        listing.set("Base caliber", caliber);
    }
}

/// Dial colours sometimes land in the material columns
fn fix_dial(listing: &mut Listing) {
    if !listing.has_column("Dial") {
        return;
    }
    let dial = match listing.get("Dial") {
        None => String::new(),
        Some(dial) if fields::is_dial_color(dial) => dial.to_string(),
        Some(_) => ["Case material", "Bracelet material"]
            .iter()
            .filter_map(|column| listing.get(column))
            .find(|value| fields::is_dial_color(value))
            .unwrap_or(UNKNOWN)
            .to_string(),
    };
    listing.set("Dial", dial);
}

fn fix_dial_numerals(listing: &mut Listing) {
    if !listing.has_column("Dial numerals") {
        return;
    }
    let numerals = match listing.get("Dial numerals") {
        None => None,
        Some(value) => fields::dial_numerals_short(value).or_else(|| {
            ["Case material", "Bracelet material"]
                .iter()
                .filter_map(|column| listing.get(column))
                .find_map(fields::dial_numerals_short)
        }),
    };
    listing.set("Dial numerals", numerals.unwrap_or(UNKNOWN));
}

fn finalize(listing: &mut Listing) {
    for column in DROPPED_COLUMNS {
        listing.remove(column);
    }
    listing.rename("Seller Information", "Seller Name");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(pairs: &[(&str, &str)]) -> Listing {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| (*h).to_string()).collect();
        let values: Vec<String> = pairs.iter().map(|(_, v)| (*v).to_string()).collect();
        Listing::new(&headers, &values)
    }

    #[test]
    fn test_get_treats_empty_as_missing() {
        let row = listing(&[("Model", ""), ("Movement", "Automatic")]);
        assert_eq!(row.get("Model"), None);
        assert!(row.has_column("Model"));
        assert_eq!(row.get("Movement"), Some("Automatic"));
        assert_eq!(row.get("Price"), None);
    }

    #[test]
    fn test_first_valid_prefers_named_column() {
        let row = listing(&[("Notes", "Quartz"), ("Movement", "Automatic")]);
        assert_eq!(row.first_valid("Movement", fields::movement_in), Some("Automatic"));

        let row = listing(&[("Notes", "Quartz"), ("Movement", "n/a")]);
        assert_eq!(row.first_valid("Movement", fields::movement_in), Some("Quartz"));
    }

    #[test]
    fn test_set_appends_new_column() {
        let mut row = listing(&[("Model", "Datejust")]);
        row.set("Gender", "Male");
        row.set("Model", "Datejust 36");
        assert_eq!(row.column_names(), vec!["Model", "Gender"]);
        assert_eq!(row.get("Model"), Some("Datejust 36"));
    }

    #[test]
    fn test_movement_falls_back_to_other_columns() {
        let mut row = listing(&[
            ("Model", "Datejust"),
            ("Movement", ""),
            ("Caliber notes", "Self-winding movement"),
        ]);
        clean_movement(&mut row);
        assert_eq!(row.get("Movement"), Some("Automatic"));
    }

    #[test]
    fn test_material_row_scan_hits_unknown_first() {
        // `Unknown` is an accepted material, so an earlier Unknown cell wins
        let mut row = listing(&[("Model", "Unknown"), ("Case material", "Gold")]);
        clean_material(&mut row, "Case material", fields::CASE_MATERIALS);
        assert_eq!(row.get("Case material"), Some("Unknown"));
    }

    #[test]
    fn test_dial_from_case_material() {
        let mut row = listing(&[("Dial", "Steel"), ("Case material", "Silver")]);
        fix_dial(&mut row);
        assert_eq!(row.get("Dial"), Some("Silver"));

        let mut row = listing(&[("Dial", "")]);
        fix_dial(&mut row);
        assert_eq!(row.get("Dial"), None);
    }

    #[test]
    fn test_dial_numerals() {
        let mut row = listing(&[("Dial numerals", "Arabic numerals")]);
        fix_dial_numerals(&mut row);
        assert_eq!(row.get("Dial numerals"), Some("Arabic"));

        let mut row = listing(&[("Dial numerals", "")]);
        fix_dial_numerals(&mut row);
        assert_eq!(row.get("Dial numerals"), Some("Unknown"));

        let mut row = listing(&[("Dial numerals", "Diamonds")]);
        fix_dial_numerals(&mut row);
        assert_eq!(row.get("Dial numerals"), Some("Unknown"));
    }

    #[test]
    fn test_clean_listing_full_row() {
        let mut row = listing(&[
            ("Model", "Submariner (No Date)"),
            ("Reference number", "Ref 114060 / 2019"),
            ("Movement", "Automatic"),
            ("Case material", "Steel"),
            ("Bracelet material", "Steel"),
            ("Year of production", "2019 (Approximation)"),
            ("Condition", "Very good (Minor scratches)"),
            ("Scope of delivery", "Original box, original papers"),
            ("Gender", "Men's watch/Unisex"),
            ("Location", "Australia, Sydney"),
            ("Price", "AU$14,950"),
            ("shipping", ""),
            ("Seller Information", ""),
            ("Base caliber", "3130"),
            ("Dial", "Black"),
            ("Dial numerals", "No numerals"),
            ("Confirm Reference Number ", "114060"),
        ]);
        clean_listing(&mut row);

        assert_eq!(row.get("Model"), Some("Submariner"));
        assert_eq!(row.get("Reference number"), Some("114060"));
        assert_eq!(row.get("Year of production"), Some("2019"));
        assert_eq!(row.get("Condition"), Some("Very good"));
        assert_eq!(row.get("Condition Details"), Some("Minor scratches"));
        assert_eq!(row.get("Box"), Some("Yes"));
        assert_eq!(row.get("Papers"), Some("Yes"));
        assert_eq!(row.get("Gender"), Some("Male"));
        assert_eq!(row.get("Country"), Some("Australia"));
        assert_eq!(row.get("City"), Some("Sydney"));
        assert_eq!(row.get("Price"), Some("14950"));
        assert_eq!(row.get("shipping"), Some("0"));
        assert_eq!(row.get("Seller Name"), Some("Unknown"));
        assert_eq!(row.get("Dial numerals"), Some("None"));

        assert!(!row.has_column("Scope of delivery"));
        assert!(!row.has_column("Location"));
        assert!(!row.has_column("Confirm Reference Number "));
        assert!(!row.has_column("Seller Information"));
    }

    #[test]
    fn test_normalize_keeps_reference_column() {
        let mut row = listing(&[
            ("Confirm Reference Number ", "Ref. 16710BLNR"),
            ("Seller Information", "Dealer"),
        ]);
        normalize_listing(&mut row);
        assert_eq!(row.get("Confirm Reference Number "), Some("16710BLNR"));
        assert_eq!(row.get("Seller Information"), Some("Dealer"));
    }

    #[test]
    fn test_clean_table_headers_match_rows() {
        let table = Table {
            headers: vec!["Model".to_string(), "Location".to_string()],
            rows: vec![
                vec!["Explorer".to_string(), "Germany, Berlin".to_string()],
                vec![String::new(), String::new()],
            ],
        };

        let cleaned = clean_table(&table, true);
        assert_eq!(
            cleaned.headers,
            vec!["Model", "Movement", "Case material", "Bracelet material", "Year of production", "Gender", "Country", "City"]
        );
        for row in &cleaned.rows {
            assert_eq!(row.len(), cleaned.headers.len());
        }
        assert!(clean_table(&table, false)
            .headers
            .contains(&"Location".to_string()));
        assert_eq!(cleaned.rows[0][0], "Explorer I");
        assert_eq!(cleaned.rows[0][6], "Germany");
        assert_eq!(cleaned.rows[1][0], "Unknown");
        assert_eq!(cleaned.rows[1][6], "Unknown");
        assert_eq!(cleaned.rows[1][7], "Unknown");
    }
}
