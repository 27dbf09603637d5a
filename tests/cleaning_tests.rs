//! Listing cleaner end to end: CSV text in, cleaned table out.

use watch_ref::cleaning::listing::clean_table;
use watch_ref::matching::batch::decode_batch;
use watch_ref::parsing::references::{references_from_table, DEFAULT_REFERENCE_COLUMN};
use watch_ref::parsing::tsv::{parse_table_text, write_table, Table};
use watch_ref::{ReferenceCatalog, ReferenceDecoder};

const EXPORT: &str = "\
Model,Reference number,Confirm Reference Number ,Movement,Case material,Bracelet material,Year of production,Condition,Scope of delivery,Gender,Location,Price,shipping,Seller Information,Base caliber,Dial,Dial numerals
Submariner (No Date),Rolex 114060 Submariner,114060,Automatic,Steel,Steel,2012,Very good (Worn with little to no signs of wear),\"Original box, original papers\",Men's watch/Unisex,\"Germany, Berlin\",\"AU$12,500\",AU$150,Example Watches,Rolex 3130,Black,No numerals
,see description,,,Silver,Leather,,,Original box,,X,12500,,,Cal. 3135 self-winding,Lume,Arabic
";

fn cell<'a>(table: &'a Table, row: usize, column: &str) -> &'a str {
    let idx = table
        .column_index(column)
        .unwrap_or_else(|| panic!("missing column '{column}'"));
    &table.rows[row][idx]
}

#[test]
fn test_clean_export_headers() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let cleaned = clean_table(&table, true);

    assert_eq!(
        cleaned.headers,
        vec![
            "Model",
            "Reference number",
            "Movement",
            "Case material",
            "Bracelet material",
            "Year of production",
            "Condition",
            "Gender",
            "Price",
            "shipping",
            "Seller Name",
            "Base caliber",
            "Dial",
            "Dial numerals",
            "Condition Details",
            "Box",
            "Papers",
            "Country",
            "City",
        ]
    );
    assert!(cleaned.rows.iter().all(|row| row.len() == cleaned.headers.len()));
}

#[test]
fn test_clean_complete_row() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let cleaned = clean_table(&table, true);

    assert_eq!(cell(&cleaned, 0, "Model"), "Submariner");
    assert_eq!(cell(&cleaned, 0, "Reference number"), "114060");
    assert_eq!(cell(&cleaned, 0, "Movement"), "Automatic");
    assert_eq!(cell(&cleaned, 0, "Case material"), "Steel");
    assert_eq!(cell(&cleaned, 0, "Year of production"), "2012");
    assert_eq!(cell(&cleaned, 0, "Condition"), "Very good");
    assert_eq!(
        cell(&cleaned, 0, "Condition Details"),
        "Worn with little to no signs of wear"
    );
    assert_eq!(cell(&cleaned, 0, "Box"), "Yes");
    assert_eq!(cell(&cleaned, 0, "Papers"), "Yes");
    assert_eq!(cell(&cleaned, 0, "Gender"), "Male");
    assert_eq!(cell(&cleaned, 0, "Country"), "Germany");
    assert_eq!(cell(&cleaned, 0, "City"), "Berlin");
    assert_eq!(cell(&cleaned, 0, "Price"), "12500");
    assert_eq!(cell(&cleaned, 0, "shipping"), "150");
    assert_eq!(cell(&cleaned, 0, "Seller Name"), "Example Watches");
    assert_eq!(cell(&cleaned, 0, "Base caliber"), "3130");
    assert_eq!(cell(&cleaned, 0, "Dial"), "Black");
    assert_eq!(cell(&cleaned, 0, "Dial numerals"), "None");
}

#[test]
fn test_clean_sparse_row_uses_fallbacks() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let cleaned = clean_table(&table, true);

    assert_eq!(cell(&cleaned, 1, "Model"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Reference number"), "No Reference");
    // Found in the base caliber cell by the row-wide scan
    assert_eq!(cell(&cleaned, 1, "Movement"), "Automatic");
    assert_eq!(cell(&cleaned, 1, "Case material"), "Silver");
    assert_eq!(cell(&cleaned, 1, "Bracelet material"), "Leather");
    assert_eq!(cell(&cleaned, 1, "Year of production"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Condition"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Condition Details"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Box"), "Yes");
    assert_eq!(cell(&cleaned, 1, "Papers"), "No");
    assert_eq!(cell(&cleaned, 1, "Gender"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Country"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "City"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Price"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "shipping"), "0");
    assert_eq!(cell(&cleaned, 1, "Seller Name"), "Unknown");
    assert_eq!(cell(&cleaned, 1, "Base caliber"), "3135");
    // Dial colour recovered from the case material column
    assert_eq!(cell(&cleaned, 1, "Dial"), "Silver");
    assert_eq!(cell(&cleaned, 1, "Dial numerals"), "Unknown");
}

#[test]
fn test_normalized_export_feeds_batch_decoder() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let normalized = clean_table(&table, false);

    assert_eq!(normalized.column_index(DEFAULT_REFERENCE_COLUMN), Some(2));
    assert!(normalized.column_index("Seller Information").is_some());

    let references = references_from_table(&normalized, DEFAULT_REFERENCE_COLUMN).unwrap();
    assert_eq!(references, vec!["114060", "No Reference"]);

    let catalog = ReferenceCatalog::load_embedded().unwrap();
    let output = decode_batch(&ReferenceDecoder::new(&catalog), &references);

    assert_eq!(output.skipped, 1);
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].model, "Submariner");
    assert_eq!(output.records[0].bezel, "Rotating Bezel");
    assert_eq!(output.records[0].case_material, "Stainless");
}

#[test]
fn test_unusual_reference_cells_do_not_abort_batch() {
    let long = format!("116610 {}", "x".repeat(72));
    let text = format!("Ref\n116610LN\n{long}\n\"16710BLNR\nverified\"\n");
    let table = parse_table_text(&text, b',').unwrap();

    let references = references_from_table(&table, "Ref").unwrap();
    assert_eq!(references.len(), 3);
    assert_eq!(references[1].chars().count(), 79);

    let catalog = ReferenceCatalog::load_embedded().unwrap();
    let output = decode_batch(&ReferenceDecoder::new(&catalog), &references);

    assert_eq!(output.skipped, 0);
    assert_eq!(output.records.len(), 3);
    assert_eq!(output.records[0].model, "Submariner");
    assert_eq!(output.records[1].model, "Submariner Date");
    assert_eq!(output.records[1].reference_letters_meaning, "Unknown Reference Letters");
    assert_eq!(output.records[2].model, "GMT Master II");
    assert_eq!(output.records[2].reference_number, "16710BLNR\nverified");
}

#[test]
fn test_cleaned_table_round_trips_through_csv() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let cleaned = clean_table(&table, true);

    let mut out = Vec::new();
    write_table(&mut out, &cleaned, b',').unwrap();
    let reparsed = parse_table_text(&String::from_utf8(out).unwrap(), b',').unwrap();

    assert_eq!(reparsed, cleaned);
}

#[test]
fn test_cleaning_is_idempotent_on_clean_values() {
    let table = parse_table_text(EXPORT, b',').unwrap();
    let once = clean_table(&table, false);
    let twice = clean_table(&once, false);

    assert_eq!(cell(&twice, 0, "Model"), "Submariner");
    assert_eq!(cell(&twice, 0, "Reference number"), "114060");
    assert_eq!(cell(&twice, 0, "Movement"), "Automatic");
    assert_eq!(cell(&twice, 0, "Year of production"), "2012");
}
