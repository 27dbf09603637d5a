use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/rolex_references.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let families = required_array(catalog, "model_families");
    for (i, family) in families.iter().enumerate() {
        let name = required_str(family, "name", "model_families", i);
        let codes = family
            .get("codes")
            .and_then(serde_json::Value::as_array)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Model family '{name}' (index {i}) missing 'codes' array\n"
                )
            });
        for code in codes {
            assert!(
                code.as_u64().is_some_and(|c| c <= 99_999),
                "\n\nCATALOG BUILD ERROR: Model family '{name}' has invalid code {code}\n\
                 Codes must be integers of at most five digits.\n"
            );
        }
    }

    let overrides = required_array(catalog, "overrides");
    for (i, entry) in overrides.iter().enumerate() {
        let model = required_str(entry, "model", "overrides", i);
        assert!(
            entry.get("references").is_some_and(serde_json::Value::is_array),
            "\n\nCATALOG BUILD ERROR: Override '{model}' (index {i}) missing 'references' array\n"
        );
    }

    for table in ["bezels", "case_materials"] {
        for (i, entry) in required_array(catalog, table).iter().enumerate() {
            required_str(entry, "name", table, i);
            assert!(
                entry
                    .get("code")
                    .and_then(serde_json::Value::as_u64)
                    .is_some_and(|c| c <= 9),
                "\n\nCATALOG BUILD ERROR: '{table}' entry {i} must have a single-digit 'code'\n"
            );
        }
    }

    let letters = required_array(catalog, "reference_letters");
    for (i, entry) in letters.iter().enumerate() {
        required_str(entry, "letters", "reference_letters", i);
        required_str(entry, "meaning", "reference_letters", i);
    }

    println!(
        "cargo:warning=Validated catalog: {} model families, {} overrides, {} letter codes",
        families.len(),
        overrides.len(),
        letters.len()
    );
}

fn required_array<'a>(catalog: &'a serde_json::Value, field: &str) -> &'a Vec<serde_json::Value> {
    catalog
        .get(field)
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Missing '{field}' array\n\
                 The catalog must have a top-level '{field}' array.\n"
            )
        })
}

fn required_str<'a>(entry: &'a serde_json::Value, field: &str, table: &str, index: usize) -> &'a str {
    entry
        .get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: '{table}' entry {index} missing '{field}' field\n")
        })
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/rolex_references.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
