use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::types::ModelFamilyName;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// A model family and the numeric prefixes that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFamily {
    pub name: ModelFamilyName,
    pub codes: Vec<u32>,
}

/// Full reference strings that resolve straight to a model family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOverride {
    pub model: ModelFamilyName,
    pub references: Vec<String>,
}

/// One entry of the bezel or case material table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitCode {
    pub code: u8,
    pub name: String,
}

/// One entry of the reference letter table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCode {
    pub letters: String,
    pub meaning: String,
}

/// Serializable catalog format
///
/// Table order is significant: the first model family listing a code wins
/// ties, and the first override listing a reference wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub model_families: Vec<ModelFamily>,
    #[serde(default)]
    pub overrides: Vec<ReferenceOverride>,
    #[serde(default)]
    pub bezels: Vec<DigitCode>,
    #[serde(default)]
    pub case_materials: Vec<DigitCode>,
    #[serde(default)]
    pub reference_letters: Vec<LetterCode>,
}

/// The lookup tables used by the decoder, with indexes
#[derive(Debug)]
pub struct ReferenceCatalog {
    /// Brand the tables describe
    pub brand: Option<String>,

    /// Model families in table order
    pub model_families: Vec<ModelFamily>,

    /// Overrides in table order
    pub overrides: Vec<ReferenceOverride>,

    pub bezels: Vec<DigitCode>,
    pub case_materials: Vec<DigitCode>,
    pub reference_letters: Vec<LetterCode>,

    /// Index: code -> indices of families listing it, ascending
    code_to_families: HashMap<u32, Vec<usize>>,

    /// Index: exact reference string -> index of the first override listing it
    reference_to_override: HashMap<String, usize>,

    bezel_by_digit: HashMap<u8, usize>,
    case_material_by_digit: HashMap<u8, usize>,

    /// Index: lower-cased letters -> index in `reference_letters`
    letters_to_meaning: HashMap<String, usize>,
}

impl ReferenceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            brand: None,
            model_families: Vec::new(),
            overrides: Vec::new(),
            bezels: Vec::new(),
            case_materials: Vec::new(),
            reference_letters: Vec::new(),
            code_to_families: HashMap::new(),
            reference_to_override: HashMap::new(),
            bezel_by_digit: HashMap::new(),
            case_material_by_digit: HashMap::new(),
            letters_to_meaning: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/rolex_references.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from `path` when given, otherwise the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut catalog = Self::new();
        catalog.brand = data.brand;
        for family in data.model_families {
            catalog.add_model_family(family);
        }
        for entry in data.overrides {
            catalog.add_override(entry);
        }
        for entry in data.bezels {
            catalog.add_bezel(entry)?;
        }
        for entry in data.case_materials {
            catalog.add_case_material(entry)?;
        }
        for entry in data.reference_letters {
            catalog.add_reference_letters(entry);
        }

        Ok(catalog)
    }

    /// Append a model family; it loses ties against every family already present
    pub fn add_model_family(&mut self, family: ModelFamily) {
        let index = self.model_families.len();
        for &code in &family.codes {
            let indices = self.code_to_families.entry(code).or_default();
            // A family may list the same code twice
            if indices.last() != Some(&index) {
                indices.push(index);
            }
        }
        self.model_families.push(family);
    }

    /// Append an override; references already claimed by an earlier entry keep it
    pub fn add_override(&mut self, entry: ReferenceOverride) {
        let index = self.overrides.len();
        for reference in &entry.references {
            self.reference_to_override
                .entry(reference.clone())
                .or_insert(index);
        }
        self.overrides.push(entry);
    }

    pub fn add_bezel(&mut self, entry: DigitCode) -> Result<(), CatalogError> {
        validate_digit_code(&entry, "bezel")?;
        self.bezel_by_digit
            .entry(entry.code)
            .or_insert(self.bezels.len());
        self.bezels.push(entry);
        Ok(())
    }

    pub fn add_case_material(&mut self, entry: DigitCode) -> Result<(), CatalogError> {
        validate_digit_code(&entry, "case material")?;
        self.case_material_by_digit
            .entry(entry.code)
            .or_insert(self.case_materials.len());
        self.case_materials.push(entry);
        Ok(())
    }

    pub fn add_reference_letters(&mut self, entry: LetterCode) {
        self.letters_to_meaning
            .entry(entry.letters.to_lowercase())
            .or_insert(self.reference_letters.len());
        self.reference_letters.push(entry);
    }

    /// Families listing `code`, in table order
    pub fn families_for_code(&self, code: u32) -> impl Iterator<Item = &ModelFamily> {
        self.code_to_families
            .get(&code)
            .into_iter()
            .flatten()
            .map(|&idx| &self.model_families[idx])
    }

    /// Model family overriding this exact reference string
    pub fn override_for(&self, reference: &str) -> Option<&ModelFamilyName> {
        self.reference_to_override
            .get(reference)
            .map(|&idx| &self.overrides[idx].model)
    }

    pub fn bezel_name(&self, digit: u8) -> Option<&str> {
        self.bezel_by_digit
            .get(&digit)
            .map(|&idx| self.bezels[idx].name.as_str())
    }

    pub fn case_material_name(&self, digit: u8) -> Option<&str> {
        self.case_material_by_digit
            .get(&digit)
            .map(|&idx| self.case_materials[idx].name.as_str())
    }

    /// Meaning of a letter suffix, matched case-insensitively
    pub fn letter_meaning(&self, letters: &str) -> Option<&str> {
        self.letters_to_meaning
            .get(&letters.to_lowercase())
            .map(|&idx| self.reference_letters[idx].meaning.as_str())
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            brand: self.brand.clone(),
            model_families: self.model_families.clone(),
            overrides: self.overrides.clone(),
            bezels: self.bezels.clone(),
            case_materials: self.case_materials.clone(),
            reference_letters: self.reference_letters.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of model families in catalog
    pub fn len(&self) -> usize {
        self.model_families.len()
    }

    /// Check if catalog has no model families
    pub fn is_empty(&self) -> bool {
        self.model_families.is_empty()
    }

    /// Number of distinct override reference strings
    pub fn override_reference_count(&self) -> usize {
        self.reference_to_override.len()
    }

    /// Table sizes for display
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            version: CATALOG_VERSION.to_string(),
            brand: self.brand.clone(),
            model_families: self.model_families.len(),
            distinct_codes: self.code_to_families.len(),
            overrides: self.override_reference_count(),
            bezels: self.bezels.len(),
            case_materials: self.case_materials.len(),
            reference_letters: self.reference_letters.len(),
        }
    }
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Table sizes of a loaded catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub version: String,
    pub brand: Option<String>,
    pub model_families: usize,
    pub distinct_codes: usize,
    pub overrides: usize,
    pub bezels: usize,
    pub case_materials: usize,
    pub reference_letters: usize,
}

fn validate_digit_code(entry: &DigitCode, table: &str) -> Result<(), CatalogError> {
    if entry.code > 9 {
        return Err(CatalogError::InvalidEntry(format!(
            "{table} code {} is not a single digit",
            entry.code
        )));
    }
    if entry.name.trim().is_empty() {
        return Err(CatalogError::InvalidEntry(format!(
            "{table} code {} has an empty name",
            entry.code
        )));
    }
    Ok(())
}
