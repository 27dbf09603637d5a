use serde::{Deserialize, Serialize};

/// Column headers used when exporting decoded references as a table
pub const DECODED_COLUMNS: [&str; 6] = [
    "Reference Number",
    "Model",
    "Bezel",
    "Case Material",
    "Reference Letters",
    "Reference Letters Meaning",
];

/// Structured metadata decoded from one reference code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedReference {
    /// Reference exactly as received
    pub reference_number: String,

    /// Model family, or `Unknown Model`
    pub model: String,

    /// Bezel type, `N/A` or `Unknown Bezel`
    pub bezel: String,

    /// Case material, `N/A` or `Unknown Case Material`
    pub case_material: String,

    /// Letters of the reference, case preserved (may be empty)
    pub reference_letters: String,

    /// Meaning of the letters, or `Unknown Reference Letters`
    pub reference_letters_meaning: String,
}

impl DecodedReference {
    /// Fields in [`DECODED_COLUMNS`] order
    #[must_use]
    pub fn to_record(&self) -> [&str; 6] {
        [
            self.reference_number.as_str(),
            self.model.as_str(),
            self.bezel.as_str(),
            self.case_material.as_str(),
            self.reference_letters.as_str(),
            self.reference_letters_meaning.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_matches_column_order() {
        let decoded = DecodedReference {
            reference_number: "116610LN".to_string(),
            model: "Submariner".to_string(),
            bezel: "Finely Engine Turned".to_string(),
            case_material: "Stainless".to_string(),
            reference_letters: "LN".to_string(),
            reference_letters_meaning: "Lunette Noir (Black Bezel)".to_string(),
        };

        let record = decoded.to_record();
        assert_eq!(record.len(), DECODED_COLUMNS.len());
        assert_eq!(record[0], "116610LN");
        assert_eq!(record[1], "Submariner");
        assert_eq!(record[5], "Lunette Noir (Black Bezel)");
    }
}
