use serde::Serialize;

use crate::catalog::index::PrefixCandidates;
use crate::core::decoded::DecodedReference;
use crate::core::types::{DigitLookup, ModelResolution};

/// A decoded reference together with how each field was reached
#[derive(Debug, Clone, Serialize)]
pub struct DecodeExplanation {
    /// Digits extracted from the reference
    pub numeric_part: String,

    /// Letters extracted from the reference
    pub letters: String,

    /// Rule that settled the model family
    pub resolution: ModelResolution,

    /// Every prefix length that matched at least one family, shortest first.
    /// Populated even when an override decided the model.
    pub prefix_candidates: Vec<PrefixCandidates>,

    pub bezel_digit: DigitLookup,
    pub case_material_digit: DigitLookup,

    /// The final result
    pub decoded: DecodedReference,
}

impl DecodeExplanation {
    /// Human-readable notes about ambiguity or fallbacks
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();

        match &self.resolution {
            ModelResolution::Override { model } => {
                if let Some(longest) = self.prefix_candidates.last() {
                    if longest.families.first() != Some(model) {
                        notes.push(format!(
                            "Override replaced prefix match '{}' (code {})",
                            longest.families[0], longest.code
                        ));
                    }
                }
            }
            ModelResolution::Prefix {
                candidates, code, ..
            } if candidates.len() > 1 => {
                notes.push(format!(
                    "Code {code} is shared by {} families; kept the first: {}",
                    candidates.len(),
                    candidates.join(", ")
                ));
            }
            ModelResolution::Prefix { .. } => {}
            ModelResolution::Unresolved => {
                if self.numeric_part.len() < 2 {
                    notes.push("Fewer than two digits; no prefix to match".to_string());
                } else {
                    notes.push("No model family code matches any prefix".to_string());
                }
            }
        }

        if self.bezel_digit == DigitLookup::NotAttempted {
            notes.push("Fewer than five digits; bezel and case material not decoded".to_string());
        }
        if let DigitLookup::Unknown(d) = self.bezel_digit {
            notes.push(format!("Bezel digit {d} is not in the bezel table"));
        }
        if let DigitLookup::Unknown(d) = self.case_material_digit {
            notes.push(format!("Case material digit {d} is not in the case material table"));
        }
        if self.letters.is_empty() {
            notes.push("No reference letters".to_string());
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::store::ReferenceCatalog;
    use crate::matching::engine::ReferenceDecoder;

    #[test]
    fn test_notes_for_ambiguous_prefix() {
        let catalog = ReferenceCatalog::load_embedded().unwrap();
        let decoder = ReferenceDecoder::new(&catalog);

        // 16 is shared; 161, 1619 match nothing
        let notes = decoder.explain("1619").notes();
        assert!(notes.iter().any(|n| n.starts_with("Code 16 is shared by 5 families")));
        assert!(notes.iter().any(|n| n.contains("bezel and case material not decoded")));
        assert!(notes.iter().any(|n| n == "No reference letters"));
    }

    #[test]
    fn test_notes_for_override() {
        let catalog = ReferenceCatalog::load_embedded().unwrap();
        let decoder = ReferenceDecoder::new(&catalog);

        let notes = decoder.explain("116610LN").notes();
        assert!(notes
            .iter()
            .any(|n| n == "Override replaced prefix match 'Submariner Date' (code 1166)"));
    }

    #[test]
    fn test_notes_for_garbage() {
        let catalog = ReferenceCatalog::load_embedded().unwrap();
        let decoder = ReferenceDecoder::new(&catalog);

        let notes = decoder.explain("---").notes();
        assert!(notes.iter().any(|n| n.starts_with("Fewer than two digits")));
    }
}
