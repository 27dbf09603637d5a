use tracing::debug;

use crate::catalog::index::CandidateFinder;
use crate::catalog::store::ReferenceCatalog;
use crate::core::decoded::DecodedReference;
use crate::core::reference::ReferenceCode;
use crate::core::types::{
    DigitLookup, ModelResolution, NOT_APPLICABLE, POSITIONAL_MIN_DIGITS, UNKNOWN_BEZEL,
    UNKNOWN_CASE_MATERIAL, UNKNOWN_REFERENCE_LETTERS,
};
use crate::matching::diagnosis::DecodeExplanation;

/// Decodes reference codes against a catalog.
///
/// Decoding is pure: the catalog is only read, and the same input always
/// yields the same [`DecodedReference`]. Unknown or malformed input degrades
/// to sentinel values instead of failing.
#[derive(Clone, Copy)]
pub struct ReferenceDecoder<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> ReferenceDecoder<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a ReferenceCatalog {
        self.catalog
    }

    /// Decode a raw reference string
    pub fn decode(&self, raw: &str) -> DecodedReference {
        let code = ReferenceCode::parse(raw);
        let resolution = self.resolve_model(&code);
        self.assemble(&code, &resolution)
    }

    /// Decode and keep the intermediate steps for display
    pub fn explain(&self, raw: &str) -> DecodeExplanation {
        let code = ReferenceCode::parse(raw);
        let prefix_candidates = CandidateFinder::new(self.catalog).find_prefix_candidates(&code);
        let resolution = self.resolve_model(&code);
        let decoded = self.assemble(&code, &resolution);

        DecodeExplanation {
            bezel_digit: self.bezel_lookup(&code),
            case_material_digit: self.case_material_lookup(&code),
            numeric_part: code.numeric,
            letters: code.letters,
            resolution,
            prefix_candidates,
            decoded,
        }
    }

    /// Settle the model family: exact override first, then the longest
    /// numeric prefix with any matching family.
    pub fn resolve_model(&self, code: &ReferenceCode) -> ModelResolution {
        if let Some(model) = self.catalog.override_for(&code.raw) {
            debug!(reference = %code.raw, model = %model, "override match");
            return ModelResolution::Override {
                model: model.to_string(),
            };
        }

        // Later (longer) prefixes overwrite earlier ones; within a length the
        // first family in table order wins.
        match CandidateFinder::new(self.catalog).find_longest(code) {
            Some(found) => {
                let model = found.families[0].clone();
                debug!(
                    reference = %code.raw,
                    length = found.length,
                    code = found.code,
                    candidates = found.families.len(),
                    model = %model,
                    "prefix match"
                );
                ModelResolution::Prefix {
                    model,
                    length: found.length,
                    code: found.code,
                    candidates: found.families,
                }
            }
            None => {
                debug!(reference = %code.raw, "no model match");
                ModelResolution::Unresolved
            }
        }
    }

    fn bezel_lookup(&self, code: &ReferenceCode) -> DigitLookup {
        positional_lookup(code, 1, |d| self.catalog.bezel_name(d).is_some())
    }

    fn case_material_lookup(&self, code: &ReferenceCode) -> DigitLookup {
        positional_lookup(code, 0, |d| self.catalog.case_material_name(d).is_some())
    }

    fn assemble(&self, code: &ReferenceCode, resolution: &ModelResolution) -> DecodedReference {
        let bezel = match self.bezel_lookup(code) {
            DigitLookup::NotAttempted => NOT_APPLICABLE,
            DigitLookup::Known(d) => self.catalog.bezel_name(d).unwrap_or(UNKNOWN_BEZEL),
            DigitLookup::Unknown(_) => UNKNOWN_BEZEL,
        };
        let case_material = match self.case_material_lookup(code) {
            DigitLookup::NotAttempted => NOT_APPLICABLE,
            DigitLookup::Known(d) => self
                .catalog
                .case_material_name(d)
                .unwrap_or(UNKNOWN_CASE_MATERIAL),
            DigitLookup::Unknown(_) => UNKNOWN_CASE_MATERIAL,
        };
        let meaning = self
            .catalog
            .letter_meaning(&code.letters)
            .unwrap_or(UNKNOWN_REFERENCE_LETTERS);

        DecodedReference {
            reference_number: code.raw.clone(),
            model: resolution.model_name().to_string(),
            bezel: bezel.to_string(),
            case_material: case_material.to_string(),
            reference_letters: code.letters.clone(),
            reference_letters_meaning: meaning.to_string(),
        }
    }
}

/// Look up the digit `offset` places from the end, when there are at least
/// five digits
fn positional_lookup(
    code: &ReferenceCode,
    offset: usize,
    known: impl Fn(u8) -> bool,
) -> DigitLookup {
    if code.numeric_len() < POSITIONAL_MIN_DIGITS {
        return DigitLookup::NotAttempted;
    }
    match code.digit_from_end(offset) {
        Some(d) if known(d) => DigitLookup::Known(d),
        Some(d) => DigitLookup::Unknown(d),
        None => DigitLookup::NotAttempted,
    }
}
