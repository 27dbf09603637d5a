use serde::Serialize;

use crate::core::reference::ReferenceCode;
use crate::core::types::{MAX_PREFIX_LENGTH, MIN_PREFIX_LENGTH};

use super::store::ReferenceCatalog;

/// Model families matching one numeric prefix length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixCandidates {
    /// Number of leading digits used
    pub length: usize,

    /// Integer value of those digits
    pub code: u32,

    /// Matching family names, in table order
    pub families: Vec<String>,
}

/// Finds model families whose codes match numeric prefixes of a reference
pub struct CandidateFinder<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Candidates for every prefix length from 2 up to min(digits, 5).
    ///
    /// Lengths without any matching family are omitted; the result is ordered
    /// by ascending length.
    pub fn find_prefix_candidates(&self, reference: &ReferenceCode) -> Vec<PrefixCandidates> {
        let max_len = reference.numeric_len().min(MAX_PREFIX_LENGTH);
        if max_len < MIN_PREFIX_LENGTH {
            return Vec::new();
        }

        (MIN_PREFIX_LENGTH..=max_len)
            .filter_map(|length| {
                let code = reference.numeric_prefix(length)?;
                let families: Vec<String> = self
                    .catalog
                    .families_for_code(code)
                    .map(|f| f.name.to_string())
                    .collect();
                (!families.is_empty()).then_some(PrefixCandidates {
                    length,
                    code,
                    families,
                })
            })
            .collect()
    }

    /// The longest prefix with any candidate
    pub fn find_longest(&self, reference: &ReferenceCode) -> Option<PrefixCandidates> {
        self.find_prefix_candidates(reference).pop()
    }
}
