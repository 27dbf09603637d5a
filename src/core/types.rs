use serde::{Deserialize, Serialize};

/// Model family used when neither an override nor a numeric prefix matches
pub const UNKNOWN_MODEL: &str = "Unknown Model";

/// Bezel and case material when the numeric part is too short to decode
pub const NOT_APPLICABLE: &str = "N/A";

/// Bezel digit present but not in the bezel table
pub const UNKNOWN_BEZEL: &str = "Unknown Bezel";

/// Case material digit present but not in the case material table
pub const UNKNOWN_CASE_MATERIAL: &str = "Unknown Case Material";

/// Reference letters empty or not in the letter table
pub const UNKNOWN_REFERENCE_LETTERS: &str = "Unknown Reference Letters";

/// Shortest numeric prefix compared against model family codes
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Longest numeric prefix compared against model family codes
pub const MAX_PREFIX_LENGTH: usize = 5;

/// Minimum number of digits before the trailing bezel/case digits are decoded
pub const POSITIONAL_MIN_DIGITS: usize = 5;

/// Name of a model family in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelFamilyName(pub String);

impl ModelFamilyName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelFamilyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which rule of the decoder settled the model family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum ModelResolution {
    /// The full reference string is listed in the override table
    Override { model: String },
    /// The longest numeric prefix with any candidate; `model` is the first
    /// candidate in table order
    Prefix {
        model: String,
        length: usize,
        code: u32,
        candidates: Vec<String>,
    },
    /// No override and no prefix of length 2-5 matched
    Unresolved,
}

impl ModelResolution {
    /// The resolved family name, or the unknown-model sentinel
    #[must_use]
    pub fn model_name(&self) -> &str {
        match self {
            Self::Override { model } | Self::Prefix { model, .. } => model,
            Self::Unresolved => UNKNOWN_MODEL,
        }
    }

    /// True when more than one family shared the winning prefix
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Prefix { candidates, .. } if candidates.len() > 1)
    }
}

/// Outcome of looking up one positional digit (bezel or case material)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitLookup {
    /// Numeric part shorter than five digits
    NotAttempted,
    /// Digit found in its table
    Known(u8),
    /// Digit has no table entry
    Unknown(u8),
}

impl DigitLookup {
    #[must_use]
    pub fn digit(self) -> Option<u8> {
        match self {
            Self::NotAttempted => None,
            Self::Known(d) | Self::Unknown(d) => Some(d),
        }
    }
}
