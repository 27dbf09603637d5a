use serde::{Deserialize, Serialize};

/// A raw reference code split into its digit and letter subsequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCode {
    /// The input exactly as received
    pub raw: String,

    /// Digits of `raw`, in input order
    pub numeric: String,

    /// Letters of `raw`, in input order, case preserved
    pub letters: String,
}

impl ReferenceCode {
    /// Split a raw reference into digits and letters.
    ///
    /// Digits are ASCII `0-9`; letters are any alphabetic character. Slashes,
    /// spaces, dashes and everything else are dropped.
    ///
    /// ```
    /// use watch_ref::core::reference::ReferenceCode;
    ///
    /// let code = ReferenceCode::parse("6542/8");
    /// assert_eq!(code.numeric, "65428");
    /// assert_eq!(code.letters, "");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut numeric = String::new();
        let mut letters = String::new();

        for c in raw.chars() {
            if c.is_ascii_digit() {
                numeric.push(c);
            } else if c.is_alphabetic() {
                letters.push(c);
            }
        }

        Self {
            raw: raw.to_string(),
            numeric,
            letters,
        }
    }

    /// Integer value of the first `len` digits, if there are that many.
    ///
    /// Leading zeros are ignored, as in any integer parse.
    #[must_use]
    pub fn numeric_prefix(&self, len: usize) -> Option<u32> {
        // Digits are ASCII, so byte slicing is char slicing
        self.numeric.get(..len).and_then(|p| p.parse().ok())
    }

    /// Digit counted from the end of the numeric part (0 = last digit)
    #[must_use]
    pub fn digit_from_end(&self, offset: usize) -> Option<u8> {
        let bytes = self.numeric.as_bytes();
        let idx = bytes.len().checked_sub(offset + 1)?;
        Some(bytes[idx] - b'0')
    }

    /// Lower-cased letters, used as the letter-table key
    #[must_use]
    pub fn letters_key(&self) -> String {
        self.letters.to_lowercase()
    }

    #[must_use]
    pub fn numeric_len(&self) -> usize {
        self.numeric.len()
    }
}
