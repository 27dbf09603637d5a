//! Reference decoding engine.
//!
//! - [`ReferenceDecoder`]: decodes one reference against a catalog
//! - [`DecodeExplanation`]: the decode result with every intermediate step
//! - [`decode_batch`]: decodes a sequence of references, dropping missing ones
//!
//! ## Decoding Algorithm
//!
//! 1. **Partition**: split the reference into digits and letters
//! 2. **Override**: an exact full-reference match in the override table decides
//!    the model family outright
//! 3. **Progressive prefix match**: prefixes of 2 to 5 digits are looked up in
//!    the model-family table; the longest prefix with any match wins, and the
//!    first family in table order breaks ties at that length
//! 4. **Bezel and case material**: with five or more digits, the second-to-last
//!    and last digits index the bezel and case material tables
//! 5. **Letters**: the letters, lower-cased, index the letter table
//!
//! Nothing here returns an error. Misses become sentinel strings such as
//! `Unknown Model` or `N/A`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use watch_ref::{ReferenceCatalog, ReferenceDecoder};
//!
//! let catalog = ReferenceCatalog::load_embedded().unwrap();
//! let decoder = ReferenceDecoder::new(&catalog);
//!
//! let decoded = decoder.decode("16710BLNR");
//! assert_eq!(decoded.model, "GMT Master II");
//! assert_eq!(decoded.reference_letters_meaning, "Bleu Noir (Blue Black)");
//! ```
//!
//! [`ReferenceDecoder`]: engine::ReferenceDecoder
//! [`DecodeExplanation`]: diagnosis::DecodeExplanation
//! [`decode_batch`]: batch::decode_batch

pub mod batch;
pub mod diagnosis;
pub mod engine;
