//! # watch-ref
//!
//! A library for decoding watch reference numbers into structured metadata.
//!
//! Marketplace listings identify a watch by its reference number (for example
//! `116610LN` or `16710BLNR`). The digits encode the model family, bezel type
//! and case material; the trailing letters usually name a bezel or dial colour.
//! `watch-ref` reverses that encoding against a catalog of lookup tables.
//!
//! ## Features
//!
//! - **Overrides**: exact references the prefix rules get wrong
//! - **Longest-prefix matching**: 2 to 5 leading digits, first family in table
//!   order wins ties
//! - **Positional digits**: bezel and case material from the last two digits
//!   of references with five or more digits
//! - **Explicit sentinels**: `Unknown Model`, `N/A` and friends instead of errors
//! - **Listing cleaner**: normalizes marketplace exports before decoding
//!
//! ## Example
//!
//! ```rust
//! use watch_ref::{ReferenceCatalog, ReferenceDecoder};
//!
//! // Load the embedded catalog of lookup tables
//! let catalog = ReferenceCatalog::load_embedded().unwrap();
//! let decoder = ReferenceDecoder::new(&catalog);
//!
//! let decoded = decoder.decode("16710BLNR");
//! assert_eq!(decoded.model, "GMT Master II");
//! assert_eq!(decoded.bezel, "Finely Engine Turned");
//! assert_eq!(decoded.case_material, "Stainless");
//! assert_eq!(decoded.reference_letters_meaning, "Bleu Noir (Blue Black)");
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Lookup tables and prefix candidate search
//! - [`core`]: Reference codes, decoded records and sentinels
//! - [`matching`]: Decoder, explanations and the batch driver
//! - [`cleaning`]: Marketplace listing cleaner
//! - [`parsing`]: Reference lists and CSV/TSV tables
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server

pub mod catalog;
pub mod cleaning;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::ReferenceCatalog;
pub use core::decoded::DecodedReference;
pub use core::reference::ReferenceCode;
pub use core::types::*;
pub use matching::diagnosis::DecodeExplanation;
pub use matching::engine::ReferenceDecoder;
