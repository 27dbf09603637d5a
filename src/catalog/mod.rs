//! Reference catalog storage and indexing.
//!
//! The catalog holds every lookup table the decoder needs: model-family codes,
//! exact-reference overrides, bezel and case-material digits, and reference
//! letter meanings. An embedded catalog is compiled into the binary, but custom
//! catalogs can also be loaded from JSON files.
//!
//! ## Table Order
//!
//! Several model families share codes (`16` is listed by Submariner Date,
//! Datejust, Datejust 36, Sea-Dweller and GMT-Master). The catalog keeps the
//! order of the JSON arrays, and the decoder picks the first family in that
//! order, so reordering entries changes results.
//!
//! ## Example
//!
//! ```rust,no_run
//! use watch_ref::ReferenceCatalog;
//!
//! let catalog = ReferenceCatalog::load_embedded().unwrap();
//!
//! for family in catalog.families_for_code(167) {
//!     println!("{}", family.name);
//! }
//!
//! assert_eq!(catalog.letter_meaning("LN"), Some("Lunette Noir (Black Bezel)"));
//! ```
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use watch_ref::ReferenceCatalog;
//! use std::path::Path;
//!
//! let json = ReferenceCatalog::load_embedded().unwrap().to_json().unwrap();
//! std::fs::write("my_catalog.json", json).unwrap();
//!
//! let custom = ReferenceCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```

pub mod index;
pub mod store;
