//! Core data types for reference decoding.
//!
//! - [`ReferenceCode`]: a raw reference split into its digit and letter parts
//! - [`DecodedReference`]: the structured result of decoding one reference
//! - [`ModelResolution`], [`DigitLookup`]: how each field of a result was settled
//! - Sentinel constants such as [`UNKNOWN_MODEL`] and [`NOT_APPLICABLE`]
//!
//! ## Reference Anatomy
//!
//! | Reference    | Numeric part | Letters | Notes                                 |
//! |--------------|--------------|---------|---------------------------------------|
//! | `116610LN`   | `116610`     | `LN`    | bezel digit `1`, case digit `0`       |
//! | `6542/8`     | `65428`      |         | separators are dropped                |
//! | `1655`       | `1655`       |         | too short for bezel/case decoding     |
//!
//! [`ReferenceCode`]: reference::ReferenceCode
//! [`DecodedReference`]: decoded::DecodedReference
//! [`ModelResolution`]: types::ModelResolution
//! [`DigitLookup`]: types::DigitLookup
//! [`UNKNOWN_MODEL`]: types::UNKNOWN_MODEL
//! [`NOT_APPLICABLE`]: types::NOT_APPLICABLE

pub mod decoded;
pub mod reference;
pub mod types;
