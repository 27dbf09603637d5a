//! Listing cleaner for marketplace exports.
//!
//! Rows from a CSV export of the listing spreadsheet go through a fixed
//! sequence of field normalizers ([`fields`]) applied by
//! [`listing::clean_listing`]. Several steps fall back to scanning the whole
//! row when the expected column holds nothing usable: the preferred column is
//! tried first, then every column in order.
//!
//! ## Steps
//!
//! | Column(s)                        | Result                                   |
//! |----------------------------------|------------------------------------------|
//! | Model                            | known mislabels replaced, missing → Unknown |
//! | Reference number, Confirm ...    | first `\d{4,}...` token or `No Reference` |
//! | Movement                         | Automatic / Manual winding / Quartz      |
//! | Case material, Bracelet material | allow-listed value                       |
//! | Year of production               | 1900-2029                                |
//! | Condition                        | main text plus `Condition Details`       |
//! | Scope of delivery                | `Box` and `Papers` yes/no                |
//! | (any)                            | `Gender`                                 |
//! | Location                         | `Country` and `City`                     |
//! | Price, shipping                  | digits only                              |
//! | Dial, Dial numerals              | allow-listed value or material fallback  |
//!
//! Finally `Scope of delivery`, `Location` and `Confirm Reference Number ` are
//! dropped and `Seller Information` becomes `Seller Name`.

pub mod countries;
pub mod fields;
pub mod listing;
