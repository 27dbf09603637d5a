//! JSON API for decoding references over HTTP.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! watch-ref serve
//!
//! # Bind to all interfaces with a custom catalog
//! watch-ref serve --address 0.0.0.0 --port 3000 --catalog my_tables.json
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/decode?reference=116610LN` - Decode one reference
//! - `POST /api/decode` - Decode `{"references": [...], "explain": false}`
//! - `GET /api/catalog` - Table sizes, version and brand of the loaded catalog

pub mod server;
