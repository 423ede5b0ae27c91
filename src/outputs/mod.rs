//! Output writers.
//!
//! - [`json`]: one JSON file per article, one JSON array per documents page
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── {site short name}/
//! │   └── {sanitized listing title}/
//! │       └── {sanitized date}_{sanitized title}.json
//! └── documentos/
//!     └── {sanitized page path}.json
//! ```

pub mod json;
