//! Serialized form data plumbing for formwork
//!
//! This crate bridges flat HTML form submissions and nested value trees:
//! - Path codec for flattened field names (`todos[2].title`)
//! - [`FormEntries`], an ordered name/value multimap equivalent to
//!   `FormData` / `URLSearchParams`, with query-string decoding
//! - Depth-first [`flatten`] / [`unflatten`] between nested
//!   `serde_json::Value` trees and path-keyed leaves

pub mod entries;
pub mod paths;
pub mod tree;

pub use entries::{EntryValue, FormEntries, QueryError, UploadedFile};
pub use paths::{PathSegment, format_paths, is_subpath, parse_paths};
pub use tree::{flatten, get_path, get_path_mut, insert_path, is_scalar, unflatten};
