//! Field name path codec
//!
//! Form submissions address nested values with flattened keys such as
//! `address.city` or `todos[2].title`. This module parses those keys into
//! ordered path segments and serializes segments back into keys.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// A dot-separated segment: an optional bare key followed by any number of
// bracketed indices, e.g. `todos`, `todos[0]`, `matrix[1][2]`.
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([^.\[\]]*)((?:\[\d+\])*)$").expect("SEGMENT_REGEX: invalid regex pattern")
});

// A single bracketed index inside a segment.
static INDEX_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("INDEX_REGEX: invalid regex pattern"));

/// One step of a flattened field name: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
	/// An object key, e.g. `city` in `address.city`
	Key(String),
	/// An array index, e.g. `2` in `todos[2]`
	Index(usize),
}

impl PathSegment {
	/// Returns the key if this segment is a [`PathSegment::Key`].
	pub fn as_key(&self) -> Option<&str> {
		match self {
			Self::Key(key) => Some(key),
			Self::Index(_) => None,
		}
	}

	/// Returns the index if this segment is a [`PathSegment::Index`].
	pub fn as_index(&self) -> Option<usize> {
		match self {
			Self::Key(_) => None,
			Self::Index(index) => Some(*index),
		}
	}
}

impl From<&str> for PathSegment {
	fn from(key: &str) -> Self {
		Self::Key(key.to_string())
	}
}

impl From<String> for PathSegment {
	fn from(key: String) -> Self {
		Self::Key(key)
	}
}

impl From<usize> for PathSegment {
	fn from(index: usize) -> Self {
		Self::Index(index)
	}
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Key(key) => write!(f, "{key}"),
			Self::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Parses a flattened field name into ordered path segments.
///
/// Keys are separated by dots; array indices are bracketed. A dot-separated
/// segment that does not follow the `key[index]` shape is kept verbatim as a
/// string key.
///
/// # Examples
///
/// ```
/// use formwork_formdata::{parse_paths, PathSegment};
///
/// assert_eq!(
/// 	parse_paths("todos[2].title"),
/// 	vec![
/// 		PathSegment::Key("todos".to_string()),
/// 		PathSegment::Index(2),
/// 		PathSegment::Key("title".to_string()),
/// 	],
/// );
/// ```
pub fn parse_paths(name: &str) -> Vec<PathSegment> {
	name.split('.')
		.flat_map(|segment| {
			let Some(captures) = SEGMENT_REGEX.captures(segment) else {
				return vec![PathSegment::Key(segment.to_string())];
			};

			let mut segments = Vec::new();
			let key = &captures[1];
			if !key.is_empty() {
				segments.push(PathSegment::Key(key.to_string()));
			}
			for index in INDEX_REGEX.captures_iter(&captures[2]) {
				// The regex guarantees a run of ASCII digits; absurdly long
				// runs overflow usize and fall back to a verbatim key.
				match index[1].parse::<usize>() {
					Ok(index) => segments.push(PathSegment::Index(index)),
					Err(_) => return vec![PathSegment::Key(segment.to_string())],
				}
			}

			if segments.is_empty() {
				// A bare empty segment, e.g. from a leading or trailing dot.
				segments.push(PathSegment::Key(String::new()));
			}

			segments
		})
		.collect()
}

/// Serializes path segments back into a flattened field name.
///
/// The inverse of [`parse_paths`]: keys are joined with dots, indices are
/// rendered in brackets without a separating dot.
///
/// # Examples
///
/// ```
/// use formwork_formdata::{format_paths, PathSegment};
///
/// let paths = vec![
/// 	PathSegment::Key("todos".to_string()),
/// 	PathSegment::Index(2),
/// 	PathSegment::Key("title".to_string()),
/// ];
/// assert_eq!(format_paths(&paths), "todos[2].title");
/// ```
pub fn format_paths(paths: &[PathSegment]) -> String {
	let mut name = String::new();

	for segment in paths {
		match segment {
			PathSegment::Key(key) => {
				if !name.is_empty() {
					name.push('.');
				}
				name.push_str(key);
			}
			PathSegment::Index(index) => {
				name.push('[');
				name.push_str(&index.to_string());
				name.push(']');
			}
		}
	}

	name
}

/// Returns true when `name` lies at or below `prefix` in the value tree.
///
/// # Examples
///
/// ```
/// use formwork_formdata::is_subpath;
///
/// assert!(is_subpath("todos[2].title", "todos[2]"));
/// assert!(is_subpath("todos[2]", "todos[2]"));
/// assert!(!is_subpath("todos[20]", "todos[2]"));
/// assert!(!is_subpath("todos", "todos[2]"));
/// ```
pub fn is_subpath(name: &str, prefix: &str) -> bool {
	let name_paths = parse_paths(name);
	let prefix_paths = parse_paths(prefix);

	name_paths.len() >= prefix_paths.len()
		&& prefix_paths
			.iter()
			.zip(name_paths.iter())
			.all(|(expected, actual)| expected == actual)
}
