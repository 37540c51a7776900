//! Nested value tree flatten/unflatten
//!
//! Bidirectional mapping between a nested `serde_json::Value` tree and a flat
//! set of path-keyed leaves, as produced by an HTML form submission.

use crate::paths::{PathSegment, parse_paths};
use serde_json::{Map, Value};

/// Walks a nested value depth-first, emitting `(path, node)` pairs for every
/// node matching the leaf predicate.
///
/// Arrays are traversed by index, objects by key. Matched nodes are not
/// descended into. Scalar nodes that do not match the predicate are dropped.
///
/// # Examples
///
/// ```
/// use formwork_formdata::flatten;
/// use serde_json::json;
///
/// let value = json!({ "todos": [{ "title": "a" }, { "title": "b" }] });
/// let leaves = flatten(&value, &|node| node.is_string());
///
/// assert_eq!(
/// 	leaves,
/// 	vec![
/// 		("todos[0].title".to_string(), &json!("a")),
/// 		("todos[1].title".to_string(), &json!("b")),
/// 	],
/// );
/// ```
pub fn flatten<'a>(
	value: &'a Value,
	is_leaf: &dyn Fn(&Value) -> bool,
) -> Vec<(String, &'a Value)> {
	let mut leaves = Vec::new();
	collect_leaves(value, is_leaf, String::new(), &mut leaves);
	leaves
}

fn collect_leaves<'a>(
	value: &'a Value,
	is_leaf: &dyn Fn(&Value) -> bool,
	prefix: String,
	leaves: &mut Vec<(String, &'a Value)>,
) {
	if is_leaf(value) {
		leaves.push((prefix, value));
		return;
	}

	match value {
		Value::Array(items) => {
			for (index, item) in items.iter().enumerate() {
				collect_leaves(item, is_leaf, format!("{prefix}[{index}]"), leaves);
			}
		}
		Value::Object(map) => {
			for (key, item) in map {
				let child_prefix = if prefix.is_empty() {
					key.clone()
				} else {
					format!("{prefix}.{key}")
				};
				collect_leaves(item, is_leaf, child_prefix, leaves);
			}
		}
		_ => {}
	}
}

/// Rebuilds a nested value from an iterable of `(path, value)` pairs.
///
/// Whether a level becomes an array or an object is inferred from the next
/// path segment: numeric indices create arrays, keys create objects. Later
/// entries overwrite earlier ones at the same path; inserting past the end of
/// an array pads the gap with `null`.
///
/// # Examples
///
/// ```
/// use formwork_formdata::unflatten;
/// use serde_json::json;
///
/// let value = unflatten(vec![
/// 	("title".to_string(), json!("hello")),
/// 	("todos[0].title".to_string(), json!("a")),
/// 	("todos[1].title".to_string(), json!("b")),
/// ]);
///
/// assert_eq!(
/// 	value,
/// 	json!({
/// 		"title": "hello",
/// 		"todos": [{ "title": "a" }, { "title": "b" }],
/// 	}),
/// );
/// ```
pub fn unflatten<I>(entries: I) -> Value
where
	I: IntoIterator<Item = (String, Value)>,
{
	let mut root = Value::Object(Map::new());
	for (name, value) in entries {
		insert_path(&mut root, &parse_paths(&name), value);
	}
	root
}

/// Writes `value` at the location addressed by `paths`, creating intermediate
/// containers as needed.
///
/// A write through an existing non-container node is dropped rather than
/// replacing the node, matching how form entries with conflicting names
/// degrade in practice.
pub fn insert_path(root: &mut Value, paths: &[PathSegment], value: Value) {
	if paths.is_empty() {
		*root = value;
		return;
	}

	let mut pointer = root;
	for (depth, segment) in paths.iter().enumerate() {
		let Some(child) = child_slot(pointer, segment) else {
			tracing::debug!(path = %crate::paths::format_paths(paths), "dropped write through non-container node");
			return;
		};

		if depth + 1 == paths.len() {
			*child = value;
			return;
		}

		if child.is_null() {
			*child = match paths[depth + 1] {
				PathSegment::Index(_) => Value::Array(Vec::new()),
				PathSegment::Key(_) => Value::Object(Map::new()),
			};
		}
		pointer = child;
	}
}

// Mutable slot for one segment under `pointer`, allocating missing object
// entries and padding short arrays with null. Returns None when the segment
// cannot address into the current node (e.g. a key into an array, or any
// segment into a scalar).
fn child_slot<'a>(pointer: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
	match (segment, pointer) {
		(PathSegment::Key(key), Value::Object(map)) => {
			Some(map.entry(key.clone()).or_insert(Value::Null))
		}
		(PathSegment::Index(index), Value::Array(items)) => {
			if *index >= items.len() {
				items.resize(index + 1, Value::Null);
			}
			Some(&mut items[*index])
		}
		// Numeric segments address objects through their stringified key,
		// matching how flattened submissions treat `{"0": ...}` maps.
		(PathSegment::Index(index), Value::Object(map)) => {
			Some(map.entry(index.to_string()).or_insert(Value::Null))
		}
		_ => None,
	}
}

/// Looks up the node addressed by a flattened key.
///
/// # Examples
///
/// ```
/// use formwork_formdata::get_path;
/// use serde_json::json;
///
/// let value = json!({ "todos": [{ "title": "a" }] });
/// assert_eq!(get_path(&value, "todos[0].title"), Some(&json!("a")));
/// assert_eq!(get_path(&value, "todos[1]"), None);
/// ```
pub fn get_path<'a>(root: &'a Value, name: &str) -> Option<&'a Value> {
	let mut target = root;
	for segment in parse_paths(name) {
		target = match (&segment, target) {
			(PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
			(PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
			(PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
			_ => return None,
		};
	}
	Some(target)
}

/// Mutable counterpart of [`get_path`].
pub fn get_path_mut<'a>(root: &'a mut Value, name: &str) -> Option<&'a mut Value> {
	let mut target = root;
	for segment in parse_paths(name) {
		target = match (&segment, target) {
			(PathSegment::Key(key), Value::Object(map)) => map.get_mut(key)?,
			(PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index)?,
			(PathSegment::Index(index), Value::Object(map)) => map.get_mut(&index.to_string())?,
			_ => return None,
		};
	}
	Some(target)
}

/// Leaf predicate matching every non-container node.
///
/// This is the predicate under which [`flatten`] inverts [`unflatten`] for
/// well-formed flat key sets.
pub fn is_scalar(value: &Value) -> bool {
	!value.is_object() && !value.is_array()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::paths::format_paths;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_flatten_nested_object() {
		// Arrange
		let value = json!({
			"title": "hello",
			"address": { "city": "Berlin", "zip": "10115" },
		});

		// Act
		let leaves = flatten(&value, &is_scalar);

		// Assert
		assert_eq!(
			leaves,
			vec![
				("address.city".to_string(), &json!("Berlin")),
				("address.zip".to_string(), &json!("10115")),
				("title".to_string(), &json!("hello")),
			],
		);
	}

	#[rstest]
	fn test_flatten_array_by_index() {
		let value = json!({ "tags": ["a", "b"] });
		let leaves = flatten(&value, &is_scalar);
		assert_eq!(
			leaves,
			vec![
				("tags[0]".to_string(), &json!("a")),
				("tags[1]".to_string(), &json!("b")),
			],
		);
	}

	#[rstest]
	fn test_flatten_does_not_descend_into_matched_nodes() {
		// Arrange: treat whole objects with a `title` key as leaves
		let value = json!({ "todos": [{ "title": "a" }] });
		let is_todo = |node: &Value| node.get("title").is_some();

		// Act
		let leaves = flatten(&value, &is_todo);

		// Assert
		assert_eq!(leaves, vec![("todos[0]".to_string(), &json!({ "title": "a" }))]);
	}

	#[rstest]
	fn test_flatten_root_leaf_uses_empty_path() {
		let value = json!("scalar");
		let leaves = flatten(&value, &is_scalar);
		assert_eq!(leaves, vec![(String::new(), &json!("scalar"))]);
	}

	#[rstest]
	fn test_unflatten_builds_arrays_from_numeric_segments() {
		// Act
		let value = unflatten(vec![
			("todos[0]".to_string(), json!("a")),
			("todos[1]".to_string(), json!("b")),
		]);

		// Assert
		assert_eq!(value, json!({ "todos": ["a", "b"] }));
	}

	#[rstest]
	fn test_unflatten_pads_sparse_arrays_with_null() {
		let value = unflatten(vec![("todos[2]".to_string(), json!("c"))]);
		assert_eq!(value, json!({ "todos": [null, null, "c"] }));
	}

	#[rstest]
	fn test_unflatten_later_entries_overwrite() {
		let value = unflatten(vec![
			("title".to_string(), json!("first")),
			("title".to_string(), json!("second")),
		]);
		assert_eq!(value, json!({ "title": "second" }));
	}

	#[rstest]
	fn test_unflatten_write_through_scalar_is_dropped() {
		// A deeper path under an existing scalar cannot be honored
		let value = unflatten(vec![
			("a".to_string(), json!("scalar")),
			("a.b".to_string(), json!("nested")),
		]);
		assert_eq!(value, json!({ "a": "scalar" }));
	}

	#[rstest]
	fn test_unflatten_empty_iterator_is_empty_object() {
		assert_eq!(unflatten(Vec::new()), json!({}));
	}

	#[rstest]
	#[case(vec![("a.b[0].c", "x")])]
	#[case(vec![("title", "hello"), ("todos[0].title", "a"), ("todos[0].done", "on")])]
	#[case(vec![("matrix[0][0]", "1"), ("matrix[0][1]", "2"), ("matrix[1][0]", "3")])]
	fn test_unflatten_then_flatten_round_trip(#[case] entries: Vec<(&str, &str)>) {
		// Arrange
		let pairs: Vec<(String, Value)> = entries
			.iter()
			.map(|(name, value)| (name.to_string(), json!(value)))
			.collect();

		// Act
		let tree = unflatten(pairs.clone());
		let mut flattened: Vec<(String, Value)> = flatten(&tree, &is_scalar)
			.into_iter()
			.map(|(name, value)| (name, value.clone()))
			.collect();

		// Assert: same set of pairs, independent of emission order
		let mut expected = pairs;
		expected.sort_by(|a, b| a.0.cmp(&b.0));
		flattened.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(flattened, expected);
	}

	#[rstest]
	fn test_sparse_keys_flatten_with_padded_nulls() {
		// A sparse index pads the gap, so the re-flattened set gains the
		// null leaves rather than reproducing the sparse input
		let tree = unflatten(vec![("a.b[2].c".to_string(), json!("x"))]);
		let flattened: Vec<(String, Value)> = flatten(&tree, &is_scalar)
			.into_iter()
			.map(|(name, value)| (name, value.clone()))
			.collect();
		assert_eq!(
			flattened,
			vec![
				("a.b[0]".to_string(), Value::Null),
				("a.b[1]".to_string(), Value::Null),
				("a.b[2].c".to_string(), json!("x")),
			],
		);
	}

	#[rstest]
	fn test_get_path_traverses_arrays_and_objects() {
		let value = json!({ "todos": [{ "title": "a" }, { "title": "b" }] });
		assert_eq!(get_path(&value, "todos[1].title"), Some(&json!("b")));
		assert_eq!(get_path(&value, "todos[2].title"), None);
		assert_eq!(get_path(&value, "missing"), None);
	}

	#[rstest]
	fn test_get_path_mut_allows_in_place_edits() {
		// Arrange
		let mut value = json!({ "todos": ["a", "b"] });

		// Act
		if let Some(node) = get_path_mut(&mut value, "todos[0]") {
			*node = json!("edited");
		}

		// Assert
		assert_eq!(value, json!({ "todos": ["edited", "b"] }));
	}

	#[rstest]
	fn test_format_round_trip_through_parse() {
		let paths = parse_paths("todos[2].title");
		assert_eq!(format_paths(&paths), "todos[2].title");
	}
}
