//! Submitted form entries
//!
//! [`FormEntries`] is an ordered name/value multimap equivalent to the
//! browser's `FormData` / `URLSearchParams`: the same name may appear any
//! number of times, and entries preserve submission order.

use serde_json::{Value, json};
use std::str::FromStr;

/// An uploaded file carried by a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
	/// Client-supplied file name
	pub file_name: String,
	/// MIME type reported by the client, if any
	pub content_type: Option<String>,
	/// Raw file contents
	pub data: Vec<u8>,
}

impl UploadedFile {
	/// Creates an uploaded file from its name and raw contents.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_formdata::UploadedFile;
	///
	/// let file = UploadedFile::new("avatar.png", vec![0x89, 0x50, 0x4e, 0x47]);
	/// assert_eq!(file.file_name, "avatar.png");
	/// assert_eq!(file.content_type, None);
	/// ```
	pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
		Self {
			file_name: file_name.into(),
			content_type: None,
			data,
		}
	}

	/// Sets the MIME type reported for this file.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// File size in bytes.
	pub fn size(&self) -> usize {
		self.data.len()
	}
}

/// A single submitted value: text for regular controls, a file for uploads.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
	/// Text value from an input, select, or textarea
	Text(String),
	/// File value from a file input
	File(UploadedFile),
}

impl EntryValue {
	/// Returns the text content if this is a [`EntryValue::Text`].
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::File(_) => None,
		}
	}

	/// Returns the file if this is a [`EntryValue::File`].
	pub fn as_file(&self) -> Option<&UploadedFile> {
		match self {
			Self::Text(_) => None,
			Self::File(file) => Some(file),
		}
	}

	/// True when this entry carries a file.
	pub fn is_file(&self) -> bool {
		matches!(self, Self::File(_))
	}

	/// Converts the entry into its JSON representation for the value tree.
	///
	/// Text becomes a JSON string; files become an object describing the
	/// upload (name, content type, and size) since raw bytes have no JSON
	/// equivalent.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_formdata::EntryValue;
	/// use serde_json::json;
	///
	/// let value = EntryValue::Text("hello".to_string());
	/// assert_eq!(value.to_json_value(), json!("hello"));
	/// ```
	pub fn to_json_value(&self) -> Value {
		match self {
			Self::Text(text) => Value::String(text.clone()),
			Self::File(file) => json!({
				"file_name": file.file_name,
				"content_type": file.content_type,
				"size": file.size(),
			}),
		}
	}
}

impl From<&str> for EntryValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for EntryValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<UploadedFile> for EntryValue {
	fn from(file: UploadedFile) -> Self {
		Self::File(file)
	}
}

/// Error raised when a raw query string cannot be decoded.
#[derive(Debug, thiserror::Error)]
#[error("malformed query string: {0}")]
pub struct QueryError(#[from] serde_urlencoded::de::Error);

/// Ordered name/value multimap of submitted form entries.
///
/// # Examples
///
/// ```
/// use formwork_formdata::FormEntries;
///
/// let mut entries = FormEntries::new();
/// entries.append("title", "hello");
/// entries.append("tags", "a");
/// entries.append("tags", "b");
///
/// assert_eq!(entries.len(), 3);
/// assert_eq!(entries.get_all("tags").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormEntries {
	entries: Vec<(String, EntryValue)>,
}

impl FormEntries {
	/// Creates an empty entry set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an entry, keeping any existing entries under the same name.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<EntryValue>) {
		self.entries.push((name.into(), value.into()));
	}

	/// Returns the first value submitted under `name`, like `FormData.get`.
	pub fn get(&self, name: &str) -> Option<&EntryValue> {
		self.entries
			.iter()
			.find(|(entry_name, _)| entry_name.as_str() == name)
			.map(|(_, value)| value)
	}

	/// Returns every value submitted under `name`, in submission order.
	pub fn get_all(&self, name: &str) -> Vec<&EntryValue> {
		self.entries
			.iter()
			.filter(|(entry_name, _)| entry_name.as_str() == name)
			.map(|(_, value)| value)
			.collect()
	}

	/// Removes every entry under `name`, returning the first removed value.
	pub fn remove(&mut self, name: &str) -> Option<EntryValue> {
		let mut removed = None;
		self.entries.retain_mut(|(entry_name, value)| {
			if entry_name.as_str() == name {
				if removed.is_none() {
					removed = Some(std::mem::replace(value, EntryValue::Text(String::new())));
				}
				false
			} else {
				true
			}
		});
		removed
	}

	/// Iterates over `(name, value)` pairs in submission order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &EntryValue)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value))
	}

	/// Number of entries, counting repeated names once per occurrence.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no entries have been appended.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Decodes a raw `application/x-www-form-urlencoded` query string.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_formdata::FormEntries;
	///
	/// let entries = FormEntries::parse_query("title=hello&tags=a&tags=b").unwrap();
	/// assert_eq!(entries.len(), 3);
	/// assert_eq!(entries.get("title").and_then(|v| v.as_text()), Some("hello"));
	/// ```
	pub fn parse_query(query: &str) -> Result<Self, QueryError> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(Self::from(pairs))
	}
}

impl From<Vec<(String, String)>> for FormEntries {
	fn from(pairs: Vec<(String, String)>) -> Self {
		Self {
			entries: pairs
				.into_iter()
				.map(|(name, value)| (name, EntryValue::Text(value)))
				.collect(),
		}
	}
}

impl FromStr for FormEntries {
	type Err = QueryError;

	fn from_str(query: &str) -> Result<Self, Self::Err> {
		Self::parse_query(query)
	}
}

impl TryFrom<&str> for FormEntries {
	type Error = QueryError;

	fn try_from(query: &str) -> Result<Self, Self::Error> {
		Self::parse_query(query)
	}
}

impl FromIterator<(String, EntryValue)> for FormEntries {
	fn from_iter<I: IntoIterator<Item = (String, EntryValue)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}
