//! Draft submission protocol
//!
//! A submission may carry a reserved marker entry instructing the parser to
//! mutate a named list in the reconstructed value before validation: append
//! an empty item, or remove the item at an index. Such submissions are
//! drafts; validation is skipped for them.

use crate::parse::ParseError;
use formwork_formdata::{EntryValue, FormEntries};

/// Reserved entry name carrying the draft list update.
pub const DRAFT_FIELD_NAME: &str = "__formwork__";

/// A requested list mutation: append when `index` is `None`, remove the item
/// at `index` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftUpdate {
	/// Flattened name of the list to mutate
	pub name: String,
	/// Index to remove; `None` appends an empty item
	pub index: Option<usize>,
}

/// Builds the marker entry a client submits to request a list update.
///
/// # Examples
///
/// ```
/// use formwork_validity::{DRAFT_FIELD_NAME, draft_update};
///
/// assert_eq!(
/// 	draft_update("todos", None),
/// 	(DRAFT_FIELD_NAME.to_string(), "todos".to_string()),
/// );
/// assert_eq!(
/// 	draft_update("todos", Some(1)),
/// 	(DRAFT_FIELD_NAME.to_string(), "todos|1".to_string()),
/// );
/// ```
pub fn draft_update(name: &str, index: Option<usize>) -> (String, String) {
	let value = match index {
		Some(index) => format!("{name}|{index}"),
		None => name.to_string(),
	};
	(DRAFT_FIELD_NAME.to_string(), value)
}

/// Extracts and removes the draft marker from a submission, if present.
///
/// An empty marker value is ignored. A file-valued marker or an index that
/// is not a number is malformed input and fails with a [`ParseError`].
pub fn take_draft(entries: &mut FormEntries) -> Result<Option<DraftUpdate>, ParseError> {
	let raw = match entries.get(DRAFT_FIELD_NAME) {
		None => return Ok(None),
		Some(EntryValue::Text(text)) if text.is_empty() => return Ok(None),
		Some(EntryValue::File(_)) => {
			return Err(ParseError::InvalidDraftMarker {
				reason: "marker value is a file".to_string(),
			});
		}
		Some(EntryValue::Text(text)) => text.clone(),
	};
	entries.remove(DRAFT_FIELD_NAME);

	let (name, index) = match raw.split_once('|') {
		Some((name, index)) => {
			let index = index.parse::<usize>().map_err(|_| {
				tracing::warn!(marker = %raw, "draft marker carries a non-numeric index");
				ParseError::InvalidDraftMarker {
					reason: format!("index `{index}` is not a number"),
				}
			})?;
			(name.to_string(), Some(index))
		}
		None => (raw, None),
	};

	Ok(Some(DraftUpdate { name, index }))
}
