//! Submission parsing
//!
//! [`parse`] is the entry point bridging a serialized form submission to a
//! nested value tree and a matching error tree: unflatten the entries, apply
//! any draft list update, and otherwise validate every schema field against
//! the raw value submitted under its name.

use crate::draft::take_draft;
use crate::field::FieldNode;
use crate::validity::{check_validity, resolve_message};
use formwork_formdata::{EntryValue, FormEntries, get_path_mut, unflatten};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::Infallible;

/// Errors signaling malformed input or misuse, as opposed to validation
/// failures, which are reported as data in [`Submission::error`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	/// The draft marker entry itself is unusable
	#[error("malformed draft marker: {reason}")]
	InvalidDraftMarker { reason: String },
	/// The draft marker names a node that is not an array
	#[error("draft update target `{name}` is not an array")]
	DraftTargetNotArray { name: String },
	/// The raw query string could not be decoded
	#[error(transparent)]
	Query(#[from] formwork_formdata::QueryError),
}

impl From<Infallible> for ParseError {
	fn from(never: Infallible) -> Self {
		match never {}
	}
}

/// Outcome of parsing one form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
	/// The reconstructed nested value
	pub value: Value,
	/// Per-field messages mirroring the shape of `value`; `None` when no
	/// field reported a message
	pub error: Option<Value>,
	/// True when the submission carried a draft list update; validation was
	/// skipped
	pub is_draft: bool,
}

/// Parses a submission against a fixed field schema.
///
/// The payload may be [`FormEntries`] or a raw query string.
///
/// # Examples
///
/// ```
/// use formwork_validity::{Field, FieldNode, InputType, parse};
/// use serde_json::json;
///
/// let schema = FieldNode::group([(
/// 	"email",
/// 	Field::input(InputType::Email)
/// 		.required_with_message("Email is required")
/// 		.into(),
/// )]);
///
/// let submission = parse("email=", &schema).unwrap();
/// assert_eq!(submission.value, json!({ "email": "" }));
/// assert_eq!(submission.error, Some(json!({ "email": "Email is required" })));
/// assert!(!submission.is_draft);
/// ```
pub fn parse<P>(payload: P, schema: &FieldNode) -> Result<Submission, ParseError>
where
	P: TryInto<FormEntries>,
	ParseError: From<P::Error>,
{
	let entries = payload.try_into()?;
	parse_entries(entries, |_| Cow::Borrowed(schema))
}

/// Parses a submission, building the schema from the reconstructed value.
///
/// The closure receives the value after any draft update has been applied,
/// so list schemas can size themselves to the submitted data.
pub fn parse_with<P, F>(payload: P, schema: F) -> Result<Submission, ParseError>
where
	P: TryInto<FormEntries>,
	ParseError: From<P::Error>,
	F: FnOnce(&Value) -> FieldNode,
{
	let entries = payload.try_into()?;
	parse_entries(entries, |value| Cow::Owned(schema(value)))
}

fn parse_entries<'a, F>(mut entries: FormEntries, schema: F) -> Result<Submission, ParseError>
where
	F: FnOnce(&Value) -> Cow<'a, FieldNode>,
{
	let update = take_draft(&mut entries)?;

	let mut value = unflatten(
		entries
			.iter()
			.map(|(name, entry)| (name.to_string(), entry.to_json_value())),
	);

	if let Some(update) = &update {
		let target = get_path_mut(&mut value, &update.name);
		let Some(Value::Array(items)) = target else {
			return Err(ParseError::DraftTargetNotArray {
				name: update.name.clone(),
			});
		};
		match update.index {
			// Out-of-range removals are a no-op, like Array.splice.
			Some(index) => {
				if index < items.len() {
					items.remove(index);
				}
			}
			None => items.push(Value::Object(Map::new())),
		}
		tracing::debug!(name = %update.name, index = ?update.index, "applied draft list update");
	}

	let schema = schema(&value);
	let mut error_entries: Vec<(String, Value)> = Vec::new();

	if update.is_none() {
		// The last value submitted under each name is the one validated.
		let mut raw_values: HashMap<&str, &EntryValue> = HashMap::new();
		for (name, entry) in entries.iter() {
			raw_values.insert(name, entry);
		}

		for (name, field) in schema.flatten() {
			let raw = raw_values.get(name.as_str()).copied();
			let validity = check_validity(raw, field.constraint());
			if let Some(message) = resolve_message(raw, &validity, field.constraint())
				&& !message.is_empty()
			{
				error_entries.push((name, Value::String(message)));
			}
		}
	}

	tracing::debug!(
		is_draft = update.is_some(),
		error_count = error_entries.len(),
		"parsed form submission"
	);

	let error = if error_entries.is_empty() {
		None
	} else {
		Some(unflatten(error_entries))
	};

	Ok(Submission {
		value,
		error,
		is_draft: update.is_some(),
	})
}
