//! Form submission parsing and HTML5-style constraint validation
//!
//! A submitted form arrives as a flat list of `name=value` entries. This
//! crate reconstructs the nested value the names encode, validates each
//! field against an HTML-style constraint schema, and reports messages in
//! an error tree mirroring the shape of the value tree.
//!
//! The work is split across two crates, re-exported here:
//! - [`formdata`]: the flat entry list, the `name` path codec, and the
//!   flatten/unflatten tree transforms
//! - [`validity`]: constraint descriptors, browser-style validity flags,
//!   the draft list-update protocol, and submission parsing
//!
//! # Examples
//!
//! ```
//! use formwork::{Field, FieldNode, InputType, parse};
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//! 	let schema = FieldNode::group([
//! 		(
//! 			"email",
//! 			Field::input_with_message(InputType::Email, "Enter a valid email address")
//! 				.required_with_message("Email is required")
//! 				.into(),
//! 		),
//! 		(
//! 			"todos",
//! 			FieldNode::list(vec![FieldNode::group([(
//! 				"title",
//! 				Field::input(InputType::Text)
//! 					.required_with_message("Title is required")
//! 					.into(),
//! 			)])]),
//! 		),
//! 	]);
//!
//! 	let submission = parse("email=user%40example.com&todos%5B0%5D.title=", &schema)?;
//!
//! 	assert_eq!(
//! 		submission.value,
//! 		json!({ "email": "user@example.com", "todos": [{ "title": "" }] }),
//! 	);
//! 	assert_eq!(
//! 		submission.error,
//! 		Some(json!({ "todos": [{ "title": "Title is required" }] })),
//! 	);
//! 	Ok(())
//! }
//! ```

pub use formwork_formdata as formdata;
pub use formwork_validity as validity;

pub use formwork_formdata::{EntryValue, FormEntries, UploadedFile};
pub use formwork_validity::{
	Constraint, DRAFT_FIELD_NAME, DraftUpdate, Field, FieldNode, InputType, ParseError, RangeBound,
	Submission, Validity, check_validity, draft_update, parse, parse_with, resolve_message,
};
