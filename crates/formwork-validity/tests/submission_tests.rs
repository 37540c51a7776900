//! End-to-end submission parsing scenarios

use formwork_formdata::{FormEntries, UploadedFile};
use formwork_validity::{Field, FieldNode, InputType, ParseError, draft_update, parse};
use regex::Regex;
use rstest::rstest;
use serde_json::json;

fn signup_schema() -> FieldNode {
	FieldNode::group([
		(
			"email",
			Field::input_with_message(InputType::Email, "Enter a valid email address")
				.required_with_message("Email is required")
				.into(),
		),
		(
			"password",
			Field::input(InputType::Password)
				.required_with_message("Password is required")
				.min_length_with_message(8, "Password must be at least 8 characters")
				.into(),
		),
		(
			"age",
			Field::input(InputType::Number)
				.min_with_message(18, "You must be at least 18")
				.max_with_message(150, "Enter a realistic age")
				.into(),
		),
	])
}

#[rstest]
fn test_valid_submission_has_no_error() {
	// Arrange
	let mut entries = FormEntries::new();
	entries.append("email", "user@example.com");
	entries.append("password", "hunter2hunter2");
	entries.append("age", "30");

	// Act
	let submission = parse(entries, &signup_schema()).unwrap();

	// Assert
	assert_eq!(
		submission.value,
		json!({
			"email": "user@example.com",
			"password": "hunter2hunter2",
			"age": "30",
		}),
	);
	assert_eq!(submission.error, None);
	assert!(!submission.is_draft);
}

#[rstest]
fn test_every_invalid_field_is_reported() {
	// Arrange
	let mut entries = FormEntries::new();
	entries.append("email", "not-an-email");
	entries.append("password", "short");
	entries.append("age", "12");

	// Act
	let submission = parse(entries, &signup_schema()).unwrap();

	// Assert
	assert_eq!(
		submission.error,
		Some(json!({
			"email": "Enter a valid email address",
			"password": "Password must be at least 8 characters",
			"age": "You must be at least 18",
		})),
	);
}

#[rstest]
fn test_missing_value_beats_other_rules() {
	// Arrange: an empty email violates both required and the email shape
	let mut entries = FormEntries::new();
	entries.append("email", "");
	entries.append("password", "hunter2hunter2");
	entries.append("age", "30");

	// Act
	let submission = parse(entries, &signup_schema()).unwrap();

	// Assert: the required message wins
	assert_eq!(
		submission.error.unwrap()["email"],
		json!("Email is required"),
	);
}

#[rstest]
#[case("4", Some("Must be between 5 and 10"))]
#[case("11", Some("Must be between 5 and 10"))]
#[case("7", None)]
fn test_numeric_range_messages(#[case] value: &str, #[case] expected: Option<&str>) {
	// Arrange
	let schema = FieldNode::group([(
		"quantity",
		Field::input(InputType::Number)
			.min_with_message(5, "Must be between 5 and 10")
			.max_with_message(10, "Must be between 5 and 10")
			.into(),
	)]);
	let mut entries = FormEntries::new();
	entries.append("quantity", value);

	// Act
	let submission = parse(entries, &schema).unwrap();

	// Assert
	match expected {
		Some(message) => {
			assert_eq!(submission.error, Some(json!({ "quantity": message })));
		}
		None => assert_eq!(submission.error, None),
	}
}

#[rstest]
fn test_anchored_pattern_rejects_partial_match() {
	// Arrange
	let schema = FieldNode::group([(
		"code",
		Field::input(InputType::Text)
			.pattern_with_message(Regex::new(r"[0-9]{4}").unwrap(), "Enter a 4-digit code")
			.into(),
	)]);

	// Act & Assert: exact match passes
	let mut entries = FormEntries::new();
	entries.append("code", "1234");
	assert_eq!(parse(entries, &schema).unwrap().error, None);

	// A longer value containing a match still fails
	let mut entries = FormEntries::new();
	entries.append("code", "12345");
	assert_eq!(
		parse(entries, &schema).unwrap().error,
		Some(json!({ "code": "Enter a 4-digit code" })),
	);
}

#[rstest]
fn test_draft_removal_collapses_list_and_skips_validation() {
	// Arrange: three items, all of which would fail validation
	let schema = FieldNode::group([(
		"todos",
		FieldNode::list(vec![
			FieldNode::group([(
				"title",
				Field::input(InputType::Text)
					.required_with_message("Title is required")
					.into(),
			)]);
			3
		]),
	)]);
	let (marker_name, marker_value) = draft_update("todos", Some(1));
	let mut entries = FormEntries::new();
	entries.append(marker_name, marker_value);
	entries.append("todos[0].title", "");
	entries.append("todos[1].title", "");
	entries.append("todos[2].title", "");

	// Act
	let submission = parse(entries, &schema).unwrap();

	// Assert
	assert!(submission.is_draft);
	assert_eq!(submission.error, None);
	assert_eq!(
		submission.value,
		json!({ "todos": [{ "title": "" }, { "title": "" }] }),
	);
}

#[rstest]
fn test_draft_marker_against_scalar_is_terminal() {
	let schema = FieldNode::group([("title", Field::input(InputType::Text).into())]);
	let (marker_name, marker_value) = draft_update("title", None);
	let mut entries = FormEntries::new();
	entries.append(marker_name, marker_value);
	entries.append("title", "hello");

	let result = parse(entries, &schema);
	assert!(matches!(
		result,
		Err(ParseError::DraftTargetNotArray { .. })
	));
}

#[rstest]
fn test_file_upload_against_file_input() {
	// Arrange
	let schema = FieldNode::group([("avatar", Field::input(InputType::File).into())]);
	let mut entries = FormEntries::new();
	entries.append(
		"avatar",
		UploadedFile::new("me.png", vec![1, 2, 3]).with_content_type("image/png"),
	);

	// Act
	let submission = parse(entries, &schema).unwrap();

	// Assert: no error, and the value tree describes the upload
	assert_eq!(submission.error, None);
	assert_eq!(submission.value["avatar"]["file_name"], json!("me.png"));
	assert_eq!(submission.value["avatar"]["size"], json!(3));
}

#[rstest]
fn test_file_upload_against_text_input_mismatches() {
	let schema = FieldNode::group([(
		"avatar",
		Field::input_with_message(InputType::Text, "Unexpected file").into(),
	)]);
	let mut entries = FormEntries::new();
	entries.append("avatar", UploadedFile::new("me.png", vec![1]));

	let submission = parse(entries, &schema).unwrap();
	assert_eq!(submission.error, Some(json!({ "avatar": "Unexpected file" })));
}

#[rstest]
fn test_query_string_submission_end_to_end() {
	// Act
	let submission = parse(
		"email=user%40example.com&password=hunter2hunter2&age=30",
		&signup_schema(),
	)
	.unwrap();

	// Assert
	assert_eq!(submission.error, None);
	assert_eq!(submission.value["email"], json!("user@example.com"));
}

#[rstest]
fn test_invalid_percent_escape_survives_verbatim() {
	// Decoding is lenient, like URLSearchParams: `%zz` is not a valid
	// escape and is kept as-is, then fails email validation
	let submission = parse("email=%zz", &signup_schema()).unwrap();
	assert_eq!(submission.value["email"], json!("%zz"));
	assert_eq!(
		submission.error.unwrap()["email"],
		json!("Enter a valid email address"),
	);
}
