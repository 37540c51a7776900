//! Validity computation and message resolution
//!
//! [`check_validity`] derives the classic browser `ValidityState` flags for a
//! single raw submitted value against a [`Constraint`]. Validation failures
//! are data, never errors: [`resolve_message`] maps the first triggered flag
//! to its user-supplied message.

use crate::constraint::{Constraint, InputType, RangeBound};
use chrono::NaiveDateTime;
use formwork_formdata::EntryValue;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Minimal email shape check: something before and after a single `@`, no
// whitespace. Matches the browser's permissive baseline rather than RFC 5322.
static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\S+@\S+$").expect("EMAIL_REGEX: invalid regex pattern"));

// Absolute URL: a scheme followed by a colon, no whitespace anywhere.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:\S*$").expect("URL_REGEX: invalid regex pattern")
});

/// Browser-style validity flags for one field.
///
/// `valid` is true iff no other flag is set. `bad_input`, `custom_error`,
/// and `step_mismatch` are carried for completeness but never set by
/// [`check_validity`]; step enforcement is left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
	pub bad_input: bool,
	pub custom_error: bool,
	pub pattern_mismatch: bool,
	pub range_overflow: bool,
	pub range_underflow: bool,
	pub step_mismatch: bool,
	pub too_long: bool,
	pub too_short: bool,
	pub type_mismatch: bool,
	pub value_missing: bool,
	pub valid: bool,
}

/// Computes the validity flags for a raw submitted value.
///
/// `value` is `None` when nothing was submitted under the field's name.
/// File values can only mismatch their declared type; every text rule follows
/// the HTML constraint-validation semantics:
///
/// - absent or empty value sets `value_missing`
/// - character count outside `[min_length, max_length]` sets
///   `too_short` / `too_long` (an absent value is always too short)
/// - numeric coercion of the value outside `[min, max]` sets
///   `range_underflow` / `range_overflow`; unparseable numbers and dates
///   never trigger a range flag
/// - any configured pattern failing an anchored full match sets
///   `pattern_mismatch`
/// - a malformed value for an `email` or `url` input sets `type_mismatch`
///
/// # Examples
///
/// ```
/// use formwork_formdata::EntryValue;
/// use formwork_validity::{Field, InputType, check_validity};
///
/// let field = Field::input(InputType::Number).min(5).max(10);
/// let value = EntryValue::Text("4".to_string());
///
/// let validity = check_validity(Some(&value), field.constraint());
/// assert!(validity.range_underflow);
/// assert!(!validity.valid);
/// ```
pub fn check_validity(value: Option<&EntryValue>, constraint: &Constraint) -> Validity {
	let text = match value {
		Some(EntryValue::File(_)) => {
			// A file can only be valid for a file input.
			let type_mismatch = constraint
				.input_type
				.as_ref()
				.is_none_or(|rule| rule.value != InputType::File);
			return Validity {
				type_mismatch,
				valid: !type_mismatch,
				..Validity::default()
			};
		}
		Some(EntryValue::Text(text)) => Some(text.as_str()),
		None => None,
	};

	let pattern_mismatch = constraint.patterns.iter().any(|rule| match text {
		Some(text) => !is_full_match(&rule.value, text),
		None => true,
	});

	let range_overflow = match (&constraint.max, text) {
		(Some(rule), Some(text)) => match rule.value {
			RangeBound::Number(max) => coerce_number(text) > max,
			RangeBound::Date(max) => parse_date(text).is_some_and(|date| date > max),
		},
		_ => false,
	};

	// An absent value coerces like an empty string here, so a numeric `min`
	// above zero flags absent values as underflowing.
	let range_underflow = match &constraint.min {
		Some(rule) => {
			let text = text.unwrap_or("");
			match rule.value {
				RangeBound::Number(min) => coerce_number(text) < min,
				RangeBound::Date(min) => parse_date(text).is_some_and(|date| date < min),
			}
		}
		None => false,
	};

	let too_long = match (&constraint.max_length, text) {
		(Some(rule), Some(text)) => text.chars().count() > rule.value,
		_ => false,
	};

	let too_short = match &constraint.min_length {
		Some(rule) => match text {
			Some(text) => text.chars().count() < rule.value,
			None => true,
		},
		None => false,
	};

	let type_mismatch = match constraint.input_type.as_ref().map(|rule| rule.value) {
		Some(InputType::Email) => !EMAIL_REGEX.is_match(text.unwrap_or("")),
		Some(InputType::Url) => !URL_REGEX.is_match(text.unwrap_or("")),
		_ => false,
	};

	let value_missing = text.is_none_or(str::is_empty);

	Validity {
		bad_input: false,
		custom_error: false,
		pattern_mismatch,
		range_overflow,
		range_underflow,
		step_mismatch: false,
		too_long,
		too_short,
		type_mismatch,
		value_missing,
		valid: !pattern_mismatch
			&& !range_overflow
			&& !range_underflow
			&& !too_long
			&& !too_short
			&& !type_mismatch
			&& !value_missing,
	}
}

/// Maps the first triggered validity flag to its user-supplied message.
///
/// Flags are checked in fixed priority order: missing, short, long, step,
/// underflow, overflow, type/bad-input, pattern. Returns `None` when the
/// triggered rule has no message, and `Some("")` when no flag triggered at
/// all, so callers can distinguish "invalid but silent" from "valid".
///
/// With several patterns configured, the message comes from the first
/// pattern whose expression finds a match in the value.
pub fn resolve_message(
	value: Option<&EntryValue>,
	validity: &Validity,
	constraint: &Constraint,
) -> Option<String> {
	if validity.value_missing {
		constraint.required.as_ref()?.message.clone()
	} else if validity.too_short {
		constraint.min_length.as_ref()?.message.clone()
	} else if validity.too_long {
		constraint.max_length.as_ref()?.message.clone()
	} else if validity.step_mismatch {
		constraint.step.as_ref()?.message.clone()
	} else if validity.range_underflow {
		constraint.min.as_ref()?.message.clone()
	} else if validity.range_overflow {
		constraint.max.as_ref()?.message.clone()
	} else if validity.type_mismatch || validity.bad_input {
		constraint.input_type.as_ref()?.message.clone()
	} else if validity.pattern_mismatch {
		match constraint.patterns.len() {
			0 => None,
			1 => constraint.patterns[0].message.clone(),
			_ => {
				let text = value.and_then(EntryValue::as_text).unwrap_or("");
				constraint
					.patterns
					.iter()
					.find(|rule| rule.value.is_match(text))
					.and_then(|rule| rule.message.clone())
			}
		}
	} else {
		Some(String::new())
	}
}

// Anchored full match: the first match must span the entire value, like the
// HTML pattern attribute.
fn is_full_match(regex: &Regex, text: &str) -> bool {
	regex.find(text).is_some_and(|m| m.as_str() == text)
}

// Numeric coercion with JavaScript `Number()` semantics: an empty or
// whitespace-only string is zero, garbage is NaN (and NaN never satisfies a
// range comparison).
fn coerce_number(text: &str) -> f64 {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return 0.0;
	}
	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// Date parsing for the formats date-flavored inputs submit.
fn parse_date(text: &str) -> Option<NaiveDateTime> {
	const FORMATS: [&str; 4] = [
		"%Y-%m-%dT%H:%M:%S",
		"%Y-%m-%dT%H:%M",
		"%Y-%m-%d %H:%M:%S",
		"%Y-%m-%d %H:%M",
	];

	for format in FORMATS {
		if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
			return Some(datetime);
		}
	}

	if let Ok(date) = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
		return date.and_hms_opt(0, 0, 0);
	}
	// Month inputs submit `YYYY-MM`.
	if let Ok(date) = chrono::NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
		return date.and_hms_opt(0, 0, 0);
	}

	None
}
