//! Constraint descriptors
//!
//! A [`Constraint`] is an immutable bag of HTML5 validation rules attached to
//! a form control: required, length bounds, numeric/date ranges, step,
//! patterns, and multiplicity. Each rule carries an optional user message
//! reported when the rule is the one that failed.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt;

/// The HTML element a constraint describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
	Input,
	Select,
	Textarea,
	Fieldset,
}

/// HTML `<input type="...">` subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
	Checkbox,
	Color,
	Date,
	DatetimeLocal,
	Email,
	File,
	Hidden,
	Month,
	Number,
	Password,
	Radio,
	Range,
	Search,
	Tel,
	Text,
	Time,
	Url,
	Week,
}

impl InputType {
	/// The attribute value as written in HTML.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Checkbox => "checkbox",
			Self::Color => "color",
			Self::Date => "date",
			Self::DatetimeLocal => "datetime-local",
			Self::Email => "email",
			Self::File => "file",
			Self::Hidden => "hidden",
			Self::Month => "month",
			Self::Number => "number",
			Self::Password => "password",
			Self::Radio => "radio",
			Self::Range => "range",
			Self::Search => "search",
			Self::Tel => "tel",
			Self::Text => "text",
			Self::Time => "time",
			Self::Url => "url",
			Self::Week => "week",
		}
	}
}

impl fmt::Display for InputType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Lower or upper bound of a numeric or date range rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
	Number(f64),
	Date(NaiveDateTime),
}

impl From<f64> for RangeBound {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i64> for RangeBound {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<i32> for RangeBound {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<u32> for RangeBound {
	fn from(value: u32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<NaiveDateTime> for RangeBound {
	fn from(value: NaiveDateTime) -> Self {
		Self::Date(value)
	}
}

impl From<NaiveDate> for RangeBound {
	fn from(value: NaiveDate) -> Self {
		Self::Date(value.and_hms_opt(0, 0, 0).unwrap_or_default())
	}
}

/// Declared input type plus the message for type mismatches.
#[derive(Debug, Clone)]
pub struct TypeRule {
	pub value: InputType,
	pub message: Option<String>,
}

/// A rule with no parameter: `required` and `multiple`.
#[derive(Debug, Clone, Default)]
pub struct FlagRule {
	pub message: Option<String>,
}

/// Character-count bound: `minlength` / `maxlength`.
#[derive(Debug, Clone)]
pub struct LengthRule {
	pub value: usize,
	pub message: Option<String>,
}

/// Range bound: `min` / `max`.
#[derive(Debug, Clone)]
pub struct BoundRule {
	pub value: RangeBound,
	pub message: Option<String>,
}

/// Step granularity. Carried for completeness; enforcement is left to the
/// browser's own step handling.
#[derive(Debug, Clone)]
pub struct StepRule {
	pub value: f64,
	pub message: Option<String>,
}

/// One `pattern` entry: an anchored full-match regular expression.
#[derive(Debug, Clone)]
pub struct PatternRule {
	pub value: Regex,
	pub message: Option<String>,
}

/// Immutable bag of validation rules for one form control.
///
/// Constructed through the [`Field`](crate::Field) builder; every builder
/// call produces a new descriptor.
#[derive(Debug, Clone)]
pub struct Constraint {
	/// Element kind this constraint describes
	pub tag: FieldTag,
	/// Declared input subtype, for `input` tags
	pub input_type: Option<TypeRule>,
	/// Value must be present and non-empty
	pub required: Option<FlagRule>,
	/// Minimum character count
	pub min_length: Option<LengthRule>,
	/// Maximum character count
	pub max_length: Option<LengthRule>,
	/// Lower range bound (numeric or date)
	pub min: Option<BoundRule>,
	/// Upper range bound (numeric or date)
	pub max: Option<BoundRule>,
	/// Step granularity
	pub step: Option<StepRule>,
	/// Ordered pattern list; all must fully match
	pub patterns: Vec<PatternRule>,
	/// Control accepts multiple values
	pub multiple: Option<FlagRule>,
	/// Item count hint for array fieldsets
	pub item_count: Option<usize>,
}

impl Constraint {
	/// Creates an empty constraint for the given tag.
	pub fn new(tag: FieldTag) -> Self {
		Self {
			tag,
			input_type: None,
			required: None,
			min_length: None,
			max_length: None,
			min: None,
			max: None,
			step: None,
			patterns: Vec::new(),
			multiple: None,
			item_count: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(InputType::DatetimeLocal, "datetime-local")]
	#[case(InputType::Email, "email")]
	#[case(InputType::Number, "number")]
	fn test_input_type_as_str(#[case] input_type: InputType, #[case] expected: &str) {
		assert_eq!(input_type.as_str(), expected);
	}

	#[rstest]
	fn test_range_bound_from_integer() {
		assert_eq!(RangeBound::from(5), RangeBound::Number(5.0));
	}

	#[rstest]
	fn test_range_bound_from_date() {
		// Arrange
		let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

		// Act
		let bound = RangeBound::from(date);

		// Assert
		let RangeBound::Date(datetime) = bound else {
			panic!("Expected a date bound");
		};
		assert_eq!(datetime.date(), date);
	}

	#[rstest]
	fn test_new_constraint_is_empty() {
		let constraint = Constraint::new(FieldTag::Input);
		assert!(constraint.required.is_none());
		assert!(constraint.patterns.is_empty());
		assert!(constraint.item_count.is_none());
	}
}
