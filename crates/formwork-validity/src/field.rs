//! Field descriptors and the constraint builder
//!
//! [`Field`] wraps a [`Constraint`] behind chained builder calls mirroring
//! the HTML constraint-validation attributes. Builders consume `self` and
//! return a new descriptor; descriptors are never mutated in place.
//!
//! [`FieldNode`] arranges fields into the nested shape of the submitted
//! value, so errors can be reported at the same paths as the values they
//! belong to.

use crate::constraint::{
	BoundRule, Constraint, FieldTag, FlagRule, InputType, LengthRule, PatternRule, RangeBound,
	StepRule, TypeRule,
};
use regex::Regex;
use std::collections::BTreeMap;

/// A form control descriptor: a tag plus its validation constraint.
///
/// # Examples
///
/// ```
/// use formwork_validity::{Field, InputType};
///
/// let email = Field::input(InputType::Email)
/// 	.required_with_message("Email is required")
/// 	.max_length(254);
///
/// assert!(email.constraint().required.is_some());
/// assert_eq!(email.constraint().max_length.as_ref().unwrap().value, 254);
/// ```
#[derive(Debug, Clone)]
pub struct Field {
	constraint: Constraint,
}

impl Field {
	/// Describes an `<input>` of the given type.
	pub fn input(input_type: InputType) -> Self {
		Self {
			constraint: Constraint {
				input_type: Some(TypeRule {
					value: input_type,
					message: None,
				}),
				..Constraint::new(FieldTag::Input)
			},
		}
	}

	/// Describes an `<input>` with a message reported on type mismatch.
	///
	/// Only `email` and `url` inputs can currently mismatch their type.
	pub fn input_with_message(input_type: InputType, message: impl Into<String>) -> Self {
		Self {
			constraint: Constraint {
				input_type: Some(TypeRule {
					value: input_type,
					message: Some(message.into()),
				}),
				..Constraint::new(FieldTag::Input)
			},
		}
	}

	/// Describes a `<select>`.
	pub fn select() -> Self {
		Self {
			constraint: Constraint::new(FieldTag::Select),
		}
	}

	/// Describes a `<textarea>`.
	pub fn textarea() -> Self {
		Self {
			constraint: Constraint::new(FieldTag::Textarea),
		}
	}

	/// Describes a `<fieldset>` grouping nested fields.
	pub fn fieldset() -> Self {
		Self {
			constraint: Constraint::new(FieldTag::Fieldset),
		}
	}

	/// Describes a repeated `<fieldset>` rendered `count` times.
	pub fn fieldset_list(count: usize) -> Self {
		Self {
			constraint: Constraint {
				item_count: Some(count),
				..Constraint::new(FieldTag::Fieldset)
			},
		}
	}

	/// The constraint bag described by this field.
	pub fn constraint(&self) -> &Constraint {
		&self.constraint
	}

	/// Marks the field as required.
	pub fn required(mut self) -> Self {
		self.constraint.required = Some(FlagRule { message: None });
		self
	}

	/// Marks the field as required with a message for missing values.
	pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
		self.constraint.required = Some(FlagRule {
			message: Some(message.into()),
		});
		self
	}

	/// Sets the lower range bound (numeric or date).
	///
	/// # Examples
	///
	/// ```
	/// use formwork_validity::{Field, InputType, RangeBound};
	///
	/// let quantity = Field::input(InputType::Number).min(5).max(10);
	/// assert_eq!(quantity.constraint().min.as_ref().unwrap().value, RangeBound::Number(5.0));
	/// ```
	pub fn min(mut self, value: impl Into<RangeBound>) -> Self {
		self.constraint.min = Some(BoundRule {
			value: value.into(),
			message: None,
		});
		self
	}

	/// Sets the lower range bound with a message for underflowing values.
	pub fn min_with_message(mut self, value: impl Into<RangeBound>, message: impl Into<String>) -> Self {
		self.constraint.min = Some(BoundRule {
			value: value.into(),
			message: Some(message.into()),
		});
		self
	}

	/// Sets the upper range bound (numeric or date).
	pub fn max(mut self, value: impl Into<RangeBound>) -> Self {
		self.constraint.max = Some(BoundRule {
			value: value.into(),
			message: None,
		});
		self
	}

	/// Sets the upper range bound with a message for overflowing values.
	pub fn max_with_message(mut self, value: impl Into<RangeBound>, message: impl Into<String>) -> Self {
		self.constraint.max = Some(BoundRule {
			value: value.into(),
			message: Some(message.into()),
		});
		self
	}

	/// Sets the minimum character count.
	pub fn min_length(mut self, value: usize) -> Self {
		self.constraint.min_length = Some(LengthRule {
			value,
			message: None,
		});
		self
	}

	/// Sets the minimum character count with a message for short values.
	pub fn min_length_with_message(mut self, value: usize, message: impl Into<String>) -> Self {
		self.constraint.min_length = Some(LengthRule {
			value,
			message: Some(message.into()),
		});
		self
	}

	/// Sets the maximum character count.
	pub fn max_length(mut self, value: usize) -> Self {
		self.constraint.max_length = Some(LengthRule {
			value,
			message: None,
		});
		self
	}

	/// Sets the maximum character count with a message for long values.
	pub fn max_length_with_message(mut self, value: usize, message: impl Into<String>) -> Self {
		self.constraint.max_length = Some(LengthRule {
			value,
			message: Some(message.into()),
		});
		self
	}

	/// Sets the step granularity.
	pub fn step(mut self, value: f64) -> Self {
		self.constraint.step = Some(StepRule {
			value,
			message: None,
		});
		self
	}

	/// Sets the step granularity with a message for off-step values.
	pub fn step_with_message(mut self, value: f64, message: impl Into<String>) -> Self {
		self.constraint.step = Some(StepRule {
			value,
			message: Some(message.into()),
		});
		self
	}

	/// Appends a pattern the value must fully match.
	///
	/// Patterns are anchored: a partial match is a mismatch, mirroring the
	/// HTML `pattern` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use formwork_validity::{Field, InputType};
	/// use regex::Regex;
	///
	/// let code = Field::input(InputType::Text)
	/// 	.pattern(Regex::new(r"[0-9]{4}").unwrap());
	/// assert_eq!(code.constraint().patterns.len(), 1);
	/// ```
	pub fn pattern(mut self, value: Regex) -> Self {
		self.constraint.patterns.push(PatternRule {
			value,
			message: None,
		});
		self
	}

	/// Appends a pattern with a message for mismatching values.
	pub fn pattern_with_message(mut self, value: Regex, message: impl Into<String>) -> Self {
		self.constraint.patterns.push(PatternRule {
			value,
			message: Some(message.into()),
		});
		self
	}

	/// Marks the control as accepting multiple values.
	pub fn multiple(mut self) -> Self {
		self.constraint.multiple = Some(FlagRule { message: None });
		self
	}

	/// Marks the control as accepting multiple values, with a message.
	pub fn multiple_with_message(mut self, message: impl Into<String>) -> Self {
		self.constraint.multiple = Some(FlagRule {
			message: Some(message.into()),
		});
		self
	}
}

/// Nested arrangement of fields mirroring the shape of the submitted value.
///
/// # Examples
///
/// ```
/// use formwork_validity::{Field, FieldNode, InputType};
///
/// let schema = FieldNode::group([
/// 	("title", Field::input(InputType::Text).required().into()),
/// 	(
/// 		"todos",
/// 		FieldNode::list(vec![
/// 			FieldNode::group([("title", Field::input(InputType::Text).into())]),
/// 		]),
/// 	),
/// ]);
///
/// let names: Vec<String> = schema.flatten().into_iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["title", "todos[0].title"]);
/// ```
#[derive(Debug, Clone)]
pub enum FieldNode {
	/// A single form control
	Field(Field),
	/// Named children, addressed by key
	Group(BTreeMap<String, FieldNode>),
	/// Repeated children, addressed by index
	List(Vec<FieldNode>),
}

impl FieldNode {
	/// Builds a [`FieldNode::Group`] from `(name, node)` pairs.
	pub fn group<K, I>(children: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, FieldNode)>,
	{
		Self::Group(
			children
				.into_iter()
				.map(|(name, node)| (name.into(), node))
				.collect(),
		)
	}

	/// Builds a [`FieldNode::List`] from child nodes.
	pub fn list(children: Vec<FieldNode>) -> Self {
		Self::List(children)
	}

	/// Returns the field if this node is a leaf control.
	pub fn as_field(&self) -> Option<&Field> {
		match self {
			Self::Field(field) => Some(field),
			Self::Group(_) | Self::List(_) => None,
		}
	}

	/// The constraint of this node's field.
	///
	/// # Panics
	///
	/// Panics when called on a [`FieldNode::Group`] or [`FieldNode::List`];
	/// only leaf nodes carry a constraint. Use [`FieldNode::as_field`] when
	/// the node kind is not known statically.
	pub fn constraint(&self) -> &Constraint {
		match self.as_field() {
			Some(field) => field.constraint(),
			None => panic!(
				"constraint() called on a group or list node; only field nodes carry a constraint"
			),
		}
	}

	/// Flattens the schema into `(path, field)` pairs.
	///
	/// Paths follow the same codec as submitted names: groups contribute
	/// dotted keys, lists contribute bracketed indices.
	pub fn flatten(&self) -> Vec<(String, &Field)> {
		let mut fields = Vec::new();
		self.collect_fields(String::new(), &mut fields);
		fields
	}

	fn collect_fields<'a>(&'a self, prefix: String, fields: &mut Vec<(String, &'a Field)>) {
		match self {
			Self::Field(field) => fields.push((prefix, field)),
			Self::Group(children) => {
				for (key, child) in children {
					let child_prefix = if prefix.is_empty() {
						key.clone()
					} else {
						format!("{prefix}.{key}")
					};
					child.collect_fields(child_prefix, fields);
				}
			}
			Self::List(children) => {
				for (index, child) in children.iter().enumerate() {
					child.collect_fields(format!("{prefix}[{index}]"), fields);
				}
			}
		}
	}
}

impl From<Field> for FieldNode {
	fn from(field: Field) -> Self {
		Self::Field(field)
	}
}
