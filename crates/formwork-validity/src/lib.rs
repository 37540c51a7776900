//! HTML5-style constraint validation for serialized form submissions
//!
//! This crate bridges a flat form submission to structured data and back:
//! - [`Field`] builds immutable constraint descriptors through chained calls
//!   mirroring the HTML constraint-validation attributes
//! - [`check_validity`] derives browser-style validity flags for one raw
//!   value; [`resolve_message`] maps the first triggered flag to its
//!   user-supplied message
//! - [`parse`] turns a whole submission into `{ value, error, is_draft }`,
//!   with the error tree mirroring the shape of the value tree
//! - the draft protocol ([`draft_update`], [`DRAFT_FIELD_NAME`]) lets a
//!   submission grow or shrink a list without being validated
//!
//! Validation failures are always data, never errors: [`ParseError`] only
//! signals malformed input or misuse.

pub mod constraint;
pub mod draft;
pub mod field;
pub mod parse;
pub mod validity;

pub use constraint::{
	BoundRule, Constraint, FieldTag, FlagRule, InputType, LengthRule, PatternRule, RangeBound,
	StepRule, TypeRule,
};
pub use draft::{DRAFT_FIELD_NAME, DraftUpdate, draft_update, take_draft};
pub use field::{Field, FieldNode};
pub use parse::{ParseError, Submission, parse, parse_with};
pub use validity::{Validity, check_validity, resolve_message};
