//! Whole-form declarations loaded from JSON
//!
//! ```json
//! {
//!   "sections": [
//!     {"fields": [{"type": "text", "data": {"name": "username", "label": "User", "required": true}}]},
//!     {"columns": [
//!       {"type": "text", "data": {"name": "first", "label": "First"}},
//!       {"type": "text", "data": {"name": "last", "label": "Last"}}
//!     ]}
//!   ],
//!   "bindings": [{"username": "username"}, {"first": "firstName", "last": "lastName"}]
//! }
//! ```
//!
//! Bindings keep the order in which they appear, across and within the
//! listed maps.

use crate::error::FormResult;
use crate::field::{FieldDeclaration, FieldSpec};
use indexmap::IndexMap;
use serde::Deserialize;

/// Group of declarations appended in one call
#[derive(Debug, Clone, PartialEq)]
pub enum FormSection {
	/// Appended one below the other
	Fields(Vec<FieldDeclaration>),
	/// Appended side by side in one row
	Columns(Vec<FieldDeclaration>),
}

/// Declarative description of a whole form
///
/// # Examples
///
/// ```
/// use tieforms_forms::{FormSchema, FormSection};
///
/// let schema = FormSchema::from_json_str(r#"{
///     "sections": [{"fields": [{"type": "number", "data": {"name": "age", "label": "Age"}}]}],
///     "bindings": [{"age": "age"}]
/// }"#).unwrap();
///
/// assert!(matches!(&schema.sections[0], FormSection::Fields(fields) if fields.len() == 1));
/// assert_eq!(schema.bindings, vec![("age".to_string(), "age".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
	pub sections: Vec<FormSection>,
	/// `(field, property)` pairs
	pub bindings: Vec<(String, String)>,
}

#[derive(Deserialize)]
struct RawDeclaration {
	#[serde(rename = "type")]
	kind: String,
	#[serde(default)]
	data: Option<FieldSpec>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawSection {
	Fields(Vec<RawDeclaration>),
	Columns(Vec<RawDeclaration>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
	#[serde(default)]
	sections: Vec<RawSection>,
	#[serde(default)]
	bindings: Vec<IndexMap<String, String>>,
}

fn convert(raw: Vec<RawDeclaration>) -> FormResult<Vec<FieldDeclaration>> {
	raw.into_iter()
		.map(|declaration| FieldDeclaration::parse(&declaration.kind, declaration.data))
		.collect()
}

impl FormSchema {
	/// Parse a schema.
	///
	/// Malformed JSON fails with [`FormError::Schema`](crate::FormError::Schema);
	/// a field type without a renderer fails with
	/// [`FormError::UnsupportedFieldKind`](crate::FormError::UnsupportedFieldKind).
	pub fn from_json_str(source: &str) -> FormResult<Self> {
		let raw: RawSchema = serde_json::from_str(source)?;

		let sections = raw
			.sections
			.into_iter()
			.map(|section| match section {
				RawSection::Fields(fields) => convert(fields).map(FormSection::Fields),
				RawSection::Columns(columns) => convert(columns).map(FormSection::Columns),
			})
			.collect::<FormResult<Vec<_>>>()?;

		let bindings = raw.bindings.into_iter().flatten().collect();

		Ok(Self { sections, bindings })
	}
}
