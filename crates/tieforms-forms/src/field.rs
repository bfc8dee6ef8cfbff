//! Declarative field descriptions
//!
//! A form is declared as a list of [`FieldDeclaration`]s: a [`FieldKind`]
//! plus an optional [`FieldSpec`] payload. Declarations without a payload
//! stand for pure decorations and are skipped when fields are added.

use crate::attributes::deserialize_attributes;
use crate::error::{FormError, FormResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of field kinds a form can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FieldKind {
	Text,
	Number,
	Time,
	Email,
	Password,
	Checkbox,
	Radio,
	Button,
}

impl FieldKind {
	/// The HTML `type` attribute for this kind
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Text => "text",
			FieldKind::Number => "number",
			FieldKind::Time => "time",
			FieldKind::Email => "email",
			FieldKind::Password => "password",
			FieldKind::Checkbox => "checkbox",
			FieldKind::Radio => "radio",
			FieldKind::Button => "button",
		}
	}

	/// Kinds rendered as a single labeled `<input>`
	pub fn is_text_like(&self) -> bool {
		matches!(
			self,
			FieldKind::Text
				| FieldKind::Number
				| FieldKind::Time
				| FieldKind::Email
				| FieldKind::Password
		)
	}

	/// Whether fields of this kind take part in registration, binding and
	/// validation. Buttons are plain triggers and do not.
	pub fn is_bindable(&self) -> bool {
		!matches!(self, FieldKind::Button)
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldKind {
	type Err = FormError;

	/// # Examples
	///
	/// ```
	/// use tieforms_forms::{FieldKind, FormError};
	///
	/// assert_eq!("email".parse::<FieldKind>().unwrap(), FieldKind::Email);
	/// assert!(matches!(
	///     "textarea".parse::<FieldKind>(),
	///     Err(FormError::UnsupportedFieldKind(kind)) if kind == "textarea"
	/// ));
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"text" => Ok(FieldKind::Text),
			"number" => Ok(FieldKind::Number),
			"time" => Ok(FieldKind::Time),
			"email" => Ok(FieldKind::Email),
			"password" => Ok(FieldKind::Password),
			"checkbox" => Ok(FieldKind::Checkbox),
			"radio" => Ok(FieldKind::Radio),
			"button" => Ok(FieldKind::Button),
			other => Err(FormError::UnsupportedFieldKind(other.to_string())),
		}
	}
}

impl TryFrom<String> for FieldKind {
	type Error = FormError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Description of one field
///
/// Immutable once rendered: the controller renders a clone and never reads
/// the description back.
///
/// # Examples
///
/// ```
/// use tieforms_forms::FieldSpec;
///
/// let spec = FieldSpec::new("age", "Age")
///     .required()
///     .with_placeholder("Years")
///     .with_attribute("min", "0");
///
/// assert!(spec.required);
/// assert_eq!(spec.placeholder.as_deref(), Some("Years"));
/// assert_eq!(spec.extra_attributes.get("min").map(String::as_str), Some("0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldSpec {
	/// Field name, unique per form (radio options share one name)
	pub name: String,
	pub label: String,
	pub placeholder: Option<String>,
	/// Extra CSS classes appended to the control's class list
	#[serde(alias = "css")]
	pub css_classes: Option<String>,
	/// Extra attributes, either a map or a raw string like `"required min='0'"`
	#[serde(alias = "attributes", deserialize_with = "deserialize_attributes")]
	pub extra_attributes: IndexMap<String, String>,
	pub required: bool,
	/// Option value for radio buttons
	pub value: Option<String>,
}

impl FieldSpec {
	pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			..Self::default()
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_css(mut self, classes: impl Into<String>) -> Self {
		self.css_classes = Some(classes.into());
		self
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_attributes.insert(name.into(), value.into());
		self
	}

	/// Merge a raw attribute string such as `"required min='0'"`
	pub fn with_raw_attributes(mut self, raw: &str) -> FormResult<Self> {
		self.extra_attributes
			.extend(crate::attributes::parse_attribute_list(raw)?);
		Ok(self)
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	/// Whether the rendered control will carry a `required` marker
	pub fn is_required(&self) -> bool {
		self.required || self.extra_attributes.contains_key("required")
	}
}

/// One entry of a field list: a kind plus an optional payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
	#[serde(rename = "type")]
	pub kind: FieldKind,
	#[serde(default)]
	pub data: Option<FieldSpec>,
}

impl FieldDeclaration {
	pub fn new(kind: FieldKind, spec: FieldSpec) -> Self {
		Self {
			kind,
			data: Some(spec),
		}
	}

	/// A declaration without payload; skipped when added to a form
	pub fn without_data(kind: FieldKind) -> Self {
		Self { kind, data: None }
	}

	/// Build a declaration from a kind name
	pub fn parse(kind: &str, data: Option<FieldSpec>) -> FormResult<Self> {
		Ok(Self {
			kind: kind.parse()?,
			data,
		})
	}

	pub fn text(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Text, spec)
	}

	pub fn number(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Number, spec)
	}

	pub fn email(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Email, spec)
	}

	pub fn checkbox(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Checkbox, spec)
	}

	pub fn radio(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Radio, spec)
	}

	pub fn button(spec: FieldSpec) -> Self {
		Self::new(FieldKind::Button, spec)
	}

	/// Reject payloads that could never be registered or bound
	pub(crate) fn check(&self) -> FormResult<()> {
		match &self.data {
			Some(spec) if self.kind.is_bindable() && spec.name.trim().is_empty() => {
				Err(FormError::MissingFieldName { kind: self.kind })
			}
			_ => Ok(()),
		}
	}
}
