//! Validation pass over registered fields
//!
//! [`Validator::validate`] is pure: it reads control state through a
//! [`ControlLookup`] and returns a [`ValidationResult`]. Decorating the page
//! from that result is the form controller's job.

use crate::field::FieldKind;
use crate::registry::FieldRegistryEntry;
use crate::validators::FieldRule;
use indexmap::IndexMap;
use serde::Serialize;
use tieforms_dom::{Document, NodeId};

/// Snapshot of the state validation needs from a field's controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
	/// Kind read from the control's `type`, `None` if unrecognized
	pub kind: Option<FieldKind>,
	/// Whether the control carries a `required` marker
	pub required: bool,
	/// Current value of the field
	pub value: String,
}

impl ControlState {
	pub fn new(kind: Option<FieldKind>, value: impl Into<String>) -> Self {
		Self {
			kind,
			required: false,
			value: value.into(),
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}
}

/// Source of control state, keyed by field name
pub trait ControlLookup {
	/// State of the named field, or `None` if it has no rendered control
	fn control(&self, field: &str) -> Option<ControlState>;
}

/// Reads control state from the inputs rendered inside a form element.
///
/// - text-like controls yield their live value
/// - a checkbox yields its value when checked and `""` otherwise
/// - a radio group yields the value of its checked member or `""`
#[derive(Debug, Clone, Copy)]
pub struct DocumentControls<'a> {
	doc: &'a Document,
	form: NodeId,
}

impl<'a> DocumentControls<'a> {
	pub fn new(doc: &'a Document, form: NodeId) -> Self {
		Self { doc, form }
	}
}

impl ControlLookup for DocumentControls<'_> {
	fn control(&self, field: &str) -> Option<ControlState> {
		let controls = self.doc.inputs_named(self.form, field);
		let first = *controls.first()?;
		let kind = self
			.doc
			.attribute(first, "type")
			.and_then(|kind| kind.parse::<FieldKind>().ok());
		let required = controls
			.iter()
			.any(|id| self.doc.has_attribute(*id, "required"));
		let value = match kind {
			Some(FieldKind::Checkbox) | Some(FieldKind::Radio) => controls
				.iter()
				.find(|id| self.doc.is_checked(**id))
				.map(|id| self.doc.value(*id).to_string())
				.unwrap_or_default(),
			_ => self.doc.value(first).to_string(),
		};
		Some(ControlState {
			kind,
			required,
			value,
		})
	}
}

impl ControlLookup for IndexMap<String, ControlState> {
	fn control(&self, field: &str) -> Option<ControlState> {
		self.get(field).cloned()
	}
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
	failures: IndexMap<String, Vec<FieldRule>>,
}

impl ValidationResult {
	/// `true` iff no field failed
	pub fn is_valid(&self) -> bool {
		self.failures.is_empty()
	}

	/// Failed field names in declaration order
	pub fn failed_fields(&self) -> impl ExactSizeIterator<Item = &str> {
		self.failures.keys().map(String::as_str)
	}

	pub fn is_failed(&self, field: &str) -> bool {
		self.failures.contains_key(field)
	}

	/// Rules the field failed, empty if it passed
	pub fn failed_rules(&self, field: &str) -> &[FieldRule] {
		self.failures.get(field).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn failures(&self) -> &IndexMap<String, Vec<FieldRule>> {
		&self.failures
	}
}

/// Runs the required and kind-implied rules over registered fields
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use tieforms_forms::{ControlState, FieldKind, FieldRegistry, Validator};
///
/// let mut registry = FieldRegistry::new();
/// registry.register("username");
/// registry.register("age");
///
/// let mut controls = IndexMap::new();
/// controls.insert(
///     "username".to_string(),
///     ControlState::new(Some(FieldKind::Text), "").required(),
/// );
/// controls.insert("age".to_string(), ControlState::new(Some(FieldKind::Number), "30"));
///
/// let result = Validator::validate(registry.list(), &controls);
///
/// assert!(!result.is_valid());
/// assert_eq!(result.failed_fields().collect::<Vec<_>>(), vec!["username"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
	/// Validate `entries` in order. Fields without a rendered control are
	/// skipped.
	pub fn validate<'a, I, L>(entries: I, lookup: &L) -> ValidationResult
	where
		I: IntoIterator<Item = &'a FieldRegistryEntry>,
		L: ControlLookup + ?Sized,
	{
		let mut result = ValidationResult::default();
		for entry in entries {
			let Some(state) = lookup.control(entry.name()) else {
				continue;
			};
			let failed = Self::check(&state);
			if !failed.is_empty() {
				result.failures.insert(entry.name().to_string(), failed);
			}
		}
		result
	}

	/// Rules `state` fails, in evaluation order
	pub fn check(state: &ControlState) -> Vec<FieldRule> {
		let mut failed = Vec::new();
		if state.required && !FieldRule::Required.check(&state.value) {
			failed.push(FieldRule::Required);
		}
		if let Some(rule) = state.kind.and_then(FieldRule::implied_by)
			&& !rule.check(&state.value)
		{
			failed.push(rule);
		}
		failed
	}
}
