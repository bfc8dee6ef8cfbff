//! Two-way binding between rendered controls and a binding source
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  bind / reload   ┌──────────────┐
//! │ BindingSource │ ───────────────► │   controls   │
//! │  (shared)     │ ◄─────────────── │  (Document)  │
//! └───────────────┘  change listener └──────────────┘
//! ```
//!
//! The source is shared between the caller and the [`Binder`]. The binder
//! writes to it only from change listeners; the caller may write at any time
//! and calls [`Binder::reload`] to push those writes into the controls.
//!
//! ## Coercion
//!
//! - checkbox controls write `1` when checked and `0` when unchecked, and
//!   are checked on sync unless the property is loosely zero (see
//!   [`is_unchecked`])
//! - radio controls write the value of the checked member of the group and
//!   on sync check the member whose value equals the property
//! - every other control writes its raw string value and on sync shows the
//!   property as text (see [`display_value`])

use crate::error::{FormError, FormResult};
use crate::field::FieldKind;
use crate::registry::FieldRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tieforms_dom::{Document, EventKind, ListenerId, NodeId};

/// Property bag the form binds against.
///
/// A missing property is undefined. `null` is a defined value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tieforms_forms::BindingSource;
///
/// let mut source = BindingSource::from_value(json!({"username": "", "age": "30"})).unwrap();
/// source.set("flag", 1);
///
/// assert!(source.contains("username"));
/// assert!(!source.contains("email"));
/// assert_eq!(source.get("flag"), Some(&json!(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingSource {
	values: IndexMap<String, Value>,
}

/// Binding source shared between the caller and a form
pub type SharedSource = Rc<RefCell<BindingSource>>;

impl BindingSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a source from a JSON object. Any other JSON value is rejected.
	pub fn from_value(value: Value) -> FormResult<Self> {
		Ok(serde_json::from_value(value)?)
	}

	pub fn from_json_str(source: &str) -> FormResult<Self> {
		Ok(serde_json::from_str(source)?)
	}

	/// Wrap the source for sharing with a form
	pub fn shared(self) -> SharedSource {
		Rc::new(RefCell::new(self))
	}

	pub fn get(&self, property: &str) -> Option<&Value> {
		self.values.get(property)
	}

	pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.values.insert(property.into(), value.into())
	}

	pub fn remove(&mut self, property: &str) -> Option<Value> {
		self.values.shift_remove(property)
	}

	/// Whether the property is defined
	pub fn contains(&self, property: &str) -> bool {
		self.values.contains_key(property)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn to_value(&self) -> Value {
		Value::Object(
			self.values
				.iter()
				.map(|(k, v)| (k.clone(), v.clone()))
				.collect(),
		)
	}
}

/// Whether a checkbox bound to `value` is unchecked.
///
/// Loose equality with zero: the number `0`, `false`, and strings that are
/// blank or parse to zero. Everything else, `null` included, checks the box.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tieforms_forms::binding::is_unchecked;
///
/// assert!(is_unchecked(&json!(0)));
/// assert!(is_unchecked(&json!("0")));
/// assert!(is_unchecked(&json!(false)));
/// assert!(is_unchecked(&json!("")));
/// assert!(!is_unchecked(&json!(1)));
/// assert!(!is_unchecked(&json!("yes")));
/// assert!(!is_unchecked(&json!(null)));
/// ```
pub fn is_unchecked(value: &Value) -> bool {
	match value {
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::Bool(b) => !b,
		Value::String(s) => {
			let trimmed = s.trim();
			trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|n| n == 0.0)
		}
		Value::Null | Value::Array(_) | Value::Object(_) => false,
	}
}

/// Text shown in a control bound to `value`
///
/// Strings are shown as-is, `null` as the empty string, numbers and
/// booleans through their display form, arrays and objects as JSON.
pub fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		other => other.to_string(),
	}
}

/// Kind of a rendered control, read from its `type` attribute
pub(crate) fn control_kind(doc: &Document, control: NodeId) -> Option<FieldKind> {
	doc.attribute(control, "type")
		.and_then(|kind| kind.parse::<FieldKind>().ok())
}

/// Push `value` into the controls of one field. Fires no events.
pub fn sync_controls(doc: &mut Document, controls: &[NodeId], value: &Value) {
	for &control in controls {
		match control_kind(doc, control) {
			Some(FieldKind::Checkbox) => {
				doc.set_checked(control, !is_unchecked(value));
			}
			Some(FieldKind::Radio) => {
				let selected = doc.value(control) == display_value(value);
				doc.set_checked(control, selected);
			}
			_ => {
				doc.set_value(control, display_value(value));
			}
		}
	}
}

/// Value a change on `control` writes into the source
fn pulled_value(doc: &Document, form: NodeId, field: &str, control: NodeId) -> Option<Value> {
	match control_kind(doc, control) {
		Some(FieldKind::Checkbox) => Some(Value::from(if doc.is_checked(control) { 1 } else { 0 })),
		Some(FieldKind::Radio) => doc
			.inputs_named(form, field)
			.into_iter()
			.find(|id| doc.is_checked(*id))
			.map(|id| Value::from(doc.value(id))),
		_ => Some(Value::from(doc.value(control))),
	}
}

/// Owns the change listeners of one form's bindings
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tieforms_dom::Document;
/// use tieforms_forms::{Binder, BindingSource, BootstrapRenderer, FieldKind, FieldRegistry, FieldRenderer, FieldSpec};
///
/// let mut doc = Document::new();
/// let form = doc.create_element("form");
/// let control = doc.instantiate(
///     &BootstrapRenderer::default().render(FieldKind::Text, &FieldSpec::new("username", "User")),
/// );
/// doc.append_child(form, control);
///
/// let mut registry = FieldRegistry::new();
/// registry.register("username");
///
/// let source = BindingSource::from_value(json!({"user": "alice"})).unwrap().shared();
/// let mut binder = Binder::new(form, source.clone());
/// binder.bind(&mut doc, &mut registry, "username", "user").unwrap();
///
/// let input = doc.inputs_named(form, "username")[0];
/// assert_eq!(doc.value(input), "alice");
///
/// doc.input_text(input, "bob");
/// assert_eq!(source.borrow().get("user"), Some(&json!("bob")));
/// ```
#[derive(Debug)]
pub struct Binder {
	form: NodeId,
	source: SharedSource,
	listeners: IndexMap<String, Vec<ListenerId>>,
}

impl Binder {
	pub fn new(form: NodeId, source: SharedSource) -> Self {
		Self {
			form,
			source,
			listeners: IndexMap::new(),
		}
	}

	pub fn source(&self) -> &SharedSource {
		&self.source
	}

	/// Rendered controls of a registered field
	pub fn controls(&self, doc: &Document, registry: &FieldRegistry, field: &str) -> FormResult<Vec<NodeId>> {
		if !registry.contains(field) {
			return Err(FormError::UnknownField(field.to_string()));
		}
		let controls = doc.inputs_named(self.form, field);
		if controls.is_empty() {
			return Err(FormError::UnknownField(field.to_string()));
		}
		Ok(controls)
	}

	/// Bind `field` to `property`.
	///
	/// The binding is recorded even when the property is undefined, but
	/// listeners and the initial sync only happen for a defined property.
	/// Binding a field again replaces its previous listeners.
	pub fn bind(
		&mut self,
		doc: &mut Document,
		registry: &mut FieldRegistry,
		field: &str,
		property: &str,
	) -> FormResult<()> {
		let controls = self.controls(doc, registry, field)?;

		self.dispose_field(doc, field);
		registry.set_binding(field, property)?;

		let current = self.source.borrow().get(property).cloned();
		let Some(current) = current else {
			tracing::warn!(field = %field, property = %property, "binding to undefined property, field stays unsynced");
			return Ok(());
		};

		let mut ids = Vec::with_capacity(controls.len());
		for &control in &controls {
			let source = Rc::clone(&self.source);
			let form = self.form;
			let field_name = field.to_string();
			let property_name = property.to_string();
			let id = doc.add_event_listener(control, EventKind::Change, move |doc, event| {
				let Some(value) = pulled_value(doc, form, &field_name, event.target()) else {
					return;
				};
				match source.try_borrow_mut() {
					Ok(mut source) => {
						tracing::trace!(field = %field_name, property = %property_name, value = %value, "control wrote to binding source");
						source.set(property_name.as_str(), value);
					}
					Err(_) => {
						tracing::warn!(field = %field_name, "binding source busy, change dropped");
					}
				}
			});
			ids.push(id);
		}
		self.listeners.insert(field.to_string(), ids);

		sync_controls(doc, &controls, &current);
		tracing::debug!(field = %field, property = %property, "binding established");
		Ok(())
	}

	/// Push every bound, defined property into its controls
	pub fn reload(&self, doc: &mut Document, registry: &FieldRegistry) {
		let source = self.source.borrow();
		for entry in registry.bound() {
			let Some(property) = entry.bound_property() else {
				continue;
			};
			let Some(value) = source.get(property) else {
				continue;
			};
			let controls = doc.inputs_named(self.form, entry.name());
			sync_controls(doc, &controls, value);
		}
		tracing::debug!(fields = registry.len(), "form reloaded from binding source");
	}

	/// Remove the binding of `field` and dispose its listeners
	pub fn unbind(&mut self, doc: &mut Document, registry: &mut FieldRegistry, field: &str) -> FormResult<()> {
		registry.clear_binding(field)?;
		self.dispose_field(doc, field);
		Ok(())
	}

	fn dispose_field(&mut self, doc: &mut Document, field: &str) {
		if let Some(ids) = self.listeners.shift_remove(field) {
			for id in ids {
				doc.remove_event_listener(id);
			}
		}
	}

	/// Dispose every listener this binder registered
	pub fn dispose(&mut self, doc: &mut Document) {
		for (_, ids) in self.listeners.drain(..) {
			for id in ids {
				doc.remove_event_listener(id);
			}
		}
	}

	/// Number of live listeners registered for `field`
	pub fn listener_count(&self, field: &str) -> usize {
		self.listeners.get(field).map_or(0, Vec::len)
	}
}
