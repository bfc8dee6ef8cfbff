//! Form controller
//!
//! A [`FormController`] owns one attached form: its field registry, its
//! binder and the submit listener that gates the completion callback on a
//! successful validation pass.
//!
//! ## Submit cycle
//!
//! ```text
//! Idle ──submit──► SubmitPending ──valid────► callback ──► Idle
//!                        │
//!                        └──invalid──► decorate errors ──► Idle
//! ```
//!
//! The platform submit is always prevented. Previous error decorations are
//! cleared before every pass, so repeated submits never stack banners.

use crate::binding::{Binder, SharedSource};
use crate::decoration::{clear_markers, mark_failures};
use crate::error::{FormError, FormResult};
use crate::field::FieldDeclaration;
use crate::registry::{FieldRegistry, FieldRegistryEntry};
use crate::rendering::{BootstrapRenderer, FieldRenderer};
use crate::schema::{FormSchema, FormSection};
use crate::settings::{FormOptions, FormSettings, SubmitCallback};
use crate::validation::{DocumentControls, ValidationResult, Validator};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};
use tieforms_dom::{Document, DocumentId, EventKind, ListenerId, NodeId};

/// Phase of the submit state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
	#[default]
	Idle,
	/// A submit is being processed; only observable from the completion
	/// callback
	SubmitPending,
}

/// What one submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Validation passed and the completion callback ran
	Completed(ValidationResult),
	/// Validation failed and the form was decorated
	Rejected(ValidationResult),
	/// Another submit of the same form was still pending
	Busy,
	/// The form has been destroyed, removed from the document, or the
	/// document passed in is not the one the form lives in
	Inert,
}

impl SubmitOutcome {
	pub fn is_completed(&self) -> bool {
		matches!(self, SubmitOutcome::Completed(_))
	}

	/// The validation result, if a validation pass ran
	pub fn validation(&self) -> Option<&ValidationResult> {
		match self {
			SubmitOutcome::Completed(result) | SubmitOutcome::Rejected(result) => Some(result),
			SubmitOutcome::Busy | SubmitOutcome::Inert => None,
		}
	}
}

struct FormState {
	document: DocumentId,
	form: NodeId,
	settings: FormSettings,
	renderer: Box<dyn FieldRenderer>,
	registry: FieldRegistry,
	binder: Binder,
	on_submit: SubmitCallback,
	phase: FormPhase,
	submit_listener: Option<ListenerId>,
	last_outcome: Option<SubmitOutcome>,
	destroyed: bool,
}

impl FormState {
	fn ensure_live(&self, doc: &Document) -> FormResult<()> {
		if self.destroyed {
			return Err(FormError::Destroyed);
		}
		if doc.id() != self.document {
			return Err(FormError::ForeignDocument(self.form));
		}
		Ok(())
	}

	/// Render `declarations`, append the result to the form and register
	/// the bindable names. With `columns` the slots go into a single row.
	fn append_rendered(
		&mut self,
		doc: &mut Document,
		declarations: &[FieldDeclaration],
		columns: bool,
	) -> FormResult<()> {
		for declaration in declarations {
			declaration.check()?;
		}

		let mut slots = Vec::with_capacity(declarations.len());
		for declaration in declarations {
			let rendered = declaration
				.data
				.as_ref()
				.map(|spec| self.renderer.render(declaration.kind, spec));
			if let Some(spec) = &declaration.data
				&& declaration.kind.is_bindable()
				&& self.registry.register(spec.name.as_str())
			{
				tracing::debug!(field = %spec.name, kind = %declaration.kind, "field registered");
			}
			slots.push(rendered);
		}

		if columns {
			let row = self.renderer.render_row(slots);
			let node = doc.instantiate(&row);
			doc.append_child(self.form, node);
		} else {
			for control in slots.into_iter().flatten() {
				let node = doc.instantiate(&control);
				doc.append_child(self.form, node);
			}
		}
		Ok(())
	}
}

/// Controller of one attached form
///
/// Cloning yields another handle to the same form. Obtain controllers
/// through [`FormAttachments::attach`](crate::FormAttachments::attach).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tieforms_dom::Document;
/// use tieforms_forms::{BindingSource, FieldDeclaration, FieldSpec, FormAttachments, FormOptions};
///
/// let mut doc = Document::new();
/// let form = doc.create_element("form");
/// let source = BindingSource::from_value(json!({"username": ""})).unwrap().shared();
///
/// let mut forms = FormAttachments::new();
/// let controller = forms
///     .attach(&mut doc, form, FormOptions::new().binding_source(source.clone()))
///     .unwrap();
/// controller
///     .add_fields(&mut doc, &[FieldDeclaration::text(FieldSpec::new("username", "User").required())])
///     .unwrap()
///     .add_bindings(&mut doc, [("username", "username")])
///     .unwrap();
///
/// let outcome = controller.submit(&mut doc);
/// assert!(!outcome.is_completed());
///
/// source.borrow_mut().set("username", "alice");
/// controller.reload(&mut doc).unwrap();
/// assert!(controller.submit(&mut doc).is_completed());
/// ```
#[derive(Clone)]
pub struct FormController {
	state: Rc<RefCell<FormState>>,
}

impl fmt::Debug for FormController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.state.try_borrow() {
			Ok(state) => f
				.debug_struct("FormController")
				.field("form", &state.form)
				.field("phase", &state.phase)
				.field("fields", &state.registry.len())
				.field("destroyed", &state.destroyed)
				.finish(),
			Err(_) => f.debug_struct("FormController").finish_non_exhaustive(),
		}
	}
}

impl FormController {
	/// Take over `form`: apply the form name and intercept submission
	pub(crate) fn new(doc: &mut Document, form: NodeId, options: FormOptions) -> FormResult<Self> {
		if doc.tag(form) != Some("form") {
			return Err(FormError::NotAForm(form));
		}

		let FormOptions {
			settings,
			binding_source,
			on_submit,
			renderer,
		} = options;

		if let Some(name) = &settings.form_name {
			doc.set_attribute(form, "name", name);
		}

		let renderer =
			renderer.unwrap_or_else(|| Box::new(BootstrapRenderer::new(settings.theme.clone())));
		let state = Rc::new(RefCell::new(FormState {
			document: doc.id(),
			form,
			settings,
			renderer,
			registry: FieldRegistry::new(),
			binder: Binder::new(form, binding_source),
			on_submit,
			phase: FormPhase::Idle,
			submit_listener: None,
			last_outcome: None,
			destroyed: false,
		}));

		let weak: Weak<RefCell<FormState>> = Rc::downgrade(&state);
		let listener = doc.add_event_listener(form, EventKind::Submit, move |doc, event| {
			event.prevent_default();
			let Some(state) = weak.upgrade() else {
				return;
			};
			let controller = FormController { state };
			let outcome = controller.process_submit(doc);
			if let Ok(mut state) = controller.state.try_borrow_mut() {
				state.last_outcome = Some(outcome);
			}
		});
		state.borrow_mut().submit_listener = Some(listener);

		tracing::debug!(%form, "form attached");
		Ok(Self { state })
	}

	/// The form element this controller is attached to
	pub fn form(&self) -> NodeId {
		self.state.borrow().form
	}

	/// The document the form lives in
	pub fn document(&self) -> DocumentId {
		self.state.borrow().document
	}

	pub fn binding_source(&self) -> SharedSource {
		Rc::clone(self.state.borrow().binder.source())
	}

	pub fn settings(&self) -> FormSettings {
		self.state.borrow().settings.clone()
	}

	pub fn phase(&self) -> FormPhase {
		self.state.borrow().phase
	}

	pub fn is_destroyed(&self) -> bool {
		self.state.borrow().destroyed
	}

	/// Registered fields in declaration order
	pub fn fields(&self) -> Vec<FieldRegistryEntry> {
		self.state.borrow().registry.list().cloned().collect()
	}

	/// Render and append fields in order. Declarations without data are
	/// skipped; buttons are rendered but not registered.
	///
	/// The whole list is checked first; on error nothing is added.
	pub fn add_fields(&self, doc: &mut Document, fields: &[FieldDeclaration]) -> FormResult<&Self> {
		let mut state = self.state.borrow_mut();
		state.ensure_live(doc)?;
		state.append_rendered(doc, fields, false)?;
		Ok(self)
	}

	/// Render `columns` side by side in one row. An empty list adds nothing.
	pub fn add_columns(&self, doc: &mut Document, columns: &[FieldDeclaration]) -> FormResult<&Self> {
		let mut state = self.state.borrow_mut();
		state.ensure_live(doc)?;
		if columns.is_empty() {
			return Ok(self);
		}
		state.append_rendered(doc, columns, true)?;
		Ok(self)
	}

	/// Bind each `(field, property)` pair in order.
	///
	/// Every field must be registered and rendered; otherwise the call fails
	/// with [`FormError::UnknownField`] before any pair is bound.
	pub fn add_bindings<I, F, P>(&self, doc: &mut Document, bindings: I) -> FormResult<&Self>
	where
		I: IntoIterator<Item = (F, P)>,
		F: AsRef<str>,
		P: AsRef<str>,
	{
		let bindings: Vec<(F, P)> = bindings.into_iter().collect();
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;
		state.ensure_live(doc)?;
		for (field, _) in &bindings {
			state.binder.controls(doc, &state.registry, field.as_ref())?;
		}
		for (field, property) in &bindings {
			state
				.binder
				.bind(doc, &mut state.registry, field.as_ref(), property.as_ref())?;
		}
		Ok(self)
	}

	/// Remove the binding of one field
	pub fn unbind(&self, doc: &mut Document, field: &str) -> FormResult<&Self> {
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;
		state.ensure_live(doc)?;
		state.binder.unbind(doc, &mut state.registry, field)?;
		Ok(self)
	}

	/// Push the current binding source values into every bound control
	pub fn reload(&self, doc: &mut Document) -> FormResult<&Self> {
		let state = self.state.borrow();
		state.ensure_live(doc)?;
		state.binder.reload(doc, &state.registry);
		Ok(self)
	}

	/// Run a validation pass without touching the document
	pub fn validate(&self, doc: &Document) -> FormResult<ValidationResult> {
		let state = self.state.borrow();
		state.ensure_live(doc)?;
		Ok(Validator::validate(
			state.registry.list(),
			&DocumentControls::new(doc, state.form),
		))
	}

	/// Submit the form through the platform submit event and report what
	/// the controller did with it
	pub fn submit(&self, doc: &mut Document) -> SubmitOutcome {
		let form = {
			let Ok(state) = self.state.try_borrow() else {
				return SubmitOutcome::Busy;
			};
			if state.destroyed || doc.id() != state.document {
				return SubmitOutcome::Inert;
			}
			state.form
		};
		if !doc.contains(form) {
			return SubmitOutcome::Inert;
		}

		doc.submit(form);

		match self.state.try_borrow_mut() {
			Ok(mut state) => state.last_outcome.take().unwrap_or(SubmitOutcome::Busy),
			Err(_) => SubmitOutcome::Busy,
		}
	}

	fn process_submit(&self, doc: &mut Document) -> SubmitOutcome {
		let (result, callback) = {
			let Ok(mut state) = self.state.try_borrow_mut() else {
				tracing::warn!("submit while form state is in use, ignored");
				return SubmitOutcome::Busy;
			};
			if state.destroyed {
				return SubmitOutcome::Inert;
			}
			if state.phase == FormPhase::SubmitPending {
				tracing::warn!(form = %state.form, "re-entrant submit ignored");
				return SubmitOutcome::Busy;
			}
			state.phase = FormPhase::SubmitPending;

			clear_markers(doc, state.form, &state.settings);
			let result = Validator::validate(
				state.registry.list(),
				&DocumentControls::new(doc, state.form),
			);
			if !result.is_valid() {
				mark_failures(doc, state.form, &result, &state.settings);
				state.phase = FormPhase::Idle;
				tracing::debug!(form = %state.form, failed = result.failed_fields().len(), "submit rejected");
				return SubmitOutcome::Rejected(result);
			}
			(result, Rc::clone(&state.on_submit))
		};

		callback();

		if let Ok(mut state) = self.state.try_borrow_mut() {
			state.phase = FormPhase::Idle;
			tracing::debug!(form = %state.form, "submit completed");
		}
		SubmitOutcome::Completed(result)
	}

	/// Apply a declarative schema: every section in order, then the
	/// bindings.
	///
	/// Declarations and binding targets are checked up front, so a schema
	/// that fails leaves the form as it was.
	pub fn apply_schema(&self, doc: &mut Document, schema: &FormSchema) -> FormResult<&Self> {
		{
			let state = self.state.borrow();
			state.ensure_live(doc)?;
			let declarations = schema.sections.iter().flat_map(|section| match section {
				FormSection::Fields(fields) | FormSection::Columns(fields) => fields.iter(),
			});
			let mut declared = HashSet::new();
			for declaration in declarations {
				declaration.check()?;
				if let Some(spec) = &declaration.data
					&& declaration.kind.is_bindable()
				{
					declared.insert(spec.name.as_str());
				}
			}
			for (field, _) in &schema.bindings {
				if declared.contains(field.as_str()) {
					continue;
				}
				state.binder.controls(doc, &state.registry, field)?;
			}
		}

		for section in &schema.sections {
			match section {
				FormSection::Fields(fields) => self.add_fields(doc, fields)?,
				FormSection::Columns(columns) => self.add_columns(doc, columns)?,
			};
		}
		self.add_bindings(
			doc,
			schema
				.bindings
				.iter()
				.map(|(field, property)| (field.as_str(), property.as_str())),
		)
	}

	/// Stop intercepting submission and dispose every binding listener.
	///
	/// Rendered markup stays in the document. Calling this twice is
	/// harmless.
	pub fn destroy(&self, doc: &mut Document) {
		let mut state = self.state.borrow_mut();
		if state.destroyed {
			return;
		}
		if doc.id() != state.document {
			tracing::warn!(form = %state.form, "destroy called with another document, ignored");
			return;
		}
		if let Some(listener) = state.submit_listener.take() {
			doc.remove_event_listener(listener);
		}
		state.binder.dispose(doc);
		state.destroyed = true;
		state.phase = FormPhase::Idle;
		tracing::debug!(form = %state.form, "form destroyed");
	}
}
