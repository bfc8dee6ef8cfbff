//! Form Lifecycle Integration Tests
//!
//! Tests attaching, the submit cycle, schemas, settings and teardown.
//!
//! Test Categories:
//! - Category 1: End-to-end submit cycle
//! - Category 2: Attach registry
//! - Category 3: Schema and settings
//! - Category 4: Teardown

use rstest::rstest;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use tieforms_dom::{Document, ElementTemplate, EventKind};
use tieforms_forms::{
	BindingSource, ControlDescription, FieldDeclaration, FieldKind, FieldRenderer, FieldSpec,
	FormAttachments, FormError, FormOptions, FormPhase, FormSchema, FormSettings, SubmitOutcome,
};

// ============================================================================
// Category 1: End-to-end submit cycle
// ============================================================================

/// Tests the username/age scenario: first submit fails on username, a fixed
/// username submits exactly once
#[rstest]
fn test_end_to_end_username_and_age() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let source = BindingSource::from_value(json!({"username": "", "age": "30"}))
		.unwrap()
		.shared();
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);
	let mut forms = FormAttachments::new();
	let controller = forms
		.attach(
			&mut doc,
			form,
			FormOptions::new()
				.binding_source(source.clone())
				.on_submit(move || counter.set(counter.get() + 1)),
		)
		.unwrap();
	controller
		.add_fields(
			&mut doc,
			&[
				FieldDeclaration::text(FieldSpec::new("username", "Username").required()),
				FieldDeclaration::number(FieldSpec::new("age", "Age")),
			],
		)
		.unwrap()
		.add_bindings(&mut doc, [("username", "username"), ("age", "age")])
		.unwrap();

	// Act
	let first = controller.submit(&mut doc);
	let username = doc.inputs_named(form, "username")[0];
	doc.input_text(username, "alice");
	let second = controller.submit(&mut doc);

	// Assert
	let rejected = first.validation().unwrap();
	assert!(matches!(first, SubmitOutcome::Rejected(_)));
	assert_eq!(rejected.failed_fields().collect::<Vec<_>>(), vec!["username"]);
	assert!(second.is_completed());
	assert_eq!(calls.get(), 1);
	assert_eq!(source.borrow().get("username"), Some(&json!("alice")));
	assert_eq!(controller.phase(), FormPhase::Idle);
}

/// Tests that the platform submit signal drives the cycle and is always prevented
#[rstest]
fn test_platform_submit_is_intercepted() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);
	FormAttachments::new()
		.attach(
			&mut doc,
			form,
			FormOptions::new().on_submit(move || counter.set(counter.get() + 1)),
		)
		.unwrap();

	// Act
	let proceeded = doc.submit(form);

	// Assert
	assert!(!proceeded);
	assert_eq!(calls.get(), 1);
}

// ============================================================================
// Category 2: Attach registry
// ============================================================================

/// Tests that re-attaching is a no-op
#[rstest]
fn test_reattach_is_idempotent() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let calls = Rc::new(Cell::new(0));
	let mut forms = FormAttachments::new();
	let first_counter = Rc::clone(&calls);
	let second_counter = Rc::clone(&calls);

	// Act
	forms
		.attach(
			&mut doc,
			form,
			FormOptions::new().on_submit(move || first_counter.set(first_counter.get() + 1)),
		)
		.unwrap();
	forms
		.attach(
			&mut doc,
			form,
			FormOptions::new().on_submit(move || second_counter.set(second_counter.get() + 10)),
		)
		.unwrap();
	doc.submit(form);

	// Assert
	assert_eq!(forms.len(), 1);
	assert_eq!(doc.listener_count(form, EventKind::Submit), 1);
	assert_eq!(calls.get(), 1);
}

/// Tests that two forms keep separate registries
#[rstest]
fn test_forms_are_independent() {
	// Arrange
	let mut doc = Document::new();
	let page = doc.create_element("body");
	let first = doc.create_element("form");
	let second = doc.create_element("form");
	doc.append_child(page, first);
	doc.append_child(page, second);
	let mut forms = FormAttachments::new();
	let a = forms.attach(&mut doc, first, FormOptions::new()).unwrap();
	let b = forms.attach(&mut doc, second, FormOptions::new()).unwrap();

	// Act
	a.add_fields(
		&mut doc,
		&[FieldDeclaration::text(FieldSpec::new("name", "Name").required())],
	)
	.unwrap();

	// Assert
	assert_eq!(a.fields().len(), 1);
	assert!(b.fields().is_empty());
	assert!(b.submit(&mut doc).is_completed());
	assert!(!a.submit(&mut doc).is_completed());
}

/// Tests that forms of two documents get their own controllers even when
/// their node handles are equal
#[rstest]
fn test_forms_in_separate_documents() {
	// Arrange
	let mut first_doc = Document::new();
	let mut second_doc = Document::new();
	let first = first_doc.create_element("form");
	let second = second_doc.create_element("form");
	let calls = Rc::new(Cell::new(0));
	let counter = Rc::clone(&calls);
	let mut forms = FormAttachments::new();
	forms
		.attach(&mut first_doc, first, FormOptions::new().form_name("first"))
		.unwrap();
	let controller = forms
		.attach(
			&mut second_doc,
			second,
			FormOptions::new()
				.form_name("second")
				.on_submit(move || counter.set(counter.get() + 1)),
		)
		.unwrap();

	// Act
	let proceeded = second_doc.submit(second);
	let outcome = controller.submit(&mut second_doc);
	let foreign = controller.submit(&mut first_doc);

	// Assert
	assert_eq!(first, second);
	assert_eq!(second_doc.attribute(second, "name"), Some("second"));
	assert!(!proceeded);
	assert!(outcome.is_completed());
	assert_eq!(foreign, SubmitOutcome::Inert);
	assert_eq!(calls.get(), 2);
	assert_eq!(first_doc.attribute(first, "name"), Some("first"));
}

// ============================================================================
// Category 3: Schema and settings
// ============================================================================

/// Tests that a schema binding an undeclared field changes nothing
#[rstest]
fn test_failed_schema_leaves_form_untouched() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new())
		.unwrap();
	let schema = FormSchema::from_json_str(
		r#"{
			"sections": [
				{"fields": [{"type": "text", "data": {"name": "a", "label": "A"}}]},
				{"columns": [{"type": "number", "data": {"name": "b", "label": "B"}}]}
			],
			"bindings": [{"ghost": "a"}]
		}"#,
	)
	.unwrap();

	// Act
	let result = controller.apply_schema(&mut doc, &schema);

	// Assert
	assert!(matches!(result, Err(FormError::UnknownField(ref name)) if name == "ghost"));
	assert!(controller.fields().is_empty());
	assert!(doc.children(form).is_empty());
}

/// Tests applying a JSON schema with fields, columns and bindings
#[rstest]
fn test_apply_schema() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let source = BindingSource::from_value(json!({"first": "Ada", "last": "Lovelace", "news": 1}))
		.unwrap()
		.shared();
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new().binding_source(source))
		.unwrap();
	let schema = FormSchema::from_json_str(
		r#"{
			"sections": [
				{"columns": [
					{"type": "text", "data": {"name": "first", "label": "First", "required": true}},
					{"type": "text", "data": {"name": "last", "label": "Last"}}
				]},
				{"fields": [
					{"type": "checkbox", "data": {"name": "news", "label": "Newsletter"}},
					{"type": "button", "data": {"label": "Save", "css": "pull-right"}}
				]}
			],
			"bindings": [{"first": "first", "last": "last"}, {"news": "news"}]
		}"#,
	)
	.unwrap();

	// Act
	controller.apply_schema(&mut doc, &schema).unwrap();

	// Assert
	let names: Vec<_> = controller
		.fields()
		.iter()
		.map(|entry| entry.name().to_string())
		.collect();
	assert_eq!(names, vec!["first", "last", "news"]);
	assert!(controller.fields().iter().all(|entry| entry.is_bound()));
	assert_eq!(doc.value(doc.inputs_named(form, "last")[0]), "Lovelace");
	assert!(doc.is_checked(doc.inputs_named(form, "news")[0]));
	assert!(doc.to_html(form).contains(r#"<button type="button" class="btn btn-default pull-right">Save</button>"#));
}

/// Tests that settings loaded from TOML drive the name, banner and classes
#[rstest]
fn test_settings_from_toml() {
	// Arrange
	let settings = FormSettings::from_toml_str(
		r#"
		form_name = "signup"
		error_message = "Bitte beheben Sie die im Formular hervorgehobenen Fehler"

		[theme]
		field_error = "is-invalid"
		alert = "alert alert-warning"
		"#,
	)
	.unwrap();
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new().settings(settings))
		.unwrap();
	controller
		.add_fields(
			&mut doc,
			&[FieldDeclaration::text(FieldSpec::new("name", "Name").required())],
		)
		.unwrap();

	// Act
	controller.submit(&mut doc);

	// Assert
	let banner = doc.children(form)[0];
	assert_eq!(doc.attribute(form, "name"), Some("signup"));
	assert!(doc.has_classes(banner, "alert alert-warning"));
	assert_eq!(
		doc.text_content(banner),
		"Bitte beheben Sie die im Formular hervorgehobenen Fehler"
	);
	assert_eq!(doc.elements_with_classes(form, "is-invalid").len(), 1);
}

struct PlainRenderer;

impl FieldRenderer for PlainRenderer {
	fn render(&self, kind: FieldKind, spec: &FieldSpec) -> ControlDescription {
		let mut input = ElementTemplate::new("input")
			.attr("type", kind.as_str())
			.attr("name", spec.name.as_str());
		if spec.required {
			input = input.flag("required");
		}
		ElementTemplate::new("p").child(input)
	}

	fn render_row(&self, slots: Vec<Option<ControlDescription>>) -> ControlDescription {
		slots
			.into_iter()
			.flatten()
			.fold(ElementTemplate::new("section"), ElementTemplate::child)
	}
}

/// Tests that a custom renderer is used for fields and columns
#[rstest]
fn test_custom_renderer() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new().renderer(PlainRenderer))
		.unwrap();

	// Act
	controller
		.add_fields(&mut doc, &[FieldDeclaration::email(FieldSpec::new("email", "Email"))])
		.unwrap()
		.add_columns(
			&mut doc,
			&[
				FieldDeclaration::text(FieldSpec::new("a", "A")),
				FieldDeclaration::text(FieldSpec::new("b", "B")),
			],
		)
		.unwrap();

	// Assert
	assert_eq!(
		doc.to_html(form),
		r#"<form><p><input type="email" name="email" /></p><section><p><input type="text" name="a" /></p><p><input type="text" name="b" /></p></section></form>"#
	);
	assert!(controller.validate(&doc).unwrap().is_failed("email"));
}

/// Tests that an unknown field kind in a schema is reported
#[rstest]
fn test_schema_with_unsupported_kind() {
	// Act
	let result = FormSchema::from_json_str(
		r#"{"sections": [{"fields": [{"type": "textarea", "data": {"name": "bio"}}]}]}"#,
	);

	// Assert
	assert!(matches!(result, Err(FormError::UnsupportedFieldKind(ref kind)) if kind == "textarea"));
}

// ============================================================================
// Category 4: Teardown
// ============================================================================

/// Tests that detaching disposes every listener and stops writes
#[rstest]
fn test_detach_disposes_all_listeners() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let source = BindingSource::from_value(json!({"name": "", "flag": 0}))
		.unwrap()
		.shared();
	let mut forms = FormAttachments::new();
	let controller = forms
		.attach(&mut doc, form, FormOptions::new().binding_source(source.clone()))
		.unwrap();
	controller
		.add_fields(
			&mut doc,
			&[
				FieldDeclaration::text(FieldSpec::new("name", "Name")),
				FieldDeclaration::checkbox(FieldSpec::new("flag", "Flag")),
			],
		)
		.unwrap()
		.add_bindings(&mut doc, [("name", "name"), ("flag", "flag")])
		.unwrap();
	let name = doc.inputs_named(form, "name")[0];

	// Act
	assert!(forms.detach(&mut doc, form));
	doc.input_text(name, "after teardown");

	// Assert
	assert_eq!(doc.total_listeners(), 0);
	assert_eq!(source.borrow().get("name"), Some(&json!("")));
	assert!(doc.submit(form));
	assert_eq!(controller.submit(&mut doc), SubmitOutcome::Inert);
	assert!(matches!(
		controller.add_bindings(&mut doc, [("name", "name")]),
		Err(FormError::Destroyed)
	));
}

/// Tests that a form removed from the document is inert
#[rstest]
fn test_removed_form_is_inert() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new())
		.unwrap();

	// Act
	doc.remove(form);

	// Assert
	assert_eq!(controller.submit(&mut doc), SubmitOutcome::Inert);
}

/// Tests that a data-less declaration in columns keeps an empty slot
#[rstest]
fn test_columns_with_empty_slot() {
	// Arrange
	let mut doc = Document::new();
	let form = doc.create_element("form");
	let controller = FormAttachments::new()
		.attach(&mut doc, form, FormOptions::new())
		.unwrap();

	// Act
	controller
		.add_columns(
			&mut doc,
			&[
				FieldDeclaration::text(FieldSpec::new("a", "A")),
				FieldDeclaration::without_data(FieldKind::Text),
			],
		)
		.unwrap();

	// Assert
	let row = doc.children(form)[0];
	let slots = doc.children(row).to_vec();
	assert_eq!(slots.len(), 2);
	assert!(doc.children(slots[1]).is_empty());
	assert_eq!(controller.fields().len(), 1);
}
