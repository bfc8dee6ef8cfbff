//! Field rendering
//!
//! A [`FieldRenderer`] turns a field declaration into a
//! [`ControlDescription`] without touching any document. The form controller
//! instantiates the description and appends it to the form.
//!
//! [`BootstrapRenderer`] produces Bootstrap 3 markup:
//!
//! | Kind | Markup |
//! |------|--------|
//! | text, number, time, email, password | `div.form-group > label.control-label + input.form-control` |
//! | checkbox | `div.checkbox > label.control-label > input + label text` |
//! | radio | `div.radio > label.control-label > input[value] + label text` |
//! | button | `button.btn.btn-default` |

use crate::field::{FieldKind, FieldSpec};
use crate::settings::ThemeClasses;
use tieforms_dom::ElementTemplate;

/// Renderer output: a detached element tree
pub type ControlDescription = ElementTemplate;

/// Turns field declarations into control descriptions
pub trait FieldRenderer {
	/// Render one field.
	///
	/// Bindable kinds must produce an `<input>` whose `name` equals
	/// `spec.name`; binding and validation locate controls that way.
	fn render(&self, kind: FieldKind, spec: &FieldSpec) -> ControlDescription;

	/// Wrap already rendered slots in a row. `None` slots stay empty.
	fn render_row(&self, slots: Vec<Option<ControlDescription>>) -> ControlDescription;
}

/// Default renderer, parameterized by theme classes
///
/// # Examples
///
/// ```
/// use tieforms_forms::{BootstrapRenderer, FieldKind, FieldRenderer, FieldSpec};
///
/// let renderer = BootstrapRenderer::default();
/// let html = renderer
///     .render(FieldKind::Text, &FieldSpec::new("username", "User").required())
///     .to_html();
///
/// assert_eq!(
///     html,
///     r#"<div class="form-group"><label class="control-label">User:</label><input type="text" name="username" class="form-control" required /></div>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct BootstrapRenderer {
	theme: ThemeClasses,
}

impl BootstrapRenderer {
	pub fn new(theme: ThemeClasses) -> Self {
		Self { theme }
	}

	pub fn theme(&self) -> &ThemeClasses {
		&self.theme
	}

	fn input(&self, kind: FieldKind, spec: &FieldSpec) -> ElementTemplate {
		let mut input = ElementTemplate::new("input")
			.attr("type", kind.as_str())
			.attr("name", spec.name.as_str());
		if kind == FieldKind::Radio
			&& let Some(value) = &spec.value
		{
			input = input.attr("value", value.as_str());
		}
		if kind.is_text_like() {
			input = input.class(&self.theme.input);
		}
		if let Some(css) = &spec.css_classes {
			input = input.class(css);
		}
		if kind.is_text_like()
			&& let Some(placeholder) = &spec.placeholder
		{
			input = input.attr("placeholder", placeholder.as_str());
		}
		if spec.required {
			input = input.flag("required");
		}
		for (name, value) in &spec.extra_attributes {
			// the control is located by its type and name
			if name == "type" || name == "name" {
				continue;
			}
			input = input.attr(name.as_str(), value.as_str());
		}
		input
	}

	fn labeled_input(&self, kind: FieldKind, spec: &FieldSpec) -> ElementTemplate {
		ElementTemplate::new("div")
			.class(&self.theme.form_group)
			.child(
				ElementTemplate::new("label")
					.class(&self.theme.label)
					.text(format!("{}:", spec.label)),
			)
			.child(self.input(kind, spec))
	}

	fn toggle(&self, kind: FieldKind, spec: &FieldSpec) -> ElementTemplate {
		let container = if kind == FieldKind::Radio {
			&self.theme.radio
		} else {
			&self.theme.checkbox
		};
		ElementTemplate::new("div").class(container).child(
			ElementTemplate::new("label")
				.class(&self.theme.label)
				.child(self.input(kind, spec))
				.text(spec.label.as_str()),
		)
	}

	fn button(&self, spec: &FieldSpec) -> ElementTemplate {
		let mut button = ElementTemplate::new("button")
			.attr("type", "button")
			.class(&self.theme.button);
		if let Some(css) = &spec.css_classes {
			button = button.class(css);
		}
		button.text(spec.label.as_str())
	}
}

impl FieldRenderer for BootstrapRenderer {
	fn render(&self, kind: FieldKind, spec: &FieldSpec) -> ControlDescription {
		match kind {
			FieldKind::Text
			| FieldKind::Number
			| FieldKind::Time
			| FieldKind::Email
			| FieldKind::Password => self.labeled_input(kind, spec),
			FieldKind::Checkbox | FieldKind::Radio => self.toggle(kind, spec),
			FieldKind::Button => self.button(spec),
		}
	}

	fn render_row(&self, slots: Vec<Option<ControlDescription>>) -> ControlDescription {
		slots
			.into_iter()
			.fold(ElementTemplate::new("div").class(&self.theme.row), |row, slot| {
				let column = ElementTemplate::new("div").class(&self.theme.column);
				row.child(match slot {
					Some(control) => column.child(control),
					None => column,
				})
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FieldKind::Number, "number")]
	#[case(FieldKind::Time, "time")]
	#[case(FieldKind::Email, "email")]
	#[case(FieldKind::Password, "password")]
	fn test_text_like_kinds_share_markup(#[case] kind: FieldKind, #[case] type_name: &str) {
		let renderer = BootstrapRenderer::default();

		let html = renderer.render(kind, &FieldSpec::new("f", "F")).to_html();

		assert_eq!(
			html,
			format!(
				r#"<div class="form-group"><label class="control-label">F:</label><input type="{type_name}" name="f" class="form-control" /></div>"#
			)
		);
	}

	#[rstest]
	fn test_text_merges_css_placeholder_and_attributes() {
		let renderer = BootstrapRenderer::default();
		let spec = FieldSpec::new("age", "Age")
			.with_css("input-sm")
			.with_placeholder("Years")
			.with_raw_attributes("min='0' required")
			.unwrap();

		let input = match &renderer.render(FieldKind::Number, &spec).children()[1] {
			tieforms_dom::TemplateChild::Element(input) => input.clone(),
			other => panic!("expected input element, got {other:?}"),
		};

		assert!(input.has_class("form-control"));
		assert!(input.has_class("input-sm"));
		assert_eq!(input.attribute("placeholder"), Some("Years"));
		assert_eq!(input.attribute("min"), Some("0"));
		assert!(input.has_attribute("required"));
	}

	#[rstest]
	fn test_checkbox_label_wraps_input() {
		let renderer = BootstrapRenderer::default();

		let html = renderer
			.render(FieldKind::Checkbox, &FieldSpec::new("flag", "Subscribe"))
			.to_html();

		assert_eq!(
			html,
			r#"<div class="checkbox"><label class="control-label"><input type="checkbox" name="flag" />Subscribe</label></div>"#
		);
	}

	#[rstest]
	fn test_radio_carries_value() {
		let renderer = BootstrapRenderer::default();

		let html = renderer
			.render(FieldKind::Radio, &FieldSpec::new("choice", "B").with_value("b"))
			.to_html();

		assert_eq!(
			html,
			r#"<div class="radio"><label class="control-label"><input type="radio" name="choice" value="b" />B</label></div>"#
		);
	}

	#[rstest]
	fn test_button_has_no_name() {
		let renderer = BootstrapRenderer::default();
		let spec = FieldSpec::new("go", "Send").with_css("pull-right");

		let html = renderer.render(FieldKind::Button, &spec).to_html();

		assert_eq!(
			html,
			r#"<button type="button" class="btn btn-default pull-right">Send</button>"#
		);
	}

	#[rstest]
	fn test_extra_type_and_name_are_ignored() {
		let renderer = BootstrapRenderer::default();
		let spec = FieldSpec::new("x", "X")
			.with_attribute("type", "hidden")
			.with_attribute("name", "y");

		let html = renderer.render(FieldKind::Text, &spec).to_html();

		assert!(html.contains(r#"<input type="text" name="x""#));
		assert!(!html.contains("hidden"));
	}

	#[rstest]
	fn test_row_keeps_empty_slots() {
		let renderer = BootstrapRenderer::default();
		let left = renderer.render(FieldKind::Text, &FieldSpec::new("a", "A"));

		let row = renderer.render_row(vec![Some(left), None]);

		assert_eq!(row.children().len(), 2);
		assert!(
			row.to_html()
				.ends_with(r#"<div class="col-md-6"></div></div>"#)
		);
		assert!(row.to_html().starts_with(r#"<div class="row"><div class="col-md-6"><div class="form-group">"#));
	}

	#[rstest]
	fn test_theme_classes_are_used() {
		let theme = ThemeClasses {
			form_group: "mb-3".to_string(),
			label: "form-label".to_string(),
			..ThemeClasses::default()
		};
		let renderer = BootstrapRenderer::new(theme);

		let html = renderer.render(FieldKind::Text, &FieldSpec::new("a", "A")).to_html();

		assert!(html.starts_with(r#"<div class="mb-3"><label class="form-label">A:</label>"#));
	}
}
