//! Form configuration
//!
//! [`FormSettings`] is the serializable part of a form's configuration: the
//! form name, the error banner text and the CSS classes used by the renderer
//! and the error decorator. [`FormOptions`] adds the runtime pieces (binding
//! source, completion callback, renderer) that cannot be loaded from a file.

use crate::binding::{BindingSource, SharedSource};
use crate::error::{FormError, FormResult};
use crate::rendering::FieldRenderer;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Banner text shown above a form that failed validation
pub const DEFAULT_ERROR_MESSAGE: &str = "Please correct the errors highlighted in the form";

/// CSS classes emitted by the renderer and the error decorator.
///
/// Defaults follow Bootstrap 3 markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeClasses {
	/// Container of a text-like field
	pub form_group: String,
	/// Label of any field
	pub label: String,
	/// Text-like `<input>` controls
	pub input: String,
	/// Container of a checkbox
	pub checkbox: String,
	/// Container of a radio button
	pub radio: String,
	pub button: String,
	pub row: String,
	/// One half-width slot of a column row
	pub column: String,
	/// Error banner
	pub alert: String,
	/// Added to the container of a failed field
	pub field_error: String,
	/// Feedback glyph appended to the container of a failed field
	pub feedback: String,
}

impl Default for ThemeClasses {
	fn default() -> Self {
		Self {
			form_group: "form-group".to_string(),
			label: "control-label".to_string(),
			input: "form-control".to_string(),
			checkbox: "checkbox".to_string(),
			radio: "radio".to_string(),
			button: "btn btn-default".to_string(),
			row: "row".to_string(),
			column: "col-md-6".to_string(),
			alert: "alert alert-danger".to_string(),
			field_error: "has-error has-feedback".to_string(),
			feedback: "fa fa-times form-control-feedback".to_string(),
		}
	}
}

/// Serializable form settings
///
/// # Examples
///
/// ```
/// use tieforms_forms::FormSettings;
///
/// let settings = FormSettings::from_toml_str(r#"
/// form_name = "signup"
///
/// [theme]
/// column = "col-sm-6"
/// "#).unwrap();
///
/// assert_eq!(settings.form_name.as_deref(), Some("signup"));
/// assert_eq!(settings.theme.column, "col-sm-6");
/// assert_eq!(settings.theme.row, "row");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Written to the form element's `name` attribute when set
	pub form_name: Option<String>,
	pub error_message: String,
	pub theme: ThemeClasses,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			form_name: None,
			error_message: DEFAULT_ERROR_MESSAGE.to_string(),
			theme: ThemeClasses::default(),
		}
	}
}

impl FormSettings {
	pub fn from_toml_str(source: &str) -> FormResult<Self> {
		toml::from_str(source).map_err(|e| FormError::Settings(e.to_string()))
	}

	pub fn from_json_str(source: &str) -> FormResult<Self> {
		serde_json::from_str(source).map_err(|e| FormError::Settings(e.to_string()))
	}
}

/// Zero-argument callback run after a successful validation
pub type SubmitCallback = Rc<dyn Fn()>;

/// Options recognized when attaching a form
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tieforms_forms::{BindingSource, FormOptions};
///
/// let submitted = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&submitted);
///
/// let options = FormOptions::new()
///     .form_name("profile")
///     .binding_source(BindingSource::new().shared())
///     .on_submit(move || flag.set(true));
///
/// assert_eq!(options.settings_ref().form_name.as_deref(), Some("profile"));
/// ```
pub struct FormOptions {
	pub(crate) settings: FormSettings,
	pub(crate) binding_source: SharedSource,
	pub(crate) on_submit: SubmitCallback,
	pub(crate) renderer: Option<Box<dyn FieldRenderer>>,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			settings: FormSettings::default(),
			binding_source: Rc::new(RefCell::new(BindingSource::new())),
			on_submit: Rc::new(|| {}),
			renderer: None,
		}
	}
}

impl fmt::Debug for FormOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormOptions")
			.field("settings", &self.settings)
			.field("binding_source", &self.binding_source)
			.field("custom_renderer", &self.renderer.is_some())
			.finish_non_exhaustive()
	}
}

impl FormOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn form_name(mut self, name: impl Into<String>) -> Self {
		self.settings.form_name = Some(name.into());
		self
	}

	/// Object the form's fields are bound against
	pub fn binding_source(mut self, source: SharedSource) -> Self {
		self.binding_source = source;
		self
	}

	pub fn on_submit<F>(mut self, callback: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.on_submit = Rc::new(callback);
		self
	}

	/// Replace all serializable settings. A form name set earlier through
	/// [`FormOptions::form_name`] is kept when `settings` has none.
	pub fn settings(mut self, settings: FormSettings) -> Self {
		let form_name = settings.form_name.clone().or(self.settings.form_name.take());
		self.settings = FormSettings {
			form_name,
			..settings
		};
		self
	}

	pub fn renderer(mut self, renderer: impl FieldRenderer + 'static) -> Self {
		self.renderer = Some(Box::new(renderer));
		self
	}

	pub fn settings_ref(&self) -> &FormSettings {
		&self.settings
	}
}
