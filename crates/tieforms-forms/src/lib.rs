//! Declarative forms with two-way binding and validation
//!
//! This crate renders form fields from declarations, binds them to a shared
//! property bag and validates them before letting a submission through:
//! - Field registry tracking declared fields and their bound properties
//! - Pluggable field rendering with Bootstrap 3 markup by default
//! - Two-way binding with explicit checkbox and radio coercion rules
//! - Required, numeric and email validation with error decoration
//! - Attach registry keyed by form node, with teardown of every listener
//! - Settings from TOML or JSON and whole-form schemas from JSON

pub mod attach;
pub mod attributes;
pub mod binding;
pub mod decoration;
pub mod error;
pub mod field;
pub mod form;
pub mod registry;
pub mod rendering;
pub mod schema;
pub mod settings;
pub mod validation;
pub mod validators;

pub use attach::FormAttachments;
pub use attributes::parse_attribute_list;
pub use binding::{Binder, BindingSource, SharedSource};
pub use error::{FormError, FormResult};
pub use field::{FieldDeclaration, FieldKind, FieldSpec};
pub use form::{FormController, FormPhase, SubmitOutcome};
pub use registry::{FieldRegistry, FieldRegistryEntry};
pub use rendering::{BootstrapRenderer, ControlDescription, FieldRenderer};
pub use schema::{FormSchema, FormSection};
pub use settings::{DEFAULT_ERROR_MESSAGE, FormOptions, FormSettings, SubmitCallback, ThemeClasses};
pub use validation::{ControlLookup, ControlState, DocumentControls, ValidationResult, Validator};
pub use validators::FieldRule;
