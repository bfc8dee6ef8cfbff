//! # Tieforms
//!
//! Describe a form as data, render it, bind it two-way to a host object and
//! validate it before the submission goes through.
//!
//! ## Feature Flags
//!
//! - `dom` - In-memory document model the forms render into
//! - `forms` - Field registry, renderer, binder, validator and form controller
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tieforms::prelude::*;
//!
//! let mut doc = Document::new();
//! let form = doc.create_element("form");
//! let source = BindingSource::from_value(json!({"username": "", "age": "30"}))
//!     .unwrap()
//!     .shared();
//! let sent = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&sent);
//!
//! let mut forms = FormAttachments::new();
//! let controller = forms
//!     .attach(
//!         &mut doc,
//!         form,
//!         FormOptions::new()
//!             .binding_source(source.clone())
//!             .on_submit(move || counter.set(counter.get() + 1)),
//!     )
//!     .unwrap();
//!
//! controller
//!     .add_fields(
//!         &mut doc,
//!         &[
//!             FieldDeclaration::text(FieldSpec::new("username", "User").required()),
//!             FieldDeclaration::number(FieldSpec::new("age", "Age")),
//!         ],
//!     )
//!     .unwrap()
//!     .add_bindings(&mut doc, [("username", "username"), ("age", "age")])
//!     .unwrap();
//!
//! assert!(!doc.submit(form));
//! assert_eq!(sent.get(), 0);
//!
//! let username = doc.inputs_named(form, "username")[0];
//! doc.input_text(username, "alice");
//! doc.submit(form);
//!
//! assert_eq!(sent.get(), 1);
//! assert_eq!(source.borrow().get("username"), Some(&json!("alice")));
//! ```

#[cfg(feature = "dom")]
pub mod dom;
#[cfg(feature = "forms")]
pub mod forms;

pub use serde_json::{Value, json};

pub mod prelude {
	// External
	pub use serde_json::{Value, json};

	// Document model
	#[cfg(feature = "dom")]
	pub use crate::dom::{Document, DocumentId, ElementTemplate, Event, EventKind, ListenerId, NodeId};

	// Forms
	#[cfg(feature = "forms")]
	pub use crate::forms::{
		BindingSource, BootstrapRenderer, FieldDeclaration, FieldKind, FieldRenderer, FieldSpec,
		FormAttachments, FormController, FormError, FormOptions, FormPhase, FormResult, FormSchema,
		FormSettings, SharedSource, SubmitOutcome, ValidationResult,
	};
}
