//! Attach API
//!
//! [`FormAttachments`] maps form nodes to their controllers, so attaching
//! the same node twice hands back the controller created the first time.
//! Nodes are keyed together with their document, so one registry can serve
//! several documents.

use crate::error::FormResult;
use crate::form::FormController;
use crate::settings::FormOptions;
use std::collections::HashMap;
use tieforms_dom::{Document, DocumentId, NodeId};

/// Registry of attached forms
///
/// Entries whose form node has been removed from its document are dropped
/// the next time a form of that document is attached.
///
/// # Examples
///
/// ```
/// use tieforms_dom::Document;
/// use tieforms_forms::{FormAttachments, FormOptions};
///
/// let mut doc = Document::new();
/// let form = doc.create_element("form");
/// let mut forms = FormAttachments::new();
///
/// forms.attach(&mut doc, form, FormOptions::new().form_name("first")).unwrap();
/// forms.attach(&mut doc, form, FormOptions::new().form_name("second")).unwrap();
///
/// assert_eq!(forms.len(), 1);
/// assert_eq!(doc.attribute(form, "name"), Some("first"));
/// ```
#[derive(Debug, Default)]
pub struct FormAttachments {
	controllers: HashMap<(DocumentId, NodeId), FormController>,
}

impl FormAttachments {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach a controller to `form`, or return the one already attached.
	///
	/// `options` are ignored when the node is already attached.
	pub fn attach(
		&mut self,
		doc: &mut Document,
		form: NodeId,
		options: FormOptions,
	) -> FormResult<FormController> {
		self.prune_removed(doc);
		let key = (doc.id(), form);
		if let Some(controller) = self.controllers.get(&key) {
			tracing::debug!(document = %key.0, %form, "form already attached");
			return Ok(controller.clone());
		}
		let controller = FormController::new(doc, form, options)?;
		self.controllers.insert(key, controller.clone());
		Ok(controller)
	}

	fn prune_removed(&mut self, doc: &mut Document) {
		let document = doc.id();
		let removed: Vec<_> = self
			.controllers
			.keys()
			.filter(|(owner, form)| *owner == document && !doc.contains(*form))
			.copied()
			.collect();
		for key in removed {
			if let Some(controller) = self.controllers.remove(&key) {
				controller.destroy(doc);
				tracing::debug!(document = %key.0, form = %key.1, "dropped controller of removed form");
			}
		}
	}

	pub fn get(&self, doc: &Document, form: NodeId) -> Option<&FormController> {
		self.controllers.get(&(doc.id(), form))
	}

	pub fn is_attached(&self, doc: &Document, form: NodeId) -> bool {
		self.controllers.contains_key(&(doc.id(), form))
	}

	/// Destroy and forget the controller of `form`. Returns `false` if the
	/// node was not attached.
	pub fn detach(&mut self, doc: &mut Document, form: NodeId) -> bool {
		match self.controllers.remove(&(doc.id(), form)) {
			Some(controller) => {
				controller.destroy(doc);
				true
			}
			None => false,
		}
	}

	pub fn len(&self) -> usize {
		self.controllers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.controllers.is_empty()
	}
}
