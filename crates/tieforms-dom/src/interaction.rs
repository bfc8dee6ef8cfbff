//! Simulated user interaction
//!
//! These methods stand in for the browser: they change a control the way a
//! user would and then deliver the event the platform would fire.

use crate::document::{Document, NodeId};
use crate::event::{Event, EventKind};

impl Document {
	/// Type `value` into a control and fire `change`
	pub fn input_text(&mut self, node: NodeId, value: impl Into<String>) -> Event {
		self.set_value(node, value);
		self.dispatch_event(node, EventKind::Change)
	}

	/// Flip a checkbox and fire `change`
	pub fn toggle_checkbox(&mut self, node: NodeId) -> Event {
		let checked = self.is_checked(node);
		self.set_checked(node, !checked);
		self.dispatch_event(node, EventKind::Change)
	}

	/// Check a radio button, uncheck the other radios sharing its name in
	/// the same form, and fire `change` on the selected radio
	///
	/// # Examples
	///
	/// ```
	/// use tieforms_dom::{Document, ElementTemplate};
	///
	/// let mut doc = Document::new();
	/// let form = doc.create_element("form");
	/// let radios: Vec<_> = ["a", "b"]
	///     .into_iter()
	///     .map(|value| {
	///         let radio = doc.instantiate(
	///             &ElementTemplate::new("input")
	///                 .attr("type", "radio")
	///                 .attr("name", "choice")
	///                 .attr("value", value),
	///         );
	///         doc.append_child(form, radio);
	///         radio
	///     })
	///     .collect();
	///
	/// doc.select_radio(radios[0]);
	/// doc.select_radio(radios[1]);
	///
	/// assert!(!doc.is_checked(radios[0]));
	/// assert!(doc.is_checked(radios[1]));
	/// ```
	pub fn select_radio(&mut self, node: NodeId) -> Event {
		if let Some(name) = self.attribute(node, "name").map(str::to_string) {
			let scope = self
				.closest(node, "form")
				.or_else(|| self.ancestors(node).last().copied())
				.unwrap_or(node);
			for sibling in self.inputs_named(scope, &name) {
				if sibling != node && self.attribute(sibling, "type") == Some("radio") {
					self.set_checked(sibling, false);
				}
			}
		}
		self.set_checked(node, true);
		self.dispatch_event(node, EventKind::Change)
	}

	/// Fire `submit` on a form.
	///
	/// Returns `true` when no listener prevented the default action, i.e.
	/// when the platform would go on to submit the form itself.
	pub fn submit(&mut self, form: NodeId) -> bool {
		!self.dispatch_event(form, EventKind::Submit).default_prevented()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::template::ElementTemplate;
	use rstest::rstest;
	use std::cell::RefCell;
	use std::rc::Rc;

	#[rstest]
	fn test_input_text_sets_value_and_fires_change() {
		let mut doc = Document::new();
		let input = doc.instantiate(&ElementTemplate::new("input").attr("type", "text"));
		let seen = Rc::new(RefCell::new(String::new()));

		let sink = Rc::clone(&seen);
		doc.add_event_listener(input, EventKind::Change, move |doc, event| {
			*sink.borrow_mut() = doc.value(event.target()).to_string();
		});
		doc.input_text(input, "alice");

		assert_eq!(*seen.borrow(), "alice");
	}

	#[rstest]
	fn test_toggle_checkbox_flips_state() {
		let mut doc = Document::new();
		let checkbox = doc.instantiate(&ElementTemplate::new("input").attr("type", "checkbox"));

		doc.toggle_checkbox(checkbox);
		assert!(doc.is_checked(checkbox));

		doc.toggle_checkbox(checkbox);
		assert!(!doc.is_checked(checkbox));
	}

	#[rstest]
	fn test_select_radio_is_scoped_to_its_form() {
		let mut doc = Document::new();
		let make_radio = |doc: &mut Document, value: &str| {
			doc.instantiate(
				&ElementTemplate::new("input")
					.attr("type", "radio")
					.attr("name", "choice")
					.attr("value", value),
			)
		};
		let first_form = doc.create_element("form");
		let second_form = doc.create_element("form");
		let a = make_radio(&mut doc, "a");
		let b = make_radio(&mut doc, "b");
		let other = make_radio(&mut doc, "a");
		doc.append_child(first_form, a);
		doc.append_child(first_form, b);
		doc.append_child(second_form, other);
		doc.set_checked(other, true);

		doc.select_radio(a);
		doc.select_radio(b);

		assert!(!doc.is_checked(a));
		assert!(doc.is_checked(b));
		assert!(doc.is_checked(other));
	}

	#[rstest]
	fn test_submit_reports_default_action() {
		let mut doc = Document::new();
		let form = doc.create_element("form");
		assert!(doc.submit(form));

		doc.add_event_listener(form, EventKind::Submit, |_, event| event.prevent_default());
		assert!(!doc.submit(form));
	}
}
