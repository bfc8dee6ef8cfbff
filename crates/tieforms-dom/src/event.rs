//! Event listeners and dispatch
//!
//! Listeners are registered on a single node for a single [`EventKind`] and
//! receive mutable access to the document while they run. Registration
//! returns a [`ListenerId`], which is the handle used to dispose of the
//! listener again. Events do not bubble: only listeners registered on the
//! target itself are invoked, in registration order.

use crate::document::{Document, NodeId};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Kinds of events the document delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// A control's value or checked state was changed by the user
	Change,
	/// A form was submitted
	Submit,
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EventKind::Change => f.write_str("change"),
			EventKind::Submit => f.write_str("submit"),
		}
	}
}

/// Handle identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A dispatched event
#[derive(Debug)]
pub struct Event {
	kind: EventKind,
	target: NodeId,
	default_prevented: Cell<bool>,
}

impl Event {
	pub fn new(kind: EventKind, target: NodeId) -> Self {
		Self {
			kind,
			target,
			default_prevented: Cell::new(false),
		}
	}

	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn target(&self) -> NodeId {
		self.target
	}

	/// Suppress the platform's default action for this event
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

/// Event listener callback
pub type Listener = Rc<dyn Fn(&mut Document, &Event)>;

pub(crate) struct Registration {
	pub(crate) target: NodeId,
	pub(crate) kind: EventKind,
	pub(crate) listener: Listener,
}

impl Document {
	/// Register `listener` for `kind` events targeting `node`
	///
	/// # Examples
	///
	/// ```
	/// use std::cell::Cell;
	/// use std::rc::Rc;
	/// use tieforms_dom::{Document, EventKind};
	///
	/// let mut doc = Document::new();
	/// let input = doc.create_element("input");
	/// let hits = Rc::new(Cell::new(0));
	///
	/// let counter = Rc::clone(&hits);
	/// let id = doc.add_event_listener(input, EventKind::Change, move |_, _| {
	///     counter.set(counter.get() + 1);
	/// });
	///
	/// doc.dispatch_event(input, EventKind::Change);
	/// assert!(doc.remove_event_listener(id));
	/// doc.dispatch_event(input, EventKind::Change);
	///
	/// assert_eq!(hits.get(), 1);
	/// ```
	pub fn add_event_listener<F>(&mut self, node: NodeId, kind: EventKind, listener: F) -> ListenerId
	where
		F: Fn(&mut Document, &Event) + 'static,
	{
		let id = ListenerId(self.next_listener);
		self.next_listener += 1;
		self.listeners.insert(
			id,
			Registration {
				target: node,
				kind,
				listener: Rc::new(listener),
			},
		);
		id
	}

	/// Dispose of a listener. Returns `false` if it was already gone.
	pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
		self.listeners.shift_remove(&id).is_some()
	}

	/// Number of listeners registered for `kind` on `node`
	pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
		self.listeners
			.values()
			.filter(|registration| registration.target == node && registration.kind == kind)
			.count()
	}

	/// Total number of registered listeners
	pub fn total_listeners(&self) -> usize {
		self.listeners.len()
	}

	/// Deliver an event to the listeners registered on `target`.
	///
	/// A listener disposed of by an earlier listener of the same dispatch is
	/// skipped.
	pub fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Event {
		let event = Event::new(kind, target);
		let snapshot: Vec<(ListenerId, Listener)> = self
			.listeners
			.iter()
			.filter(|(_, registration)| registration.target == target && registration.kind == kind)
			.map(|(id, registration)| (*id, Rc::clone(&registration.listener)))
			.collect();

		tracing::trace!(%target, %kind, listeners = snapshot.len(), "dispatching event");

		for (id, listener) in snapshot {
			if self.listeners.contains_key(&id) {
				listener(self, &event);
			}
		}
		event
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	#[rstest]
	fn test_listeners_run_in_registration_order() {
		let mut doc = Document::new();
		let node = doc.create_element("input");
		let log = Rc::new(RefCell::new(Vec::new()));

		for label in ["first", "second"] {
			let log = Rc::clone(&log);
			doc.add_event_listener(node, EventKind::Change, move |_, _| {
				log.borrow_mut().push(label);
			});
		}
		doc.dispatch_event(node, EventKind::Change);

		assert_eq!(*log.borrow(), vec!["first", "second"]);
	}

	#[rstest]
	fn test_dispatch_only_reaches_matching_kind_and_target() {
		let mut doc = Document::new();
		let form = doc.create_element("form");
		let input = doc.create_element("input");
		doc.append_child(form, input);
		let hits = Rc::new(Cell::new(0));

		let counter = Rc::clone(&hits);
		doc.add_event_listener(form, EventKind::Submit, move |_, _| {
			counter.set(counter.get() + 1);
		});

		doc.dispatch_event(input, EventKind::Submit);
		doc.dispatch_event(form, EventKind::Change);
		assert_eq!(hits.get(), 0);

		doc.dispatch_event(form, EventKind::Submit);
		assert_eq!(hits.get(), 1);
	}

	#[rstest]
	fn test_prevent_default_is_reported() {
		let mut doc = Document::new();
		let form = doc.create_element("form");
		doc.add_event_listener(form, EventKind::Submit, |_, event| event.prevent_default());

		let event = doc.dispatch_event(form, EventKind::Submit);

		assert!(event.default_prevented());
		assert_eq!(event.kind(), EventKind::Submit);
		assert_eq!(event.target(), form);
	}

	#[rstest]
	fn test_listener_removed_mid_dispatch_is_skipped() {
		let mut doc = Document::new();
		let node = doc.create_element("input");
		let hits = Rc::new(Cell::new(0));
		let second: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

		let to_remove = Rc::clone(&second);
		doc.add_event_listener(node, EventKind::Change, move |doc, _| {
			if let Some(id) = to_remove.get() {
				doc.remove_event_listener(id);
			}
		});
		let counter = Rc::clone(&hits);
		let id = doc.add_event_listener(node, EventKind::Change, move |_, _| {
			counter.set(counter.get() + 1);
		});
		second.set(Some(id));

		doc.dispatch_event(node, EventKind::Change);

		assert_eq!(hits.get(), 0);
		assert_eq!(doc.listener_count(node, EventKind::Change), 1);
	}

	#[rstest]
	fn test_listeners_may_mutate_document() {
		let mut doc = Document::new();
		let input = doc.create_element("input");
		doc.add_event_listener(input, EventKind::Change, |doc, event| {
			doc.set_value(event.target(), "changed");
		});

		doc.dispatch_event(input, EventKind::Change);

		assert_eq!(doc.value(input), "changed");
	}

	#[rstest]
	fn test_removing_node_drops_its_listeners() {
		let mut doc = Document::new();
		let form = doc.create_element("form");
		let input = doc.create_element("input");
		doc.append_child(form, input);
		doc.add_event_listener(input, EventKind::Change, |_, _| {});
		doc.add_event_listener(form, EventKind::Submit, |_, _| {});

		doc.remove(input);

		assert_eq!(doc.total_listeners(), 1);
	}
}
