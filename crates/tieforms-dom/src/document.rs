//! Arena-backed document tree
//!
//! [`Document`] owns every node and hands out copyable [`NodeId`] handles.
//! Elements carry ordered attributes plus the live control state of form
//! inputs (`value` and `checked`), which starts from the `value` and
//! `checked` attributes when the element is created and afterwards changes
//! only through [`Document::set_value`] and [`Document::set_checked`].
//! Neither setter fires events; user interaction is simulated separately
//! (see the `interaction` methods).

use crate::event::{ListenerId, Registration};
use crate::html::{merge_classes, strip_classes, write_close_tag, write_open_tag};
use crate::template::{ElementTemplate, TemplateChild};
use indexmap::IndexMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one [`Document`], unique for the lifetime of the process
///
/// [`NodeId`]s are only meaningful inside the document that issued them;
/// pair them with the document's id to key nodes across documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
	fn next() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "doc{}", self.0)
	}
}

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Position of the node in the document arena
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Debug, Clone)]
struct ElementData {
	tag: String,
	attributes: IndexMap<String, String>,
	value: String,
	checked: bool,
}

#[derive(Debug, Clone)]
enum NodeData {
	Element(ElementData),
	Text(String),
}

#[derive(Debug, Clone)]
struct Node {
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	data: NodeData,
}

/// In-memory document
///
/// # Examples
///
/// ```
/// use tieforms_dom::Document;
///
/// let mut doc = Document::new();
/// let form = doc.create_element("form");
/// let input = doc.create_element("input");
/// doc.set_attribute(input, "name", "username");
/// doc.append_child(form, input);
///
/// assert_eq!(doc.inputs_named(form, "username"), vec![input]);
/// assert_eq!(doc.to_html(form), r#"<form><input name="username" /></form>"#);
/// ```
pub struct Document {
	id: DocumentId,
	nodes: Vec<Option<Node>>,
	pub(crate) listeners: IndexMap<ListenerId, Registration>,
	pub(crate) next_listener: u64,
}

impl fmt::Debug for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Document")
			.field("id", &self.id)
			.field("nodes", &self.node_count())
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl Default for Document {
	fn default() -> Self {
		Self {
			id: DocumentId::next(),
			nodes: Vec::new(),
			listeners: IndexMap::new(),
			next_listener: 0,
		}
	}
}

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(&self) -> DocumentId {
		self.id
	}

	/// Number of live (not removed) nodes
	pub fn node_count(&self) -> usize {
		self.nodes.iter().filter(|node| node.is_some()).count()
	}

	/// Whether `node` refers to a live node of this document
	pub fn contains(&self, node: NodeId) -> bool {
		self.node(node).is_some()
	}

	/// Create a detached element
	pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
		self.create_element_with(tag.into(), IndexMap::new())
	}

	/// Create a detached text node
	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeData::Text(text.into()))
	}

	/// Materialize a template as a detached subtree and return its root
	pub fn instantiate(&mut self, template: &ElementTemplate) -> NodeId {
		let attributes = template
			.attributes()
			.map(|(name, value)| (name.to_string(), value.to_string()))
			.collect();
		let root = self.create_element_with(template.tag().to_string(), attributes);
		for child in template.children() {
			let child_id = match child {
				TemplateChild::Element(element) => self.instantiate(element),
				TemplateChild::Text(text) => self.create_text(text.clone()),
			};
			self.append_child(root, child_id);
		}
		root
	}

	fn create_element_with(
		&mut self,
		tag: String,
		attributes: IndexMap<String, String>,
	) -> NodeId {
		let checked = attributes.contains_key("checked");
		let value = match attributes.get("value") {
			Some(value) => value.clone(),
			None if tag == "input" && is_toggle_type(attributes.get("type")) => "on".to_string(),
			None => String::new(),
		};
		self.push(NodeData::Element(ElementData {
			tag,
			attributes,
			value,
			checked,
		}))
	}

	fn push(&mut self, data: NodeData) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Some(Node {
			parent: None,
			children: Vec::new(),
			data,
		}));
		id
	}

	fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0).and_then(Option::as_ref)
	}

	fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(id.0).and_then(Option::as_mut)
	}

	fn element(&self, id: NodeId) -> Option<&ElementData> {
		match &self.node(id)?.data {
			NodeData::Element(element) => Some(element),
			NodeData::Text(_) => None,
		}
	}

	fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
		match &mut self.node_mut(id)?.data {
			NodeData::Element(element) => Some(element),
			NodeData::Text(_) => None,
		}
	}

	// ------------------------------------------------------------------
	// Tree structure
	// ------------------------------------------------------------------

	/// Append `child` as the last child of `parent`, detaching it from its
	/// previous parent first. Returns `false` if either node is gone or the
	/// move would create a cycle.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
		self.insert_child(parent, child, None)
	}

	/// Insert `child` as the first child of `parent`
	pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> bool {
		self.insert_child(parent, child, Some(0))
	}

	fn insert_child(&mut self, parent: NodeId, child: NodeId, at: Option<usize>) -> bool {
		if self.element(parent).is_none() || !self.contains(child) {
			return false;
		}
		if parent == child || self.ancestors(parent).contains(&child) {
			return false;
		}
		self.detach(child);
		if let Some(node) = self.node_mut(child) {
			node.parent = Some(parent);
		}
		if let Some(node) = self.node_mut(parent) {
			match at {
				Some(index) => node.children.insert(index.min(node.children.len()), child),
				None => node.children.push(child),
			}
		}
		true
	}

	fn detach(&mut self, child: NodeId) {
		let Some(parent) = self.parent(child) else {
			return;
		};
		if let Some(node) = self.node_mut(parent) {
			node.children.retain(|c| *c != child);
		}
		if let Some(node) = self.node_mut(child) {
			node.parent = None;
		}
	}

	/// Remove a node and its whole subtree from the document.
	///
	/// Listeners registered on removed nodes are dropped with them.
	pub fn remove(&mut self, node: NodeId) -> bool {
		if !self.contains(node) {
			return false;
		}
		self.detach(node);
		let mut removed = vec![node];
		removed.extend(self.descendants(node));
		for id in &removed {
			if let Some(slot) = self.nodes.get_mut(id.0) {
				*slot = None;
			}
		}
		self.listeners
			.retain(|_, registration| !removed.contains(&registration.target));
		true
	}

	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.node(node)?.parent
	}

	pub fn children(&self, node: NodeId) -> &[NodeId] {
		self.node(node)
			.map(|node| node.children.as_slice())
			.unwrap_or_default()
	}

	/// Ancestors of `node`, nearest first
	pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut current = self.parent(node);
		while let Some(id) = current {
			out.push(id);
			current = self.parent(id);
		}
		out
	}

	/// All descendants of `root` in document (pre-)order, excluding `root`
	pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
		while let Some(id) = stack.pop() {
			out.push(id);
			stack.extend(self.children(id).iter().rev().copied());
		}
		out
	}

	/// Nearest inclusive ancestor with the given tag
	pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
		std::iter::once(node)
			.chain(self.ancestors(node))
			.find(|id| self.tag(*id) == Some(tag))
	}

	// ------------------------------------------------------------------
	// Element data
	// ------------------------------------------------------------------

	/// Tag name, or `None` for text nodes and removed nodes
	pub fn tag(&self, node: NodeId) -> Option<&str> {
		self.element(node).map(|element| element.tag.as_str())
	}

	pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node)?.attributes.get(name).map(String::as_str)
	}

	pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}

	/// Set an attribute. Does not touch live control state.
	pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
		match self.element_mut(node) {
			Some(element) => {
				element
					.attributes
					.insert(name.to_string(), value.to_string());
				true
			}
			None => false,
		}
	}

	pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
		self.element_mut(node)
			.is_some_and(|element| element.attributes.shift_remove(name).is_some())
	}

	pub fn has_class(&self, node: NodeId, class: &str) -> bool {
		self.attribute(node, "class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Whether the element carries every whitespace-separated class in `classes`
	pub fn has_classes(&self, node: NodeId, classes: &str) -> bool {
		let mut tokens = classes.split_whitespace().peekable();
		tokens.peek().is_some() && tokens.all(|class| self.has_class(node, class))
	}

	/// Add whitespace-separated classes, ignoring ones already present
	pub fn add_classes(&mut self, node: NodeId, classes: &str) -> bool {
		let Some(element) = self.element_mut(node) else {
			return false;
		};
		let existing = element.attributes.get("class").map(String::as_str);
		let merged = merge_classes(existing.unwrap_or(""), classes);
		element.attributes.insert("class".to_string(), merged);
		true
	}

	/// Remove whitespace-separated classes. The attribute is kept even when
	/// it ends up empty.
	pub fn remove_classes(&mut self, node: NodeId, classes: &str) -> bool {
		let Some(element) = self.element_mut(node) else {
			return false;
		};
		let Some(existing) = element.attributes.get_mut("class") else {
			return false;
		};
		let stripped = strip_classes(existing, classes);
		let changed = stripped != *existing;
		*existing = stripped;
		changed
	}

	/// Live value of a control, empty for non-elements
	pub fn value(&self, node: NodeId) -> &str {
		self.element(node)
			.map(|element| element.value.as_str())
			.unwrap_or("")
	}

	pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> bool {
		match self.element_mut(node) {
			Some(element) => {
				element.value = value.into();
				true
			}
			None => false,
		}
	}

	pub fn is_checked(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|element| element.checked)
	}

	pub fn set_checked(&mut self, node: NodeId, checked: bool) -> bool {
		match self.element_mut(node) {
			Some(element) => {
				element.checked = checked;
				true
			}
			None => false,
		}
	}

	/// Concatenated text of every text node below (and including) `node`
	pub fn text_content(&self, node: NodeId) -> String {
		let mut out = String::new();
		for id in std::iter::once(node).chain(self.descendants(node)) {
			if let Some(Node {
				data: NodeData::Text(text),
				..
			}) = self.node(id)
			{
				out.push_str(text);
			}
		}
		out
	}

	// ------------------------------------------------------------------
	// Queries
	// ------------------------------------------------------------------

	/// Every `<input>` below `root` whose `name` attribute equals `name`,
	/// in document order
	pub fn inputs_named(&self, root: NodeId, name: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|id| self.tag(*id) == Some("input") && self.attribute(*id, "name") == Some(name))
			.collect()
	}

	/// Elements below `root` carrying the attribute `name`
	pub fn elements_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|id| self.has_attribute(*id, name))
			.collect()
	}

	/// Elements below `root` carrying every class in `classes`
	pub fn elements_with_classes(&self, root: NodeId, classes: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|id| self.has_classes(*id, classes))
			.collect()
	}

	// ------------------------------------------------------------------
	// Serialization
	// ------------------------------------------------------------------

	/// Serialize `node` and its subtree to HTML.
	///
	/// For `<input>` elements the live value and checked state are written
	/// in place of the original `value` and `checked` attributes.
	pub fn to_html(&self, node: NodeId) -> String {
		let mut out = String::new();
		self.write_html(node, &mut out);
		out
	}

	fn write_html(&self, id: NodeId, out: &mut String) {
		let Some(node) = self.node(id) else {
			return;
		};
		match &node.data {
			NodeData::Text(text) => out.push_str(&crate::html_escape(text)),
			NodeData::Element(element) => {
				if element.tag == "input" {
					let mut attributes: Vec<(&str, &str)> = element
						.attributes
						.iter()
						.filter(|(name, _)| name.as_str() != "checked")
						.map(|(name, value)| {
							if name == "value" {
								(name.as_str(), element.value.as_str())
							} else {
								(name.as_str(), value.as_str())
							}
						})
						.collect();
					if !element.attributes.contains_key("value")
						&& !element.value.is_empty()
						&& !is_toggle_type(element.attributes.get("type"))
					{
						attributes.push(("value", element.value.as_str()));
					}
					if element.checked {
						attributes.push(("checked", ""));
					}
					write_open_tag(out, &element.tag, attributes);
				} else {
					write_open_tag(
						out,
						&element.tag,
						element
							.attributes
							.iter()
							.map(|(name, value)| (name.as_str(), value.as_str())),
					);
				}
				for child in &node.children {
					self.write_html(*child, out);
				}
				write_close_tag(out, &element.tag);
			}
		}
	}
}

fn is_toggle_type(input_type: Option<&String>) -> bool {
	matches!(input_type.map(String::as_str), Some("checkbox" | "radio"))
}
