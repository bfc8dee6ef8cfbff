//! Renderable element descriptions
//!
//! An [`ElementTemplate`] is plain data: a tag, ordered attributes and
//! children. Renderers build templates without touching a document, and
//! [`Document::instantiate`](crate::Document::instantiate) turns a template
//! into live nodes.
//!
//! ## Example
//!
//! ```
//! use tieforms_dom::ElementTemplate;
//!
//! let group = ElementTemplate::new("div")
//!     .class("form-group")
//!     .child(ElementTemplate::new("label").class("control-label").text("Name:"))
//!     .child(
//!         ElementTemplate::new("input")
//!             .attr("type", "text")
//!             .attr("name", "name")
//!             .flag("required"),
//!     );
//!
//! assert_eq!(
//!     group.to_html(),
//!     r#"<div class="form-group"><label class="control-label">Name:</label><input type="text" name="name" required /></div>"#
//! );
//! ```

use crate::html::{merge_classes, write_close_tag, write_open_tag};
use indexmap::IndexMap;

/// Child of an [`ElementTemplate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChild {
	/// Nested element
	Element(ElementTemplate),
	/// Text node
	Text(String),
}

/// Pure description of an element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTemplate {
	tag: String,
	attributes: IndexMap<String, String>,
	children: Vec<TemplateChild>,
}

impl ElementTemplate {
	/// Create a template for an element with no attributes or children
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: IndexMap::new(),
			children: Vec::new(),
		}
	}

	/// Set an attribute, replacing any previous value.
	///
	/// `class` is merged instead of replaced, see [`ElementTemplate::class`].
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let value = value.into();
		if name == "class" {
			return self.class(&value);
		}
		self.attributes.insert(name, value);
		self
	}

	/// Set a boolean attribute such as `required`
	pub fn flag(self, name: impl Into<String>) -> Self {
		self.attr(name, "")
	}

	/// Append whitespace-separated classes, ignoring duplicates
	pub fn class(mut self, classes: &str) -> Self {
		if classes.trim().is_empty() {
			return self;
		}
		let merged = match self.attributes.get("class") {
			Some(existing) => merge_classes(existing, classes),
			None => merge_classes("", classes),
		};
		self.attributes.insert("class".to_string(), merged);
		self
	}

	/// Append a text child
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.children.push(TemplateChild::Text(text.into()));
		self
	}

	/// Append an element child
	pub fn child(mut self, child: ElementTemplate) -> Self {
		self.children.push(TemplateChild::Element(child));
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes.contains_key(name)
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.attribute("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Attributes in insertion order
	pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attributes
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn children(&self) -> &[TemplateChild] {
		&self.children
	}

	/// Concatenated text of this template and all of its descendants
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		for child in &self.children {
			match child {
				TemplateChild::Element(element) => out.push_str(&element.text_content()),
				TemplateChild::Text(text) => out.push_str(text),
			}
		}
		out
	}

	/// Serialize to HTML. Text children are escaped.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		write_open_tag(out, &self.tag, self.attributes());
		for child in &self.children {
			match child {
				TemplateChild::Element(element) => element.write_html(out),
				TemplateChild::Text(text) => out.push_str(&crate::html_escape(text)),
			}
		}
		write_close_tag(out, &self.tag);
	}
}
