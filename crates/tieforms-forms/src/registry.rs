//! Field registry
//!
//! Tracks which logical fields a form declares and which binding-source
//! property each one is bound to. Entries keep declaration order, which
//! drives the order of `reload` and of validation.

use crate::error::{FormError, FormResult};
use indexmap::IndexMap;

/// A registered field and its (optional) bound property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistryEntry {
	name: String,
	bound_property: Option<String>,
}

impl FieldRegistryEntry {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The bound property, `None` until a binding is declared
	pub fn bound_property(&self) -> Option<&str> {
		self.bound_property.as_deref()
	}

	pub fn is_bound(&self) -> bool {
		self.bound_property.is_some()
	}
}

/// Ordered registry of field names
///
/// # Examples
///
/// ```
/// use tieforms_forms::FieldRegistry;
///
/// let mut registry = FieldRegistry::new();
/// assert!(registry.register("username"));
/// assert!(!registry.register("username"));
///
/// registry.set_binding("username", "user").unwrap();
/// assert_eq!(registry.find("username").unwrap().bound_property(), Some("user"));
/// assert!(registry.set_binding("missing", "x").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
	entries: IndexMap<String, FieldRegistryEntry>,
}

impl FieldRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add `name` with an empty binding. Returns `false` (and changes
	/// nothing) if the name is already registered.
	pub fn register(&mut self, name: impl Into<String>) -> bool {
		let name = name.into();
		if self.entries.contains_key(&name) {
			return false;
		}
		self.entries.insert(
			name.clone(),
			FieldRegistryEntry {
				name,
				bound_property: None,
			},
		);
		true
	}

	pub fn find(&self, name: &str) -> Option<&FieldRegistryEntry> {
		self.entries.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Bind a registered field to `property`, replacing any previous binding
	pub fn set_binding(&mut self, name: &str, property: impl Into<String>) -> FormResult<()> {
		let entry = self
			.entries
			.get_mut(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		entry.bound_property = Some(property.into());
		Ok(())
	}

	/// Drop the binding of a registered field
	pub fn clear_binding(&mut self, name: &str) -> FormResult<()> {
		let entry = self
			.entries
			.get_mut(name)
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;
		entry.bound_property = None;
		Ok(())
	}

	/// Entries in declaration order
	pub fn list(&self) -> impl ExactSizeIterator<Item = &FieldRegistryEntry> {
		self.entries.values()
	}

	/// Entries that have a bound property, in declaration order
	pub fn bound(&self) -> impl Iterator<Item = &FieldRegistryEntry> {
		self.entries.values().filter(|entry| entry.is_bound())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
