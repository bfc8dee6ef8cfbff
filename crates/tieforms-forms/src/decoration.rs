//! Error decoration of a form after a failed validation pass
//!
//! Everything added here carries a marker attribute so the next pass can
//! remove exactly what an earlier pass added, leaving caller markup alone.

use crate::settings::FormSettings;
use crate::validation::ValidationResult;
use tieforms_dom::{Document, ElementTemplate, NodeId};

/// Marks the error banner
pub const BANNER_MARKER: &str = "data-form-banner";
/// Marks a container decorated with the field error classes
pub const FIELD_ERROR_MARKER: &str = "data-form-error";
/// Marks a feedback glyph
pub const FEEDBACK_MARKER: &str = "data-form-feedback";

/// Remove the banner, feedback glyphs and field error classes added by
/// [`mark_failures`]
pub fn clear_markers(doc: &mut Document, form: NodeId, settings: &FormSettings) {
	for node in doc.elements_with_attribute(form, BANNER_MARKER) {
		doc.remove(node);
	}
	for node in doc.elements_with_attribute(form, FEEDBACK_MARKER) {
		doc.remove(node);
	}
	for node in doc.elements_with_attribute(form, FIELD_ERROR_MARKER) {
		doc.remove_classes(node, &settings.theme.field_error);
		doc.remove_attribute(node, FIELD_ERROR_MARKER);
	}
}

/// Decorate the form from a failed `result`: one banner at the top of the
/// form, and an error class plus a feedback glyph on the container of every
/// failed field. Does nothing for a valid result.
pub fn mark_failures(
	doc: &mut Document,
	form: NodeId,
	result: &ValidationResult,
	settings: &FormSettings,
) {
	if result.is_valid() {
		return;
	}

	let banner = doc.instantiate(
		&ElementTemplate::new("div")
			.class(&settings.theme.alert)
			.flag(BANNER_MARKER)
			.text(settings.error_message.as_str()),
	);
	doc.prepend_child(form, banner);

	for field in result.failed_fields() {
		let mut containers: Vec<NodeId> = Vec::new();
		for control in doc.inputs_named(form, field) {
			match doc.parent(control) {
				Some(parent) if !containers.contains(&parent) => containers.push(parent),
				Some(_) => {}
				None => tracing::warn!(field = %field, "failed control has no container"),
			}
		}
		for container in containers {
			doc.add_classes(container, &settings.theme.field_error);
			doc.set_attribute(container, FIELD_ERROR_MARKER, "");
			let glyph = doc.instantiate(
				&ElementTemplate::new("span")
					.class(&settings.theme.feedback)
					.flag(FEEDBACK_MARKER),
			);
			doc.append_child(container, glyph);
		}
	}
}
