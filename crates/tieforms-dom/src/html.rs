//! HTML serialization helpers shared by templates and live documents

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use tieforms_dom::html_escape;
///
/// assert_eq!(html_escape("<b>"), "&lt;b&gt;");
/// assert_eq!(html_escape("Tom & Jerry"), "Tom &amp; Jerry");
/// ```
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Elements that never carry children and are written as `<tag ... />`
pub(crate) fn is_void_element(tag: &str) -> bool {
	matches!(
		tag,
		"input" | "br" | "hr" | "img" | "meta" | "link" | "area" | "col" | "source"
	)
}

/// Attributes whose presence alone carries meaning
pub(crate) fn is_boolean_attribute(name: &str) -> bool {
	matches!(
		name,
		"required"
			| "checked"
			| "disabled"
			| "readonly"
			| "multiple"
			| "selected"
			| "autofocus"
			| "hidden"
			| "novalidate"
	)
}

pub(crate) fn write_open_tag<'a>(
	out: &mut String,
	tag: &str,
	attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
	out.push('<');
	out.push_str(tag);
	for (name, value) in attributes {
		out.push(' ');
		out.push_str(name);
		if value.is_empty() && is_boolean_attribute(name) {
			continue;
		}
		out.push_str("=\"");
		out.push_str(&html_escape(value));
		out.push('"');
	}
	if is_void_element(tag) {
		out.push_str(" />");
	} else {
		out.push('>');
	}
}

pub(crate) fn write_close_tag(out: &mut String, tag: &str) {
	if !is_void_element(tag) {
		out.push_str("</");
		out.push_str(tag);
		out.push('>');
	}
}

/// Join the whitespace-separated tokens of `added` onto `existing`,
/// skipping tokens that are already present.
pub(crate) fn merge_classes(existing: &str, added: &str) -> String {
	let mut tokens: Vec<&str> = existing.split_whitespace().collect();
	for token in added.split_whitespace() {
		if !tokens.contains(&token) {
			tokens.push(token);
		}
	}
	tokens.join(" ")
}

/// Remove every whitespace-separated token of `removed` from `existing`
pub(crate) fn strip_classes(existing: &str, removed: &str) -> String {
	let removed: Vec<&str> = removed.split_whitespace().collect();
	existing
		.split_whitespace()
		.filter(|token| !removed.contains(token))
		.collect::<Vec<_>>()
		.join(" ")
}
