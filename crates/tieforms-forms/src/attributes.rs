//! Parsing of raw HTML attribute strings
//!
//! Field declarations may carry extra attributes either as a map or as a raw
//! string in HTML syntax, e.g. `required min='0' data-role="amount"`.

use crate::error::{FormError, FormResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Parse a raw attribute string into ordered name/value pairs.
///
/// Attributes without a value (such as `required`) map to an empty string.
/// Values may be single-quoted, double-quoted or bare.
///
/// # Examples
///
/// ```
/// use tieforms_forms::parse_attribute_list;
///
/// let attrs = parse_attribute_list(r#"required min='0' data-role="amount" step=5"#).unwrap();
/// let pairs: Vec<_> = attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
///
/// assert_eq!(
///     pairs,
///     vec![("required", ""), ("min", "0"), ("data-role", "amount"), ("step", "5")]
/// );
/// assert!(parse_attribute_list("min='0").is_err());
/// ```
pub fn parse_attribute_list(raw: &str) -> FormResult<IndexMap<String, String>> {
	let mut attributes = IndexMap::new();
	let mut chars = raw.chars().peekable();

	loop {
		while chars.next_if(|c| c.is_whitespace()).is_some() {}
		if chars.peek().is_none() {
			break;
		}

		let mut name = String::new();
		while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
			name.push(c);
		}
		if name.is_empty() {
			return Err(FormError::InvalidAttributes(raw.to_string()));
		}

		let mut value = String::new();
		if chars.next_if_eq(&'=').is_some() {
			match chars.peek().copied() {
				Some(quote @ ('\'' | '"')) => {
					chars.next();
					let mut closed = false;
					for c in chars.by_ref() {
						if c == quote {
							closed = true;
							break;
						}
						value.push(c);
					}
					if !closed {
						return Err(FormError::InvalidAttributes(raw.to_string()));
					}
				}
				_ => {
					while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
						value.push(c);
					}
				}
			}
		}
		attributes.insert(name, value);
	}

	Ok(attributes)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttributesRepr {
	Map(IndexMap<String, String>),
	Raw(String),
}

/// Accepts either a map or a raw attribute string
pub(crate) fn deserialize_attributes<'de, D>(
	deserializer: D,
) -> Result<IndexMap<String, String>, D::Error>
where
	D: Deserializer<'de>,
{
	match AttributesRepr::deserialize(deserializer)? {
		AttributesRepr::Map(map) => Ok(map),
		AttributesRepr::Raw(raw) => parse_attribute_list(&raw).map_err(serde::de::Error::custom),
	}
}
