//! Value rules applied by the validator
//!
//! Every field may carry a `required` rule; `number` and `email` fields also
//! carry a rule implied by their kind. Rules look at the textual value only.

use crate::field::FieldKind;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

// Numeric literal: optional sign, digits with an optional decimal point or a
// leading-dot fraction, optional exponent. Checked against the trimmed value.
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
		.expect("NUMBER_REGEX: invalid regex pattern")
});

// Local part: dot-separated atoms or a quoted string.
// Domain: bracketed IPv4 literal, or labels ending in a letters-only TLD of
// at least two characters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Whether `value` is a numeric literal such as `42`, `-3.5` or `1e3`.
///
/// The empty string is not numeric.
///
/// # Examples
///
/// ```
/// use tieforms_forms::validators::is_numeric;
///
/// assert!(is_numeric("42"));
/// assert!(is_numeric(" -3.5 "));
/// assert!(!is_numeric("12a"));
/// assert!(!is_numeric(""));
/// ```
pub fn is_numeric(value: &str) -> bool {
	NUMBER_REGEX.is_match(value.trim())
}

/// Whether `value` looks like an email address.
///
/// # Examples
///
/// ```
/// use tieforms_forms::validators::is_email;
///
/// assert!(is_email("a@b.co"));
/// assert!(is_email("user@[192.168.0.1]"));
/// assert!(!is_email("a@b"));
/// assert!(!is_email("not-an-email"));
/// ```
pub fn is_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

/// A single rule a field can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRule {
	/// The control carries a `required` marker and its value is empty
	Required,
	/// `number` fields: the value is not a numeric literal
	Numeric,
	/// `email` fields: the value is not an email address
	Email,
}

impl FieldRule {
	/// The rule implied by a field kind, if any.
	///
	/// The implied rule runs even on empty values, so an empty `number` or
	/// `email` field fails whether or not it is required.
	pub fn implied_by(kind: FieldKind) -> Option<Self> {
		match kind {
			FieldKind::Number => Some(FieldRule::Numeric),
			FieldKind::Email => Some(FieldRule::Email),
			_ => None,
		}
	}

	/// Whether `value` satisfies this rule
	pub fn check(&self, value: &str) -> bool {
		match self {
			FieldRule::Required => !value.is_empty(),
			FieldRule::Numeric => is_numeric(value),
			FieldRule::Email => is_email(value),
		}
	}
}

impl fmt::Display for FieldRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldRule::Required => f.write_str("required"),
			FieldRule::Numeric => f.write_str("numeric"),
			FieldRule::Email => f.write_str("email"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("42")]
	#[case("-3.5")]
	#[case("0")]
	#[case("+7")]
	#[case(".5")]
	#[case("5.")]
	#[case("1e3")]
	#[case("2.5E-4")]
	#[case("  12  ")]
	fn test_numeric_accepts(#[case] value: &str) {
		assert!(is_numeric(value), "{value:?} should be numeric");
	}

	#[rstest]
	#[case("abc")]
	#[case("")]
	#[case("   ")]
	#[case("12a")]
	#[case("1.2.3")]
	#[case("-")]
	#[case(".")]
	#[case("0x1F")]
	#[case("1e")]
	fn test_numeric_rejects(#[case] value: &str) {
		assert!(!is_numeric(value), "{value:?} should not be numeric");
	}

	#[rstest]
	#[case("a@b.co")]
	#[case("first.last@example.org")]
	#[case("\"quoted name\"@example.com")]
	#[case("x@[10.0.0.1]")]
	#[case("tag+filter@sub.domain.de")]
	fn test_email_accepts(#[case] value: &str) {
		assert!(is_email(value), "{value:?} should be an email");
	}

	#[rstest]
	#[case("not-an-email")]
	#[case("a@b")]
	#[case("")]
	#[case("a b@example.com")]
	#[case("a@b.c")]
	#[case("a@example.c0m")]
	#[case(".a@example.com")]
	fn test_email_rejects(#[case] value: &str) {
		assert!(!is_email(value), "{value:?} should not be an email");
	}

	#[rstest]
	#[case(FieldKind::Number, Some(FieldRule::Numeric))]
	#[case(FieldKind::Email, Some(FieldRule::Email))]
	#[case(FieldKind::Text, None)]
	#[case(FieldKind::Checkbox, None)]
	fn test_implied_rule(#[case] kind: FieldKind, #[case] expected: Option<FieldRule>) {
		assert_eq!(FieldRule::implied_by(kind), expected);
	}

	#[rstest]
	fn test_required_only_rejects_empty() {
		assert!(!FieldRule::Required.check(""));
		assert!(FieldRule::Required.check(" "));
		assert!(FieldRule::Required.check("0"));
	}

	proptest! {
		#[test]
		fn prop_integers_are_numeric(n in any::<i64>()) {
			prop_assert!(is_numeric(&n.to_string()));
		}

		#[test]
		fn prop_finite_floats_are_numeric(x in -1.0e12f64..1.0e12f64) {
			prop_assert!(is_numeric(&x.to_string()));
		}

		#[test]
		fn prop_trailing_letter_is_not_numeric(n in any::<u32>(), c in "[a-df-zA-DF-Z]") {
			let value = format!("{n}{c}");
			prop_assert!(!is_numeric(&value));
		}
	}
}
