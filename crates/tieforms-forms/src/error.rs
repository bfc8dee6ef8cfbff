use crate::field::FieldKind;
use tieforms_dom::NodeId;

/// Errors raised when a form is declared, bound or configured incorrectly.
///
/// Validation failures are not errors; they are reported through
/// [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("Unsupported field kind: {0}")]
	UnsupportedFieldKind(String),
	#[error("Field of kind '{kind}' declared without a name")]
	MissingFieldName { kind: FieldKind },
	#[error("Node {0} is not a form element")]
	NotAForm(NodeId),
	#[error("Form has been destroyed")]
	Destroyed,
	#[error("Form {0} belongs to another document")]
	ForeignDocument(NodeId),
	#[error("Invalid attribute list: {0}")]
	InvalidAttributes(String),
	#[error("Schema error: {0}")]
	Schema(#[from] serde_json::Error),
	#[error("Settings error: {0}")]
	Settings(String),
}

pub type FormResult<T> = Result<T, FormError>;
