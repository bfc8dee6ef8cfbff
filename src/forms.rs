//! Declarative forms with two-way binding and validation
//!
//! This module provides access to tieforms-forms:
//!
//! - **Field registry**: declared fields and their bound properties
//! - **Rendering**: `FieldRenderer` with the Bootstrap 3 `BootstrapRenderer`
//! - **Binding**: `Binder` keeping controls and a `BindingSource` in sync
//! - **Validation**: required, numeric and email rules run on every submit
//! - **Form controller**: the submit cycle, error decoration and teardown

// Re-export all tieforms-forms functionality
pub use tieforms_forms::*;
