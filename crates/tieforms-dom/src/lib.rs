//! In-memory document model for tieforms
//!
//! This crate is the platform side of tieforms: a small arena-backed element
//! tree with live form-control state, node-scoped event listeners with
//! disposable handles, and helpers that simulate user interaction. Form
//! logic in `tieforms-forms` only talks to the platform through these types.
//!
//! ## Overview
//!
//! - [`Document`]: owns nodes, attributes, control state and listeners
//! - [`NodeId`]: copyable handle to a node
//! - [`ElementTemplate`]: pure description of an element tree, produced by
//!   renderers and materialized with [`Document::instantiate`]
//! - [`Event`], [`EventKind`], [`ListenerId`]: event delivery

pub mod document;
pub mod event;
mod html;
mod interaction;
pub mod template;

pub use document::{Document, DocumentId, NodeId};
pub use event::{Event, EventKind, Listener, ListenerId};
pub use html::html_escape;
pub use template::{ElementTemplate, TemplateChild};
