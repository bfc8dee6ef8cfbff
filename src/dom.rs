//! In-memory document model
//!
//! This module provides access to tieforms-dom, the element tree forms are
//! rendered into, with node-scoped events and simulated user interaction.

// Re-export all tieforms-dom functionality
pub use tieforms_dom::*;
