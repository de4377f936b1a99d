//! Event preset catalog
//!
//! Static event templates: which roles an event offers and at what
//! capacity. Loaded once at startup, read-only afterwards.

pub mod loader;

pub use loader::PresetCatalog;
