//! Storage module for uploaded files
//!
//! Provides the filesystem-backed photo store that report uploads
//! are written to and swept from.

mod photo_store;

pub use photo_store::PhotoStore;
