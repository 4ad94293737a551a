//! Modules layer - Infrastructure components behind the feature services
//!
//! Contains adapters for things that are not the database, currently the
//! photo storage backend.

pub mod storage;
