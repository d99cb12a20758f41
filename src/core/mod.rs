// weelog - core/mod.rs
//
// Core business logic layer: classification, discovery, import, export.
// Must NOT depend on the store layer or any SQL crate.

pub mod classify;
pub mod discovery;
pub mod export;
pub mod import;
pub mod model;
