// weelog - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// potential programmatic use. The CLI surface lives in main.rs.

pub mod core;
pub mod store;
pub mod util;
