//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests that drive the full TuiApp against a
//! TestBackend.

mod acceptance_simulation;
