//! Test helpers for reinhardt-fixtures integration tests.

#[path = "helpers/setup.rs"]
pub mod setup;

#[path = "helpers/log_capture.rs"]
pub mod log_capture;
