//! Shared test utilities for cmsadmin integration tests.
//!
//! This module provides:
//! - `MockTransport`, a scripted stand-in for the HTTP endpoint that records every request
//! - `TestHarness` bundling a mock transport, a client and a temp directory for image files
//! - Builders for records and canned server responses

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{MockTransport, TestHarness};
