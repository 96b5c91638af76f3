//! Service layer for business logic
//!
//! This module provides the rotation logic shared by the HTTP API and the
//! integration tests.

mod rotation_service;

pub use rotation_service::*;
