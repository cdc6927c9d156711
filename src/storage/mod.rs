//! Storage module
//!
//! Object storage access for pipeline inputs and outputs.
//!
//! # Overview
//!
//! This module provides:
//! - `StorageLocation` - a store plus a path, parsed from a URL (S3, R2, GCS, Azure, local)
//! - `Credentials` - access key pair for S3-compatible stores
//! - `Session` - the explicitly opened execution context shared by loader and writer

mod location;
mod session;

pub use location::StorageLocation;
pub use session::{Credentials, Session};
