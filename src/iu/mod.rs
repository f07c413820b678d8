// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Library top-level definitions go in this module.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod types;
pub mod util;

#[cfg(test)]
pub mod test_server;

// Re-export
pub use iu::api::{ImageStore, Transport};
pub use iu::config::Config;
pub use iu::error::{Error, ErrorKind};
pub use iu::types::{Future, Result};
