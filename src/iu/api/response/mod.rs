// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

/// This module contains types that serve as representations
/// of server responses from the image service.

pub mod upload;

// Re-export
pub use self::upload::{ErrorMessage, UploadResponse};
