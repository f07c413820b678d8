// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

/// This module contains types that serve as representations
/// of client requests to the image service.

pub mod multipart;

// Re-export
pub use self::multipart::{FileForm, FormChunks};
