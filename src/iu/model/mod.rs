// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

/// Top-level model definitions and re-exports go here.

pub mod file;
pub mod image;
pub mod progress;

// Re-export
pub use self::file::{Preview, SelectedFile};
pub use self::image::ImageInfo;
pub use self::progress::ProgressInfo;
