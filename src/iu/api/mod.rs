// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! The image service API.

use std::sync::Arc;

use iu;
use iu::model::{ImageInfo, SelectedFile};

mod client;
pub mod request;
pub mod response;

// Re-export:
pub use self::client::ImageStore;
pub use self::client::progress::{NoProgress, ProgressCallback, ProgressUpdate};

/// The operations an upload session needs from the image service.
///
/// `ImageStore` talks to the service over HTTP. Other implementations can be
/// swapped in without affecting the session.
pub trait Transport: Send + Sync + 'static {
    /// List the images the service currently stores.
    fn get_files(&self) -> iu::Future<Vec<ImageInfo>>;

    /// Upload a single file. `progress` is invoked with cumulative byte
    /// counts as the request body is handed to the transport.
    fn upload(
        &self,
        file: SelectedFile,
        progress: Arc<dyn ProgressCallback>,
    ) -> iu::Future<response::UploadResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get_files(&self) -> iu::Future<Vec<ImageInfo>> {
        self.as_ref().get_files()
    }

    fn upload(
        &self,
        file: SelectedFile,
        progress: Arc<dyn ProgressCallback>,
    ) -> iu::Future<response::UploadResponse> {
        self.as_ref().upload(file, progress)
    }
}
