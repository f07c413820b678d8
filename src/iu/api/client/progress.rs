// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

use std::sync::Arc;

/// A trait defining a progress indicator callback. Every time a chunk of an
/// upload body is handed to the transport, `on_update` will be called with
/// updated statistics for the file.
pub trait ProgressCallback: Send + Sync {
    /// Called when an upload progress update occurs.
    fn on_update(&self, update: &ProgressUpdate);
}

/// An implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Clone, Hash)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_update(&self, _update: &ProgressUpdate) {
        // Do nothing
    }
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for Box<C> {
    fn on_update(&self, update: &ProgressUpdate) {
        self.as_ref().on_update(update)
    }
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for Arc<C> {
    fn on_update(&self, update: &ProgressUpdate) {
        self.as_ref().on_update(update)
    }
}

/// A type representing progress updates for a single file upload.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ProgressUpdate {
    file_name: String,
    bytes_sent: u64,
    size: u64,
}

impl ProgressUpdate {
    pub fn new<S: Into<String>>(file_name: S, bytes_sent: u64, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            bytes_sent,
            size,
        }
    }

    /// Returns the name of the file being uploaded.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the cumulative number of request body bytes handed to the
    /// transport.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Returns the total size of the request body in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the upload percentage completed, rounded to the nearest
    /// whole percent.
    pub fn percent_done(&self) -> u8 {
        if self.size == 0 {
            return 0;
        }
        let sent = self.bytes_sent.min(self.size);
        ((sent * 100 + self.size / 2) / self.size) as u8
    }

    /// Tests if every byte of the body has been handed over.
    pub fn completed(&self) -> bool {
        self.size > 0 && self.bytes_sent >= self.size
    }
}
