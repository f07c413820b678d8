// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! A single-file `multipart/form-data` request body.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::vec;

use bytes::Bytes;

use chrono::Utc;

use iu::model::SelectedFile;

static BOUNDARY_SEQ: AtomicUsize = AtomicUsize::new(0);

/// A `multipart/form-data` body carrying one file under one form field.
///
/// The part head and the closing boundary are encoded once. The file
/// content is shared with the `SelectedFile` it came from.
#[derive(Debug, Clone)]
pub struct FileForm {
    boundary: String,
    head: Bytes,
    content: Bytes,
    tail: Bytes,
}

impl FileForm {
    pub fn new(field: &str, file: &SelectedFile) -> Self {
        Self::with_boundary(field, file, next_boundary())
    }

    pub fn with_boundary<S: Into<String>>(field: &str, file: &SelectedFile, boundary: S) -> Self {
        let boundary = boundary.into();
        let head = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n",
            boundary = boundary,
            field = escape_quoted(field),
            file_name = escape_quoted(file.name()),
            content_type = file.content_type()
        );
        let tail = format!("\r\n--{boundary}--\r\n", boundary = boundary);

        Self {
            boundary,
            head: Bytes::from(head),
            content: file.shared_content(),
            tail: Bytes::from(tail),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The value of the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The encoded body length in bytes.
    pub fn len(&self) -> u64 {
        (self.head.len() + self.content.len() + self.tail.len()) as u64
    }

    /// Consumes the form, returning an iterator over body chunks of at most
    /// `chunk_size` bytes. Chunks are views into the form's buffers.
    pub fn into_chunks(self, chunk_size: usize) -> FormChunks {
        FormChunks {
            parts: vec![self.head, self.content, self.tail].into_iter(),
            current: Bytes::new(),
            chunk_size: chunk_size.max(1),
        }
    }
}

/// An iterator over the chunks of an encoded form body.
pub struct FormChunks {
    parts: vec::IntoIter<Bytes>,
    current: Bytes,
    chunk_size: usize,
}

impl Iterator for FormChunks {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.current.is_empty() {
                let at = self.chunk_size.min(self.current.len());
                return Some(self.current.split_to(at));
            }
            self.current = self.parts.next()?;
        }
    }
}

fn next_boundary() -> String {
    let now = Utc::now();
    format!(
        "----------------iu{:x}{:08x}{:04x}",
        now.timestamp(),
        now.timestamp_subsec_nanos(),
        BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed) & 0xffff
    )
}

// Quotes and line breaks inside quoted header parameters are percent-encoded,
// the way browsers encode form file names.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
