// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Files chosen for upload, and their local previews.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use bytes::Bytes;

use iu;
use iu::error::ErrorKind;

const OCTET_STREAM: &str = "application/octet-stream";

lazy_static! {
    static ref IMAGE_CONTENT_TYPES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("apng", "image/apng");
        m.insert("avif", "image/avif");
        m.insert("bmp", "image/bmp");
        m.insert("gif", "image/gif");
        m.insert("heic", "image/heic");
        m.insert("heif", "image/heif");
        m.insert("ico", "image/x-icon");
        m.insert("jfif", "image/jpeg");
        m.insert("jpe", "image/jpeg");
        m.insert("jpeg", "image/jpeg");
        m.insert("jpg", "image/jpeg");
        m.insert("jxl", "image/jxl");
        m.insert("pjp", "image/jpeg");
        m.insert("pjpeg", "image/jpeg");
        m.insert("png", "image/png");
        m.insert("svg", "image/svg+xml");
        m.insert("tif", "image/tiff");
        m.insert("tiff", "image/tiff");
        m.insert("webp", "image/webp");
        m
    };
}

/// A file selected by the user, held in memory for the duration of an
/// upload batch.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content: Bytes,
}

impl SelectedFile {
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: Bytes::from(content),
        }
    }

    /// Reads the file at `path` into memory. The file name, sans path, is
    /// used as the display name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> iu::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from)
            .ok_or_else(|| ErrorKind::InvalidUnicodePath(path.to_path_buf()))?;
        let content = fs::read(path)?;
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// A handle to the file's bytes that shares, rather than copies, them.
    pub fn shared_content(&self) -> Bytes {
        self.content.clone()
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// The MIME type guessed from the file extension. Files of unknown
    /// type are sent as `application/octet-stream`.
    pub fn content_type(&self) -> &'static str {
        self.image_content_type().unwrap_or(OCTET_STREAM)
    }

    /// Tests if the file extension names a known image type.
    pub fn is_image(&self) -> bool {
        self.image_content_type().is_some()
    }

    fn image_content_type(&self) -> Option<&'static str> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| IMAGE_CONTENT_TYPES.get(ext.to_lowercase().as_str()))
            .cloned()
    }

    /// Creates the local preview for the file at position `index` of a
    /// selection. The preview shares the file's bytes.
    pub fn preview(&self, index: usize) -> Preview {
        Preview {
            alt: format!("image-{}", index),
            file_name: self.name.clone(),
            content_type: self.content_type(),
            content: self.content.clone(),
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

/// An in-memory preview of a selected image.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    alt: String,
    file_name: String,
    content_type: &'static str,
    content: Bytes,
}

impl Preview {
    /// The alternate text, `image-<index>`.
    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.content
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Preview")
            .field("alt", &self.alt)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile;

    #[test]
    fn content_type_is_guessed_from_the_extension() {
        assert_eq!(SelectedFile::new("a.PNG", vec![]).content_type(), "image/png");
        assert_eq!(SelectedFile::new("b.jpeg", vec![]).content_type(), "image/jpeg");
        assert_eq!(SelectedFile::new("c.svg", vec![]).content_type(), "image/svg+xml");
        assert_eq!(SelectedFile::new("IMG_0001.HEIC", vec![]).content_type(), "image/heic");
        assert_eq!(SelectedFile::new("photo.jfif", vec![]).content_type(), "image/jpeg");
        assert_eq!(SelectedFile::new("art.jxl", vec![]).content_type(), "image/jxl");
        assert_eq!(SelectedFile::new("notes.txt", vec![]).content_type(), OCTET_STREAM);
        assert_eq!(SelectedFile::new("README", vec![]).content_type(), OCTET_STREAM);
    }

    #[test]
    fn only_image_extensions_count_as_images() {
        assert!(SelectedFile::new("holiday.webp", vec![]).is_image());
        assert!(SelectedFile::new("holiday.heif", vec![]).is_image());
        assert!(!SelectedFile::new("scan", vec![]).is_image());
        assert!(!SelectedFile::new("holiday.pdf", vec![]).is_image());
        assert!(!SelectedFile::new(".png", vec![]).is_image());
    }

    #[test]
    fn preview_shares_the_file_bytes() {
        let file = SelectedFile::new("cat.gif", vec![1, 2, 3]);
        let preview = file.preview(4);
        assert_eq!(preview.alt(), "image-4");
        assert_eq!(preview.file_name(), "cat.gif");
        assert_eq!(preview.content_type(), "image/gif");
        assert_eq!(preview.bytes(), file.content());
    }

    #[test]
    fn reading_a_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.jpg");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"not really a jpeg").unwrap();
        drop(f);

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name(), "dog.jpg");
        assert_eq!(file.size(), 17);
        assert_eq!(file.content(), b"not really a jpeg");
    }

    #[test]
    fn reading_a_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SelectedFile::from_path(dir.path().join("missing.png"));
        match result {
            Err(iu::Error(ErrorKind::Io(_), _)) => {}
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
