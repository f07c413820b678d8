// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

/// Representation of an image stored by the image service.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    name: String,
    url: String,
}

impl ImageInfo {
    pub fn new<S: Into<String>, T: Into<String>>(name: S, url: T) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The URL the image can be fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }
}
