// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Library configuration options.

use std::env;

use url::Url;

use iu;
use iu::error::ErrorKind;

/// The environment variable consulted by `Config::from_env`.
pub const API_LOC_VAR: &str = "IMAGES_UPLOAD_API_LOC";

/// The image service location used when `API_LOC_VAR` is unset.
pub const DEFAULT_API_LOC: &str = "http://localhost:8080";

const DEFAULT_LIST_ROUTE: &str = "/files";
const DEFAULT_UPLOAD_ROUTE: &str = "/upload";
const DEFAULT_FORM_FIELD: &str = "file";
const DEFAULT_CHUNK_SIZE: usize = 8000;

/// Configuration options for the image service client.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    api_url: Url,
    list_route: String,
    upload_route: String,
    form_field: String,
    chunk_size: usize,
}

impl Config {
    /// Creates a configuration targeting the image service at `api_url`.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            list_route: DEFAULT_LIST_ROUTE.to_string(),
            upload_route: DEFAULT_UPLOAD_ROUTE.to_string(),
            form_field: DEFAULT_FORM_FIELD.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Parses `api_loc` and creates a configuration from it.
    pub fn parse<S: AsRef<str>>(api_loc: S) -> iu::Result<Self> {
        let api_url = api_loc.as_ref().parse::<Url>()?;
        if api_url.cannot_be_a_base() {
            return Err(ErrorKind::InvalidConfig(format!("not a base url: {}", api_url)).into());
        }
        Ok(Self::new(api_url))
    }

    /// Reads the service location from `IMAGES_UPLOAD_API_LOC`, falling back
    /// to `DEFAULT_API_LOC`.
    pub fn from_env() -> iu::Result<Self> {
        let api_loc = env::var(API_LOC_VAR).unwrap_or_else(|_| DEFAULT_API_LOC.to_string());
        Self::parse(api_loc)
    }

    pub fn with_list_route<S: Into<String>>(mut self, route: S) -> Self {
        self.list_route = route.into();
        self
    }

    pub fn with_upload_route<S: Into<String>>(mut self, route: S) -> Self {
        self.upload_route = route.into();
        self
    }

    pub fn with_form_field<S: Into<String>>(mut self, field: S) -> Self {
        self.form_field = field.into();
        self
    }

    /// Sets the size of the body chunks handed to the transport. Each chunk
    /// produces one progress update. Zero is bumped to one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn list_route(&self) -> &str {
        &self.list_route
    }

    pub fn upload_route(&self) -> &str {
        &self.upload_route
    }

    pub fn form_field(&self) -> &str {
        &self.form_field
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_image_service_routes() {
        let config = Config::parse("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.list_route(), "/files");
        assert_eq!(config.upload_route(), "/upload");
        assert_eq!(config.form_field(), "file");
        assert_eq!(config.chunk_size(), 8000);
        assert_eq!(config.api_url().port(), Some(9000));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::parse(DEFAULT_API_LOC)
            .unwrap()
            .with_list_route("/images")
            .with_upload_route("/images/new")
            .with_form_field("image")
            .with_chunk_size(0);
        assert_eq!(config.list_route(), "/images");
        assert_eq!(config.upload_route(), "/images/new");
        assert_eq!(config.form_field(), "image");
        assert_eq!(config.chunk_size(), 1);
    }

    #[test]
    fn rejects_unparseable_locations() {
        assert!(Config::parse("not a url").is_err());
        assert!(Config::parse("mailto:someone@example.com").is_err());
    }
}
