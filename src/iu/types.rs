// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

/// Library-wide type definitions.

use futures;

use std::result;

use iu::error;

/// A Result type parameterized by `iu::error::Error`
pub type Result<T> = result::Result<T, error::Error>;

/// A Future type parameterized by `iu::error::Error`
pub type Future<T> = Box<dyn futures::Future<Item = T, Error = error::Error> + Send>;
