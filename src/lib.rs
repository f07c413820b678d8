// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

extern crate bytes;
extern crate chrono;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate hyper;
extern crate hyper_tls;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;
extern crate url;

#[cfg(test)]
extern crate tempfile;
#[cfg(test)]
extern crate tokio;

mod iu;

// Publicly re-export:
pub use iu::{api, error, model, session};
pub use iu::api::{ImageStore, Transport};
pub use iu::config::{Config, DEFAULT_API_LOC};
pub use iu::session::{BatchReport, UploadOutcome, UploadSession};
pub use iu::types::{Future, Result};
