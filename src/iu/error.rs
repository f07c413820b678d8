// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Image service API errors and such.

use std::path::PathBuf;

use hyper::StatusCode;

use serde_json;

use iu::api::response;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
        UrlParse(::url::ParseError);
        Hyper(::hyper::Error);
    }

    errors {
        ApiError(status: StatusCode, body: String) {
            description("api error")
            display("API error :: {} :: {}", status, body)
        }

        EmptySelection {
            description("no files selected")
            display("No files have been selected for upload")
        }

        InvalidUnicodePath(path: PathBuf) {
            description("invalid unicode path")
            display("Invalid unicode characters in path :: {:?}", path)
        }

        InvalidConfig(reason: String) {
            description("invalid configuration")
            display("Invalid configuration :: {}", reason)
        }
    }
}

impl Error {
    /// Returns the human-readable `message` the server attached to an error
    /// response, if there is one.
    pub fn server_message(&self) -> Option<String> {
        match *self.kind() {
            ErrorKind::ApiError(_, ref body) => {
                serde_json::from_str::<response::ErrorMessage>(body)
                    .ok()
                    .and_then(|payload| payload.message)
                    .filter(|message| !message.is_empty())
            }
            _ => None,
        }
    }
}
