// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

use serde_json;

/// The reply to a successful upload. The image service may answer with an
/// empty body, a JSON object carrying a `message`, or plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Interprets a successful upload response body.
    pub fn from_body(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        serde_json::from_str::<Self>(text).unwrap_or_else(|_| Self::new(text))
    }
}

/// An error payload returned by the image service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bodies_carry_no_message() {
        assert_eq!(UploadResponse::from_body(b""), UploadResponse::default());
        assert_eq!(UploadResponse::from_body(b" \n"), UploadResponse::default());
    }

    #[test]
    fn json_bodies_are_decoded() {
        let response =
            UploadResponse::from_body(br#"{"message":"Uploaded the file successfully: a.png"}"#);
        assert_eq!(
            response.message.as_ref().map(String::as_str),
            Some("Uploaded the file successfully: a.png")
        );
        assert_eq!(UploadResponse::from_body(b"{}"), UploadResponse::default());
    }

    #[test]
    fn text_bodies_become_the_message() {
        assert_eq!(UploadResponse::from_body(b"OK"), UploadResponse::new("OK"));
    }
}
