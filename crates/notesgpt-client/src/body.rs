//! Request payloads and the content type they imply.

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use serde::Serialize;

use notesgpt_core::result::AppResult;

/// Body of an outgoing request.
///
/// Callers pass a string payload for ordinary calls and a structured
/// multipart form for uploads; the content type follows from the variant.
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body and no content type.
    #[default]
    Empty,
    /// A JSON document, sent as `application/json`.
    Json(String),
    /// A multipart form; reqwest sets the boundary content type.
    Multipart(Form),
}

impl RequestBody {
    /// Serialize `value` into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> AppResult<Self> {
        Ok(Self::Json(serde_json::to_string(value)?))
    }

    /// The content type this body sends, if the client sets one explicitly.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Empty | Self::Multipart(_) => None,
        }
    }

    /// Attach the body to a request builder.
    pub(crate) fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Empty => builder,
            Self::Json(json) => builder.header(CONTENT_TYPE, "application/json").body(json),
            Self::Multipart(form) => builder.multipart(form),
        }
    }
}
